use nalgebra::Vector2;

use super::TrajectoryModel;
use crate::dynamics::state::State;
use crate::error::TrajectoryError;
use crate::physics::G;

// ---------------------------------------------------------------------------
// Closed-form kinematics without drag
// ---------------------------------------------------------------------------

pub fn position(launch: &State, t: f64) -> Vector2<f64> {
    Vector2::new(
        launch.pos.x + launch.vel.x * t,
        launch.pos.y + launch.vel.y * t - G * t * t / 2.0,
    )
}

pub fn velocity(launch: &State, t: f64) -> Vector2<f64> {
    Vector2::new(launch.vel.x, launch.vel.y - G * t)
}

pub fn speed(launch: &State, t: f64) -> f64 {
    velocity(launch, t).norm()
}

pub fn state_at(launch: &State, t: f64) -> State {
    State { time: t, pos: position(launch, t), vel: velocity(launch, t) }
}

/// Larger root of y0 + vy0 t - g t^2 / 2 = 0.
///
/// Zero when the body starts on the ground moving level or down. Fails with
/// `NoRealSolution` when the discriminant is negative, and also when both
/// roots are negative: a body below ground moving down has a real root, but
/// only in the past, so it never lands.
pub fn landing_time(launch: &State) -> Result<f64, TrajectoryError> {
    let (y0, vy0) = (launch.pos.y, launch.vel.y);
    if y0 == 0.0 && vy0 <= 0.0 {
        return Ok(0.0);
    }
    let discriminant = (vy0 / G).powi(2) + 2.0 * y0 / G;
    if discriminant < 0.0 {
        return Err(TrajectoryError::NoRealSolution { reason: "body never lands" });
    }
    let t = vy0 / G + discriminant.sqrt();
    if t < 0.0 {
        // Both roots lie in the past: below ground and moving down.
        return Err(TrajectoryError::NoRealSolution { reason: "body never lands" });
    }
    Ok(t)
}

/// Time of the apex; zero for a body that is dropped or already descending.
pub fn apex_time(launch: &State) -> f64 {
    if launch.vel.y <= 0.0 {
        0.0
    } else {
        launch.vel.y / G
    }
}

/// Time to reach abscissa `x`.
///
/// Zero when there is no horizontal motion (the caller interprets this);
/// `None` when `x` lies behind the direction of travel.
pub fn time_to_reach_x(launch: &State, x: f64) -> Option<f64> {
    if launch.vel.x == 0.0 {
        return Some(0.0);
    }
    let t = (x - launch.pos.x) / launch.vel.x;
    if t < 0.0 {
        None
    } else {
        Some(t)
    }
}

/// The closed-form model as a [`TrajectoryModel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Vacuum;

impl TrajectoryModel for Vacuum {
    fn state_at(&self, launch: &State, t: f64) -> Result<State, TrajectoryError> {
        if !t.is_finite() {
            return Err(TrajectoryError::invalid(format!("time must be finite, got {}", t)));
        }
        Ok(state_at(launch, t))
    }

    fn landing(&self, launch: &State, vacuum_time: f64) -> Result<Option<State>, TrajectoryError> {
        let mut s = state_at(launch, vacuum_time);
        s.pos.y = 0.0;
        Ok(Some(s))
    }

    fn apex(&self, launch: &State, vacuum_time: f64) -> Result<Option<State>, TrajectoryError> {
        Ok(Some(state_at(launch, vacuum_time)))
    }

    fn reach_x(
        &self,
        launch: &State,
        _x: f64,
        vacuum_time: f64,
    ) -> Result<Option<State>, TrajectoryError> {
        Ok(Some(state_at(launch, vacuum_time)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn kick() -> State {
        State::launch(Vector2::new(0.0, 0.0), Vector2::new(20.0, 20.0))
    }

    #[test]
    fn kick_at_three_seconds() {
        let p = position(&kick(), 3.0);
        assert_eq!(p.x, 60.0);
        assert!((p.y - 15.90).abs() < 0.01);
        let v = velocity(&kick(), 3.0);
        assert_eq!(v.x, 20.0);
        assert!((v.y + 9.40).abs() < 0.01);
        assert!((speed(&kick(), 3.0) - 22.10).abs() < 0.01);
    }

    #[test]
    fn landing_time_of_kick() {
        let t = landing_time(&kick()).unwrap();
        assert!((t - 4.08).abs() < 0.01);
        assert!(position(&kick(), t).y.abs() < 1e-9);
    }

    #[test]
    fn grounded_body_lands_immediately() {
        let s = State::launch(Vector2::new(3.0, 0.0), Vector2::new(5.0, 0.0));
        assert_eq!(landing_time(&s), Ok(0.0));
        let s = State::launch(Vector2::new(3.0, 0.0), Vector2::new(5.0, -2.0));
        assert_eq!(landing_time(&s), Ok(0.0));
    }

    #[test]
    fn body_in_pit_never_lands() {
        let s = State::launch(Vector2::new(0.0, -10.0), Vector2::zeros());
        assert!(matches!(landing_time(&s), Err(TrajectoryError::NoRealSolution { .. })));
        let s = State::launch(Vector2::new(0.0, -10.0), Vector2::new(0.0, -20.0));
        assert!(matches!(landing_time(&s), Err(TrajectoryError::NoRealSolution { .. })));
    }

    #[test]
    fn shot_out_of_pit_lands_on_the_way_down() {
        let s = State::launch(Vector2::new(0.0, -10.0), Vector2::new(0.0, 20.0));
        let t = landing_time(&s).unwrap();
        assert!(t > apex_time(&s));
        assert!(position(&s, t).y.abs() < 1e-9);
    }

    #[test]
    fn apex_of_dropped_body_is_launch() {
        let s = State::launch(Vector2::new(0.0, 10.0), Vector2::zeros());
        assert_eq!(apex_time(&s), 0.0);
        assert!((apex_time(&kick()) - 20.0 / G).abs() < 1e-12);
    }

    #[test]
    fn reach_x_cases() {
        assert_eq!(time_to_reach_x(&kick(), 40.0), Some(2.0));
        assert_eq!(time_to_reach_x(&kick(), -1.0), None);
        let vertical = State::launch(Vector2::new(5.0, 0.0), Vector2::new(0.0, 10.0));
        assert_eq!(time_to_reach_x(&vertical, 100.0), Some(0.0));
    }
}
