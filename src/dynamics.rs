pub mod state;

use crate::physics::{drag_accel, gravity_accel};
use state::{Deriv, State};

// ---------------------------------------------------------------------------
// Equations of motion (planar point mass)
// ---------------------------------------------------------------------------

/// State derivatives for a point mass under uniform gravity and quadratic drag.
///
///   dvx/dt = -(k/m) vx |v|
///   dx/dt  = vx
///   dvy/dt = -(k/m) vy |v| - g
///   dy/dt  = vy
///
/// `drag_ratio` is k/m; zero gives the vacuum equations.
pub fn derivatives(state: &State, drag_ratio: f64) -> Deriv {
    Deriv {
        dpos: state.vel,
        dvel: gravity_accel() + drag_accel(&state.vel, drag_ratio),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::G;
    use nalgebra::Vector2;

    #[test]
    fn vacuum_is_pure_gravity() {
        let s = State::launch(Vector2::new(0.0, 0.0), Vector2::new(20.0, 20.0));
        let d = derivatives(&s, 0.0);
        assert_eq!(d.dpos, s.vel);
        assert!((d.dvel.x).abs() < 1e-12);
        assert!((d.dvel.y + G).abs() < 1e-12);
    }

    #[test]
    fn drag_matches_component_form() {
        let s = State::launch(Vector2::new(0.0, 0.0), Vector2::new(3.0, -4.0));
        let ratio = 0.02;
        let d = derivatives(&s, ratio);
        assert!((d.dvel.x - (-ratio * 3.0 * 5.0)).abs() < 1e-12);
        assert!((d.dvel.y - (-ratio * -4.0 * 5.0 - G)).abs() < 1e-12);
    }

    #[test]
    fn falling_body_is_slowed_by_drag() {
        let s = State::launch(Vector2::new(0.0, 100.0), Vector2::new(0.0, -30.0));
        let d = derivatives(&s, 0.0127);
        assert!(d.dvel.y > -G, "Drag should reduce downward acceleration");
    }
}
