use nalgebra::Vector2;

use crate::error::TrajectoryError;

// ---------------------------------------------------------------------------
// Planar state: time, position, velocity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct State {
    pub time: f64,
    pub pos: Vector2<f64>, // m, [x, y] with y = 0 on the ground plane
    pub vel: Vector2<f64>, // m/s
}

impl State {
    /// State at t = 0.
    pub fn launch(pos: Vector2<f64>, vel: Vector2<f64>) -> Self {
        Self { time: 0.0, pos, vel }
    }

    pub fn apply(&self, d: &Deriv, dt: f64) -> State {
        State {
            time: self.time + dt,
            pos: self.pos + d.dpos * dt,
            vel: self.vel + d.dvel * dt,
        }
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    /// Components in integrator order (vx, x, vy, y).
    pub fn components(&self) -> [f64; 4] {
        [self.vel.x, self.pos.x, self.vel.y, self.pos.y]
    }

    pub fn is_finite(&self) -> bool {
        self.time.is_finite() && self.components().iter().all(|c| c.is_finite())
    }
}

// ---------------------------------------------------------------------------
// State derivative
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deriv {
    pub dpos: Vector2<f64>, // velocity
    pub dvel: Vector2<f64>, // acceleration
}

impl Deriv {
    pub fn zeros() -> Self {
        Self { dpos: Vector2::zeros(), dvel: Vector2::zeros() }
    }

    /// Weighted sum of stage derivatives, sum(w_i * k_i).
    pub fn weighted(terms: &[(f64, &Deriv)]) -> Deriv {
        terms.iter().fold(Deriv::zeros(), |acc, (w, k)| Deriv {
            dpos: acc.dpos + k.dpos * *w,
            dvel: acc.dvel + k.dvel * *w,
        })
    }
}

// ---------------------------------------------------------------------------
// Solver configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub rtol: f64,
    pub atol: f64,
    pub initial_step: f64,     // s
    pub max_steps: u64,
    pub horizon_factor: f64,   // event search horizon, multiple of the vacuum estimate
    pub event_tolerance: f64,  // s, event time bracket width
    pub max_bisections: usize, // launch-speed search ceiling
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            rtol: 1e-9,
            atol: 1e-9,
            initial_step: 1e-3,
            max_steps: 1_000_000,
            horizon_factor: 10.0,
            event_tolerance: 1e-12,
            max_bisections: 200,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), TrajectoryError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.rtol) || !positive(self.atol) {
            return Err(TrajectoryError::invalid(format!(
                "tolerances must be positive and finite (rtol = {}, atol = {})",
                self.rtol, self.atol
            )));
        }
        if !positive(self.initial_step) || !positive(self.event_tolerance) {
            return Err(TrajectoryError::invalid(
                "initial step and event tolerance must be positive and finite",
            ));
        }
        if !positive(self.horizon_factor) || self.max_steps == 0 || self.max_bisections == 0 {
            return Err(TrajectoryError::invalid(
                "horizon factor, step limit and bisection limit must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_advances_time_and_state() {
        let s = State::launch(Vector2::new(0.0, 1.0), Vector2::new(2.0, 3.0));
        let d = Deriv { dpos: s.vel, dvel: Vector2::new(0.0, -9.8) };
        let n = s.apply(&d, 0.5);
        assert!((n.time - 0.5).abs() < 1e-12);
        assert!((n.pos.x - 1.0).abs() < 1e-12);
        assert!((n.pos.y - 2.5).abs() < 1e-12);
        assert!((n.vel.y + 1.9).abs() < 1e-12);
    }

    #[test]
    fn weighted_sum_of_derivs() {
        let a = Deriv { dpos: Vector2::new(1.0, 0.0), dvel: Vector2::new(0.0, 1.0) };
        let b = Deriv { dpos: Vector2::new(0.0, 2.0), dvel: Vector2::new(2.0, 0.0) };
        let w = Deriv::weighted(&[(0.5, &a), (2.0, &b)]);
        assert_eq!(w.dpos, Vector2::new(0.5, 4.0));
        assert_eq!(w.dvel, Vector2::new(4.0, 0.5));
    }

    #[test]
    fn components_follow_integrator_order() {
        let s = State::launch(Vector2::new(1.0, 2.0), Vector2::new(3.0, 4.0));
        assert_eq!(s.components(), [3.0, 1.0, 4.0, 2.0]);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SolverConfig::default().validate().is_ok());
        let bad = SolverConfig { rtol: 0.0, ..Default::default() };
        assert!(bad.validate().is_err());
    }
}
