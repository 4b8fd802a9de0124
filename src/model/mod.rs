//! Trajectory models behind the query façade.
//!
//! [`Vacuum`] evaluates the drag-free kinematics in closed form; [`Drag`]
//! integrates the quadratic-drag equations of motion. Both answer the same
//! questions through [`TrajectoryModel`], seeded with the vacuum estimate of
//! the time in question (used by [`Drag`] to size its search horizon).

pub mod drag;
pub mod vacuum;

pub use drag::Drag;
pub use vacuum::Vacuum;

use nalgebra::Vector2;

use crate::dynamics::state::State;
use crate::error::TrajectoryError;

/// Which model a query uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Medium {
    /// Gravity only.
    #[default]
    Vacuum,
    /// Gravity and quadratic air resistance.
    Air,
}

/// Shared capability of the analytic and integrated models.
///
/// Event queries return `Ok(None)` when the event does not occur within the
/// model's search horizon.
pub trait TrajectoryModel {
    fn state_at(&self, launch: &State, t: f64) -> Result<State, TrajectoryError>;

    /// Ground impact, seeded with the vacuum landing time.
    fn landing(&self, launch: &State, vacuum_time: f64) -> Result<Option<State>, TrajectoryError>;

    /// Highest point, seeded with the vacuum apex time.
    fn apex(&self, launch: &State, vacuum_time: f64) -> Result<Option<State>, TrajectoryError>;

    /// First time x is reached, seeded with the vacuum estimate.
    fn reach_x(
        &self,
        launch: &State,
        x: f64,
        vacuum_time: f64,
    ) -> Result<Option<State>, TrajectoryError>;

    fn position(&self, launch: &State, t: f64) -> Result<Vector2<f64>, TrajectoryError> {
        self.state_at(launch, t).map(|s| s.pos)
    }

    fn velocity(&self, launch: &State, t: f64) -> Result<Vector2<f64>, TrajectoryError> {
        self.state_at(launch, t).map(|s| s.vel)
    }
}
