pub mod integrator;
pub mod runner;
pub mod event;

pub use runner::{propagate, run_to_event, IntegrationOutcome, Stats};
pub use integrator::{dopri5_step, StepController, StepResult};
pub use event::{Crossing, EventDetector, TrajectoryEvent};
