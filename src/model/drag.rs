use super::TrajectoryModel;
use crate::body::Body;
use crate::dynamics::state::{SolverConfig, State};
use crate::error::TrajectoryError;
use crate::sim::{propagate, run_to_event, TrajectoryEvent};

/// Quadratic-drag model, integrated numerically.
#[derive(Debug, Clone, Copy)]
pub struct Drag {
    drag_ratio: f64,
    config: SolverConfig,
}

impl Drag {
    /// Fails with a configuration error unless the body carries a complete,
    /// usable set of drag parameters.
    pub fn new(body: &Body, config: SolverConfig) -> Result<Self, TrajectoryError> {
        config.validate()?;
        Ok(Self { drag_ratio: body.drag_ratio()?, config })
    }

    pub fn drag_ratio(&self) -> f64 {
        self.drag_ratio
    }

    fn horizon(&self, vacuum_time: f64) -> f64 {
        self.config.horizon_factor * vacuum_time
    }

    fn stop_at(
        &self,
        launch: &State,
        event: TrajectoryEvent,
        vacuum_time: f64,
    ) -> Result<Option<State>, TrajectoryError> {
        let outcome = run_to_event(
            launch,
            self.drag_ratio,
            &event,
            self.horizon(vacuum_time),
            &self.config,
        )?;
        if !outcome.event_found {
            log::debug!("{:?} not found within t = {:.4}", event, outcome.state.time);
            return Ok(None);
        }
        Ok(Some(outcome.state))
    }
}

impl TrajectoryModel for Drag {
    fn state_at(&self, launch: &State, t: f64) -> Result<State, TrajectoryError> {
        propagate(launch, self.drag_ratio, t, &self.config)
    }

    fn landing(&self, launch: &State, vacuum_time: f64) -> Result<Option<State>, TrajectoryError> {
        Ok(self
            .stop_at(launch, TrajectoryEvent::Impact, vacuum_time)?
            .map(|mut s| {
                s.pos.y = 0.0;
                s
            }))
    }

    fn apex(&self, launch: &State, vacuum_time: f64) -> Result<Option<State>, TrajectoryError> {
        self.stop_at(launch, TrajectoryEvent::Apex, vacuum_time)
    }

    fn reach_x(
        &self,
        launch: &State,
        x: f64,
        vacuum_time: f64,
    ) -> Result<Option<State>, TrajectoryError> {
        self.stop_at(launch, TrajectoryEvent::ReachX(x), vacuum_time)
    }
}
