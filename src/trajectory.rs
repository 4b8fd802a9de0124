use nalgebra::Vector2;

use crate::body::Body;
use crate::dynamics::state::{SolverConfig, State};
use crate::error::TrajectoryError;
use crate::model::{vacuum, Drag, Medium, TrajectoryModel, Vacuum};
use crate::sim::propagate;
use crate::targeting;

/// A point on the trajectory with the time it is reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub x: f64,
    pub y: f64,
    pub t: f64,
}

impl TrajectoryPoint {
    pub fn from_state(state: &State) -> Self {
        Self { x: state.pos.x, y: state.pos.y, t: state.time }
    }
}

/// Query façade over a [`Body`].
///
/// Every query takes a [`Medium`]: `Vacuum` evaluates closed forms, `Air`
/// integrates the drag equations. Degenerate launches (grounded, dropped,
/// no horizontal motion) are answered here, identically for both media and
/// before any drag parameter is looked at.
#[derive(Debug, Clone, Copy)]
pub struct Trajectory<'a> {
    body: &'a Body,
    config: SolverConfig,
}

impl<'a> Trajectory<'a> {
    pub fn new(body: &'a Body) -> Self {
        Self { body, config: SolverConfig::default() }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn body(&self) -> &Body {
        self.body
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn model(&self, medium: Medium) -> Result<Box<dyn TrajectoryModel>, TrajectoryError> {
        Ok(match medium {
            Medium::Vacuum => Box::new(Vacuum),
            Medium::Air => Box::new(Drag::new(self.body, self.config)?),
        })
    }

    // -----------------------------------------------------------------------
    // State at a time
    // -----------------------------------------------------------------------

    pub fn state_at(&self, t: f64, medium: Medium) -> Result<State, TrajectoryError> {
        self.model(medium)?.state_at(&self.body.launch_state(), t)
    }

    pub fn position(&self, t: f64, medium: Medium) -> Result<Vector2<f64>, TrajectoryError> {
        self.model(medium)?.position(&self.body.launch_state(), t)
    }

    pub fn velocity(&self, t: f64, medium: Medium) -> Result<Vector2<f64>, TrajectoryError> {
        self.model(medium)?.velocity(&self.body.launch_state(), t)
    }

    pub fn speed(&self, t: f64, medium: Medium) -> Result<f64, TrajectoryError> {
        self.velocity(t, medium).map(|v| v.norm())
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Landing point and time of impact.
    ///
    /// Errors with `NoRealSolution` when the body never lands even without
    /// drag; `Ok(None)` when the integrated impact is not found in time.
    pub fn landing_point(&self, medium: Medium) -> Result<Option<TrajectoryPoint>, TrajectoryError> {
        self.land(&self.body.launch_state(), medium)
    }

    /// As [`landing_point`](Self::landing_point), launched with `velocity`
    /// instead of the body's own.
    pub fn landing_point_with_velocity(
        &self,
        medium: Medium,
        velocity: Vector2<f64>,
    ) -> Result<Option<TrajectoryPoint>, TrajectoryError> {
        self.land(&self.body.launch_state_with(velocity), medium)
    }

    fn land(&self, launch: &State, medium: Medium) -> Result<Option<TrajectoryPoint>, TrajectoryError> {
        let t_vac = vacuum::landing_time(launch)?;
        if t_vac == 0.0 {
            return Ok(Some(TrajectoryPoint { x: launch.pos.x, y: 0.0, t: 0.0 }));
        }
        Ok(self
            .model(medium)?
            .landing(launch, t_vac)?
            .map(|s| TrajectoryPoint::from_state(&s)))
    }

    /// Highest point of the flight and when it is reached.
    pub fn max_altitude(&self, medium: Medium) -> Result<Option<TrajectoryPoint>, TrajectoryError> {
        let launch = self.body.launch_state();
        if launch.vel.y <= 0.0 {
            return Ok(Some(TrajectoryPoint::from_state(&launch)));
        }
        let t_apex = vacuum::apex_time(&launch);
        Ok(self
            .model(medium)?
            .apex(&launch, t_apex)?
            .map(|s| TrajectoryPoint::from_state(&s)))
    }

    /// Time for the body to reach abscissa `x`.
    ///
    /// Returns `Some(0.0)` for a body with no horizontal velocity, whatever
    /// `x` is; `None` when `x` is behind the launch point or is not reached
    /// within the search horizon.
    pub fn time_to_reach_x(&self, x: f64, medium: Medium) -> Result<Option<f64>, TrajectoryError> {
        let launch = self.body.launch_state();
        let estimate = match vacuum::time_to_reach_x(&launch, x) {
            Some(t) => t,
            None => return Ok(None),
        };
        if estimate == 0.0 {
            return Ok(Some(0.0));
        }
        Ok(self.model(medium)?.reach_x(&launch, x, estimate)?.map(|s| s.time))
    }

    pub fn total_flight_time(&self, medium: Medium) -> Result<Option<f64>, TrajectoryError> {
        Ok(self.landing_point(medium)?.map(|p| p.t))
    }

    /// Launch speed at `angle_deg` that lands the body at `target_x`.
    ///
    /// `tolerance` is relative to the target distance and only used with drag.
    pub fn required_speed(
        &self,
        target_x: f64,
        angle_deg: f64,
        medium: Medium,
        tolerance: f64,
    ) -> Result<f64, TrajectoryError> {
        targeting::required_speed(self, target_x, angle_deg, medium, tolerance)
    }

    // -----------------------------------------------------------------------
    // Sampling (consumed by plotting and export)
    // -----------------------------------------------------------------------

    /// `resolution + 1` evenly spaced states from `t_start` to `t_end`.
    pub fn sample_states(
        &self,
        t_start: f64,
        t_end: f64,
        resolution: usize,
        medium: Medium,
    ) -> Result<Vec<State>, TrajectoryError> {
        if resolution == 0 {
            return Err(TrajectoryError::invalid("resolution must be at least 1"));
        }
        if !t_start.is_finite() || !t_end.is_finite() {
            return Err(TrajectoryError::invalid("sampling interval must be finite"));
        }
        let dt = (t_end - t_start) / resolution as f64;
        let times = (0..=resolution).map(|i| if i == resolution { t_end } else { t_start + dt * i as f64 });

        let launch = self.body.launch_state();
        match medium {
            Medium::Vacuum => Ok(times.map(|t| vacuum::state_at(&launch, t)).collect()),
            Medium::Air => {
                let ratio = Drag::new(self.body, self.config)?.drag_ratio();
                let mut states = Vec::with_capacity(resolution + 1);
                let mut current = launch;
                for t in times {
                    current = propagate(&current, ratio, t, &self.config)?;
                    states.push(current);
                }
                Ok(states)
            }
        }
    }

    /// Positions along the trajectory, for plotting.
    pub fn sample(
        &self,
        t_start: f64,
        t_end: f64,
        resolution: usize,
        medium: Medium,
    ) -> Result<Vec<Vector2<f64>>, TrajectoryError> {
        Ok(self
            .sample_states(t_start, t_end, resolution, medium)?
            .into_iter()
            .map(|s| s.pos)
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{presets, BodyBuilder};

    fn kicked_football() -> Body {
        let mut b = presets::football();
        b.velocity = Vector2::new(20.0, 20.0);
        b
    }

    #[test]
    fn grounded_body_short_circuits() {
        // No drag parameters: the integrator must never be reached.
        let body = BodyBuilder::new().position(7.0, 0.0).velocity(3.0, 0.0).build();
        let tr = body.trajectory();
        let p = tr.landing_point(Medium::Air).unwrap().unwrap();
        assert_eq!(p, TrajectoryPoint { x: 7.0, y: 0.0, t: 0.0 });
    }

    #[test]
    fn dropped_body_apex_is_launch_in_both_media() {
        let body = BodyBuilder::new().position(2.0, 10.0).velocity(4.0, -1.0).build();
        let tr = body.trajectory();
        let expected = TrajectoryPoint { x: 2.0, y: 10.0, t: 0.0 };
        assert_eq!(tr.max_altitude(Medium::Vacuum).unwrap(), Some(expected));
        assert_eq!(tr.max_altitude(Medium::Air).unwrap(), Some(expected));
    }

    #[test]
    fn air_queries_need_drag_parameters() {
        let body = BodyBuilder::new().velocity(20.0, 20.0).build();
        let tr = body.trajectory();
        assert_eq!(tr.position(1.0, Medium::Air), Err(TrajectoryError::MissingDragParameters));
        assert_eq!(tr.landing_point(Medium::Air), Err(TrajectoryError::MissingDragParameters));
    }

    #[test]
    fn target_behind_is_none() {
        let body = kicked_football();
        let tr = body.trajectory();
        assert_eq!(tr.time_to_reach_x(-5.0, Medium::Vacuum).unwrap(), None);
        assert_eq!(tr.time_to_reach_x(-5.0, Medium::Air).unwrap(), None);
        assert_eq!(tr.time_to_reach_x(0.0, Medium::Air).unwrap(), Some(0.0));
    }

    #[test]
    fn override_velocity_leaves_body_untouched() {
        let body = kicked_football();
        let tr = body.trajectory();
        let p = tr
            .landing_point_with_velocity(Medium::Vacuum, Vector2::new(10.0, 10.0))
            .unwrap()
            .unwrap();
        assert!((p.t - 20.0 / 9.8).abs() < 1e-9);
        assert!((p.x - 200.0 / 9.8).abs() < 1e-9);
        assert_eq!(body.velocity, Vector2::new(20.0, 20.0));
    }

    #[test]
    fn small_hop_from_the_ground_lands_in_both_media() {
        let mut body = presets::football();
        body.velocity = Vector2::new(10.0, 0.004);
        let tr = body.trajectory();
        let vac = tr.landing_point(Medium::Vacuum).unwrap().unwrap();
        let air = tr.landing_point(Medium::Air).unwrap().unwrap();
        assert!((vac.x - 0.00816).abs() < 1e-5);
        assert!((air.x - vac.x).abs() < 1e-6, "air {:?} vs vacuum {:?}", air, vac);
        assert!((air.t - vac.t).abs() < 1e-6);
    }

    #[test]
    fn short_horizon_from_config_misses_the_landing() {
        let body = kicked_football();
        let config = SolverConfig { horizon_factor: 0.5, ..Default::default() };
        let tr = body.trajectory().with_config(config);
        assert_eq!(tr.config().horizon_factor, 0.5);
        // Horizon of ~2.04 s, landing at ~3.46 s
        assert_eq!(tr.landing_point(Medium::Air).unwrap(), None);
        assert_eq!(tr.total_flight_time(Medium::Air).unwrap(), None);
        assert!(body.trajectory().landing_point(Medium::Air).unwrap().is_some());
    }

    #[test]
    fn sampling_endpoints() {
        let body = kicked_football();
        let tr = body.trajectory();
        let t_land = tr.total_flight_time(Medium::Air).unwrap().unwrap();
        let pts = tr.sample(0.0, t_land, 50, Medium::Air).unwrap();
        assert_eq!(pts.len(), 51);
        assert_eq!(pts[0], Vector2::zeros());
        assert!(pts[50].y.abs() < 1e-6);

        let vac = tr.sample(0.0, 3.0, 3, Medium::Vacuum).unwrap();
        assert_eq!(vac[3].x, 60.0);
        assert!(tr.sample(0.0, 1.0, 0, Medium::Vacuum).is_err());
    }

    #[test]
    fn air_samples_match_point_queries() {
        let body = kicked_football();
        let tr = body.trajectory();
        let pts = tr.sample(0.0, 3.0, 6, Medium::Air).unwrap();
        let direct = tr.position(3.0, Medium::Air).unwrap();
        assert!((pts[6] - direct).norm() < 1e-6);
    }
}
