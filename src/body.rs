use nalgebra::Vector2;

use crate::dynamics::state::State;
use crate::error::TrajectoryError;
use crate::physics::drag_factor;
use crate::trajectory::Trajectory;

// ---------------------------------------------------------------------------
// Body: launch configuration of a point mass
// ---------------------------------------------------------------------------

/// Launch state and optional drag parameters of a body.
///
/// A plain value: change it freely between queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vector2<f64>, // m, [x, y]
    pub velocity: Vector2<f64>, // m/s
    pub area: Option<f64>,      // reference area, m^2
    pub mass: Option<f64>,      // kg
    pub cd: Option<f64>,        // drag coefficient
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vector2::zeros(),
            velocity: Vector2::zeros(),
            area: None,
            mass: None,
            cd: None,
        }
    }
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_launch(&mut self, position: Vector2<f64>, velocity: Vector2<f64>) {
        self.position = position;
        self.velocity = velocity;
    }

    /// Set the launch velocity from a speed and an angle in degrees above +x.
    pub fn set_velocity_from_speed_angle(&mut self, speed: f64, angle_deg: f64) {
        let a = angle_deg.to_radians();
        self.velocity = Vector2::new(speed * a.cos(), speed * a.sin());
    }

    pub fn set_drag_parameters(&mut self, area: f64, mass: f64, cd: f64) {
        self.area = Some(area);
        self.mass = Some(mass);
        self.cd = Some(cd);
    }

    /// k = 0.5 * rho * cd * area. Requires all three drag parameters.
    pub fn drag_factor(&self) -> Result<f64, TrajectoryError> {
        match (self.area, self.mass, self.cd) {
            (Some(area), Some(_), Some(cd)) => {
                let k = drag_factor(cd, area);
                if k == 0.0 || !k.is_finite() {
                    return Err(TrajectoryError::ZeroDragFactor { factor: k });
                }
                Ok(k)
            }
            _ => Err(TrajectoryError::MissingDragParameters),
        }
    }

    /// k/m, the coefficient of the drag term in the equations of motion.
    pub fn drag_ratio(&self) -> Result<f64, TrajectoryError> {
        let k = self.drag_factor()?;
        match self.mass {
            Some(m) if m > 0.0 && m.is_finite() => Ok(k / m),
            Some(m) => Err(TrajectoryError::InvalidMass { mass: m }),
            None => Err(TrajectoryError::MissingDragParameters),
        }
    }

    pub fn launch_state(&self) -> State {
        State::launch(self.position, self.velocity)
    }

    /// Launch state with the stored velocity replaced by `velocity`.
    pub fn launch_state_with(&self, velocity: Vector2<f64>) -> State {
        State::launch(self.position, velocity)
    }

    /// Query façade over this body with default solver settings.
    pub fn trajectory(&self) -> Trajectory<'_> {
        Trajectory::new(self)
    }
}

// ---------------------------------------------------------------------------
// Body builder
// ---------------------------------------------------------------------------

pub struct BodyBuilder {
    body: Body,
}

impl BodyBuilder {
    pub fn new() -> Self {
        Self { body: Body::default() }
    }

    pub fn position(mut self, x: f64, y: f64) -> Self { self.body.position = Vector2::new(x, y); self }
    pub fn velocity(mut self, vx: f64, vy: f64) -> Self { self.body.velocity = Vector2::new(vx, vy); self }

    pub fn speed_angle(mut self, speed: f64, angle_deg: f64) -> Self {
        self.body.set_velocity_from_speed_angle(speed, angle_deg);
        self
    }

    pub fn drag(mut self, area: f64, mass: f64, cd: f64) -> Self {
        self.body.set_drag_parameters(area, mass, cd);
        self
    }

    pub fn build(self) -> Body {
        self.body
    }
}

impl Default for BodyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Size 5 football: 0.45 kg, 0.038 m^2 cross-section, cd 0.25.
    pub fn football() -> Body {
        BodyBuilder::new().drag(0.038, 0.45, 0.25).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_body_is_at_rest_without_drag() {
        let b = Body::new();
        assert_eq!(b.position, Vector2::zeros());
        assert_eq!(b.velocity, Vector2::zeros());
        assert_eq!(b.drag_ratio(), Err(TrajectoryError::MissingDragParameters));
    }

    #[test]
    fn speed_angle_to_components() {
        let mut b = Body::new();
        b.set_velocity_from_speed_angle(10.0, 30.0);
        assert!((b.velocity.x - 8.66025).abs() < 1e-4);
        assert!((b.velocity.y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn missing_parameter_is_a_configuration_error() {
        let mut b = Body::new();
        b.area = Some(0.038);
        b.cd = Some(0.25);
        let err = b.drag_ratio().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn zero_factor_rejected() {
        let b = BodyBuilder::new().drag(0.0, 0.45, 0.25).build();
        assert!(matches!(b.drag_factor(), Err(TrajectoryError::ZeroDragFactor { .. })));
    }

    #[test]
    fn non_positive_mass_rejected() {
        let b = BodyBuilder::new().drag(0.038, 0.0, 0.25).build();
        assert_eq!(b.drag_ratio(), Err(TrajectoryError::InvalidMass { mass: 0.0 }));
    }

    #[test]
    fn football_ratio() {
        let r = presets::football().drag_ratio().unwrap();
        assert!((r - 0.012_709).abs() < 1e-5, "k/m = {}", r);
    }
}
