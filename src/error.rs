use thiserror::Error;

/// Failures raised by trajectory queries.
///
/// A drag-integration event that never fires inside its search horizon is not
/// an error: queries report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("reference area, mass and drag coefficient have to be provided to use air resistance")]
    MissingDragParameters,
    #[error("mass must be positive and finite, got {mass}")]
    InvalidMass { mass: f64 },
    #[error("drag factor evaluates to {factor}; it must be nonzero and finite")]
    ZeroDragFactor { factor: f64 },
    #[error("no real solution was found: {reason}")]
    NoRealSolution { reason: &'static str },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("step size {h:e} too small at t = {t}")]
    StepSizeTooSmall { t: f64, h: f64 },
    #[error("integration exceeded {steps} steps")]
    MaxStepsExceeded { steps: u64 },
    #[error("non-finite state at t = {t}")]
    NonFiniteState { t: f64 },
}

impl TrajectoryError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        TrajectoryError::InvalidInput { message: message.into() }
    }

    /// True for the configuration family (drag parameters missing or unusable).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TrajectoryError::MissingDragParameters
                | TrajectoryError::InvalidMass { .. }
                | TrajectoryError::ZeroDragFactor { .. }
        )
    }
}
