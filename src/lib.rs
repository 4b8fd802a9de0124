//! Short-range ballistic trajectories of a point mass launched in a vertical
//! plane, under gravity alone or under gravity plus quadratic air resistance.
//!
//! ```no_run
//! use ballistic_traj::{BodyBuilder, Medium};
//!
//! let ball = BodyBuilder::new()
//!     .speed_angle(20.0, 45.0)
//!     .drag(0.038, 0.45, 0.25)
//!     .build();
//! let tr = ball.trajectory();
//! let landing = tr.landing_point(Medium::Air)?;
//! let apex = tr.max_altitude(Medium::Air)?;
//! # Ok::<(), ballistic_traj::TrajectoryError>(())
//! ```

pub mod physics;
pub mod dynamics;
pub mod body;
pub mod sim;
pub mod model;
pub mod trajectory;
pub mod targeting;
pub mod io;
mod error;

pub use body::{Body, BodyBuilder};
pub use dynamics::state::{SolverConfig, State};
pub use error::TrajectoryError;
pub use model::{Medium, TrajectoryModel};
pub use sim::IntegrationOutcome;
pub use targeting::DEFAULT_TOLERANCE;
pub use trajectory::{Trajectory, TrajectoryPoint};
