pub mod aerodynamics;
pub mod gravity;

pub use aerodynamics::{drag_accel, drag_factor, AIR_DENSITY};
pub use gravity::{gravity_accel, G};
