use nalgebra::Vector2;

/// Gravitational acceleration used throughout, m/s^2.
pub const G: f64 = 9.8;

/// Uniform gravity acceleration in the launch plane [x, y].
pub fn gravity_accel() -> Vector2<f64> {
    Vector2::new(0.0, -G)
}
