use nalgebra::Vector2;

/// Density of air at NTP, kg/m^3.
pub const AIR_DENSITY: f64 = 1.204;

/// Reference drag factor k = 0.5 * rho * cd * area (kg/m).
pub fn drag_factor(cd: f64, area: f64) -> f64 {
    0.5 * AIR_DENSITY * cd * area
}

/// Quadratic drag acceleration, opposing velocity.
///
/// `drag_ratio` is k/m; the magnitude is `drag_ratio * |v|^2`.
pub fn drag_accel(vel: &Vector2<f64>, drag_ratio: f64) -> Vector2<f64> {
    let speed = vel.norm();
    if speed > 0.0 {
        -vel * (drag_ratio * speed)
    } else {
        Vector2::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn football_drag_factor() {
        // cd = 0.25, area = 0.038 m^2
        let k = drag_factor(0.25, 0.038);
        assert!((k - 0.005_719).abs() < 1e-6, "k = {}", k);
    }

    #[test]
    fn drag_opposes_velocity() {
        let vel = Vector2::new(20.0, 20.0);
        let a = drag_accel(&vel, 0.01);
        assert!(a.x < 0.0 && a.y < 0.0, "Drag should oppose motion");
        assert!((a.norm() - 0.01 * vel.norm_squared()).abs() < 1e-9);
    }

    #[test]
    fn no_drag_at_rest() {
        let a = drag_accel(&Vector2::zeros(), 0.01);
        assert!(a.norm() < 1e-12);
    }
}
