//! Launch-speed inversion: the speed at a fixed angle that lands a body at a
//! given distance.
//!
//! Without drag the answer comes from the range equation. With drag the
//! vacuum launch velocity is scaled by a factor `c`, found by bisection on
//! [`SCALE_BRACKET`] assuming the landing distance grows monotonically with `c`.

use nalgebra::Vector2;

use crate::error::TrajectoryError;
use crate::model::Medium;
use crate::physics::G;
use crate::trajectory::Trajectory;

/// Default relative tolerance on the landing distance.
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Search interval for the launch-speed scale factor.
pub const SCALE_BRACKET: (f64, f64) = (-10.0, 10.0);

/// Vacuum launch velocity at `angle_deg` that lands at `target_x`, from a
/// launch point at `launch` (any height, any horizontal offset).
///
/// With dx = x - x0 and h = y0 + dx tan(a), the height of the launch line
/// above the target, the speed is s^2 = g dx^2 / (2 cos^2(a) h).
pub fn vacuum_launch_velocity(
    launch: &Vector2<f64>,
    target_x: f64,
    angle_deg: f64,
) -> Result<Vector2<f64>, TrajectoryError> {
    let a = angle_deg.to_radians();
    let (sin, cos) = a.sin_cos();
    let dx = target_x - launch.x;

    if dx == 0.0 {
        // Straight drop onto the target, or already lying on it.
        return if launch.y >= 0.0 {
            Ok(Vector2::zeros())
        } else {
            Err(TrajectoryError::NoRealSolution { reason: "target is unreachable at this angle" })
        };
    }
    if dx * cos < 0.0 {
        return Err(TrajectoryError::NoRealSolution {
            reason: "target lies behind the launch direction",
        });
    }

    let h = launch.y + dx * a.tan();
    if h <= 0.0 {
        return Err(TrajectoryError::NoRealSolution { reason: "target is unreachable at this angle" });
    }
    let speed = (G * dx * dx / (2.0 * cos * cos * h)).sqrt();
    if !speed.is_finite() {
        return Err(TrajectoryError::NoRealSolution { reason: "target is unreachable at this angle" });
    }
    Ok(Vector2::new(speed * cos, speed * sin))
}

/// Launch speed at `angle_deg` that lands the body at `target_x`.
///
/// `tolerance` is relative to `target_x` and bounds the landing error of the
/// drag search.
pub fn required_speed(
    trajectory: &Trajectory<'_>,
    target_x: f64,
    angle_deg: f64,
    medium: Medium,
    tolerance: f64,
) -> Result<f64, TrajectoryError> {
    if !target_x.is_finite() || !angle_deg.is_finite() {
        return Err(TrajectoryError::invalid("target distance and angle must be finite"));
    }
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(TrajectoryError::invalid(format!(
            "tolerance must be finite and non-negative, got {}",
            tolerance
        )));
    }

    let body = trajectory.body();
    let v0 = vacuum_launch_velocity(&body.position, target_x, angle_deg)?;
    if medium == Medium::Vacuum {
        return Ok(v0.norm());
    }

    body.drag_ratio()?;
    let c = bisect_scale(trajectory, v0, target_x, tolerance)?;
    let speed = (v0 * c).norm();
    if !speed.is_finite() {
        return Err(TrajectoryError::NoRealSolution { reason: "launch speed is not finite" });
    }
    Ok(speed)
}

/// Landing abscissa with drag for a launch at `velocity`; `None` when the
/// body does not land.
fn landing_x(trajectory: &Trajectory<'_>, velocity: Vector2<f64>) -> Result<Option<f64>, TrajectoryError> {
    match trajectory.landing_point_with_velocity(Medium::Air, velocity) {
        Ok(point) => Ok(point.map(|p| p.x)),
        Err(TrajectoryError::NoRealSolution { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

fn bisect_scale(
    trajectory: &Trajectory<'_>,
    v0: Vector2<f64>,
    target_x: f64,
    tolerance: f64,
) -> Result<f64, TrajectoryError> {
    let tol = (tolerance * target_x).abs();
    let travel = (target_x - trajectory.body().position.x).signum();
    let (mut lo, mut hi) = SCALE_BRACKET;

    let x_hi = landing_x(trajectory, v0 * hi)?.ok_or(TrajectoryError::NoRealSolution {
        reason: "no launch speed in the search bracket lands",
    })?;
    let mut err_hi = target_x - x_hi;
    if err_hi.abs() <= tol {
        return Ok(hi);
    }
    // The fast end of the bracket has to carry the body past the target.
    if err_hi * travel > 0.0 {
        return Err(TrajectoryError::NoRealSolution {
            reason: "target is out of reach within the search bracket",
        });
    }
    let sign_hi = err_hi.signum();
    let mut lo_lands = false;

    let max_iter = trajectory.config().max_bisections;
    for i in 0..max_iter {
        let mid = 0.5 * (lo + hi);
        match landing_x(trajectory, v0 * mid)? {
            Some(x) => {
                let err = target_x - x;
                log::trace!("bisection {}: c = {:.9}, landing x = {:.6}, error = {:.3e}", i, mid, x, err);
                if err.abs() <= tol {
                    return Ok(mid);
                }
                if err.signum() == sign_hi {
                    hi = mid;
                    err_hi = err;
                } else {
                    lo = mid;
                    lo_lands = true;
                }
            }
            None => {
                log::trace!("bisection {}: c = {:.9} does not land", i, mid);
                lo = mid;
                lo_lands = false;
            }
        }

        let collapsed = (hi - lo) <= 4.0 * f64::EPSILON * hi.abs().max(1.0);
        if collapsed {
            return finish(lo, hi, lo_lands, err_hi);
        }
    }

    log::warn!(
        "launch-speed bisection stopped after {} iterations (bracket [{}, {}])",
        max_iter,
        lo,
        hi
    );
    finish(lo, hi, lo_lands, err_hi)
}

/// Accept a bracket that stopped shrinking only if both ends land; otherwise
/// the landing distance jumps past the target (e.g. a body that barely clears
/// a pit) and no speed hits it.
fn finish(lo: f64, hi: f64, lo_lands: bool, err_hi: f64) -> Result<f64, TrajectoryError> {
    if lo_lands {
        Ok(0.5 * (lo + hi))
    } else {
        log::debug!("bracket collapsed onto a landing discontinuity (error {:.3e})", err_hi);
        Err(TrajectoryError::NoRealSolution { reason: "no launch speed lands on the target" })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
