use crate::dynamics;
use crate::dynamics::state::{SolverConfig, State};
use crate::error::TrajectoryError;
use super::event::EventDetector;
use super::integrator::{dopri5_step, StepController};

/// Step counters for one integration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub accepted_steps: u64,
    pub rejected_steps: u64,
}

/// Result of one integration run.
#[derive(Debug, Clone, Copy)]
pub struct IntegrationOutcome {
    /// State at the stopping time (event time, or the horizon).
    pub state: State,
    /// Whether the requested event fired before the horizon.
    pub event_found: bool,
    pub stats: Stats,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Integrate from `initial` to `t_end` with no event.
pub fn propagate(
    initial: &State,
    drag_ratio: f64,
    t_end: f64,
    config: &SolverConfig,
) -> Result<State, TrajectoryError> {
    integrate(initial, drag_ratio, t_end, None, config).map(|outcome| outcome.state)
}

/// Integrate from `initial` until `event` fires or `t_max` is reached.
pub fn run_to_event(
    initial: &State,
    drag_ratio: f64,
    event: &dyn EventDetector,
    t_max: f64,
    config: &SolverConfig,
) -> Result<IntegrationOutcome, TrajectoryError> {
    integrate(initial, drag_ratio, t_max, Some(event), config)
}

// ---------------------------------------------------------------------------
// Adaptive integration loop
// ---------------------------------------------------------------------------

fn integrate(
    initial: &State,
    drag_ratio: f64,
    t_end: f64,
    event: Option<&dyn EventDetector>,
    config: &SolverConfig,
) -> Result<IntegrationOutcome, TrajectoryError> {
    config.validate()?;
    if !t_end.is_finite() || !initial.is_finite() {
        return Err(TrajectoryError::invalid(format!(
            "integration needs a finite initial state and end time (t_end = {})",
            t_end
        )));
    }

    let mut state = *initial;
    let mut stats = Stats::default();
    if t_end == state.time {
        return Ok(IntegrationOutcome { state, event_found: false, stats });
    }

    let controller = StepController::default();
    let direction = (t_end - state.time).signum();
    let mut h = config.initial_step.min((t_end - state.time).abs()) * direction;
    let mut steps = 0u64;
    let mut prev_value = event.map(|ev| ev.start_value(&state, &dynamics::derivatives(&state, drag_ratio)));

    while (t_end - state.time) * direction > 0.0 {
        let last = (state.time + h - t_end) * direction >= 0.0;
        if last {
            h = t_end - state.time;
        }

        let step = dopri5_step(&state, drag_ratio, h, config);

        if step.accepted() {
            stats.accepted_steps += 1;
            let mut next = step.state;
            if last {
                next.time = t_end;
            }
            if !next.is_finite() {
                return Err(TrajectoryError::NonFiniteState { t: next.time });
            }

            if let (Some(ev), Some(prev)) = (event, prev_value) {
                if ev.crossed_from(prev, &next) {
                    let hit = locate_event(&state, prev, h, drag_ratio, ev, config);
                    log::debug!(
                        "event at t = {:.6} after {} accepted / {} rejected steps",
                        hit.time,
                        stats.accepted_steps,
                        stats.rejected_steps
                    );
                    return Ok(IntegrationOutcome { state: hit, event_found: true, stats });
                }
                prev_value = Some(ev.value(&next));
            }
            state = next;
        } else {
            stats.rejected_steps += 1;
        }

        h = h.abs() * controller.compute_factor(step.error) * direction;

        steps += 1;
        if steps > config.max_steps {
            return Err(TrajectoryError::MaxStepsExceeded { steps: config.max_steps });
        }

        let h_min = 16.0 * f64::EPSILON * state.time.abs().max(1.0);
        if !step.accepted() && h.abs() < h_min {
            return Err(TrajectoryError::StepSizeTooSmall { t: state.time, h: h.abs() });
        }
    }

    log::debug!(
        "reached t = {:.6} without event ({} accepted / {} rejected steps)",
        state.time,
        stats.accepted_steps,
        stats.rejected_steps
    );
    Ok(IntegrationOutcome { state, event_found: false, stats })
}

/// Bisect the sub-step length inside an accepted step `[0, h]` until the
/// crossing is bracketed within the event tolerance. Each trial re-takes a
/// shorter step from `start`, whose local error is below the accepted one.
/// `start_value` is the event value on the near side of the bracket.
fn locate_event(
    start: &State,
    start_value: f64,
    h: f64,
    drag_ratio: f64,
    event: &dyn EventDetector,
    config: &SolverConfig,
) -> State {
    let mut lo = 0.0_f64;
    let mut hi = h;
    let mut lo_value = start_value;
    let mut hi_state = dopri5_step(start, drag_ratio, hi, config).state;

    for _ in 0..200 {
        if (hi - lo).abs() <= config.event_tolerance {
            break;
        }
        let mid = 0.5 * (lo + hi);
        if mid == lo || mid == hi {
            break;
        }
        let mid_state = dopri5_step(start, drag_ratio, mid, config).state;
        if event.crossed_from(lo_value, &mid_state) {
            hi = mid;
            hi_state = mid_state;
        } else {
            lo = mid;
            lo_value = event.value(&mid_state);
        }
    }

    hi_state
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
