use crate::dynamics::state::{Deriv, State};

// ---------------------------------------------------------------------------
// Terminal integration events
// ---------------------------------------------------------------------------

/// Direction of zero-crossing that triggers an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Positive to non-positive.
    Falling,
    /// Negative to non-negative.
    Rising,
    Any,
}

impl Crossing {
    /// True when the event value moved from `prev` to `current` through zero
    /// in this direction. A value that starts at exactly zero has not crossed.
    pub fn crossed(self, prev: f64, current: f64) -> bool {
        let falling = prev > 0.0 && current <= 0.0;
        let rising = prev < 0.0 && current >= 0.0;
        match self {
            Crossing::Falling => falling,
            Crossing::Rising => rising,
            Crossing::Any => falling || rising,
        }
    }
}

/// Predicate monitored by the integrator; integration stops at its first
/// crossing in the configured direction.
pub trait EventDetector {
    fn value(&self, state: &State) -> f64;

    /// Time derivative of [`value`](Self::value), given the state derivative.
    fn rate(&self, state: &State, deriv: &Deriv) -> f64;

    fn direction(&self) -> Crossing;

    /// Side of zero the run starts on. A value of exactly zero (a launch from
    /// the ground for `Impact`) takes the sign of its rate instead, so the
    /// first step can still cross.
    fn start_value(&self, state: &State, deriv: &Deriv) -> f64 {
        let v = self.value(state);
        if v == 0.0 {
            self.rate(state, deriv)
        } else {
            v
        }
    }

    /// Whether the value moved from `prev_value` through zero to `current`.
    fn crossed_from(&self, prev_value: f64, current: &State) -> bool {
        self.direction().crossed(prev_value, self.value(current))
    }

    fn check(&self, prev: &State, current: &State) -> bool {
        self.crossed_from(self.value(prev), current)
    }
}

/// The three events the trajectory queries stop on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrajectoryEvent {
    /// y = 0, descending.
    Impact,
    /// vy = 0.
    Apex,
    /// x = target.
    ReachX(f64),
}

impl EventDetector for TrajectoryEvent {
    fn value(&self, state: &State) -> f64 {
        match *self {
            TrajectoryEvent::Impact => state.pos.y,
            TrajectoryEvent::Apex => state.vel.y,
            TrajectoryEvent::ReachX(x) => state.pos.x - x,
        }
    }

    fn rate(&self, _state: &State, deriv: &Deriv) -> f64 {
        match self {
            TrajectoryEvent::Impact => deriv.dpos.y,
            TrajectoryEvent::Apex => deriv.dvel.y,
            TrajectoryEvent::ReachX(_) => deriv.dpos.x,
        }
    }

    fn direction(&self) -> Crossing {
        match self {
            TrajectoryEvent::Impact => Crossing::Falling,
            TrajectoryEvent::Apex | TrajectoryEvent::ReachX(_) => Crossing::Any,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn make_state(x: f64, y: f64, vy: f64) -> State {
        State::launch(Vector2::new(x, y), Vector2::new(10.0, vy))
    }

    #[test]
    fn impact_detected_only_when_descending() {
        let ev = TrajectoryEvent::Impact;
        assert!(ev.check(&make_state(0.0, 0.5, -3.0), &make_state(1.0, -0.2, -3.5)));
        // Climbing out of a pit through y = 0 is not an impact
        assert!(!ev.check(&make_state(0.0, -0.5, 3.0), &make_state(1.0, 0.2, 2.5)));
    }

    #[test]
    fn start_on_zero_is_not_a_crossing() {
        let ev = TrajectoryEvent::Impact;
        assert!(!ev.check(&make_state(0.0, 0.0, 5.0), &make_state(1.0, 0.4, 4.0)));
    }

    #[test]
    fn ground_launch_starts_on_the_side_it_moves_to() {
        let ev = TrajectoryEvent::Impact;
        let hop = make_state(0.0, 0.0, 0.004);
        let d = Deriv { dpos: hop.vel, dvel: Vector2::new(0.0, -9.8) };
        let start = ev.start_value(&hop, &d);
        assert_eq!(start, 0.004);
        // Already below ground by the end of the first step
        assert!(ev.crossed_from(start, &make_state(0.1, -1e-6, -0.005)));

        let aloft = make_state(0.0, 2.0, 1.0);
        assert_eq!(ev.start_value(&aloft, &d), 2.0);
    }

    #[test]
    fn apex_detected() {
        let ev = TrajectoryEvent::Apex;
        assert!(ev.check(&make_state(0.0, 10.0, 1.0), &make_state(1.0, 10.1, -0.5)));
        assert!(!ev.check(&make_state(0.0, 10.0, 2.0), &make_state(1.0, 10.1, 1.0)));
    }

    #[test]
    fn reach_x_fires_in_either_direction() {
        let ev = TrajectoryEvent::ReachX(5.0);
        assert!(ev.check(&make_state(4.0, 1.0, 0.0), &make_state(6.0, 1.0, 0.0)));
        assert!(ev.check(&make_state(6.0, 1.0, 0.0), &make_state(4.0, 1.0, 0.0)));
        assert!(!ev.check(&make_state(1.0, 1.0, 0.0), &make_state(2.0, 1.0, 0.0)));
    }

    #[test]
    fn crossing_directions() {
        assert!(Crossing::Rising.crossed(-1.0, 0.0));
        assert!(!Crossing::Rising.crossed(1.0, -1.0));
        assert!(Crossing::Falling.crossed(1.0, -1.0));
        assert!(Crossing::Any.crossed(-1.0, 1.0));
        assert!(!Crossing::Any.crossed(0.0, 1.0));
    }
}
