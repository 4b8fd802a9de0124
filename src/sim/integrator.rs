use crate::dynamics;
use crate::dynamics::state::{Deriv, SolverConfig, State};

// ---------------------------------------------------------------------------
// Dormand-Prince 5(4) embedded pair
// ---------------------------------------------------------------------------

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// 5th-order weights (b2 = 0)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// b - b*, difference to the embedded 4th-order solution
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

/// Outcome of one trial step.
#[derive(Debug, Clone, Copy)]
pub struct StepResult {
    pub state: State,
    /// Scaled error norm; the step is acceptable when <= 1.
    pub error: f64,
}

impl StepResult {
    pub fn accepted(&self) -> bool {
        self.error <= 1.0
    }
}

/// Single Dormand-Prince step of (signed) size `h`.
pub fn dopri5_step(state: &State, drag_ratio: f64, h: f64, config: &SolverConfig) -> StepResult {
    let k1 = dynamics::derivatives(state, drag_ratio);
    let k2 = dynamics::derivatives(&state.apply(&Deriv::weighted(&[(A21, &k1)]), h), drag_ratio);
    let k3 = dynamics::derivatives(
        &state.apply(&Deriv::weighted(&[(A31, &k1), (A32, &k2)]), h),
        drag_ratio,
    );
    let k4 = dynamics::derivatives(
        &state.apply(&Deriv::weighted(&[(A41, &k1), (A42, &k2), (A43, &k3)]), h),
        drag_ratio,
    );
    let k5 = dynamics::derivatives(
        &state.apply(&Deriv::weighted(&[(A51, &k1), (A52, &k2), (A53, &k3), (A54, &k4)]), h),
        drag_ratio,
    );
    let k6 = dynamics::derivatives(
        &state.apply(
            &Deriv::weighted(&[(A61, &k1), (A62, &k2), (A63, &k3), (A64, &k4), (A65, &k5)]),
            h,
        ),
        drag_ratio,
    );

    let next = state.apply(
        &Deriv::weighted(&[(B1, &k1), (B3, &k3), (B4, &k4), (B5, &k5), (B6, &k6)]),
        h,
    );
    let k7 = dynamics::derivatives(&next, drag_ratio);

    let err = Deriv::weighted(&[(E1, &k1), (E3, &k3), (E4, &k4), (E5, &k5), (E6, &k6), (E7, &k7)]);
    let err_components = [err.dvel.x * h, err.dpos.x * h, err.dvel.y * h, err.dpos.y * h];

    let before = state.components();
    let after = next.components();
    let error = err_components
        .iter()
        .zip(before.iter().zip(after.iter()))
        .map(|(e, (a, b))| e.abs() / (config.atol + config.rtol * a.abs().max(b.abs())))
        .fold(0.0_f64, f64::max);

    StepResult { state: next, error }
}

// ---------------------------------------------------------------------------
// Step-size control
// ---------------------------------------------------------------------------

/// I-controller: h_new = safety * h * error^(-1/5).
#[derive(Debug, Clone, Copy)]
pub struct StepController {
    pub safety: f64,
    pub max_factor: f64,
    pub min_factor: f64,
}

impl Default for StepController {
    fn default() -> Self {
        Self { safety: 0.9, max_factor: 5.0, min_factor: 0.2 }
    }
}

impl StepController {
    pub fn compute_factor(&self, error: f64) -> f64 {
        if error == 0.0 {
            return self.max_factor;
        }
        if !error.is_finite() {
            return self.min_factor;
        }
        (self.safety * error.powf(-0.2)).clamp(self.min_factor, self.max_factor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
