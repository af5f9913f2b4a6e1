//! One-step evaluation for the Logistic and Hénon maps.
//!
//! No input is rejected: parameters and states outside the usual ranges simply
//! iterate towards `inf`/`NaN`, which callers are expected to carry through.

use crate::domain::{MapKind, State};

/// Fixed secondary coefficient of the Hénon map (`y[n] = HENON_B * x[n-1]`).
pub const HENON_B: f64 = 0.3;

/// `r * x * (1 - x)`
pub fn logistic(r: f64, x: f64) -> f64 {
    r * x * (1.0 - x)
}

/// `(1 - a * x^2 + y, 0.3 * x)`
pub fn henon(a: f64, x: f64, y: f64) -> (f64, f64) {
    (1.0 - a * x * x + y, HENON_B * x)
}

/// Advance `state` by one iteration of `kind` with the given parameter.
///
/// The logistic map leaves `y` untouched.
pub fn step(kind: MapKind, parameter: f64, state: State) -> State {
    match kind {
        MapKind::Logistic => State::new(logistic(parameter, state.x), state.y),
        MapKind::Henon => {
            let (x, y) = henon(parameter, state.x, state.y);
            State::new(x, y)
        }
    }
}
