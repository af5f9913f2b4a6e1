//! Shared domain types.
//!
//! These types are intentionally plain data (vectors of `f64`, small `Copy`
//! enums) so the presentation layer can render, print, or serialize them
//! without knowing anything about how they were computed.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of samples in a trajectory: the initial state plus 399 iterations.
pub const TRAJECTORY_LEN: usize = 400;

/// Number of trailing `x` values kept per parameter in a bifurcation sweep.
pub const TAIL_LEN: usize = 20;

/// Map state `(x, y)`. The logistic map only reads and writes `x`.
pub type State = Vector2<f64>;

/// Initial state shared by both maps.
pub const DEFAULT_INITIAL_STATE: (f64, f64) = (0.3, 0.3);

/// `DEFAULT_INITIAL_STATE` as a [`State`].
pub fn default_initial_state() -> State {
    State::new(DEFAULT_INITIAL_STATE.0, DEFAULT_INITIAL_STATE.1)
}

/// Map family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapKind {
    /// `x[n] = r * x[n-1] * (1 - x[n-1])`
    Logistic,
    /// `x[n] = 1 - a * x[n-1]^2 + y[n-1]`, `y[n] = 0.3 * x[n-1]`
    Henon,
}

impl MapKind {
    pub const ALL: [MapKind; 2] = [MapKind::Logistic, MapKind::Henon];

    pub fn display_name(self) -> &'static str {
        match self {
            MapKind::Logistic => "Logistic",
            MapKind::Henon => "Henon",
        }
    }

    /// Name of the control parameter (`r` or `a`).
    pub fn parameter_symbol(self) -> &'static str {
        match self {
            MapKind::Logistic => "r",
            MapKind::Henon => "a",
        }
    }

    /// Human-readable recurrence, used as a plot subtitle.
    pub fn formula(self) -> &'static str {
        match self {
            MapKind::Logistic => "x[n] = r * x[n-1] * (1 - x[n-1])",
            MapKind::Henon => "x[n] = 1 - a * x[n-1]^2 + y[n-1], y[n] = 0.3 * x[n-1]",
        }
    }

    /// Built-in parameter sweep for the bifurcation diagram.
    pub fn sweep_range(self) -> SweepRange {
        match self {
            MapKind::Logistic => SweepRange {
                start: 0.0,
                stop: 4.0,
                step: 0.0001,
            },
            MapKind::Henon => SweepRange {
                start: 0.0,
                stop: 1.4,
                step: 0.0001,
            },
        }
    }

    /// Inclusive bounds used when parameter validation is switched on.
    pub fn parameter_bounds(self) -> (f64, f64) {
        match self {
            MapKind::Logistic => (2.4, 4.0),
            MapKind::Henon => (1.0, 1.4),
        }
    }
}

/// Half-open parameter interval `[start, stop)` sampled every `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

/// Quotients this close to an integer count as that integer when sizing a range.
const COUNT_SNAP_EPS: f64 = 1e-9;

/// Largest sample count a sweep range may describe.
pub const MAX_SWEEP_SAMPLES: usize = 10_000_000;

impl SweepRange {
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self, CoreError> {
        let range = Self { start, stop, step };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let ok = self.start.is_finite()
            && self.stop.is_finite()
            && self.step.is_finite()
            && self.step > 0.0
            && self.stop > self.start
            && self
                .sample_count()
                .is_some_and(|n| n <= MAX_SWEEP_SAMPLES as f64);
        if ok {
            Ok(())
        } else {
            Err(CoreError::InvalidSweepRange {
                start: self.start,
                stop: self.stop,
                step: self.step,
            })
        }
    }

    /// Number of samples: `ceil((stop - start) / step)`.
    ///
    /// Zero for ranges that fail `validate`.
    pub fn len(&self) -> usize {
        match self.validate() {
            Ok(()) => self.sample_count().map_or(0, |n| n as usize),
            Err(_) => 0,
        }
    }

    /// Unbounded sample count as a float; `None` if it isn't finite.
    fn sample_count(&self) -> Option<f64> {
        let q = (self.stop - self.start) / self.step;
        if !q.is_finite() {
            return None;
        }
        let nearest = q.round();
        if (q - nearest).abs() < COUNT_SNAP_EPS {
            Some(nearest)
        } else {
            Some(q.ceil())
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parameter value at sample `i`.
    pub fn value_at(&self, i: usize) -> f64 {
        self.start + self.step * i as f64
    }

    /// All sample values, in increasing order.
    pub fn values(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.value_at(i)).collect()
    }
}

/// A full iteration trace for one parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub kind: MapKind,
    pub parameter: f64,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// State at sample `n`.
    pub fn state(&self, n: usize) -> Option<State> {
        Some(State::new(*self.xs.get(n)?, *self.ys.get(n)?))
    }

    /// `(n, x[n])` pairs, ready to plot against an index axis.
    pub fn indexed_xs(&self) -> Vec<(f64, f64)> {
        self.xs
            .iter()
            .enumerate()
            .map(|(n, &x)| (n as f64, x))
            .collect()
    }

    /// Last `n` `x` values (fewer if the trajectory is shorter).
    pub fn tail(&self, n: usize) -> &[f64] {
        &self.xs[self.xs.len().saturating_sub(n)..]
    }
}

/// Tail segment for one swept parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BifurcationSample {
    pub parameter: f64,
    pub tail: Vec<f64>,
}

impl BifurcationSample {
    pub fn is_finite(&self) -> bool {
        self.tail.iter().all(|v| v.is_finite())
    }
}

/// Per-parameter tail segments, in sweep order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BifurcationResult {
    pub kind: MapKind,
    pub range: SweepRange,
    pub samples: Vec<BifurcationSample>,
}

impl BifurcationResult {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn parameters(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.parameter).collect()
    }

    /// Flattened scatter points: one `(parameter, value)` per tail element.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples
            .iter()
            .flat_map(|s| s.tail.iter().map(move |&v| (s.parameter, v)))
    }

    /// Number of samples whose tail contains `inf` or `NaN`.
    pub fn non_finite_count(&self) -> usize {
        self.samples.iter().filter(|s| !s.is_finite()).count()
    }
}
