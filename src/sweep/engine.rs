//! Parallel parameter sweep.
//!
//! Each range sample is an independent unit of work: the worker gets the map
//! kind, one parameter and a copy of the initial state, and returns its tail.
//! We use rayon's indexed `par_iter().map().collect()`, which writes every
//! result into the slot of its input index, so the output order never depends
//! on which worker finishes first.

use std::num::NonZeroUsize;
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::domain::{
    BifurcationResult, BifurcationSample, MapKind, State, SweepRange, TAIL_LEN, TRAJECTORY_LEN,
    default_initial_state,
};
use crate::error::CoreError;
use crate::trajectory::tail;

/// Knobs for a single sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOptions {
    /// Worker count. `None` means one worker per available processing unit.
    pub threads: Option<usize>,
    /// Samples per trajectory (initial state included).
    pub steps: usize,
    /// Trailing `x` values kept per parameter.
    pub tail_len: usize,
    pub initial_state: State,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            threads: None,
            steps: TRAJECTORY_LEN,
            tail_len: TAIL_LEN,
            initial_state: default_initial_state(),
        }
    }
}

impl SweepOptions {
    /// Resolved pool size (always at least 1).
    pub fn worker_count(&self) -> usize {
        match self.threads {
            Some(n) if n > 0 => n,
            _ => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }
}

/// Compute the tail segment for every sample of `range`.
///
/// Blocks until all samples are done. The worker pool is created here and
/// dropped before returning.
pub fn sweep(
    kind: MapKind,
    range: &SweepRange,
    opts: &SweepOptions,
) -> Result<BifurcationResult, CoreError> {
    range.validate()?;

    let workers = opts.worker_count();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("sweep-{i}"))
        .build()
        .map_err(|e| CoreError::ThreadPool(e.to_string()))?;

    let n = range.len();
    debug!(
        "{} sweep: {n} samples over [{}, {}) step {} on {workers} workers",
        kind.display_name(),
        range.start,
        range.stop,
        range.step
    );

    let started = Instant::now();
    let steps = opts.steps;
    let tail_len = opts.tail_len;
    let initial_state = opts.initial_state;

    let samples: Vec<BifurcationSample> = pool.install(|| {
        (0..n)
            .into_par_iter()
            .map(|i| {
                let parameter = range.value_at(i);
                BifurcationSample {
                    parameter,
                    tail: tail(kind, parameter, steps, initial_state, tail_len),
                }
            })
            .collect()
    });

    let result = BifurcationResult {
        kind,
        range: *range,
        samples,
    };

    // Divergent samples stay in the result; the plot shows raw dynamics.
    let divergent = result.non_finite_count();
    if divergent > 0 {
        warn!(
            "{} sweep: {divergent} of {n} samples diverged (inf/NaN kept as-is)",
            kind.display_name()
        );
    }
    info!(
        "{} sweep finished: {n} samples in {:.2?}",
        kind.display_name(),
        started.elapsed()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::generate;

    fn small_range() -> SweepRange {
        SweepRange::new(2.8, 4.0, 0.01).unwrap()
    }

    #[test]
    fn results_follow_range_order() {
        let range = small_range();
        let result = sweep(MapKind::Logistic, &range, &SweepOptions::default()).unwrap();

        assert_eq!(result.len(), range.len());
        for (i, s) in result.samples.iter().enumerate() {
            assert_eq!(s.parameter, range.value_at(i));
            assert_eq!(s.tail.len(), TAIL_LEN);
        }
        let params = result.parameters();
        assert!(params.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn each_tail_matches_a_direct_run() {
        let range = SweepRange::new(0.9, 1.4, 0.05).unwrap();
        let result = sweep(MapKind::Henon, &range, &SweepOptions::default()).unwrap();
        for s in &result.samples {
            let full = generate(MapKind::Henon, s.parameter, TRAJECTORY_LEN, default_initial_state());
            let want: Vec<u64> = full.tail(TAIL_LEN).iter().map(|v| v.to_bits()).collect();
            let got: Vec<u64> = s.tail.iter().map(|v| v.to_bits()).collect();
            assert_eq!(got, want, "a={}", s.parameter);
        }
    }

    #[test]
    fn worker_count_does_not_change_results() {
        let range = small_range();
        let one = sweep(
            MapKind::Logistic,
            &range,
            &SweepOptions {
                threads: Some(1),
                ..SweepOptions::default()
            },
        )
        .unwrap();
        let many = sweep(
            MapKind::Logistic,
            &range,
            &SweepOptions {
                threads: Some(7),
                ..SweepOptions::default()
            },
        )
        .unwrap();
        assert_eq!(one, many);
    }

    #[test]
    fn divergent_samples_are_kept() {
        let range = SweepRange::new(4.0, 6.0, 0.5).unwrap();
        let result = sweep(MapKind::Logistic, &range, &SweepOptions::default()).unwrap();
        assert_eq!(result.len(), 4);
        assert!(result.non_finite_count() >= 1);
        assert!(result.samples.iter().all(|s| s.tail.len() == TAIL_LEN));
    }

    #[test]
    fn invalid_range_is_rejected_before_work() {
        let range = SweepRange {
            start: 1.0,
            stop: 0.0,
            step: 0.1,
        };
        let err = sweep(MapKind::Logistic, &range, &SweepOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSweepRange { .. }));
    }

    #[test]
    fn oversized_range_is_an_error_not_a_panic() {
        let range = SweepRange {
            start: 0.0,
            stop: 1.0,
            step: 1e-300,
        };
        let err = sweep(MapKind::Logistic, &range, &SweepOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSweepRange { .. }));
    }

    #[test]
    fn zero_threads_falls_back_to_available_parallelism() {
        let opts = SweepOptions {
            threads: Some(0),
            ..SweepOptions::default()
        };
        assert!(opts.worker_count() >= 1);
    }
}
