//! Fixed-length iteration of a map from an explicit initial state.
//!
//! `steps` counts samples, not iterations: the initial state is sample 0, so
//! `steps = 400` performs 399 map evaluations. Overflow is not guarded; once a
//! value becomes `inf`/`NaN` it stays in the sequence.

use std::collections::VecDeque;

use crate::domain::{MapKind, State, Trajectory};
use crate::maps::step;

/// Iterate `kind` and keep every sample.
pub fn generate(kind: MapKind, parameter: f64, steps: usize, initial_state: State) -> Trajectory {
    let mut xs = Vec::with_capacity(steps);
    let mut ys = Vec::with_capacity(steps);

    let mut state = initial_state;
    for n in 0..steps {
        if n > 0 {
            state = step(kind, parameter, state);
        }
        xs.push(state.x);
        ys.push(state.y);
    }

    Trajectory {
        kind,
        parameter,
        xs,
        ys,
    }
}

/// Iterate `kind` and keep only the last `tail_len` `x` values.
///
/// Equivalent to `generate(..).tail(tail_len)` without holding the full trace.
pub fn tail(
    kind: MapKind,
    parameter: f64,
    steps: usize,
    initial_state: State,
    tail_len: usize,
) -> Vec<f64> {
    let cap = tail_len.min(steps);
    if cap == 0 {
        return Vec::new();
    }

    let mut ring = VecDeque::with_capacity(cap);
    let mut state = initial_state;
    for n in 0..steps {
        if n > 0 {
            state = step(kind, parameter, state);
        }
        if ring.len() == cap {
            ring.pop_front();
        }
        ring.push_back(state.x);
    }

    ring.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TAIL_LEN, TRAJECTORY_LEN, default_initial_state};

    #[test]
    fn full_mode_has_fixed_length_and_initial_state() {
        for kind in MapKind::ALL {
            for &p in &[0.0, 1.1, 2.5, 3.7, 4.0] {
                let t = generate(kind, p, TRAJECTORY_LEN, default_initial_state());
                assert_eq!(t.len(), 400);
                assert_eq!(t.ys.len(), 400);
                assert_eq!(t.state(0), Some(default_initial_state()));
            }
        }
    }

    #[test]
    fn tail_matches_end_of_full_trajectory() {
        for kind in MapKind::ALL {
            for &p in &[0.5, 1.0, 1.3, 2.9, 3.5699, 3.9] {
                let full = generate(kind, p, TRAJECTORY_LEN, default_initial_state());
                let t = tail(kind, p, TRAJECTORY_LEN, default_initial_state(), TAIL_LEN);
                assert_eq!(t.len(), TAIL_LEN);
                // Compare bit patterns so NaN tails still match.
                let a: Vec<u64> = t.iter().map(|v| v.to_bits()).collect();
                let b: Vec<u64> = full.tail(TAIL_LEN).iter().map(|v| v.to_bits()).collect();
                assert_eq!(a, b, "{kind:?} p={p}");
            }
        }
    }

    #[test]
    fn logistic_zero_parameter_is_zero_after_first_sample() {
        let t = generate(MapKind::Logistic, 0.0, TRAJECTORY_LEN, default_initial_state());
        assert_eq!(t.xs[0], 0.3);
        assert!(t.xs[1..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn logistic_converges_to_fixed_point() {
        let r = 2.5;
        let t = tail(MapKind::Logistic, r, TRAJECTORY_LEN, default_initial_state(), TAIL_LEN);
        let fixed = 1.0 - 1.0 / r;
        for x in t {
            assert!((x - fixed).abs() < 1e-9, "x={x}");
        }
    }

    #[test]
    fn divergence_propagates_as_non_finite() {
        let t = generate(MapKind::Logistic, 10.0, TRAJECTORY_LEN, default_initial_state());
        assert!(t.xs[0].is_finite());
        assert!(t.tail(TAIL_LEN).iter().all(|x| !x.is_finite()));

        let h = tail(MapKind::Henon, 5.0, TRAJECTORY_LEN, default_initial_state(), TAIL_LEN);
        assert!(h.iter().all(|x| !x.is_finite()));
    }

    #[test]
    fn short_and_empty_runs() {
        let t = generate(MapKind::Henon, 1.3, 0, default_initial_state());
        assert!(t.is_empty());
        assert!(tail(MapKind::Henon, 1.3, 0, default_initial_state(), TAIL_LEN).is_empty());

        let short = tail(MapKind::Logistic, 3.0, 5, default_initial_state(), TAIL_LEN);
        assert_eq!(short.len(), 5);
        assert_eq!(short[0], 0.3);
    }

    #[test]
    fn honours_explicit_initial_state() {
        let t = generate(MapKind::Henon, 1.4, 3, State::new(0.0, 0.0));
        assert_eq!(t.xs[..2], [0.0, 1.0]);
        assert!((t.xs[2] + 0.4).abs() < 1e-12);
        assert!((t.ys[2] - 0.3).abs() < 1e-12);
    }
}
