//! Core entry points shared by every front-end.
//!
//! The presentation layer (CLI printing, ASCII plots, TUI windows) calls into
//! this module with a validated selection and gets plain numeric data back:
//!
//! selection -> (optional) parameter check -> iteration / sweep -> data
//!
//! Nothing here prints, exits the process, or touches a terminal.

use log::info;

use crate::domain::{BifurcationResult, MapKind, TRAJECTORY_LEN, Trajectory, default_initial_state};
use crate::error::{CoreError, SelectionIssue};
use crate::sweep::{SweepOptions, sweep};
use crate::trajectory::generate;

/// What to compute for the selected map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Iteration,
    Bifurcation,
}

/// A validated map-family + mode selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub kind: MapKind,
    /// Non-empty; iteration (if present) comes first.
    pub modes: Vec<Mode>,
}

impl Selection {
    /// Validate raw flag state.
    ///
    /// Exactly one map family and at least one mode must be requested.
    /// Family problems are reported before mode problems.
    pub fn resolve(
        logistic: bool,
        henon: bool,
        iteration: bool,
        bifurcation: bool,
    ) -> Result<Self, CoreError> {
        let kind = match (logistic, henon) {
            (true, false) => MapKind::Logistic,
            (false, true) => MapKind::Henon,
            (false, false) => return Err(CoreError::InvalidSelection(SelectionIssue::NoMapFamily)),
            (true, true) => {
                return Err(CoreError::InvalidSelection(
                    SelectionIssue::ConflictingMapFamilies,
                ));
            }
        };

        let mut modes = Vec::with_capacity(2);
        if iteration {
            modes.push(Mode::Iteration);
        }
        if bifurcation {
            modes.push(Mode::Bifurcation);
        }
        if modes.is_empty() {
            return Err(CoreError::InvalidSelection(SelectionIssue::NoMode));
        }

        Ok(Self { kind, modes })
    }

    pub fn wants(&self, mode: Mode) -> bool {
        self.modes.contains(&mode)
    }
}

/// Settings that affect the core computations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunConfig {
    /// Reject iteration constants outside `MapKind::parameter_bounds`.
    pub enforce_range: bool,
    pub sweep: SweepOptions,
}

/// Check `value` against the map's bounds after rounding to two decimals.
pub fn validate_parameter(kind: MapKind, value: f64) -> Result<(), CoreError> {
    let (min, max) = kind.parameter_bounds();
    let rounded = (value * 100.0).round() / 100.0;
    if rounded >= min && rounded <= max {
        Ok(())
    } else {
        Err(CoreError::ParameterOutOfRange {
            kind,
            value,
            min,
            max,
        })
    }
}

/// Full trajectory for one constant, from the default initial state.
pub fn run_iteration(kind: MapKind, parameter: f64) -> Trajectory {
    generate(kind, parameter, TRAJECTORY_LEN, default_initial_state())
}

/// `run_iteration` with the optional range check and a custom initial state.
pub fn run_iteration_with(
    kind: MapKind,
    parameter: f64,
    config: &RunConfig,
) -> Result<Trajectory, CoreError> {
    if config.enforce_range {
        validate_parameter(kind, parameter)?;
    }
    Ok(generate(
        kind,
        parameter,
        config.sweep.steps,
        config.sweep.initial_state,
    ))
}

/// Bifurcation data over the map's built-in sweep range.
pub fn run_bifurcation(kind: MapKind) -> Result<BifurcationResult, CoreError> {
    run_bifurcation_with(kind, &RunConfig::default())
}

pub fn run_bifurcation_with(
    kind: MapKind,
    config: &RunConfig,
) -> Result<BifurcationResult, CoreError> {
    info!("Running...");
    sweep(kind, &kind.sweep_range(), &config.sweep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::State;

    #[test]
    fn selection_requires_exactly_one_family() {
        assert_eq!(
            Selection::resolve(false, false, true, false),
            Err(CoreError::InvalidSelection(SelectionIssue::NoMapFamily))
        );
        assert_eq!(
            Selection::resolve(true, true, true, true),
            Err(CoreError::InvalidSelection(SelectionIssue::ConflictingMapFamilies))
        );
    }

    #[test]
    fn selection_requires_a_mode() {
        assert_eq!(
            Selection::resolve(true, false, false, false),
            Err(CoreError::InvalidSelection(SelectionIssue::NoMode))
        );
        // Family errors win when both are wrong.
        assert_eq!(
            Selection::resolve(false, false, false, false),
            Err(CoreError::InvalidSelection(SelectionIssue::NoMapFamily))
        );
    }

    #[test]
    fn selection_orders_iteration_first() {
        let sel = Selection::resolve(false, true, true, true).unwrap();
        assert_eq!(sel.kind, MapKind::Henon);
        assert_eq!(sel.modes, vec![Mode::Iteration, Mode::Bifurcation]);
        assert!(sel.wants(Mode::Bifurcation));
    }

    #[test]
    fn iteration_is_deterministic() {
        for kind in MapKind::ALL {
            let a = run_iteration(kind, 1.3);
            let b = run_iteration(kind, 1.3);
            assert_eq!(a.len(), TRAJECTORY_LEN);
            let bits = |t: &Trajectory| t.xs.iter().chain(&t.ys).map(|v| v.to_bits()).collect::<Vec<_>>();
            assert_eq!(bits(&a), bits(&b));
        }
    }

    #[test]
    fn range_check_is_opt_in() {
        assert!(run_iteration_with(MapKind::Logistic, 1.0, &RunConfig::default()).is_ok());

        let strict = RunConfig {
            enforce_range: true,
            ..RunConfig::default()
        };
        let err = run_iteration_with(MapKind::Logistic, 1.0, &strict).unwrap_err();
        assert!(matches!(err, CoreError::ParameterOutOfRange { kind: MapKind::Logistic, .. }));
        assert!(run_iteration_with(MapKind::Henon, 1.3, &strict).is_ok());
    }

    #[test]
    fn range_check_rounds_to_two_decimals() {
        assert!(validate_parameter(MapKind::Logistic, 4.004).is_ok());
        assert!(validate_parameter(MapKind::Logistic, 4.006).is_err());
        assert!(validate_parameter(MapKind::Henon, 0.996).is_ok());
        assert!(validate_parameter(MapKind::Henon, 1.41).is_err());
    }

    #[test]
    fn custom_initial_state_is_used() {
        let cfg = RunConfig {
            sweep: SweepOptions {
                initial_state: State::new(0.5, 0.0),
                ..SweepOptions::default()
            },
            ..RunConfig::default()
        };
        let t = run_iteration_with(MapKind::Logistic, 2.0, &cfg).unwrap();
        assert_eq!(t.xs[0], 0.5);
        assert_eq!(t.xs[1], 0.5);
        assert_ne!(t.state(0), Some(default_initial_state()));
    }

    #[test]
    fn logistic_bifurcation_covers_builtin_range() {
        let result = run_bifurcation(MapKind::Logistic).unwrap();
        let range = MapKind::Logistic.sweep_range();
        assert_eq!(result.len(), 40_000);
        assert_eq!(result.range, range);
        for (i, s) in result.samples.iter().enumerate() {
            assert_eq!(s.parameter, range.value_at(i));
        }
        assert!(result.parameters().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(result.samples[0].parameter, 0.0);
        assert!(result.samples[0].tail.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn henon_bifurcation_covers_builtin_range() {
        let result = run_bifurcation(MapKind::Henon).unwrap();
        assert_eq!(result.len(), 14_000);
        let params = result.parameters();
        assert!(params.windows(2).all(|w| w[0] < w[1]));
        assert!(*params.last().unwrap() < 1.4);
    }
}
