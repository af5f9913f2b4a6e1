//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and environment defaults
//! - validates the map/mode selection
//! - runs the requested computations through `pipeline`
//! - shows the results (TUI windows or ASCII plots)

use clap::Parser;
use log::debug;

use crate::app::pipeline::{Mode, RunConfig, Selection};
use crate::cli::Cli;
use crate::config::{EnvConfig, PlotBackend, init_logging};
use crate::error::AppError;
use crate::sweep::SweepOptions;

pub mod pipeline;

/// Entry point for the `maps` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let env = EnvConfig::from_env()?;

    init_logging(cli.log_level.as_deref().unwrap_or(&env.log_filter));

    // Nothing is computed until the selection is known to be valid.
    let selection = Selection::resolve(cli.logistic, cli.henon, cli.iteration, cli.bifurcation)?;
    let settings = Settings::from_sources(&cli, &env);
    debug!("selection: {selection:?}, settings: {settings:?}");

    match settings.plot {
        PlotBackend::Ascii => run_ascii(&selection, cli.constant, &settings),
        PlotBackend::Tui => run_tui(&selection, cli.constant, &settings),
    }
}

/// CLI flags layered over environment defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub run: RunConfig,
    pub plot: PlotBackend,
    pub width: usize,
    pub height: usize,
}

impl Settings {
    pub fn from_sources(cli: &Cli, env: &EnvConfig) -> Self {
        Self {
            run: RunConfig {
                enforce_range: cli.enforce_range || env.enforce_range,
                sweep: SweepOptions {
                    threads: cli.threads.or(env.threads),
                    ..SweepOptions::default()
                },
            },
            plot: cli.plot.unwrap_or(env.plot),
            width: cli.width,
            height: cli.height,
        }
    }
}

fn run_ascii(selection: &Selection, constant: f64, settings: &Settings) -> Result<(), AppError> {
    for mode in &selection.modes {
        match mode {
            Mode::Iteration => {
                let t = pipeline::run_iteration_with(selection.kind, constant, &settings.run)?;
                println!("{}", crate::report::format_iteration_summary(&t));
                println!(
                    "{}",
                    crate::plot::render_iteration_plot(&t, settings.width, settings.height)
                );
            }
            Mode::Bifurcation => {
                let r = pipeline::run_bifurcation_with(selection.kind, &settings.run)?;
                println!("{}", crate::report::format_bifurcation_summary(&r));
                println!(
                    "{}",
                    crate::plot::render_bifurcation_plot(&r, settings.width, settings.height)
                );
            }
        }
    }
    Ok(())
}

fn run_tui(selection: &Selection, constant: f64, settings: &Settings) -> Result<(), AppError> {
    let modes = &selection.modes;
    // Usage errors are reported before the terminal is taken over.
    if settings.run.enforce_range && modes.contains(&Mode::Iteration) {
        pipeline::validate_parameter(selection.kind, constant)?;
    }
    crate::tui::run(modes.len(), |i| match modes[i] {
        Mode::Iteration => {
            let t = pipeline::run_iteration_with(selection.kind, constant, &settings.run)?;
            Ok(crate::tui::PlotView::iteration(&t))
        }
        Mode::Bifurcation => {
            let r = pipeline::run_bifurcation_with(selection.kind, &settings.run)?;
            Ok(crate::tui::PlotView::bifurcation(&r))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_override_environment() {
        let cli = Cli::try_parse_from(["maps", "-LB", "3", "--threads", "2", "--plot", "ascii"]).unwrap();
        let env = EnvConfig {
            threads: Some(8),
            enforce_range: true,
            plot: PlotBackend::Tui,
            log_filter: "info".to_string(),
        };
        let s = Settings::from_sources(&cli, &env);
        assert_eq!(s.run.sweep.threads, Some(2));
        assert_eq!(s.plot, PlotBackend::Ascii);
        // Either source can switch range checks on.
        assert!(s.run.enforce_range);
    }

    #[test]
    fn environment_fills_unset_flags() {
        let cli = Cli::try_parse_from(["maps", "-HI", "1.3"]).unwrap();
        let env = EnvConfig {
            threads: Some(3),
            ..EnvConfig::default()
        };
        let s = Settings::from_sources(&cli, &env);
        assert_eq!(s.run.sweep.threads, Some(3));
        assert_eq!(s.plot, PlotBackend::Tui);
        assert!(!s.run.enforce_range);
        assert_eq!((s.width, s.height), (100, 25));
    }
}
