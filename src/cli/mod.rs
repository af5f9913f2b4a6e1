//! Command-line parsing for the `maps` binary.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! map/sweep code. Flags mirror the classic interface:
//!
//! ```text
//! maps -LIB 2.5    iterate the Logistic map with r = 2.5, then plot its bifurcation
//! maps -HI 1.3     iterate the Henon map with a = 1.3
//! maps -HB 1.3     Henon bifurcation (the constant is required but unused)
//! ```
//!
//! Flag *combinations* are not checked here; `Selection::resolve` owns that so
//! the same rules apply to every front-end.

use clap::Parser;

use crate::config::PlotBackend;

const AFTER_HELP: &str = "\
If both -I/--iteration and -B/--bifurcation are selected, close the first plot to view the next.

EXAMPLES
  Iterate the Logistic map with r = 2.5 and plot its bifurcation diagram:
    maps -LIB 2.5

  Iterate the Henon map with a = 1.3:
    maps -HI 1.3

  Plot the bifurcation diagram of the Henon map. The constant is trivial yet essential:
    maps -HB 1.3";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "maps",
    version,
    about = "Calculation and plotting of iterations and bifurcation diagrams for the Logistic and Henon iterated maps.",
    after_help = AFTER_HELP,
    allow_negative_numbers = true
)]
pub struct Cli {
    /// The constant 'r' (Logistic) or 'a' (Henon).
    #[arg(value_name = "CONSTANT")]
    pub constant: f64,

    /// Use the Logistic map (incompatible with -H/--henon).
    #[arg(short = 'L', long)]
    pub logistic: bool,

    /// Use the Henon map (incompatible with -L/--logistic).
    #[arg(short = 'H', long)]
    pub henon: bool,

    /// Plot an iteration of the map using the given constant.
    #[arg(short = 'I', long)]
    pub iteration: bool,

    /// Plot the map's bifurcation diagram.
    #[arg(short = 'B', long)]
    pub bifurcation: bool,

    /// Reject constants outside 2.4..=4 (r) or 1..=1.4 (a).
    #[arg(long)]
    pub enforce_range: bool,

    /// Worker threads for the bifurcation sweep (default: one per CPU).
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// How to show plots.
    #[arg(long, value_enum)]
    pub plot: Option<PlotBackend>,

    /// ASCII plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Default log filter (overridden by RUST_LOG).
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_short_flags() {
        let cli = Cli::try_parse_from(["maps", "-LIB", "2.5"]).unwrap();
        assert!(cli.logistic && cli.iteration && cli.bifurcation);
        assert!(!cli.henon);
        assert_eq!(cli.constant, 2.5);
    }

    #[test]
    fn negative_constant_is_a_value() {
        let cli = Cli::try_parse_from(["maps", "-HI", "-0.5"]).unwrap();
        assert!(cli.henon);
        assert_eq!(cli.constant, -0.5);
    }

    #[test]
    fn constant_is_required() {
        assert!(Cli::try_parse_from(["maps", "-LI"]).is_err());
    }

    #[test]
    fn conflicting_families_still_parse() {
        // Rejected later by `Selection::resolve`.
        let cli = Cli::try_parse_from(["maps", "-LH", "1"]).unwrap();
        assert!(cli.logistic && cli.henon);
    }

    #[test]
    fn optional_overrides() {
        let cli = Cli::try_parse_from([
            "maps", "-HB", "1.3", "--threads", "4", "--plot", "ascii", "--enforce-range",
        ])
        .unwrap();
        assert_eq!(cli.threads, Some(4));
        assert_eq!(cli.plot, Some(PlotBackend::Ascii));
        assert!(cli.enforce_range);
    }
}
