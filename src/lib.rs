//! `chaos-maps` library crate.
//!
//! The binary (`maps`) is a thin wrapper around this library so that:
//!
//! - the map/trajectory/sweep core is testable without spawning processes
//!   or opening a terminal
//! - rendering (ASCII, TUI) stays swappable and never leaks into the core
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod maps;
pub mod plot;
pub mod report;
pub mod sweep;
pub mod trajectory;
pub mod tui;

pub use app::pipeline::{Mode, Selection, run_bifurcation, run_iteration};
pub use domain::{BifurcationResult, MapKind, State, SweepRange, Trajectory};
pub use error::{AppError, CoreError, SelectionIssue};
