//! Domain types used throughout the core.
//!
//! This module defines:
//!
//! - the map family selector (`MapKind`) and its built-in constants
//! - map state and trajectories (`State`, `Trajectory`)
//! - sweep inputs/outputs (`SweepRange`, `BifurcationResult`)

pub mod types;

pub use types::*;
