//! Trajectory generation.
//!
//! Two access modes over the same iteration:
//!
//! - `generate`: the whole trace, for iteration plots
//! - `tail`: only the last few `x` values, for bifurcation sweeps

pub mod generator;

pub use generator::*;
