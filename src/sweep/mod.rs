//! Bifurcation sweep orchestration.
//!
//! Responsibilities:
//!
//! - size and own a worker pool for the duration of one sweep
//! - run the trajectory generator in tail mode once per range sample (parallel)
//! - gather tails back in sweep order

pub mod engine;

pub use engine::*;
