//! Headless plot rendering.

pub mod ascii;

pub use ascii::*;
