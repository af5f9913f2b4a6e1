//! Map step functions.
//!
//! Maps are implemented as small, pure functions so that the trajectory and
//! sweep code can stay generic over the family.

pub mod step;

pub use step::*;
