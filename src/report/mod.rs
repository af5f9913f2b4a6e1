//! Reporting utilities: value ranges and formatted terminal summaries.

pub mod format;

pub use format::*;
