//! Error types.
//!
//! - `CoreError` is what the computational core returns. It carries no exit
//!   codes and never terminates the process.
//! - `AppError` is what the binary returns: a message plus the exit code the
//!   presentation layer should terminate with. The `CoreError` -> exit code
//!   mapping lives in its `From` impl.

use thiserror::Error;

use crate::domain::MapKind;

/// Why a map-family/mode selection was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionIssue {
    /// Neither `logistic` nor `henon` was chosen.
    NoMapFamily,
    /// Both `logistic` and `henon` were chosen.
    ConflictingMapFamilies,
    /// Neither `iteration` nor `bifurcation` was chosen.
    NoMode,
}

impl std::fmt::Display for SelectionIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            SelectionIssue::NoMapFamily => {
                "one and only one of -L/--logistic or -H/--henon must be selected"
            }
            SelectionIssue::ConflictingMapFamilies => {
                "-L/--logistic is not allowed together with -H/--henon"
            }
            SelectionIssue::NoMode => {
                "either one or both of -I/--iteration and -B/--bifurcation must be selected"
            }
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid selection: {0}")]
    InvalidSelection(SelectionIssue),

    #[error(
        "the constant '{symbol}' must be greater or equal to {min} and less than or equal to {max} (got {value})",
        symbol = .kind.parameter_symbol()
    )]
    ParameterOutOfRange {
        kind: MapKind,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid sweep range [{start}, {stop}) step {step}")]
    InvalidSweepRange { start: f64, stop: f64, step: f64 },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let exit_code = match &err {
            CoreError::InvalidSelection(_) | CoreError::ParameterOutOfRange { .. } => 2,
            CoreError::InvalidSweepRange { .. } | CoreError::ThreadPool(_) => 4,
        };
        Self::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_errors_map_to_usage_exit_code() {
        let err: AppError = CoreError::InvalidSelection(SelectionIssue::NoMode).into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("-I/--iteration"));
    }

    #[test]
    fn runtime_errors_map_to_failure_exit_code() {
        let err: AppError = CoreError::ThreadPool("no threads".to_string()).into();
        assert_eq!(err.exit_code(), 4);
        let err: AppError = CoreError::InvalidSweepRange {
            start: 0.0,
            stop: 1.0,
            step: 0.0,
        }
        .into();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().starts_with("invalid sweep range"));
    }

    #[test]
    fn out_of_range_message_names_the_symbol() {
        let err = CoreError::ParameterOutOfRange {
            kind: MapKind::Henon,
            value: 2.0,
            min: 1.0,
            max: 1.4,
        };
        let msg = err.to_string();
        assert!(msg.contains("'a'"), "{msg}");
        assert!(msg.contains("1.4"), "{msg}");
    }
}
