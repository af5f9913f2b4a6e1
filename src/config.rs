//! Runtime configuration.
//!
//! Defaults come from the process environment (optionally seeded from a `.env`
//! file via `dotenvy`); CLI flags override them in `app`.
//!
//! Recognized variables:
//!
//! - `MAPS_THREADS`: sweep worker count (`0` or unset = one per CPU)
//! - `MAPS_ENFORCE_RANGE`: `1`/`true`/`yes`/`on` to validate the constant
//! - `MAPS_PLOT`: `tui` or `ascii`
//! - `MAPS_LOG`: default log filter (`RUST_LOG` still wins)

use clap::ValueEnum;

use crate::error::AppError;

/// How plots are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlotBackend {
    /// Full-screen terminal chart (one window per plot).
    Tui,
    /// Plain-text plot printed to stdout.
    Ascii,
}

/// Settings resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvConfig {
    pub threads: Option<usize>,
    pub enforce_range: bool,
    pub plot: PlotBackend,
    pub log_filter: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            threads: None,
            enforce_range: false,
            plot: PlotBackend::Tui,
            log_filter: "info".to_string(),
        }
    }
}

impl EnvConfig {
    /// Load `.env` (if present) and read `MAPS_*` variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        // Non-UTF-8 variables can't be ours; skip them instead of panicking.
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::from_vars(vars)
    }

    /// Build a config from key/value pairs; unknown keys are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut cfg = Self::default();
        for (key, value) in vars {
            let value = value.as_ref().trim();
            match key.as_ref() {
                "MAPS_THREADS" => {
                    let n: usize = value.parse().map_err(|e| {
                        AppError::new(2, format!("Invalid MAPS_THREADS '{value}': {e}"))
                    })?;
                    cfg.threads = (n > 0).then_some(n);
                }
                "MAPS_ENFORCE_RANGE" => {
                    cfg.enforce_range = parse_bool(value).ok_or_else(|| {
                        AppError::new(2, format!("Invalid MAPS_ENFORCE_RANGE '{value}'."))
                    })?;
                }
                "MAPS_PLOT" => {
                    cfg.plot = PlotBackend::from_str(value, true).map_err(|_| {
                        AppError::new(2, format!("Invalid MAPS_PLOT '{value}' (expected tui or ascii)."))
                    })?;
                }
                "MAPS_LOG" if !value.is_empty() => {
                    cfg.log_filter = value.to_string();
                }
                _ => {}
            }
        }
        Ok(cfg)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Initialize `env_logger`. `RUST_LOG` overrides `default_filter`.
pub fn init_logging(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    // A second init (e.g. from tests) is harmless.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}
