//! Tracing/logging initialization.
//!
//! `RUST_LOG` picks the filter (default `info`), `ARCHIV_LOG_FORMAT` picks
//! `json` (default) or `pretty` output.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the output format.
pub const FORMAT_ENV: &str = "ARCHIV_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObservabilityError {
    #[error("unknown log format {0:?} (expected \"json\" or \"pretty\")")]
    UnknownFormat(String),
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line with timestamps.
    #[default]
    Json,
    /// Multi-line human readable output.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ObservabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(ObservabilityError::UnknownFormat(other.to_string())),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive string, e.g. `info,archiv_storefront=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    /// Read `RUST_LOG` and `ARCHIV_LOG_FORMAT`; an unusable format is
    /// reported on stderr and falls back to JSON.
    pub fn from_env() -> Self {
        let filter = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        match Self::from_vars(filter.clone(), std::env::var(FORMAT_ENV).ok()) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{FORMAT_ENV}: {err}; using json");
                Self::json_with_filter(filter)
            }
        }
    }

    /// JSON output with `filter` (blank means the default).
    fn json_with_filter(filter: Option<String>) -> Self {
        Self {
            filter: parse_filter(filter),
            format: LogFormat::Json,
        }
    }

    /// Build from raw variable values (`None` = unset).
    pub fn from_vars(
        filter: Option<String>,
        format: Option<String>,
    ) -> Result<Self, ObservabilityError> {
        let format = match format {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => LogFormat::default(),
        };
        Ok(Self {
            filter: parse_filter(filter),
            format,
        })
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Blank or unset filters mean [`DEFAULT_FILTER`].
fn parse_filter(filter: Option<String>) -> String {
    filter
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the global subscriber described by `config`.
///
/// Returns `false` when a subscriber was already installed (the call is then a
/// no-op).
pub fn init(config: &LogConfig) -> bool {
    let filter = config.env_filter();
    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .with_target(false)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .with_target(true)
            .try_init(),
    };
    if installed.is_ok() {
        ::tracing::debug!(filter = %config.filter, format = ?config.format, "logging initialized");
    }
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_json_at_info() {
        let config = LogConfig::from_vars(None, None).unwrap();
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.filter, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn reads_filter_and_format() {
        let config = LogConfig::from_vars(
            Some("archiv_storefront=debug".to_string()),
            Some(" Pretty ".to_string()),
        )
        .unwrap();
        assert_eq!(config.filter, "archiv_storefront=debug");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = LogConfig::from_vars(Some("  ".to_string()), Some(String::new())).unwrap();
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn unknown_format_is_an_error() {
        let err = LogConfig::from_vars(None, Some("xml".to_string())).unwrap_err();
        assert_eq!(err, ObservabilityError::UnknownFormat("xml".to_string()));
    }

    #[test]
    fn unknown_format_fallback_keeps_filter_defaults() {
        let blank = LogConfig::json_with_filter(Some("   ".to_string()));
        assert_eq!(blank, LogConfig::default());

        let set = LogConfig::json_with_filter(Some("archiv_replay=debug".to_string()));
        assert_eq!(set.filter, "archiv_replay=debug");
        assert_eq!(set.format, LogFormat::Json);
    }

    #[test]
    fn second_init_is_a_no_op() {
        let config = LogConfig::default().with_format(LogFormat::Pretty);
        let _ = init(&config);
        assert!(!init(&config));
    }
}
