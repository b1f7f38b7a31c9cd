//! Logging setup shared by storefront binaries.

/// Initialize process-wide logging from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&LogConfig::from_env());
}

/// Tracing subscriber configuration and installation.
pub mod tracing;

pub use self::tracing::{LogConfig, LogFormat, ObservabilityError};
