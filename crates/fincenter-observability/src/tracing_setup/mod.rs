//! Tracing setup: subscriber initialization, span macros, and structured events.

pub mod events;
pub mod spans;

use fincenter_core::config::ObservabilityConfig;
use fincenter_core::errors::{FincenterError, FincenterResult};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log level.
pub const LOG_ENV: &str = "FINCENTER_LOG";

/// Install the global subscriber.
///
/// `FINCENTER_LOG` wins over `config.log_level` when set. Returns `Ok(false)`
/// if another subscriber was already installed, which is not an error for
/// embedders that configure logging themselves.
pub fn init_tracing(config: &ObservabilityConfig) -> FincenterResult<bool> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json_logs {
        builder
            .json()
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .try_init()
            .is_ok()
    } else {
        builder.try_init().is_ok()
    };
    Ok(installed)
}

fn build_filter(config: &ObservabilityConfig) -> FincenterResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_level).map_err(|e| {
        FincenterError::ConfigError(format!("invalid log level '{}': {e}", config.log_level))
    })
}
