//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured level when set. Output is either
//! human-readable or JSON lines. Initialization is process-wide and happens
//! at most once; later calls report whether this call installed it.

use authconsole_domain::{ConsoleError, LoggingConfig, Result};
use once_cell::sync::OnceCell;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Install the global subscriber described by `config`
///
/// Returns `Ok(true)` if this call installed it and `Ok(false)` if an
/// earlier call already had.
///
/// # Errors
/// Returns `ConsoleError::Config` if the filter directive is invalid or
/// another global subscriber was installed outside this function.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    if INSTALLED.get().is_some() {
        return Ok(false);
    }

    let filter = build_filter(config)?;
    let mut installed = false;
    INSTALLED.get_or_try_init(|| {
        let registry = tracing_subscriber::registry().with(filter);
        let result = if config.json {
            registry.with(fmt::layer().json().with_current_span(true)).try_init()
        } else {
            registry.with(fmt::layer().with_target(true)).try_init()
        };
        installed = true;
        result.map_err(|e| {
            ConsoleError::Config(format!("Failed to install tracing subscriber: {e}"))
        })
    })?;
    Ok(installed)
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive),
        _ => EnvFilter::try_new(&config.level),
    }
    .map_err(|e| ConsoleError::Config(format!("Invalid log filter: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_level() {
        std::env::remove_var(EnvFilter::DEFAULT_ENV);
        let config = LoggingConfig { level: "authconsole=loud".to_string(), json: false };
        assert!(matches!(build_filter(&config), Err(ConsoleError::Config(_))));
    }

    #[test]
    fn second_init_is_a_no_op() {
        let config = LoggingConfig::default();
        let first = init_tracing(&config);
        let second = init_tracing(&config).unwrap();

        assert!(first.is_ok());
        assert!(!second);
    }
}
