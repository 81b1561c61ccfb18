//! Tracing bootstrap.
//!
//! Library crates only emit `tracing` events; whoever embeds them calls
//! [`init_tracing`] once at startup.

use anyhow::{anyhow, bail, Result};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `pua_accrual=trace`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Optional: logging.filter (string); default="info".
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        match cfg.pointer("/logging/filter") {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::String(s)) => {
                let filter = s.trim();
                if filter.is_empty() {
                    bail!("CONFIG_INVALID: logging.filter must not be empty");
                }
                EnvFilter::try_new(filter)
                    .map_err(|e| anyhow!("CONFIG_INVALID: logging.filter '{filter}': {e}"))?;
                Ok(Self {
                    filter: filter.to_string(),
                })
            }
            Some(v) => bail!("CONFIG_INVALID: logging.filter must be a string (got {v})"),
        }
    }

    /// `RUST_LOG` wins when set and valid; otherwise the configured filter.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.filter))
    }
}

/// Install the global fmt subscriber.
///
/// Errors (instead of panicking) if a global subscriber is already set.
pub fn init_tracing(cfg: &LoggingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(cfg.env_filter())
        .try_init()
        .map_err(|e| anyhow!("tracing subscriber already installed: {e}"))
}
