//! Configuration loading and validation for the TLS listener.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated listener configuration.
///
/// Built once at startup from environment variables and owned for the
/// process lifetime; nothing mutates it afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address the TCP listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port the TCP listener binds to.
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Filesystem path to the PEM-encoded TLS certificate chain. **Required.**
    pub tls_cert_path: String,

    /// Filesystem path to the PEM-encoded TLS private key. **Required.**
    pub tls_key_path: String,

    /// Upper bound on concurrently served sessions. Accepts beyond this
    /// bound queue in the kernel listen backlog until a slot frees up.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind_address() -> String {
    "127.0.0.1".into()
}
fn default_bind_port() -> u16 {
    8080
}
fn default_max_sessions() -> usize {
    1024
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be
    /// parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build tls-listener configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise tls-listener configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The `address:port` string the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }

    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.bind_address, "BIND_ADDRESS")?;
        ensure_non_empty(&self.tls_cert_path, "TLS_CERT_PATH")?;
        ensure_non_empty(&self.tls_key_path, "TLS_KEY_PATH")?;

        if self.max_sessions == 0 {
            anyhow::bail!("MAX_SESSIONS must be > 0");
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
