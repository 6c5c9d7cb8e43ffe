//! Configuration loading and validation for the gateway.
//!
//! All values are read from environment variables at startup. The redirect
//! secret is the one deliberately optional value: without it the guard still
//! runs, but login redirects carry no return-path token and token resolution
//! always fails closed.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Secret from which the redirect-token key is derived. Optional so the
    /// service can start degraded; encryption fails loudly while it is unset.
    #[serde(default)]
    pub redirect_secret: Option<String>,

    /// TCP port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Name of the session cookie whose presence marks a request authenticated.
    #[serde(default = "default_session_cookie_name")]
    pub session_cookie_name: String,

    /// Name of the query parameter carrying the redirect token on login URLs.
    #[serde(default = "default_redirect_param")]
    pub redirect_param: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    3000
}
fn default_session_cookie_name() -> String {
    "access_token".into()
}
fn default_redirect_param() -> String {
    "redirectUrl".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is present but invalid.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build gateway configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise gateway configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        // An explicitly-set empty secret is a config mistake, distinct from
        // the intentionally-absent degraded mode.
        if let Some(secret) = &self.redirect_secret {
            if secret.trim().is_empty() {
                anyhow::bail!("REDIRECT_SECRET must not be empty when set");
            }
        }
        ensure_non_empty(&self.session_cookie_name, "SESSION_COOKIE_NAME")?;
        ensure_non_empty(&self.redirect_param, "REDIRECT_PARAM")?;
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
