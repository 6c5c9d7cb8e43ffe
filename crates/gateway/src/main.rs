//! `redirect-guard-svc` — gateway binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (structured JSON logs).
//! 3. Derive the redirect-token cipher key from the configured secret.
//! 4. Build the Axum router with the edge access guard and start the server.

mod config;
mod crypto;
mod redirect;
mod server;
mod telemetry;

use anyhow::Result;
use tracing::{info, warn};

use config::Config;
use crypto::RedirectCipher;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        "redirect-guard-svc starting"
    );

    // -----------------------------------------------------------------------
    // 3. Redirect-token cipher
    // -----------------------------------------------------------------------
    let cipher = RedirectCipher::from_secret(cfg.redirect_secret.as_deref());
    if !cipher.is_ready() {
        warn!("REDIRECT_SECRET is not set; login redirects will not carry a return path");
    }

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(cipher, cfg.session_cookie_name, cfg.redirect_param);
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
