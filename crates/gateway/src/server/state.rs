//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::crypto::RedirectCipher;

/// Application state shared across all request handlers and the edge guard.
///
/// All fields are cheaply cloneable (`Arc`-wrapped) so that Axum can clone the
/// state for each request without copying expensive data. Everything here is
/// immutable after startup; requests never coordinate through shared state.
#[derive(Clone)]
pub struct AppState {
    /// Cipher for issuing and resolving redirect tokens.
    pub cipher: Arc<RedirectCipher>,
    /// Name of the session cookie whose presence marks a request authenticated.
    pub session_cookie_name: Arc<String>,
    /// Name of the query parameter carrying the redirect token on login URLs.
    pub redirect_param: Arc<String>,
}

impl AppState {
    /// Create a new [`AppState`] from the cipher and naming configuration.
    pub fn new(cipher: RedirectCipher, session_cookie_name: String, redirect_param: String) -> Self {
        Self {
            cipher: Arc::new(cipher),
            session_cookie_name: Arc::new(session_cookie_name),
            redirect_param: Arc::new(redirect_param),
        }
    }
}

impl Default for AppState {
    /// Creates a default [`AppState`] with no secret configured, suitable for
    /// tests of the degraded paths.
    fn default() -> Self {
        Self::new(
            RedirectCipher::from_secret(None),
            "access_token".into(),
            "redirectUrl".into(),
        )
    }
}
