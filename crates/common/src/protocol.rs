//! Request and response types exchanged between the gateway and its clients.
//!
//! These types are serialised as JSON over the public HTTP API. The login page
//! submits a [`ResolveRedirectRequest`] after a successful authentication and
//! navigates to the path returned in [`ResolveRedirectResponse`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Resolve-redirect endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /api/resolve-redirect`.
///
/// The `token` field carries the opaque redirect token handed out by the edge
/// guard as the `redirectUrl` query parameter on the login URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRedirectRequest {
    /// Opaque, URL-safe redirect token.
    pub token: String,
}

/// Successful response body for `POST /api/resolve-redirect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRedirectResponse {
    /// Validated internal path for client-side navigation, e.g. `/posts/123`.
    pub path: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
///
/// The message is deliberately coarse: decryption failures and path-validation
/// failures produce the identical `"invalid token"` body so that responses
/// cannot be used as an oracle against the token scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short description safe to expose to callers.
    pub error: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether the redirect secret is configured and the token cipher is ready.
    pub secret_loaded: bool,
}
