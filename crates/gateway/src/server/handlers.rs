//! Axum request handlers for all service endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{ErrorResponse, HealthResponse, ResolveRedirectResponse};
use common::ServiceError;
use tracing::warn;

use crate::redirect::is_safe_redirect_path;
use super::state::AppState;

/// `POST /api/resolve-redirect` — exchange a redirect token for a plain path.
///
/// The login page calls this after a successful authentication, passing the
/// `redirectUrl` token it received from the edge guard, and navigates to the
/// returned path.
///
/// Failure contract: a missing, `null`, or empty token is `400 missing token`;
/// a token that fails decryption and a token whose decrypted path fails safety
/// validation both produce the identical `400 invalid token`; an unreadable
/// body is `500 internal`. No failure mode leaks which check rejected.
pub async fn resolve_redirect(State(state): State<AppState>, body: Bytes) -> Response {
    // The body is parsed manually so that malformed JSON surfaces as the
    // generic internal error rather than an extractor rejection.
    let body: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "resolve-redirect request body is not valid JSON");
            return error_response(ServiceError::Internal);
        }
    };

    let token = match body.get("token") {
        None | Some(serde_json::Value::Null) => {
            return error_response(ServiceError::MissingToken);
        }
        Some(serde_json::Value::String(s)) if s.is_empty() => {
            return error_response(ServiceError::MissingToken);
        }
        Some(serde_json::Value::String(s)) => s.as_str(),
        // Numbers, objects, arrays — never a token.
        Some(_) => return error_response(ServiceError::InvalidToken),
    };

    let path = match state.cipher.decrypt(token) {
        Some(p) => p,
        None => return error_response(ServiceError::InvalidToken),
    };

    if !is_safe_redirect_path(&path) {
        return error_response(ServiceError::InvalidToken);
    }

    (StatusCode::OK, Json(ResolveRedirectResponse { path })).into_response()
}

/// `GET /health` — liveness and readiness check.
///
/// Returns `200 OK` when the redirect secret is configured. Returns
/// `503 Service Unavailable` otherwise — the guard still functions, but login
/// redirects are degraded to carrying no return path.
pub async fn health(State(state): State<AppState>) -> Response {
    let secret_loaded = state.cipher.is_ready();

    let (status_code, status_str) = if secret_loaded {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: status_str.into(),
        secret_loaded,
    };
    (status_code, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("not found")))
}

fn error_response(err: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}
