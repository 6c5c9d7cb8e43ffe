//! Edge access guard: per-request authentication gate.
//!
//! Runs ahead of every route and decides, from the request path and the mere
//! presence of the session cookie, whether the request proceeds or is
//! redirected to the login page. When an unauthenticated request targets a
//! protected page, the original destination (path + query) is encrypted into
//! an opaque token and attached to the login URL so the client can return
//! there after signing in.
//!
//! The cookie check is presence-only. Validating the session's contents is the
//! backend's job; this guard is a UX pre-filter, not the security boundary.
//! Each evaluation is a pure function of the request and the process-wide
//! cipher — there is no cross-request memory.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::warn;

use crate::redirect::is_safe_redirect_path;
use super::state::AppState;

/// Login entry point; unauthenticated requests land here.
pub const LOGIN_PATH: &str = "/login";

/// Registration page, treated like the login page by the guard.
pub const REGISTER_PATH: &str = "/register";

/// Default landing page for already-authenticated users.
pub const HOME_PATH: &str = "/";

/// Pages reachable without a session.
const PUBLIC_PATHS: &[&str] = &[LOGIN_PATH, REGISTER_PATH, "/test"];

/// Framework-internal asset prefix, never guarded.
const FRAMEWORK_ASSET_PREFIX: &str = "/_next";

/// API prefix; API routes authenticate against the backend themselves.
const API_PREFIX: &str = "/api";

/// Static-asset extensions served without a session: images, fonts,
/// stylesheets, scripts, documents, and archives.
const STATIC_EXTENSIONS: &[&str] = &[
    "avif", "css", "gif", "gz", "ico", "jpeg", "jpg", "js", "json", "map", "mjs", "otf", "pdf",
    "png", "svg", "ttf", "txt", "webp", "woff", "woff2", "xml", "zip",
];

/// Axum middleware implementing the access gate.
///
/// Terminal outcomes, evaluated in order:
/// 1. Authenticated request to an auth-only page → redirect home.
/// 2. Public path → pass through.
/// 3. No session cookie → redirect to login, carrying an encrypted
///    return-path token when the destination is safe and encryption succeeds.
/// 4. Otherwise → pass through.
pub async fn access_guard(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let query = req.uri().query().map(str::to_owned);
    let authenticated = has_session_cookie(req.headers(), &state.session_cookie_name);

    if authenticated && is_auth_page(&path) {
        return Redirect::temporary(HOME_PATH).into_response();
    }

    if is_public_path(&path) {
        return next.run(req).await;
    }

    if !authenticated {
        return redirect_to_login(&state, &path, query.as_deref());
    }

    next.run(req).await
}

/// Build the login redirect, attaching an encrypted return-path token when the
/// original destination is a safe redirect target.
///
/// Encryption failure (missing secret) degrades to a bare login redirect —
/// the user is never blocked over a lost return path.
fn redirect_to_login(state: &AppState, path: &str, query: Option<&str>) -> Response {
    let original = match query {
        Some(q) => format!("{path}?{q}"),
        None => path.to_owned(),
    };

    if is_safe_redirect_path(&original) {
        match state.cipher.encrypt(&original) {
            Ok(token) => {
                // The token is base64url, safe to embed without escaping.
                let login_url = format!("{LOGIN_PATH}?{}={token}", state.redirect_param);
                return Redirect::temporary(&login_url).into_response();
            }
            Err(e) => {
                warn!(error = %e, "redirect token encryption failed, dropping return path");
            }
        }
    }

    Redirect::temporary(LOGIN_PATH).into_response()
}

/// Returns `true` if the session cookie is present with a non-empty value.
/// The value itself is never inspected.
fn has_session_cookie(headers: &HeaderMap, cookie_name: &str) -> bool {
    let Some(cookies) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    cookies.split(';').any(|pair| {
        pair.trim()
            .strip_prefix(cookie_name)
            .and_then(|rest| rest.strip_prefix('='))
            .is_some_and(|value| !value.is_empty())
    })
}

fn is_auth_page(path: &str) -> bool {
    path == LOGIN_PATH || path == REGISTER_PATH
}

/// Returns `true` for paths that are served without a session: the explicit
/// public pages, framework-internal assets, API routes, and static files.
fn is_public_path(path: &str) -> bool {
    if PUBLIC_PATHS.contains(&path) {
        return true;
    }
    if path.starts_with(FRAMEWORK_ASSET_PREFIX) || path.starts_with(API_PREFIX) {
        return true;
    }
    has_static_extension(path)
}

fn has_static_extension(path: &str) -> bool {
    let file = path.rsplit('/').next().unwrap_or("");
    match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            STATIC_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::RedirectCipher;
    use crate::server::router;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(
            RedirectCipher::from_secret(Some("test-secret")),
            "access_token".into(),
            "redirectUrl".into(),
        )
    }

    fn get(uri: &str, cookie: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri(uri);
        if let Some(c) = cookie {
            builder = builder.header("cookie", c);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn location(resp: &axum::response::Response) -> String {
        resp.headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned()
    }

    #[tokio::test]
    async fn unauthenticated_page_request_redirects_with_token() {
        let state = test_state();
        let app = router::build(state.clone());
        let resp = app.oneshot(get("/posts/42", None)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        let loc = location(&resp);
        let token = loc
            .strip_prefix("/login?redirectUrl=")
            .expect("login URL should carry a redirect token");
        assert_eq!(state.cipher.decrypt(token).as_deref(), Some("/posts/42"));
    }

    #[tokio::test]
    async fn query_string_is_preserved_in_token() {
        let state = test_state();
        let app = router::build(state.clone());
        let resp = app.oneshot(get("/posts/42?tab=reviews&page=2", None)).await.unwrap();

        let loc = location(&resp);
        let token = loc.strip_prefix("/login?redirectUrl=").unwrap();
        assert_eq!(
            state.cipher.decrypt(token).as_deref(),
            Some("/posts/42?tab=reviews&page=2")
        );
    }

    #[tokio::test]
    async fn unauthenticated_login_request_passes_through() {
        let app = router::build(test_state());
        let resp = app.oneshot(get("/login", None)).await.unwrap();
        // No page routes are mounted in this service, so pass-through lands on
        // the JSON 404 fallback; the point is the absence of a redirect.
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get(header::LOCATION).is_none());
    }

    #[tokio::test]
    async fn authenticated_login_request_redirects_home() {
        let app = router::build(test_state());
        let resp = app
            .oneshot(get("/login", Some("access_token=abc")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&resp), "/");
    }

    #[tokio::test]
    async fn authenticated_register_request_redirects_home() {
        let app = router::build(test_state());
        let resp = app
            .oneshot(get("/register", Some("access_token=abc")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&resp), "/");
    }

    #[tokio::test]
    async fn authenticated_page_request_passes_through() {
        let app = router::build(test_state());
        let resp = app
            .oneshot(get("/posts/42", Some("access_token=abc")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_cookie_value_is_not_a_session() {
        let app = router::build(test_state());
        let resp = app
            .oneshot(get("/posts/42", Some("access_token=")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert!(location(&resp).starts_with("/login?redirectUrl="));
    }

    #[tokio::test]
    async fn static_assets_and_internal_paths_are_public() {
        for uri in ["/logo.png", "/fonts/inter.woff2", "/_next/static/chunk.js", "/api/posts"] {
            let app = router::build(test_state());
            let resp = app.oneshot(get(uri, None)).await.unwrap();
            assert_ne!(
                resp.status(),
                StatusCode::TEMPORARY_REDIRECT,
                "{uri} should not be guarded"
            );
        }
    }

    #[tokio::test]
    async fn missing_secret_degrades_to_bare_login_redirect() {
        // AppState::default has no secret configured.
        let app = router::build(AppState::default());
        let resp = app.oneshot(get("/posts/42", None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&resp), "/login");
    }

    #[test]
    fn unsafe_destination_gets_bare_login_redirect() {
        // Home is not a useful return target, so no token is attached.
        let resp = redirect_to_login(&test_state(), "/", None);
        assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&resp), "/login");
    }

    #[test]
    fn cookie_name_must_match_exactly() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "access_token_old=abc".parse().unwrap());
        assert!(!has_session_cookie(&headers, "access_token"));

        headers.insert(header::COOKIE, "theme=dark; access_token=abc".parse().unwrap());
        assert!(has_session_cookie(&headers, "access_token"));
    }

    #[test]
    fn static_extension_matching() {
        assert!(has_static_extension("/logo.png"));
        assert!(has_static_extension("/docs/guide.PDF"));
        assert!(!has_static_extension("/posts/42"));
        assert!(!has_static_extension("/release-1.2")); // numeric suffix, not an asset
        assert!(!has_static_extension("/.env"));
    }
}
