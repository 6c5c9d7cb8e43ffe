//! Structural validation of redirect targets.
//!
//! A redirect target is accepted only if it is a relative, path-absolute
//! reference into this application: no protocol-relative `//host` forms, no
//! backslashes (some browsers normalise `\` to `/`, turning `/\evil.com` into
//! `//evil.com`), no internal-infrastructure or API prefixes, and none of the
//! default post-auth landing pages. All rules are purely structural; the
//! functions here perform no I/O and hold no state.

/// Maximum accepted redirect-target length, in characters.
pub const MAX_REDIRECT_PATH_LEN: usize = 2048;

/// Prefixes that are never valid user-facing redirect destinations.
const RESERVED_PREFIXES: &[&str] = &["/_next", "/api"];

/// Default post-auth landing pages. Redirecting back to these is meaningless,
/// so they are rejected here and the caller falls back to default navigation.
const DEFAULT_LANDING_PATHS: &[&str] = &["/", "/login", "/register"];

/// Returns `true` if `path` is a safe, internal, non-default redirect target.
///
/// Rules are applied in order, short-circuiting on the first failure:
/// non-empty, starts with a single `/`, not protocol-relative, no backslash,
/// not under a reserved prefix, not a default landing page, and at most
/// [`MAX_REDIRECT_PATH_LEN`] characters.
pub fn is_safe_redirect_path(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    if !path.starts_with('/') {
        return false;
    }
    // Open-redirect vector: browsers treat //host/path as a different origin.
    if path.starts_with("//") {
        return false;
    }
    if path.contains('\\') {
        return false;
    }
    if RESERVED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return false;
    }
    if DEFAULT_LANDING_PATHS.contains(&path) {
        return false;
    }
    if path.chars().count() > MAX_REDIRECT_PATH_LEN {
        return false;
    }
    true
}

/// Defensive variant of [`is_safe_redirect_path`] for values deserialized
/// from attacker-controlled JSON: anything that is not a string — null,
/// number, boolean, object, array — is rejected outright.
// Retained for call sites that validate raw deserialized values; the HTTP
// handler rejects non-string tokens before decryption.
#[allow(dead_code)]
pub fn is_safe_redirect_value(value: &serde_json::Value) -> bool {
    match value.as_str() {
        Some(path) => is_safe_redirect_path(path),
        None => false,
    }
}
