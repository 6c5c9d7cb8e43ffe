//! Redirect-token encryption primitives.
//!
//! This module is intentionally free of HTTP and routing dependencies.
//! It provides the encrypt/decrypt operations used by the edge guard and the
//! resolve-redirect endpoint.
//!
//! # Token format
//!
//! ```text
//! base64url-no-pad(nonce || ciphertext || tag)
//! ```
//!
//! 12-byte nonce first, 16-byte authentication tag last. The encoded string is
//! safe to place directly in a URL query parameter without further escaping.

pub mod cipher;

pub use cipher::RedirectCipher;
