//! AES-256-GCM-SIV encryption and decryption of redirect paths.
//!
//! **Algorithm choice:** AES-256-GCM-SIV (RFC 8452) is nonce-misuse-resistant.
//! A fresh random nonce is still generated per call, so encrypting the same
//! path twice yields two different tokens; SIV simply removes the catastrophic
//! failure mode should the nonce source ever misbehave.
//!
//! The cipher key is never the secret itself: it is derived as SHA-256 of the
//! configured secret string, so operators rotate by changing the secret rather
//! than by managing raw key bytes.

use aes_gcm_siv::{
    aead::{Aead, KeyInit, OsRng},
    Aes256GcmSiv, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the AES-GCM-SIV authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Minimum decoded token size: nonce + tag, with possibly-empty ciphertext.
pub const MIN_TOKEN_LEN: usize = NONCE_LEN + TAG_LEN;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// No redirect secret was configured. Encryption is impossible; this is
    /// an operator error, not a runtime-recoverable one.
    #[error("redirect secret is not configured")]
    SecretUnset,

    /// AES-GCM-SIV encryption failed (should be unreachable with a valid key
    /// and nonce).
    #[error("aead operation failed")]
    AeadFailure,
}

/// Authenticated cipher for redirect-path tokens.
///
/// Constructed once at startup from the process-wide secret and shared across
/// all requests; it holds only the derived key and is immutable thereafter.
/// When the secret is absent, [`RedirectCipher::encrypt`] fails loudly and
/// [`RedirectCipher::decrypt`] fails closed, so the guard can degrade to a
/// bare login redirect instead of failing requests.
#[derive(Clone)]
pub struct RedirectCipher {
    key: Option<[u8; KEY_LEN]>,
}

impl std::fmt::Debug for RedirectCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        match self.key {
            Some(_) => f.write_str("RedirectCipher([REDACTED])"),
            None => f.write_str("RedirectCipher(<no secret>)"),
        }
    }
}

impl RedirectCipher {
    /// Build a cipher from an optional secret, deriving the AES-256 key as
    /// SHA-256 of the secret string.
    pub fn from_secret(secret: Option<&str>) -> Self {
        Self {
            key: secret.map(derive_key),
        }
    }

    /// Returns `true` if a secret was configured and tokens can be issued.
    pub fn is_ready(&self) -> bool {
        self.key.is_some()
    }

    /// Encrypt a redirect path into an opaque, URL-safe token.
    ///
    /// A random 96-bit nonce is generated per call via the OS CSPRNG, so two
    /// calls with the same path produce different tokens. The empty string is
    /// a valid plaintext and round-trips.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::SecretUnset`] if no secret was configured.
    pub fn encrypt(&self, path: &str) -> Result<String, CipherError> {
        let key = self.key.as_ref().ok_or(CipherError::SecretUnset)?;
        let cipher = Aes256GcmSiv::new(key.into());

        // Use OsRng for a cryptographically secure random nonce.
        use aes_gcm_siv::aead::rand_core::RngCore;
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, path.as_bytes())
            .map_err(|_| CipherError::AeadFailure)?;

        let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(payload))
    }

    /// Decrypt a token back to the original path.
    ///
    /// Every failure mode — missing secret, malformed base64url, undersized
    /// payload, authentication failure, non-UTF-8 plaintext — collapses into
    /// `None`, so callers cannot distinguish tampering from misconfiguration.
    /// This function never panics on adversarial input.
    pub fn decrypt(&self, token: &str) -> Option<String> {
        let key = self.key.as_ref()?;
        let data = URL_SAFE_NO_PAD.decode(token).ok()?;
        if data.len() < MIN_TOKEN_LEN {
            return None;
        }
        let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);

        let cipher = Aes256GcmSiv::new(key.into());
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .ok()?;
        String::from_utf8(plaintext).ok()
    }
}

/// Derive the fixed-length AES-256 key from the secret string.
fn derive_key(secret: &str) -> [u8; KEY_LEN] {
    Sha256::digest(secret.as_bytes()).into()
}
