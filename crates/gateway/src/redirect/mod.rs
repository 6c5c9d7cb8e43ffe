//! Redirect-target safety rules.

pub mod validate;

pub use validate::is_safe_redirect_path;
