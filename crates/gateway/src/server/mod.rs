//! Axum HTTP server, routing, and the edge access guard.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Gate every request through the access guard before routing.
//! - Inject shared application state (`AppState`) into handlers.

pub mod guard;
pub mod handlers;
pub mod router;
pub mod state;
