//! Authentication middleware for the Souk API
//!
//! Provides JWT validation and an axum extractor that works with any
//! domain state implementing `FromRef<S>` for `AuthBackend`. The caller
//! identity is taken from the token's `sub` claim and treated as an
//! opaque, already-verified user id.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;

pub use backend::AuthBackend;
pub use claims::Claims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::AuthUser;
