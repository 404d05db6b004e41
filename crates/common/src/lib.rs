//! Shared utilities, configuration, and error handling for Souk
//!
//! This crate provides common functionality used across the Souk application:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Custom axum extractors
//! - State machine error types

pub mod config;
pub mod error;
pub mod extractors;
pub mod state;

pub use error::{Error, Result};
pub use extractors::{Pagination, ValidatedJson};
pub use state::StateError;
