//! End-to-end API tests for the Souk messaging and reviews domains
//!
//! These drive the composed router via `tower::ServiceExt::oneshot`
//! against a Postgres test database (TEST_DATABASE_URL). They are
//! ignored by default; run them with `cargo test -- --ignored` once a
//! test database is available.

mod common;
mod messaging;
mod reviews;
