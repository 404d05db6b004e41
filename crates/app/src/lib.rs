//! Souk application composition root
//!
//! Composes all domain routers into a single application.

use axum::Router;
use souk_auth::{AuthBackend, AuthConfig};
use souk_listings::{ListingService, ListingServiceFactory, ListingsConfig};
use souk_messaging::{MessagingRepositories, MessagingState};
use souk_reviews::{ReviewsRepositories, ReviewsState};
use sqlx::PgPool;
use std::sync::Arc;

/// Create the main application router with all routes and middleware
pub async fn create_app(pool: PgPool) -> Result<Router, anyhow::Error> {
    // Create repositories
    let messaging_repos = MessagingRepositories::new(pool.clone());
    let reviews_repos = ReviewsRepositories::new(pool);

    // Create auth config from environment
    let auth_config = AuthConfig {
        jwt_secret: std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?,
        issuer: std::env::var("JWT_ISSUER").ok(),
        audience: std::env::var("JWT_AUDIENCE").ok(),
    };
    let auth = AuthBackend::new(auth_config);

    // Create listing service collaborator from environment
    let listings_config = ListingsConfig::from_env()?;
    let listings: Arc<dyn ListingService> =
        Arc::from(ListingServiceFactory::create(listings_config)?);

    // Create domain states
    let messaging_state = MessagingState {
        repos: messaging_repos,
        auth: auth.clone(),
        listings,
    };
    let reviews_state = ReviewsState {
        repos: reviews_repos,
        auth,
    };

    // Build router — compose domain routers with shared infrastructure routes
    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "Souk API v0.1.0" }))
        .merge(souk_messaging::routes().with_state(messaging_state))
        .merge(souk_reviews::routes().with_state(reviews_state));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
