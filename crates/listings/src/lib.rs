//! Souk listing service collaborator
//!
//! The listing catalog is owned by another service; the messaging domain
//! only ever asks it to change a listing's status (reserving a listing
//! when an offer on it is accepted). This crate provides:
//! - an HTTP client implementation for the listings service
//! - an in-memory mock for testing and development
//! - a factory selecting the implementation from env config

pub mod client;
pub mod mock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Listing service configuration error: {0}")]
    Configuration(String),

    #[error("Listing service request error: {0}")]
    Request(String),

    #[error("Listing service response error: {0}")]
    Response(String),
}

/// Listing lifecycle status as understood by the listings service.
///
/// This subsystem only ever writes `pending` (reserving a listing when an
/// offer on it is accepted); the full domain is carried so responses from
/// the listings service deserialize without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Available,
    Pending,
    Sold,
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingStatus::Available => write!(f, "available"),
            ListingStatus::Pending => write!(f, "pending"),
            ListingStatus::Sold => write!(f, "sold"),
        }
    }
}

/// Listing service configuration.
#[derive(Debug, Clone)]
pub struct ListingsConfig {
    /// Listing service provider (http, mock)
    pub provider: String,
    /// Base URL of the listings service
    pub base_url: String,
}

impl ListingsConfig {
    /// Create listing service config from environment variables
    pub fn from_env() -> Result<Self, ListingError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("LISTINGS_PROVIDER").unwrap_or_else(|_| "mock".to_string());
        let base_url = std::env::var("LISTINGS_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:4000".to_string());

        Ok(Self { provider, base_url })
    }
}

/// Listing service trait for different implementations
#[async_trait::async_trait]
pub trait ListingService: Send + Sync {
    /// Set the status of a listing.
    async fn set_status(&self, listing_id: Uuid, status: ListingStatus)
        -> Result<(), ListingError>;
}

/// Listing service factory
pub struct ListingServiceFactory;

impl ListingServiceFactory {
    /// Create a listing service based on configuration
    pub fn create(config: ListingsConfig) -> Result<Box<dyn ListingService>, ListingError> {
        match config.provider.as_str() {
            "http" => {
                tracing::info!(base_url = %config.base_url, "Creating HTTP listing service client");
                Ok(Box::new(client::HttpListingClient::new(config)))
            }
            "mock" => {
                tracing::info!("Creating mock listing service");
                Ok(Box::new(mock::MockListingService::new()))
            }
            provider => Err(ListingError::Configuration(format!(
                "Unknown listings provider: {}. Supported providers: http, mock",
                provider
            ))),
        }
    }
}
