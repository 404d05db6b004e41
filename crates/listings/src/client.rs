//! Listings HTTP Client Implementation
//!
//! Real HTTP client that PATCHes listing status changes to the listings
//! service at `{base_url}/internal/listings/{id}/status`.

use serde_json::json;
use uuid::Uuid;

use crate::{ListingError, ListingService, ListingStatus, ListingsConfig};

/// Real HTTP client for the listings service.
pub struct HttpListingClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpListingClient {
    /// Create a new listings client from configuration.
    pub fn new(config: ListingsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn status_url(&self, listing_id: Uuid) -> String {
        format!("{}/internal/listings/{}/status", self.base_url, listing_id)
    }
}

#[async_trait::async_trait]
impl ListingService for HttpListingClient {
    async fn set_status(
        &self,
        listing_id: Uuid,
        status: ListingStatus,
    ) -> Result<(), ListingError> {
        let response = self
            .http
            .patch(self.status_url(listing_id))
            .json(&json!({ "status": status }))
            .send()
            .await
            .map_err(|e| ListingError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status_code = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(ListingError::Response(format!(
                "Listings service returned {}: {}",
                status_code, body
            )));
        }

        tracing::debug!(listing_id = %listing_id, status = %status, "Listing status updated");
        Ok(())
    }
}
