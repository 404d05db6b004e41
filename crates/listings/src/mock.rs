//! Mock Listing Service Implementation
//!
//! Records status changes in memory for test assertions.
//! Thread-safe via `Arc<Mutex<>>`.

use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::{ListingError, ListingService, ListingStatus};

/// A status change recorded by the mock service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedStatusChange {
    pub listing_id: Uuid,
    pub status: ListingStatus,
}

/// Mock listing service that records status changes for test assertions.
#[derive(Debug, Clone)]
pub struct MockListingService {
    changes: Arc<Mutex<Vec<RecordedStatusChange>>>,
}

impl MockListingService {
    /// Create a new mock listing service.
    pub fn new() -> Self {
        Self {
            changes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return all recorded status changes.
    pub fn recorded_changes(&self) -> Vec<RecordedStatusChange> {
        self.changes
            .lock()
            .expect("changes lock poisoned")
            .clone()
    }

    /// Clear all recorded status changes.
    pub fn reset(&self) {
        self.changes
            .lock()
            .expect("changes lock poisoned")
            .clear();
    }
}

impl Default for MockListingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ListingService for MockListingService {
    async fn set_status(
        &self,
        listing_id: Uuid,
        status: ListingStatus,
    ) -> Result<(), ListingError> {
        tracing::debug!(listing_id = %listing_id, status = %status, "Mock listings: recording status change");
        self.changes
            .lock()
            .map_err(|e| ListingError::Request(format!("changes lock poisoned: {e}")))?
            .push(RecordedStatusChange { listing_id, status });
        Ok(())
    }
}
