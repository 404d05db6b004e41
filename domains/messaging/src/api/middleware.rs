//! Messaging domain state and auth backend integration

use crate::MessagingRepositories;
use axum::extract::FromRef;
use souk_auth::AuthBackend;
use souk_listings::ListingService;
use std::sync::Arc;

/// Application state for the Messaging domain
#[derive(Clone)]
pub struct MessagingState {
    pub repos: MessagingRepositories,
    pub auth: AuthBackend,
    pub listings: Arc<dyn ListingService>,
}

impl FromRef<MessagingState> for AuthBackend {
    fn from_ref(state: &MessagingState) -> Self {
        state.auth.clone()
    }
}
