//! Reviews domain state and auth backend integration

use crate::ReviewsRepositories;
use axum::extract::FromRef;
use souk_auth::AuthBackend;

/// Application state for the Reviews domain
#[derive(Clone)]
pub struct ReviewsState {
    pub repos: ReviewsRepositories,
    pub auth: AuthBackend,
}

impl FromRef<ReviewsState> for AuthBackend {
    fn from_ref(state: &ReviewsState) -> Self {
        state.auth.clone()
    }
}
