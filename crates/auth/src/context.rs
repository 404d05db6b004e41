//! Authorization context for authenticated callers

use uuid::Uuid;

/// Represents an authenticated caller.
///
/// Token issuance and user records live outside this service; the only
/// fact consumed here is the verified user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
}

impl AuthContext {
    /// Create a new auth context for a caller
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
