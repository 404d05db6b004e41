//! Custom axum extractors for Souk

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use validator::Validate;

use crate::Error;

/// Default window size for message history
const DEFAULT_LIMIT: i64 = 50;

/// Largest window a single request may ask for
const MAX_LIMIT: i64 = 100;

/// Query parameter bounding how much history a list endpoint returns.
///
/// The window always covers the most recent records; older history is
/// reached by raising the limit, not by offset paging.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Pagination {
    /// Effective limit: defaults to 50, clamped to [1, 100]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

/// JSON extractor that validates the deserialized value automatically.
///
/// Replaces `Json<T>` + manual `.validate()` calls in handlers.
/// Requires `T: DeserializeOwned + Validate`.
///
/// All input errors (deserialization + validation) return 400.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Rejection type for `ValidatedJson`; both arms render as 400 through
/// `Error::Validation`.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// Body failed to deserialize at all
    Malformed(JsonRejection),
    /// Body deserialized but violated a constraint
    Invalid(Error),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            ValidatedJsonRejection::Malformed(e) => {
                Error::Validation(e.body_text()).into_response()
            }
            ValidatedJsonRejection::Invalid(e) => e.into_response(),
        }
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Malformed)?;

        value.validate().map_err(|e| {
            ValidatedJsonRejection::Invalid(Error::Validation(format!("validation failed: {e}")))
        })?;

        Ok(ValidatedJson(value))
    }
}
