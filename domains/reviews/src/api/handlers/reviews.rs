//! Review API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use souk_auth::AuthUser;
use souk_common::{Error, Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::ReviewsState;
use crate::domain::entities::{Reputation, Review};

/// Request for submitting a review
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    /// The user being reviewed
    pub reviewed_id: Uuid,

    /// Rating, 1 to 5
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,

    /// Review text
    #[validate(length(min = 1, max = 500))]
    pub comment: String,

    /// The transaction (listing) this review concerns
    pub listing_id: Uuid,
}

/// Request for editing a review
#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: Option<i16>,
    pub comment: Option<String>,
}

/// Review response DTO
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewed_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub listing_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            reviewer_id: r.reviewer_id,
            reviewed_id: r.reviewed_id,
            rating: r.rating,
            comment: r.comment,
            listing_id: r.listing_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Reputation response DTO
#[derive(Debug, Serialize)]
pub struct ReputationResponse {
    pub average: f64,
    pub count: i64,
}

impl From<Reputation> for ReputationResponse {
    fn from(r: Reputation) -> Self {
        Self {
            average: r.average,
            count: r.count,
        }
    }
}

/// Submit a review for a transaction
pub async fn create_review(
    AuthUser(ctx): AuthUser,
    State(state): State<ReviewsState>,
    ValidatedJson(req): ValidatedJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>)> {
    let review = Review::new(
        ctx.user_id,
        req.reviewed_id,
        req.rating,
        req.comment,
        req.listing_id,
    )?;

    let created = state.repos.reviews.create(&review).await?;

    tracing::debug!(
        review_id = %created.id,
        reviewed_id = %created.reviewed_id,
        "Review submitted"
    );

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Edit one of the caller's own reviews
pub async fn update_review(
    AuthUser(ctx): AuthUser,
    State(state): State<ReviewsState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateReviewRequest>,
) -> Result<Json<ReviewResponse>> {
    if let Some(rating) = req.rating {
        Review::validate_rating(rating)?;
    }
    if let Some(ref comment) = req.comment {
        Review::validate_comment(comment)?;
    }

    let updated = state
        .repos
        .reviews
        .update(ctx.user_id, id, req.rating, req.comment)
        .await?
        .ok_or_else(|| Error::NotFound("Review not found".to_string()))?;

    Ok(Json(updated.into()))
}

/// Delete one of the caller's own reviews
pub async fn delete_review(
    AuthUser(ctx): AuthUser,
    State(state): State<ReviewsState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state.repos.reviews.delete(ctx.user_id, id).await?;

    if !deleted {
        return Err(Error::NotFound("Review not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List reviews about a user (public)
pub async fn list_user_reviews(
    State(state): State<ReviewsState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ReviewResponse>>> {
    let reviews = state.repos.reviews.list_for_user(user_id).await?;

    let responses: Vec<ReviewResponse> = reviews.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}

/// Read a user's reputation aggregate (public)
pub async fn get_user_reputation(
    State(state): State<ReviewsState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ReputationResponse>> {
    let reputation = state.repos.reviews.reputation(user_id).await?;
    Ok(Json(reputation.into()))
}
