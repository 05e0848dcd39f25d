use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::repository::Store;
use crate::domain::types::{CarReviews, Review};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery, parse_id};
use crate::handlers::MessageResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::usecase::review::{
    CreateReviewInput, CreateReviewUseCase, DeleteReviewUseCase, GetCarReviewsUseCase,
    GetReviewUseCase, UpdateReviewUseCase, rating,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub car_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub rating: i32,
    pub comment: String,
    #[serde(serialize_with = "carstore_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "carstore_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            car_id: review.car_id,
            user_id: review.user_id,
            username: review.username,
            rating: review.rating.get(),
            comment: review.comment,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct CarReviewsResponse {
    pub reviews: Vec<ReviewResponse>,
    pub average_rating: f64,
    pub total_reviews: usize,
}

impl From<CarReviews> for CarReviewsResponse {
    fn from(agg: CarReviews) -> Self {
        Self {
            reviews: agg.reviews.into_iter().map(ReviewResponse::from).collect(),
            average_rating: agg.average_rating,
            total_reviews: agg.total_reviews,
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct CarIdQuery {
    pub car_id: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreateReviewRequest {
    pub car_id: String,
    pub rating: i32,
    pub comment: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateReviewRequest {
    pub rating: i32,
    pub comment: String,
}

/// First non-empty candidate, in precedence order.
fn resolve_car_id<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Result<Uuid, ApiError> {
    let raw = candidates
        .into_iter()
        .flatten()
        .find(|c| !c.is_empty())
        .ok_or(ApiError::MissingCarId)?;
    parse_id(raw, ApiError::InvalidCarId)
}

async fn car_reviews<S: Store>(state: &AppState<S>, car_id: Uuid) -> Result<Json<CarReviewsResponse>, ApiError> {
    let uc = GetCarReviewsUseCase {
        repo: state.review_repo(),
    };
    let agg = uc.execute(car_id).await?;
    Ok(Json(agg.into()))
}

async fn create_review<S: Store>(
    state: &AppState<S>,
    user: &AuthUser,
    path_car_id: Option<&str>,
    query_car_id: Option<&str>,
    body: CreateReviewRequest,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    // A bad rating is reported ahead of a missing or malformed car id.
    rating(body.rating)?;
    let car_id = resolve_car_id([path_car_id, query_car_id, Some(body.car_id.as_str())])?;

    let uc = CreateReviewUseCase {
        reviews: state.review_repo(),
        users: state.user_repo(),
    };
    let review = uc
        .execute(
            user.user_id,
            CreateReviewInput {
                car_id,
                rating: body.rating,
                comment: body.comment,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

// ── GET /api/reviews?car_id= ─────────────────────────────────────────────────

pub async fn list_reviews<S: Store>(
    State(state): State<AppState<S>>,
    ApiQuery(query): ApiQuery<CarIdQuery>,
) -> Result<Json<CarReviewsResponse>, ApiError> {
    let car_id = resolve_car_id([query.car_id.as_deref()])?;
    car_reviews(&state, car_id).await
}

// ── GET /api/cars/{id}/reviews ───────────────────────────────────────────────

pub async fn list_car_reviews<S: Store>(
    State(state): State<AppState<S>>,
    Path(car_id): Path<String>,
) -> Result<Json<CarReviewsResponse>, ApiError> {
    let car_id = parse_id(&car_id, ApiError::InvalidCarId)?;
    car_reviews(&state, car_id).await
}

// ── POST /api/reviews ────────────────────────────────────────────────────────

pub async fn post_review<S: Store>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    ApiQuery(query): ApiQuery<CarIdQuery>,
    ApiJson(body): ApiJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    create_review(&state, &user, None, query.car_id.as_deref(), body).await
}

// ── POST /api/cars/{id}/reviews ──────────────────────────────────────────────

pub async fn post_car_review<S: Store>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    Path(path_car_id): Path<String>,
    ApiQuery(query): ApiQuery<CarIdQuery>,
    ApiJson(body): ApiJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    create_review(
        &state,
        &user,
        Some(path_car_id.as_str()),
        query.car_id.as_deref(),
        body,
    )
    .await
}

// ── GET /api/reviews/{id} ────────────────────────────────────────────────────

pub async fn get_review<S: Store>(
    State(state): State<AppState<S>>,
    Path(review_id): Path<String>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let review_id = parse_id(&review_id, ApiError::InvalidReviewId)?;
    let uc = GetReviewUseCase {
        repo: state.review_repo(),
    };
    let review = uc.execute(review_id).await?;
    Ok(Json(review.into()))
}

// ── PUT /api/reviews/{id} ────────────────────────────────────────────────────

pub async fn update_review<S: Store>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    Path(review_id): Path<String>,
    ApiJson(body): ApiJson<UpdateReviewRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let review_id = parse_id(&review_id, ApiError::InvalidReviewId)?;
    let uc = UpdateReviewUseCase {
        repo: state.review_repo(),
    };
    uc.execute(review_id, user.user_id, body.rating, body.comment)
        .await?;
    Ok(MessageResponse::new("Review updated successfully"))
}

// ── DELETE /api/reviews/{id} ─────────────────────────────────────────────────

pub async fn delete_review<S: Store>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    Path(review_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let review_id = parse_id(&review_id, ApiError::InvalidReviewId)?;
    let uc = DeleteReviewUseCase {
        repo: state.review_repo(),
    };
    uc.execute(review_id, user.user_id).await?;
    Ok(MessageResponse::new("Review deleted successfully"))
}
