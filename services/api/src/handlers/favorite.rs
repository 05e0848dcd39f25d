use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::repository::Store;
use crate::domain::types::FavoriteWithCar;
use crate::error::ApiError;
use crate::extract::{ApiJson, parse_id};
use crate::handlers::MessageResponse;
use crate::handlers::car::CarResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::usecase::favorite::{
    AddFavoriteUseCase, CheckFavoriteUseCase, CountFavoritesUseCase, ListFavoritesUseCase,
    RemoveFavoriteUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct FavoriteResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub car: CarResponse,
    #[serde(serialize_with = "carstore_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<FavoriteWithCar> for FavoriteResponse {
    fn from(joined: FavoriteWithCar) -> Self {
        Self {
            id: joined.favorite.id,
            user_id: joined.favorite.user_id,
            car_id: joined.favorite.car_id,
            car: joined.car.into(),
            created_at: joined.favorite.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Serialize)]
pub struct CheckFavoriteResponse {
    pub car_id: Uuid,
    pub is_favorite: bool,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct AddFavoriteRequest {
    pub car_id: String,
}

// ── GET /api/favorites ───────────────────────────────────────────────────────

pub async fn list_favorites<S: Store>(
    user: AuthUser,
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<FavoriteResponse>>, ApiError> {
    let uc = ListFavoritesUseCase {
        repo: state.favorite_repo(),
    };
    let favorites = uc.execute(user.user_id).await?;
    Ok(Json(favorites.into_iter().map(FavoriteResponse::from).collect()))
}

// ── POST /api/favorites ──────────────────────────────────────────────────────

pub async fn add_favorite<S: Store>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    ApiJson(body): ApiJson<AddFavoriteRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let car_id = parse_id(&body.car_id, ApiError::InvalidCarId)?;
    let uc = AddFavoriteUseCase {
        repo: state.favorite_repo(),
    };
    uc.execute(user.user_id, car_id).await?;
    Ok(MessageResponse::new("Added to favorites successfully"))
}

// ── DELETE /api/favorites/{car_id} ───────────────────────────────────────────

pub async fn remove_favorite<S: Store>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    Path(car_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let car_id = parse_id(&car_id, ApiError::InvalidCarId)?;
    let uc = RemoveFavoriteUseCase {
        repo: state.favorite_repo(),
    };
    uc.execute(user.user_id, car_id).await?;
    Ok(MessageResponse::new("Removed from favorites successfully"))
}

// ── GET /api/favorites/count ─────────────────────────────────────────────────

pub async fn count_favorites<S: Store>(
    user: AuthUser,
    State(state): State<AppState<S>>,
) -> Result<Json<CountResponse>, ApiError> {
    let uc = CountFavoritesUseCase {
        repo: state.favorite_repo(),
    };
    let count = uc.execute(user.user_id).await?;
    Ok(Json(CountResponse { count }))
}

// ── GET /api/favorites/{car_id} ──────────────────────────────────────────────

pub async fn check_favorite<S: Store>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    Path(car_id): Path<String>,
) -> Result<Json<CheckFavoriteResponse>, ApiError> {
    let car_id = parse_id(&car_id, ApiError::InvalidCarId)?;
    let uc = CheckFavoriteUseCase {
        repo: state.favorite_repo(),
    };
    let is_favorite = uc.execute(user.user_id, car_id).await?;
    Ok(Json(CheckFavoriteResponse {
        car_id,
        is_favorite,
    }))
}
