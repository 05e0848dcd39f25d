use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use carstore_domain::user::UserRole;

use crate::domain::repository::Store;
use crate::domain::types::User;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::usecase::auth::{
    AuthOutput, GetProfileUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    UpdateProfileInput, UpdateProfileUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Public view of a user; the password hash never leaves the service.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: UserRole,
    #[serde(serialize_with = "carstore_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "carstore_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

impl From<AuthOutput> for AuthResponse {
    fn from(out: AuthOutput) -> Self {
        Self {
            token: out.token,
            user: out.user.into(),
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

// ── POST /api/auth/register ──────────────────────────────────────────────────

pub async fn register<S: Store>(
    State(state): State<AppState<S>>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let uc = RegisterUseCase {
        users: state.user_repo(),
        passwords: state.passwords.clone(),
        keys: state.keys.clone(),
    };
    let out = uc
        .execute(RegisterInput {
            email: body.email,
            username: body.username,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
            phone: body.phone,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(out.into())))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

pub async fn login<S: Store>(
    State(state): State<AppState<S>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let uc = LoginUseCase {
        users: state.user_repo(),
        passwords: state.passwords.clone(),
        keys: state.keys.clone(),
    };
    let out = uc
        .execute(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok(Json(out.into()))
}

// ── GET /api/auth/profile ────────────────────────────────────────────────────

pub async fn get_profile<S: Store>(
    user: AuthUser,
    State(state): State<AppState<S>>,
) -> Result<Json<UserResponse>, ApiError> {
    let uc = GetProfileUseCase {
        users: state.user_repo(),
    };
    let profile = uc.execute(user.user_id).await?;
    Ok(Json(profile.into()))
}

// ── PUT /api/auth/profile ────────────────────────────────────────────────────

pub async fn update_profile<S: Store>(
    user: AuthUser,
    State(state): State<AppState<S>>,
    ApiJson(body): ApiJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let uc = UpdateProfileUseCase {
        users: state.user_repo(),
    };
    let updated = uc
        .execute(
            user.user_id,
            UpdateProfileInput {
                username: body.username,
                email: body.email,
                first_name: body.first_name,
                last_name: body.last_name,
                phone: body.phone,
            },
        )
        .await?;
    Ok(Json(updated.into()))
}
