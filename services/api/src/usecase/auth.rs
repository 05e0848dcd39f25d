use anyhow::Context as _;
use uuid::Uuid;

use carstore_auth_types::token::issue_token;
use carstore_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{ProfileUpdate, User};
use crate::error::ApiError;
use crate::infra::password::PasswordService;
use crate::usecase::now;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Signing material for session tokens.
#[derive(Debug, Clone)]
pub struct TokenKeys {
    pub secret: String,
    pub ttl_secs: u64,
}

impl TokenKeys {
    fn issue(&self, user: &User) -> Result<String, ApiError> {
        let (token, _exp) = issue_token(
            user.id,
            &user.email,
            &user.username,
            user.role,
            &self.secret,
            self.ttl_secs,
        )
        .context("sign session token")?;
        Ok(token)
    }
}

#[derive(Debug)]
pub struct AuthOutput {
    pub token: String,
    pub user: User,
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
    pub passwords: PasswordService,
    pub keys: TokenKeys,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<AuthOutput, ApiError> {
        if input.email.is_empty() || input.username.is_empty() || input.password.is_empty() {
            return Err(ApiError::MissingRegistration);
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::PasswordTooShort);
        }

        // Pre-checks give precise messages; the store still enforces uniqueness on insert.
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::EmailTaken);
        }
        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(ApiError::UsernameTaken);
        }

        let password_hash = self.passwords.hash(input.password).await?;
        let now = now();
        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            role: UserRole::User,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, "user registered");

        let token = self.keys.issue(&user)?;
        Ok(AuthOutput { token, user })
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub passwords: PasswordService,
    pub keys: TokenKeys,
}

impl<U: UserRepository> LoginUseCase<U> {
    /// Unknown username and wrong password fail identically.
    pub async fn execute(&self, input: LoginInput) -> Result<AuthOutput, ApiError> {
        if input.username.is_empty() || input.password.is_empty() {
            return Err(ApiError::MissingLogin);
        }

        let Some(user) = self.users.find_by_username(&input.username).await? else {
            // Same scrypt cost as a wrong password so timing does not reveal the username.
            self.passwords.verify_absent(input.password).await?;
            return Err(ApiError::InvalidCredentials);
        };

        let matches = self
            .passwords
            .verify(input.password, user.password_hash.clone())
            .await?;
        if !matches {
            return Err(ApiError::InvalidCredentials);
        }

        let token = self.keys.issue(&user)?;
        Ok(AuthOutput { token, user })
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ApiError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

/// Absent fields keep their stored value.
#[derive(Default)]
pub struct UpdateProfileInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    pub async fn execute(&self, user_id: Uuid, input: UpdateProfileInput) -> Result<User, ApiError> {
        let current = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let profile = ProfileUpdate {
            username: input.username.unwrap_or_else(|| current.username.clone()),
            email: input.email.unwrap_or_else(|| current.email.clone()),
            first_name: input.first_name.unwrap_or_else(|| current.first_name.clone()),
            last_name: input.last_name.unwrap_or_else(|| current.last_name.clone()),
            phone: input.phone.unwrap_or_else(|| current.phone.clone()),
        };
        if profile.username.trim().is_empty() || profile.email.trim().is_empty() {
            return Err(ApiError::InvalidProfile);
        }

        if profile.email != current.email {
            if let Some(other) = self.users.find_by_email(&profile.email).await? {
                if other.id != user_id {
                    return Err(ApiError::EmailTaken);
                }
            }
        }
        if profile.username != current.username {
            if let Some(other) = self.users.find_by_username(&profile.username).await? {
                if other.id != user_id {
                    return Err(ApiError::UsernameTaken);
                }
            }
        }

        if !self.users.update(user_id, &profile).await? {
            return Err(ApiError::UserNotFound);
        }

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}
