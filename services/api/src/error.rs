use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Car store service error variants.
///
/// Every variant renders as `{"error": "<message>"}`; only `Internal` hides its detail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 400
    #[error("Invalid request body")]
    InvalidBody,
    #[error("Invalid query parameters")]
    InvalidQuery,
    #[error("{0}")]
    InvalidCar(&'static str),
    #[error("Email, username and password are required")]
    MissingRegistration,
    #[error("Username and password are required")]
    MissingLogin,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Username and email cannot be empty")]
    InvalidProfile,
    #[error("Rating must be between 1 and 5")]
    InvalidRating,
    #[error("car_id parameter is required")]
    MissingCarId,
    #[error("Invalid car ID")]
    InvalidCarId,
    #[error("Invalid review ID")]
    InvalidReviewId,

    // 401
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid username or password")]
    InvalidCredentials,

    // 404
    #[error("Car not found")]
    CarNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Review not found")]
    ReviewNotFound,
    #[error("Review not found or you don't have permission")]
    ReviewNotOwned,
    #[error("Not found")]
    RouteNotFound,

    // 405
    #[error("Method not allowed")]
    MethodNotAllowed,

    // 409
    #[error("Email already registered")]
    EmailTaken,
    #[error("Username already taken")]
    UsernameTaken,

    // 500
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidBody => "INVALID_BODY",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::InvalidCar(_) => "INVALID_CAR",
            Self::MissingRegistration => "MISSING_REGISTRATION",
            Self::MissingLogin => "MISSING_LOGIN",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::InvalidProfile => "INVALID_PROFILE",
            Self::InvalidRating => "INVALID_RATING",
            Self::MissingCarId => "MISSING_CAR_ID",
            Self::InvalidCarId => "INVALID_CAR_ID",
            Self::InvalidReviewId => "INVALID_REVIEW_ID",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::CarNotFound => "CAR_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ReviewNotFound => "REVIEW_NOT_FOUND",
            Self::ReviewNotOwned => "REVIEW_NOT_OWNED",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody
            | Self::InvalidQuery
            | Self::InvalidCar(_)
            | Self::MissingRegistration
            | Self::MissingLogin
            | Self::PasswordTooShort
            | Self::InvalidProfile
            | Self::InvalidRating
            | Self::MissingCarId
            | Self::InvalidCarId
            | Self::InvalidReviewId => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::CarNotFound
            | Self::UserNotFound
            | Self::ReviewNotFound
            | Self::ReviewNotOwned
            | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::EmailTaken | Self::UsernameTaken => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(_: JsonRejection) -> Self {
        Self::InvalidBody
    }
}

impl From<QueryRejection> for ApiError {
    fn from(_: QueryRejection) -> Self {
        Self::InvalidQuery
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // TraceLayer already records method/uri/status for every request; only the
        // anyhow chain behind a 500 needs logging here.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = self.kind(), "internal error");
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), axum::Json(body)).into_response()
    }
}
