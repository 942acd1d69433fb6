//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{bearer_token, CurrentUser};
use crate::api::AppState;
use crate::config::PASSWORD_SYMBOLS;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// Characters a password may consist of
static PASSWORD_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@$!%*?&]+$").expect("valid charset pattern"));

/// Password complexity rule: at least one letter, one digit, and one
/// symbol from the fixed set, drawn only from the allowed charset.
fn password_complexity(password: &str) -> Result<(), ValidationError> {
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if PASSWORD_CHARSET.is_match(password) && has_letter && has_digit && has_symbol {
        Ok(())
    } else {
        let mut error = ValidationError::new("password_complexity");
        error.message = Some(Cow::Borrowed(
            "Password must contain at least one letter, one digit and one symbol (@$!%*?&)",
        ));
        Err(error)
    }
}

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User display name
    #[validate(length(min = 1, max = 150, message = "Name is required and may not exceed 150 characters"))]
    #[schema(example = "John Doe")]
    pub name: String,
    /// User email address
    #[validate(
        email(message = "Invalid email format"),
        length(max = 150, message = "Email may not exceed 150 characters")
    )]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[validate(
        length(min = 6, message = "Password must be at least 6 characters"),
        custom(function = "password_complexity")
    )]
    #[schema(example = "Secur3!pass", min_length = 6)]
    pub password: String,
    /// Password confirmation, must match `password`
    #[validate(must_match(other = "password", message = "Password confirmation does not match"))]
    #[schema(example = "Secur3!pass")]
    pub password_confirmation: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "Secur3!pass")]
    pub password: String,
}

/// Create public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}

/// Create authentication routes that require a verified bearer token
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// Register a new user and log them in
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered and logged in", body = TokenResponse),
        (status = 422, description = "Validation error, field -> messages map")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    let token = state
        .auth_service
        .register(payload.name, payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(token)))
}

/// Login and get a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(token))
}

/// Exchange a valid token for a fresh one
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "New token issued", body = TokenResponse),
        (status = 401, description = "Token missing, invalid, or expired")
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<TokenResponse>> {
    let token = bearer_token(&headers)?;
    let refreshed = state.auth_service.refresh(token).await?;

    Ok(Json(refreshed))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(Extension(current_user): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(UserResponse::from(current_user))
}

/// Log the current user out
///
/// Tokens are stateless, so logout is a client-side discard; the endpoint
/// only confirms the session is over.
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn logout(Extension(current_user): Extension<CurrentUser>) -> Json<MessageResponse> {
    tracing::info!(user_id = %current_user.id, "user logged out");
    Json(MessageResponse::new("Successfully logged out"))
}
