//! Token service - stateless signed bearer tokens.
//!
//! Tokens are HS256 JWTs carrying only the subject and validity window.
//! There is no server-side session table; verification is signature + expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_MINUTE, TOKEN_TYPE_BEARER};
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "bearer")
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
}

/// Token service trait for dependency injection.
pub trait TokenService: Send + Sync {
    /// Issue a signed token for a subject
    fn issue(&self, user_id: Uuid) -> AppResult<TokenResponse>;

    /// Verify a token's signature and expiry, returning its claims
    fn verify(&self, token: &str) -> AppResult<Claims>;

    /// Verify an existing token and issue a new one with extended expiry
    fn refresh(&self, token: &str) -> AppResult<TokenResponse>;
}

/// Concrete implementation of TokenService using HS256 JWTs.
pub struct JwtTokens {
    config: Config,
}

impl JwtTokens {
    /// Create new token service instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl TokenService for JwtTokens {
    fn issue(&self, user_id: Uuid) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.config.jwt_ttl_minutes);

        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.config.jwt_ttl_minutes * SECONDS_PER_MINUTE,
        })
    }

    fn verify(&self, token: &str) -> AppResult<Claims> {
        // Expiry is exact: exp < now fails, no leeway window
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::TokenInvalid,
        })?;

        Ok(token_data.claims)
    }

    fn refresh(&self, token: &str) -> AppResult<TokenResponse> {
        let claims = self.verify(token)?;
        self.issue(claims.sub)
    }
}
