//! Authentication service - registration, login, and token-based identity.
//!
//! Request-level field validation happens in the handler DTOs; this layer
//! owns the email-uniqueness rule, password hashing, and credential checks.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepo;
use crate::services::{TokenResponse, TokenService};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and log them in immediately
    async fn register(&self, name: String, email: String, password: String)
        -> AppResult<TokenResponse>;

    /// Login with email/password credentials
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify a bearer token and resolve its subject to a live user
    async fn authenticate(&self, token: &str) -> AppResult<User>;

    /// Re-issue a token with extended expiry for the same subject
    async fn refresh(&self, token: &str) -> AppResult<TokenResponse>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepo>,
    tokens: Arc<dyn TokenService>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(users: Arc<dyn UserRepo>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> AppResult<TokenResponse> {
        // Email uniqueness is enforced here, before any write
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::field_error("email", "has already been taken"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self.users.create(name, email, password_hash).await?;

        tracing::info!(user_id = %user.id, "registered new user");

        // Immediate login on successful registration
        self.tokens.issue(user.id)
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user_result = self.users.find_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid emails.
        // We use a dummy hash that will always fail verification.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        // Only succeed if both user exists AND password is valid
        if !user_exists || !password_valid {
            return Err(AppError::Unauthorized);
        }

        // Safe since we verified user_exists is true
        let user = user_result.as_ref().ok_or(AppError::Unauthorized)?;
        self.tokens.issue(user.id)
    }

    async fn authenticate(&self, token: &str) -> AppResult<User> {
        let claims = self.tokens.verify(token)?;

        // The subject must still resolve to an existing user
        self.users
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    async fn refresh(&self, token: &str) -> AppResult<TokenResponse> {
        // Resolve the subject first so tokens for deleted accounts die here
        self.authenticate(token).await?;
        self.tokens.refresh(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::config::Config;
    use crate::infra::MockUserRepo;
    use crate::services::JwtTokens;

    fn token_service() -> Arc<JwtTokens> {
        Arc::new(JwtTokens::new(Config::for_tests("sqlite::memory:")))
    }

    fn sample_user(email: &str, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let mut users = MockUserRepo::new();
        users
            .expect_find_by_email()
            .withf(|email| email == "john@example.com")
            .returning(|_| Ok(Some(sample_user("john@example.com", "Pw1!aa"))));
        users.expect_create().never();

        let service = Authenticator::new(Arc::new(users), token_service());
        let err = service
            .register(
                "John".to_string(),
                "john@example.com".to_string(),
                "Pw1!aa".to_string(),
            )
            .await
            .unwrap_err();

        match err {
            AppError::Validation(fields) => assert!(fields.contains_key("email")),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn register_hashes_password_and_issues_token() {
        let mut users = MockUserRepo::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|_, _, hash| hash != "Pw1!aa" && hash.starts_with("$argon2"))
            .returning(|name, email, hash| {
                let mut user = sample_user(&email, "Pw1!aa");
                user.name = name;
                user.password_hash = hash;
                Ok(user)
            });

        let tokens = token_service();
        let service = Authenticator::new(Arc::new(users), tokens.clone());
        let response = service
            .register(
                "John".to_string(),
                "john@example.com".to_string(),
                "Pw1!aa".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(response.token_type, "bearer");
        assert!(tokens.verify(&response.access_token).is_ok());
    }

    #[tokio::test]
    async fn login_issues_token_for_correct_credentials() {
        let user = sample_user("john@example.com", "Pw1!aa");
        let user_id = user.id;

        let mut users = MockUserRepo::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let tokens = token_service();
        let service = Authenticator::new(Arc::new(users), tokens.clone());
        let response = service
            .login("john@example.com".to_string(), "Pw1!aa".to_string())
            .await
            .unwrap();

        let claims = tokens.verify(&response.access_token).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let user = sample_user("john@example.com", "Pw1!aa");

        let mut users = MockUserRepo::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = Authenticator::new(Arc::new(users), token_service());
        let err = service
            .login("john@example.com".to_string(), "Wrong1!".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn login_rejects_unknown_email() {
        let mut users = MockUserRepo::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let service = Authenticator::new(Arc::new(users), token_service());
        let err = service
            .login("nobody@example.com".to_string(), "Pw1!aa".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn authenticate_resolves_token_subject() {
        let user = sample_user("john@example.com", "Pw1!aa");
        let user_id = user.id;

        let mut users = MockUserRepo::new();
        users
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .returning(move |_| Ok(Some(user.clone())));

        let tokens = token_service();
        let token = tokens.issue(user_id).unwrap().access_token;

        let service = Authenticator::new(Arc::new(users), tokens);
        let resolved = service.authenticate(&token).await.unwrap();
        assert_eq!(resolved.id, user_id);
    }

    #[tokio::test]
    async fn authenticate_rejects_token_for_missing_user() {
        let mut users = MockUserRepo::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let tokens = token_service();
        let token = tokens.issue(Uuid::new_v4()).unwrap().access_token;

        let service = Authenticator::new(Arc::new(users), tokens);
        let err = service.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
