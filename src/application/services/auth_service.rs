//! Authentication Service
//!
//! Password hashing, credential checks and bearer token issue/validation.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::domain::{User, UserRepository};
use crate::shared::error::AppError;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a token.
    async fn login(&self, username: &str, password: &str) -> Result<(User, AuthToken), AuthError>;

    /// Resolve a bearer token to its (still existing) user.
    async fn authenticate(&self, token: &str) -> Result<User, AuthError>;
}

/// Issued bearer token
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Unique token id
    pub jti: String,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error(transparent)]
    Repository(#[from] AppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::Unauthorized("Invalid credentials.".into()),
            AuthError::TokenExpired => AppError::Unauthorized("Token expired.".into()),
            AuthError::InvalidToken => AppError::Unauthorized("Invalid token.".into()),
            AuthError::Repository(e) => e,
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Hash a password using Argon2id with a random salt
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// AuthService implementation
pub struct AuthServiceImpl {
    users: Arc<dyn UserRepository>,
    jwt_settings: JwtSettings,
}

impl AuthServiceImpl {
    pub fn new(users: Arc<dyn UserRepository>, jwt_settings: JwtSettings) -> Self {
        Self {
            users,
            jwt_settings,
        }
    }

    /// Sign a token for the given user
    pub fn issue_token(&self, user_id: i64) -> Result<AuthToken, AuthError> {
        let now = Utc::now();
        let expiry = now + Duration::minutes(self.jwt_settings.token_expiry_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiry.timestamp(),
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthToken {
            token,
            expires_in: self.jwt_settings.token_expiry_minutes * 60,
            token_type: "Bearer".to_string(),
        })
    }

    /// Decode and validate a token, returning the user id it names
    pub fn decode_token(&self, token: &str) -> Result<i64, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        token_data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, username: &str, password: &str) -> Result<(User, AuthToken), AuthError> {
        let Some(user) = self.users.find_by_username(username).await? else {
            tracing::info!(username, "Login failed: unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::info!(user_id = user.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(user.id)?;
        tracing::info!(user_id = user.id, admin = user.is_admin(), "User logged in");

        Ok((user, token))
    }

    async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let user_id = self.decode_token(token)?;

        // Tokens of deleted accounts stop working.
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }
}
