use std::str::FromStr;

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    domain::{
        dto::Session,
        user::{Identity, User},
    },
    use_cases::{database::DatabaseError, user_database::UserDatabase},
};

type AuthResult<T> = Result<T, AuthError>;

const MIN_CREDENTIAL_LEN: usize = 3;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub iat: usize,
    pub exp: usize,
}

/// Secrets and cost parameters shared by signup, login and token checks.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

pub async fn register<D: UserDatabase + ?Sized>(
    database: &D,
    username: String,
    name: Option<String>,
    password: String,
    config: &AuthConfig,
) -> AuthResult<User> {
    if username.chars().count() < MIN_CREDENTIAL_LEN {
        return Err(AuthError::UsernameTooShort);
    }
    if password.chars().count() < MIN_CREDENTIAL_LEN {
        return Err(AuthError::PasswordTooShort);
    }

    let existing = database
        .get_user_by_username(username.clone())
        .await
        .map_err(|err| AuthError::DatabaseError(err.to_string()))?;
    if existing.is_some() {
        return Err(AuthError::UsernameTaken);
    }

    let password_hash = hash(password, config.bcrypt_cost)
        .map_err(|err| AuthError::PasswordHashingFailed(err.to_string()))?;

    let user = User {
        id: Uuid::new_v4(),
        username,
        name,
        password_hash,
        created_at: Utc::now(),
    };

    database.create_user(user.clone()).await.map_err(|err| match err {
        // lost a race against a concurrent signup
        DatabaseError::UniqueViolation(_) => AuthError::UsernameTaken,
        other => AuthError::DatabaseError(other.to_string()),
    })?;

    info!("registered user {}", user.username);

    Ok(user)
}

pub async fn find_user_by_username<D: UserDatabase + ?Sized>(
    database: &D,
    username: String,
) -> AuthResult<Option<User>> {
    database
        .get_user_by_username(username)
        .await
        .map_err(|err| AuthError::DatabaseError(err.to_string()))
}

pub async fn login<D: UserDatabase + ?Sized>(
    database: &D,
    username: String,
    password: String,
    config: &AuthConfig,
) -> AuthResult<Session> {
    let Some(user) = find_user_by_username(database, username).await? else {
        return Err(AuthError::InvalidCredentials);
    };

    let succesful = verify(password, &user.password_hash)
        .map_err(|err| AuthError::ErrorVerifying(err.to_string()))?;

    if !succesful {
        debug!("password mismatch for {}", user.username);
        return Err(AuthError::InvalidCredentials);
    }

    let token = issue_token(&user, config)?;

    Ok(Session {
        token,
        username: user.username,
        name: user.name,
    })
}

pub fn issue_token(user: &User, config: &AuthConfig) -> AuthResult<String> {
    let now = Utc::now();
    let expires_at = now
        .checked_add_signed(config.token_ttl)
        .ok_or(AuthError::EncodingTokenError)?;
    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        iat: usize::try_from(now.timestamp()).map_err(|_| AuthError::EncodingTokenError)?,
        exp: usize::try_from(expires_at.timestamp())
            .map_err(|_| AuthError::EncodingTokenError)?,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
    .map_err(|_| AuthError::EncodingTokenError)
}

/// Checks signature and expiry and extracts the caller's identity.
pub fn verify_token(token: &str, jwt_secret: &str) -> AuthResult<Identity> {
    let claims: Claims = decode(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|err| {
        debug!("token rejected: {err}");
        AuthError::InvalidToken
    })?
    .claims;

    let user_id = Uuid::from_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

    Ok(Identity {
        user_id,
        username: claims.username,
    })
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("username must be at least 3 characters long")]
    UsernameTooShort,
    #[error("password must be at least 3 characters long")]
    PasswordTooShort,
    #[error("expected `username` to be unique")]
    UsernameTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token missing")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("Failed password hashing: {0}")]
    PasswordHashingFailed(String),
    #[error("error verifying: {0}")]
    ErrorVerifying(String),
    #[error("encode token Error")]
    EncodingTokenError,
    #[error("database error: {0}")]
    DatabaseError(String),
}
