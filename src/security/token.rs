//! Stateless, HMAC-signed identity tokens.
//!
//! A token carries the caller's id and role plus issue/expiry timestamps.
//! Validity depends only on the signing secret and the clock; there is no
//! server-side session table.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Role,
};

/// Lifetime of every issued token.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    Missing,
    #[error("malformed token")]
    Malformed,
    #[error("token expired")]
    Expired,
    #[error("invalid token signature")]
    Invalid,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller-supplied clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        // `iat` has no registered check; decoding into `Claims` requires it.
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, identity: &AuthUser) -> AppResult<String> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(&self, identity: &AuthUser, issued_at: DateTime<Utc>) -> AppResult<String> {
        let expires_at = issued_at + Duration::seconds(TOKEN_TTL_SECS);
        let claims = Claims {
            sub: identity.user_id.to_string(),
            role: identity.role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to sign token: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<AuthUser, AuthError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AuthUser, AuthError> {
        let decoded = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => AuthError::Invalid,
                _ => AuthError::Malformed,
            }
        })?;
        let claims = decoded.claims;

        if claims.exp <= now.timestamp() {
            return Err(AuthError::Expired);
        }

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::Malformed)?;
        Ok(AuthUser {
            user_id,
            role: claims.role,
        })
    }
}
