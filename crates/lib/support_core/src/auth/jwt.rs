//! JWT token generation and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::AuthError;
use crate::models::auth::TokenClaims;

/// Access token lifetime: 24 hours.
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 24 * 60 * 60;

/// Generate a signed JWT access token (HS256, 24 h expiry).
pub fn generate_access_token(
    user_id: &str,
    email: &str,
    secret: &[u8],
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: (now + Duration::seconds(ACCESS_TOKEN_EXPIRY_SECS)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenError(format!("jwt encode: {e}")))
}

/// Verify a JWT access token, returning the claims on success.
pub fn verify_access_token(token: &str, secret: &[u8]) -> Option<TokenClaims> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    decode::<TokenClaims>(token, &key, &validation)
        .ok()
        .map(|data| data.claims)
}

/// Environment variable holding the HS256 signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Read the signing secret from `JWT_SECRET`. Missing or blank is an error.
pub fn jwt_secret_from_env() -> Result<String, AuthError> {
    require_jwt_secret(std::env::var(JWT_SECRET_ENV).ok())
}

/// Accept a configured secret, rejecting a missing or blank value.
pub fn require_jwt_secret(raw: Option<String>) -> Result<String, AuthError> {
    raw.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AuthError::Config(format!("{JWT_SECRET_ENV} is not set")))
}
