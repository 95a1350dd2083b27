//! Authentication service: login/register flows delegating to `support_core::auth`.

use support_core::models::auth::{DEFAULT_ROLE, NewUser};
use support_core::store::{StoreError, SupportStore};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::TokenResponse;

pub use support_core::auth::jwt::{jwt_secret_from_env, verify_access_token};
pub use support_core::models::auth::TokenClaims;

/// Same body for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Hash a password with bcrypt.
pub fn hash_password(password: &str) -> AppResult<String> {
    support_core::auth::password::hash_password(password).map_err(AppError::from)
}

/// Verify a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    support_core::auth::password::verify_password(password, hash).map_err(AppError::from)
}

/// Generate a signed JWT access token (HS256, 24 h expiry).
pub fn generate_access_token(user_id: &str, email: &str, secret: &[u8]) -> AppResult<String> {
    support_core::auth::jwt::generate_access_token(user_id, email, secret).map_err(AppError::from)
}

fn validate_registration(email: &str, password: &str, name: &str) -> AppResult<()> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".into()));
    }
    if password.chars().count() < support_core::auth::password::MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            support_core::auth::password::MIN_PASSWORD_LEN
        )));
    }
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    Ok(())
}

/// Authenticate with email + password.
pub async fn login(
    store: &dyn SupportStore,
    email: &str,
    password: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    let Some(found) = store.find_user_by_email(email).await? else {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    };

    if !verify_password(password, &found.password_hash)? {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    let token = generate_access_token(&found.user.id.to_string(), &found.user.email, jwt_secret)?;
    Ok(TokenResponse {
        token,
        user: found.user,
    })
}

/// Register a new agent account and issue a token for it.
pub async fn register(
    store: &dyn SupportStore,
    email: &str,
    password: &str,
    name: &str,
    jwt_secret: &[u8],
) -> AppResult<TokenResponse> {
    validate_registration(email, password, name)?;

    if store.email_exists(email).await? {
        return Err(AppError::Validation("Email already exists".into()));
    }

    let password_hash = hash_password(password)?;
    let user = store
        .create_user(NewUser {
            email: email.to_string(),
            name: name.to_string(),
            password_hash,
            role: DEFAULT_ROLE.to_string(),
        })
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent registration.
            StoreError::Duplicate(_) => AppError::Validation("Email already exists".into()),
            other => AppError::from(other),
        })?;

    info!(user_id = %user.id, "registered user");

    let token = generate_access_token(&user.id.to_string(), &user.email, jwt_secret)?;
    Ok(TokenResponse { token, user })
}
