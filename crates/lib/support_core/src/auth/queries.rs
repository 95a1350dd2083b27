//! User table queries.

use sqlx::PgPool;

use crate::models::auth::{NewUser, User, UserWithPassword};

/// Row shape for `users` including the password hash.
#[derive(sqlx::FromRow)]
struct UserRow {
    #[sqlx(flatten)]
    user: User,
    password_hash: String,
}

/// Fetch a user with its password hash by exact email.
pub async fn find_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserWithPassword>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, name, role, created_at, password_hash FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(|r| UserWithPassword {
        user: r.user,
        password_hash: r.password_hash,
    }))
}

/// Check whether an email is already registered.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await
}

/// Create a new user, returning the stored row.
pub async fn create_user(pool: &PgPool, new_user: &NewUser) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, name, password_hash, role)
        VALUES ($1, $2, $3, $4)
        RETURNING id, email, name, role, created_at
        "#,
    )
    .bind(&new_user.email)
    .bind(&new_user.name)
    .bind(&new_user.password_hash)
    .bind(&new_user.role)
    .fetch_one(pool)
    .await
}
