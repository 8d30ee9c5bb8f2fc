//! Users and bearer-token lookup.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::User;

const USER_COLUMNS: &str = "id, name, api_token";

/// Insert a user. Both the ID and the API token must be unused.
///
/// A clash on the token is reported against `"ApiToken"` without echoing
/// the token itself.
pub async fn create_user(pool: &SqlitePool, user: &User) -> Result<()> {
    let inserted = sqlx::query("INSERT INTO users (id, name, api_token) VALUES (?, ?, ?)")
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.api_token)
        .execute(pool)
        .await;

    match inserted {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            let (entity, id) = if db_err.message().contains("api_token") {
                ("ApiToken", format!("for user {}", user.id))
            } else {
                ("User", user.id.clone())
            };
            Err(DatabaseError::AlreadyExists { entity, id })
        }
        Err(e) => Err(e.into()),
    }
}

/// Fetch a user that must exist.
pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<User> {
    let found = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    found.ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Resolve a bearer token to its owner. Blank tokens never match.
pub async fn find_user_by_token(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    if token.trim().is_empty() {
        return Ok(None);
    }

    let found = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE api_token = ?",
        USER_COLUMNS
    ))
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(found)
}

/// Remove a user together with their prompts and answers (cascade).
pub async fn delete_user(pool: &SqlitePool, id: &str) -> Result<()> {
    let deleted = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    match deleted {
        0 => Err(DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        }),
        _ => Ok(()),
    }
}

/// All users, oldest account first.
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users ORDER BY created_at, name",
        USER_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}
