//! Login session rows
//!
//! A session is created at login and deleted at logout. Tokens are UUIDv4.

use chrono::Utc;
use sqlx::SqlitePool;
use takeoff_common::Result;
use uuid::Uuid;

/// Create a session for the user and return its token
pub async fn create_session(pool: &SqlitePool, username: &str) -> Result<String> {
    let token = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO sessions (token, username, created_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(username)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolve a token to its username, if the session exists
pub async fn lookup_session(pool: &SqlitePool, token: &str) -> Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT username FROM sessions WHERE token = ?")
        .bind(token)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(username,)| username))
}

/// Delete a session (logout). Deleting an unknown token is a no-op.
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}
