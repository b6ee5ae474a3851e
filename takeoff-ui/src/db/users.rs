//! Credential store operations
//!
//! Records are created once at sign-up and never updated or deleted.

use sqlx::SqlitePool;
use takeoff_common::{hash, Result};

/// Outcome of a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created,
    AlreadyExists,
}

/// Insert a new user with a hashed password.
///
/// A duplicate username maps the primary-key violation to `AlreadyExists`
/// and leaves the stored record untouched.
pub async fn insert_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<RegisterOutcome> {
    let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
        .bind(username)
        .bind(hash::hash_password(password))
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(RegisterOutcome::Created),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Ok(RegisterOutcome::AlreadyExists)
        }
        Err(e) => Err(e.into()),
    }
}

/// Verify a username/password pair against the stored hash.
///
/// Unknown user and wrong password both return `None`; callers cannot
/// distinguish the two.
pub async fn verify_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<String>> {
    let row: Option<(String, String)> =
        sqlx::query_as("SELECT username, password FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?;

    Ok(row.and_then(|(name, stored_hash)| {
        hash::verify_password(password, &stored_hash).then_some(name)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Setup in-memory test database with the takeoff schema
    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        crate::db::init_tables(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_register_then_duplicate() {
        let pool = setup_test_db().await;

        let first = insert_user(&pool, "ada@example.com", "pw1").await.unwrap();
        let second = insert_user(&pool, "ada@example.com", "pw2").await.unwrap();

        assert_eq!(first, RegisterOutcome::Created);
        assert_eq!(second, RegisterOutcome::AlreadyExists);
    }

    #[tokio::test]
    async fn test_duplicate_does_not_alter_record() {
        let pool = setup_test_db().await;

        insert_user(&pool, "ada@example.com", "original").await.unwrap();
        insert_user(&pool, "ada@example.com", "replacement").await.unwrap();

        // The original password still authenticates; the duplicate's does not
        assert!(verify_user(&pool, "ada@example.com", "original")
            .await
            .unwrap()
            .is_some());
        assert!(verify_user(&pool, "ada@example.com", "replacement")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_verify_correct_password() {
        let pool = setup_test_db().await;

        insert_user(&pool, "ada@example.com", "pw").await.unwrap();

        let verified = verify_user(&pool, "ada@example.com", "pw").await.unwrap();
        assert_eq!(verified.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_verify_wrong_password_is_none() {
        let pool = setup_test_db().await;

        insert_user(&pool, "ada@example.com", "pw").await.unwrap();

        assert!(verify_user(&pool, "ada@example.com", "wrong")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_verify_unknown_user_is_none() {
        let pool = setup_test_db().await;

        assert!(verify_user(&pool, "nobody@example.com", "pw")
            .await
            .unwrap()
            .is_none());
    }
}
