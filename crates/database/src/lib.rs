//! SQLite persistence layer for the Truth-AI prompt server.
//!
//! This crate provides async database operations for users, prompts and
//! per-model answer rounds using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, models::User, prompt, user};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:truthai.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create a user and a prompt
//!     let user = User {
//!         id: "c27fb365-0c84-4cf2-8555-814bb065e448".to_string(),
//!         name: "Bob".to_string(),
//!         api_token: "secret-token".to_string(),
//!     };
//!     user::create_user(db.pool(), &user).await?;
//!     let id = prompt::create_prompt(db.pool(), &user.id, "Why is the sky blue?", "editable").await?;
//!
//!     Ok(())
//! }
//! ```

pub mod answer;
pub mod error;
pub mod models;
pub mod prompt;
pub mod user;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{NewAnswer, Prompt, PromptAnswer, PromptStatus, User};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Open a migrated in-memory database.
    ///
    /// Each SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection.
    pub async fn in_memory() -> Result<Self> {
        let db = Self::connect_with_pool_size("sqlite::memory:", 1).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        Database::in_memory().await.unwrap()
    }

    async fn seed_user(db: &Database, id: &str) -> User {
        let user = User {
            id: id.to_string(),
            name: format!("user-{}", id),
            api_token: format!("token-{}", id),
        };
        user::create_user(db.pool(), &user).await.unwrap();
        user
    }

    fn answer(model: &str, text: &str) -> NewAnswer {
        NewAnswer {
            model: model.to_string(),
            answer: text.to_string(),
            sources: vec!["https://example.com".to_string()],
            latency_ms: 12,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_user_crud() {
        let db = test_db().await;

        let user = seed_user(&db, "alice").await;

        let fetched = user::get_user(db.pool(), &user.id).await.unwrap();
        assert_eq!(fetched, user);

        let by_token = user::find_user_by_token(db.pool(), "token-alice").await.unwrap();
        assert_eq!(by_token, Some(user.clone()));
        assert!(user::find_user_by_token(db.pool(), "nope").await.unwrap().is_none());

        let duplicate = user::create_user(db.pool(), &user).await;
        assert!(matches!(duplicate, Err(DatabaseError::AlreadyExists { entity: "User", .. })));

        let token_clash = User {
            id: "mallory".to_string(),
            name: "Mallory".to_string(),
            api_token: user.api_token.clone(),
        };
        let clash = user::create_user(db.pool(), &token_clash).await;
        match clash {
            Err(DatabaseError::AlreadyExists { entity, id }) => {
                assert_eq!(entity, "ApiToken");
                assert!(!id.contains("token-alice"));
            }
            other => panic!("expected token clash, got {:?}", other),
        }
        assert!(user::find_user_by_token(db.pool(), "  ").await.unwrap().is_none());

        assert_eq!(user::list_users(db.pool()).await.unwrap().len(), 1);

        user::delete_user(db.pool(), &user.id).await.unwrap();
        let result = user::get_user(db.pool(), &user.id).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_prompt_lifecycle() {
        let db = test_db().await;
        let user = seed_user(&db, "alice").await;

        let id = prompt::create_prompt(db.pool(), &user.id, "What is Rust?", "editable")
            .await
            .unwrap();
        let created = prompt::get_prompt(db.pool(), id).await.unwrap();
        assert_eq!(created.status, PromptStatus::Created);
        assert!(created.optimized_prompt.is_none());

        prompt::mark_optimized(db.pool(), id, "Explain Rust...", "What is Rust?")
            .await
            .unwrap();
        let optimized = prompt::get_prompt(db.pool(), id).await.unwrap();
        assert_eq!(optimized.status, PromptStatus::Optimized);
        assert_eq!(optimized.optimized_prompt.as_deref(), Some("Explain Rust..."));

        // Moving back to optimized again is rejected
        let again = prompt::mark_optimized(db.pool(), id, "other", "other").await;
        assert!(matches!(again, Err(DatabaseError::InvalidTransition { .. })));

        let round = answer::insert_round(db.pool(), id, &[answer("gpt", "A language")])
            .await
            .unwrap();
        assert_eq!(round, 1);
        let answered = prompt::get_prompt(db.pool(), id).await.unwrap();
        assert_eq!(answered.status, PromptStatus::Answered);
    }

    #[tokio::test]
    async fn test_create_optimized_prompt_is_atomic() {
        let db = test_db().await;
        let user = seed_user(&db, "alice").await;

        let id = prompt::create_optimized_prompt(
            db.pool(),
            &user.id,
            "What is Rust?",
            "editable",
            "Explain Rust.",
            "What is Rust?",
        )
        .await
        .unwrap();
        let stored = prompt::get_prompt(db.pool(), id).await.unwrap();
        assert_eq!(stored.status, PromptStatus::Optimized);
        assert_eq!(stored.summary.as_deref(), Some("What is Rust?"));

        // Unknown owner fails the foreign key and rolls the insert back
        let orphan = prompt::create_optimized_prompt(db.pool(), "ghost", "q", "editable", "o", "s").await;
        assert!(orphan.is_err());
        assert_eq!(prompt::list_prompts_for_user(db.pool(), "ghost").await.unwrap().len(), 0);
        assert_eq!(prompt::list_prompts_for_user(db.pool(), &user.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mark_optimized_unknown_prompt() {
        let db = test_db().await;
        let result = prompt::mark_optimized(db.pool(), 999, "x", "y").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_answer_rounds_accumulate() {
        let db = test_db().await;
        let user = seed_user(&db, "alice").await;
        let id = prompt::create_prompt(db.pool(), &user.id, "q", "editable")
            .await
            .unwrap();

        let set = [answer("gpt", "one"), answer("claude", "two")];
        let first = answer::insert_round(db.pool(), id, &set).await.unwrap();
        let second = answer::insert_round(db.pool(), id, &set).await.unwrap();

        assert_eq!((first, second), (1, 2));
        assert_eq!(answer::count_answers(db.pool(), id).await.unwrap(), 4);

        let stored = answer::list_answers(db.pool(), id).await.unwrap();
        assert_eq!(stored[0].round, 1);
        assert_eq!(stored[0].model, "claude");
        assert_eq!(stored[0].sources(), vec!["https://example.com".to_string()]);
        assert_eq!(stored[3].round, 2);
    }

    #[tokio::test]
    async fn test_duplicate_model_in_round_rolls_back() {
        let db = test_db().await;
        let user = seed_user(&db, "alice").await;
        let id = prompt::create_prompt(db.pool(), &user.id, "q", "editable")
            .await
            .unwrap();

        let result =
            answer::insert_round(db.pool(), id, &[answer("gpt", "a"), answer("gpt", "b")]).await;
        assert!(matches!(result, Err(DatabaseError::AlreadyExists { .. })));
        assert_eq!(answer::count_answers(db.pool(), id).await.unwrap(), 0);

        let prompt = prompt::get_prompt(db.pool(), id).await.unwrap();
        assert_eq!(prompt.status, PromptStatus::Created);
    }

    #[tokio::test]
    async fn test_insert_round_unknown_prompt() {
        let db = test_db().await;
        let result = answer::insert_round(db.pool(), 42, &[answer("gpt", "a")]).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_listings_are_user_scoped_and_recent_first() {
        let db = test_db().await;
        let alice = seed_user(&db, "alice").await;
        let bob = seed_user(&db, "bob").await;

        let a1 = prompt::create_prompt(db.pool(), &alice.id, "first", "editable")
            .await
            .unwrap();
        let a2 = prompt::create_prompt(db.pool(), &alice.id, "second", "editable")
            .await
            .unwrap();
        let b1 = prompt::create_prompt(db.pool(), &bob.id, "bob's", "editable")
            .await
            .unwrap();

        prompt::mark_optimized(db.pool(), a1, "first!", "first").await.unwrap();
        answer::insert_round(db.pool(), a1, &[answer("gpt", "x"), answer("claude", "y")])
            .await
            .unwrap();
        answer::insert_round(db.pool(), b1, &[answer("gpt", "x"), answer("claude", "y")])
            .await
            .unwrap();

        let all: Vec<i64> = prompt::list_prompts_for_user(db.pool(), &alice.id)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(all, vec![a2, a1]);

        let optimized = prompt::list_optimized_for_user(db.pool(), &alice.id)
            .await
            .unwrap();
        assert_eq!(optimized.len(), 1);
        assert_eq!(optimized[0].id, a1);

        let multi = prompt::list_multi_model_for_user(db.pool(), &alice.id, 2)
            .await
            .unwrap();
        assert_eq!(multi.len(), 1);
        assert_eq!(multi[0].id, a1);
    }
}
