//! SQLite persistence layer for SoruÇöz.
//!
//! This crate provides async database operations for the notification dedup
//! store and submitted questions, using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{notification_record, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:sorucoz.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Record a shown notification
//!     notification_record::mark_shown(db.pool(), "m1", Some("conv-c1"), 1_700_000_000_000).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod notification_record;
pub mod question;

pub use error::{DatabaseError, Result};
pub use models::{NotificationRecord, Question};

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
    ///
    /// The dedup check path runs on every delivered push message, so the
    /// pool must not become the bottleneck under a burst.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/sorucoz.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
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
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_notification_record_lifecycle() {
        let db = test_db().await;

        // Record
        notification_record::mark_shown(db.pool(), "m1", Some("conv-c1"), 1_000)
            .await
            .unwrap();

        // Read back
        let record = notification_record::find_record(db.pool(), "m1")
            .await
            .unwrap()
            .expect("record should exist");
        assert_eq!(record.tag.as_deref(), Some("conv-c1"));
        assert_eq!(record.shown_at, 1_000);

        // Upsert refreshes in place
        notification_record::mark_shown(db.pool(), "m1", Some("conv-c1"), 12_000)
            .await
            .unwrap();
        let record = notification_record::find_record(db.pool(), "m1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.shown_at, 12_000);

        // Sweep removes records at or before the cutoff
        let swept = notification_record::delete_expired(db.pool(), 12_000)
            .await
            .unwrap();
        assert_eq!(swept, 1);
        assert!(notification_record::find_record(db.pool(), "m1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_question_crud() {
        let db = test_db().await;

        let question = Question {
            id: "q-1".to_string(),
            user_id: "u-1".to_string(),
            image_url: "https://img.example/q1.jpg".to_string(),
            subject: "Fizik".to_string(),
            solution_steps: None,
            solution_answer: None,
            created_at: "2026-08-07T10:00:00Z".to_string(),
        };
        question::create_question(db.pool(), &question).await.unwrap();

        let fetched = question::get_question(db.pool(), "q-1").await.unwrap();
        assert_eq!(fetched.subject, "Fizik");

        question::set_solution(db.pool(), "q-1", "Momentum korunur.", Some("B"))
            .await
            .unwrap();
        let fetched = question::get_question(db.pool(), "q-1").await.unwrap();
        assert_eq!(fetched.solution_steps.as_deref(), Some("Momentum korunur."));
        assert_eq!(fetched.solution_answer.as_deref(), Some("B"));

        question::delete_question(db.pool(), "q-1").await.unwrap();
        let result = question::get_question(db.pool(), "q-1").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}
