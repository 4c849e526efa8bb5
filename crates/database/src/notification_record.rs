//! Notification dedup record operations.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::NotificationRecord;

/// Record that a notification identity has been shown.
///
/// Upserts: re-showing an identity after its record expired refreshes the
/// timestamp in place instead of failing on the primary key.
pub async fn mark_shown(
    pool: &SqlitePool,
    id: &str,
    tag: Option<&str>,
    shown_at: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO notification_records (id, tag, shown_at)
        VALUES (?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET tag = excluded.tag, shown_at = excluded.shown_at
        "#,
    )
    .bind(id)
    .bind(tag)
    .bind(shown_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch the record for a notification identity, if present.
pub async fn find_record(pool: &SqlitePool, id: &str) -> Result<Option<NotificationRecord>> {
    let record = sqlx::query_as::<_, NotificationRecord>(
        r#"
        SELECT id, tag, shown_at
        FROM notification_records
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Delete records shown at or before the cutoff.
///
/// Returns the number of rows swept.
pub async fn delete_expired(pool: &SqlitePool, cutoff: i64) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM notification_records
        WHERE shown_at <= ?
        "#,
    )
    .bind(cutoff)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// All records, newest first. Diagnostics only.
pub async fn list_records(pool: &SqlitePool) -> Result<Vec<NotificationRecord>> {
    let records = sqlx::query_as::<_, NotificationRecord>(
        r#"
        SELECT id, tag, shown_at
        FROM notification_records
        ORDER BY shown_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_find_missing_record() {
        let db = test_db().await;
        let record = find_record(db.pool(), "nope").await.unwrap();
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_sweep_keeps_fresh_records() {
        let db = test_db().await;
        mark_shown(db.pool(), "old", None, 1_000).await.unwrap();
        mark_shown(db.pool(), "fresh", Some("conv-c1"), 20_000)
            .await
            .unwrap();

        let swept = delete_expired(db.pool(), 10_000).await.unwrap();
        assert_eq!(swept, 1);

        let remaining = list_records(db.pool()).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "fresh");
    }
}
