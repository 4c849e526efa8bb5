//! Question CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Question;

/// Persist a newly submitted question.
pub async fn create_question(pool: &SqlitePool, question: &Question) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO questions (id, user_id, image_url, subject, solution_steps, solution_answer, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&question.id)
    .bind(&question.user_id)
    .bind(&question.image_url)
    .bind(&question.subject)
    .bind(&question.solution_steps)
    .bind(&question.solution_answer)
    .bind(&question.created_at)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Question",
                    id: question.id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Fetch a question by id.
pub async fn get_question(pool: &SqlitePool, id: &str) -> Result<Question> {
    let question = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, user_id, image_url, subject, solution_steps, solution_answer, created_at
        FROM questions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    question.ok_or_else(|| DatabaseError::NotFound {
        entity: "Question",
        id: id.to_string(),
    })
}

/// All questions for a user, newest first.
pub async fn list_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Question>> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, user_id, image_url, subject, solution_steps, solution_answer, created_at
        FROM questions
        WHERE user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(questions)
}

/// A user's questions for one subject label, newest first.
///
/// The subject label is the canonical grouping key used for display.
pub async fn list_for_user_by_subject(
    pool: &SqlitePool,
    user_id: &str,
    subject: &str,
) -> Result<Vec<Question>> {
    let questions = sqlx::query_as::<_, Question>(
        r#"
        SELECT id, user_id, image_url, subject, solution_steps, solution_answer, created_at
        FROM questions
        WHERE user_id = ? AND subject = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(subject)
    .fetch_all(pool)
    .await?;

    Ok(questions)
}

/// Attach a solution to a stored question.
pub async fn set_solution(
    pool: &SqlitePool,
    id: &str,
    steps: &str,
    answer: Option<&str>,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE questions
        SET solution_steps = ?, solution_answer = ?
        WHERE id = ?
        "#,
    )
    .bind(steps)
    .bind(answer)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Question",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Delete a question.
pub async fn delete_question(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM questions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Question",
            id: id.to_string(),
        });
    }

    Ok(())
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

    fn question(id: &str, user_id: &str, subject: &str, created_at: &str) -> Question {
        Question {
            id: id.to_string(),
            user_id: user_id.to_string(),
            image_url: format!("https://img.example/{id}.jpg"),
            subject: subject.to_string(),
            solution_steps: None,
            solution_answer: None,
            created_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_id_is_already_exists() {
        let db = test_db().await;
        let q = question("q-1", "u-1", "Matematik", "2026-08-07T10:00:00Z");
        create_question(db.pool(), &q).await.unwrap();

        let result = create_question(db.pool(), &q).await;
        assert!(matches!(result, Err(DatabaseError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_list_by_subject_groups_and_orders() {
        let db = test_db().await;
        create_question(db.pool(), &question("q-1", "u-1", "Fizik", "2026-08-07T10:00:00Z"))
            .await
            .unwrap();
        create_question(db.pool(), &question("q-2", "u-1", "Kimya", "2026-08-07T11:00:00Z"))
            .await
            .unwrap();
        create_question(db.pool(), &question("q-3", "u-1", "Fizik", "2026-08-07T12:00:00Z"))
            .await
            .unwrap();
        create_question(db.pool(), &question("q-4", "u-2", "Fizik", "2026-08-07T13:00:00Z"))
            .await
            .unwrap();

        let fizik = list_for_user_by_subject(db.pool(), "u-1", "Fizik").await.unwrap();
        assert_eq!(fizik.len(), 2);
        assert_eq!(fizik[0].id, "q-3"); // newest first
        assert_eq!(fizik[1].id, "q-1");

        let all = list_for_user(db.pool(), "u-1").await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_set_solution_on_missing_question() {
        let db = test_db().await;
        let result = set_solution(db.pool(), "missing", "x", None).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}
