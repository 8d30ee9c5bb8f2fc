//! Answer rounds attached to prompts.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewAnswer, PromptAnswer};

/// Insert one answer round for a prompt and return the round number.
///
/// All answers are written in a single transaction together with the
/// prompt's move to `answered`. Rounds are numbered from 1 per prompt.
pub async fn insert_round(pool: &SqlitePool, prompt_id: i64, answers: &[NewAnswer]) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE prompts
        SET status = 'answered', updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(prompt_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Prompt",
            id: prompt_id.to_string(),
        });
    }

    let round = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COALESCE(MAX(round), 0) + 1
        FROM prompt_answers
        WHERE prompt_id = ?
        "#,
    )
    .bind(prompt_id)
    .fetch_one(&mut *tx)
    .await?;

    for answer in answers {
        let sources = serde_json::to_string(&answer.sources)
            .unwrap_or_else(|_| "[]".to_string());

        sqlx::query(
            r#"
            INSERT INTO prompt_answers (
                prompt_id, round, model, answer, model_version, sources,
                prompt_tokens, completion_tokens, latency_ms
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(prompt_id)
        .bind(round)
        .bind(&answer.model)
        .bind(&answer.answer)
        .bind(&answer.model_version)
        .bind(sources)
        .bind(answer.prompt_tokens)
        .bind(answer.completion_tokens)
        .bind(answer.latency_ms)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return DatabaseError::AlreadyExists {
                        entity: "PromptAnswer",
                        id: format!("{}/{}/{}", prompt_id, round, answer.model),
                    };
                }
            }
            DatabaseError::Sqlx(e)
        })?;
    }

    tx.commit().await?;

    tracing::debug!(prompt_id, round, count = answers.len(), "Stored answer round");

    Ok(round)
}

/// List every stored answer of a prompt, ordered by round then model.
pub async fn list_answers(pool: &SqlitePool, prompt_id: i64) -> Result<Vec<PromptAnswer>> {
    let answers = sqlx::query_as::<_, PromptAnswer>(
        r#"
        SELECT id, prompt_id, round, model, answer, model_version,
               sources AS sources_json, prompt_tokens, completion_tokens,
               latency_ms, created_at
        FROM prompt_answers
        WHERE prompt_id = ?
        ORDER BY round, model
        "#,
    )
    .bind(prompt_id)
    .fetch_all(pool)
    .await?;

    Ok(answers)
}

/// Count stored answers of a prompt across all rounds.
pub async fn count_answers(pool: &SqlitePool, prompt_id: i64) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM prompt_answers WHERE prompt_id = ?
        "#,
    )
    .bind(prompt_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
