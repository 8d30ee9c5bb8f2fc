//! Prompt persistence and lifecycle transitions.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Prompt, PromptStatus};

const PROMPT_COLUMNS: &str = "id, user_id, original_prompt, optimized_prompt, template_key, \
     summary, status, created_at, updated_at";

/// Insert a prompt in the `created` state and return its ID.
pub async fn create_prompt(
    pool: &SqlitePool,
    user_id: &str,
    original_prompt: &str,
    template_key: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO prompts (user_id, original_prompt, template_key, status)
        VALUES (?, ?, ?, 'created')
        "#,
    )
    .bind(user_id)
    .bind(original_prompt)
    .bind(template_key)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Insert a prompt and attach its optimized rewrite in one transaction.
///
/// The row passes through `created` to `optimized` before commit, so a
/// failure at either step leaves nothing behind.
pub async fn create_optimized_prompt(
    pool: &SqlitePool,
    user_id: &str,
    original_prompt: &str,
    template_key: &str,
    optimized_prompt: &str,
    summary: &str,
) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO prompts (user_id, original_prompt, template_key, status)
        VALUES (?, ?, ?, 'created')
        "#,
    )
    .bind(user_id)
    .bind(original_prompt)
    .bind(template_key)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    sqlx::query(
        r#"
        UPDATE prompts
        SET optimized_prompt = ?, summary = ?, status = 'optimized',
            updated_at = datetime('now')
        WHERE id = ? AND status = 'created'
        "#,
    )
    .bind(optimized_prompt)
    .bind(summary)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(id)
}

/// Get a prompt by ID.
pub async fn get_prompt(pool: &SqlitePool, id: i64) -> Result<Prompt> {
    sqlx::query_as::<_, Prompt>(&format!(
        "SELECT {} FROM prompts WHERE id = ?",
        PROMPT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Prompt",
        id: id.to_string(),
    })
}

/// Attach the optimized rewrite and summary (`created -> optimized`).
///
/// Fails with [`DatabaseError::InvalidTransition`] when the prompt has already
/// been optimized or answered.
pub async fn mark_optimized(
    pool: &SqlitePool,
    id: i64,
    optimized_prompt: &str,
    summary: &str,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE prompts
        SET optimized_prompt = ?, summary = ?, status = 'optimized',
            updated_at = datetime('now')
        WHERE id = ? AND status = 'created'
        "#,
    )
    .bind(optimized_prompt)
    .bind(summary)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        let current = get_prompt(pool, id).await?;
        return Err(DatabaseError::InvalidTransition {
            entity: "Prompt",
            id: id.to_string(),
            from: current.status.as_str().to_string(),
            to: PromptStatus::Optimized.as_str().to_string(),
        });
    }

    Ok(())
}

/// List all prompts of a user, most recent first.
pub async fn list_prompts_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Prompt>> {
    let prompts = sqlx::query_as::<_, Prompt>(&format!(
        "SELECT {} FROM prompts WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        PROMPT_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(prompts)
}

/// List a user's prompts that have an optimized rewrite, most recent first.
pub async fn list_optimized_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Prompt>> {
    let prompts = sqlx::query_as::<_, Prompt>(&format!(
        "SELECT {} FROM prompts \
         WHERE user_id = ? AND status IN ('optimized', 'answered') \
         ORDER BY created_at DESC, id DESC",
        PROMPT_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(prompts)
}

/// List a user's prompts answered by at least `min_models` distinct models,
/// most recent first.
pub async fn list_multi_model_for_user(
    pool: &SqlitePool,
    user_id: &str,
    min_models: i64,
) -> Result<Vec<Prompt>> {
    let prompts = sqlx::query_as::<_, Prompt>(&format!(
        "SELECT {} FROM prompts \
         WHERE user_id = ? AND id IN ( \
             SELECT prompt_id FROM prompt_answers \
             GROUP BY prompt_id \
             HAVING COUNT(DISTINCT model) >= ? \
         ) \
         ORDER BY created_at DESC, id DESC",
        PROMPT_COLUMNS
    ))
    .bind(user_id)
    .bind(min_models)
    .fetch_all(pool)
    .await?;

    Ok(prompts)
}
