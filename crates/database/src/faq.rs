//! FAQ storage.

use hub_core::{FaqDraft, FaqSource};
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Faq;
use crate::validation::{validate_required, validate_url, ValidationError, MAX_TEXT_LENGTH};

/// Check a draft before it is written.
///
/// Manual entries need a question and an answer; website entries need a
/// valid URL. CSV rows are stored as parsed.
fn validate_draft(draft: &FaqDraft) -> std::result::Result<(), ValidationError> {
    match draft.source {
        FaqSource::Manual => {
            validate_required("question", &draft.question, MAX_TEXT_LENGTH)?;
            validate_required("answer", &draft.answer, MAX_TEXT_LENGTH)?;
        }
        FaqSource::Url => {
            let url = draft.source_url.as_deref().unwrap_or_default();
            validate_url(url)?;
        }
        FaqSource::Csv => {}
    }
    Ok(())
}

/// Store a single FAQ entry.
pub async fn create_faq(pool: &SqlitePool, user_id: &str, draft: &FaqDraft) -> Result<Faq> {
    validate_draft(draft)?;

    let id = uuid::Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO faqs (id, user_id, question, answer, source, source_url)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(draft.question.trim())
    .bind(draft.answer.trim())
    .bind(draft.source.as_str())
    .bind(draft.source_url.as_deref().map(str::trim))
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "Faq", id.clone()))?;

    tracing::info!(user_id = %user_id, faq_id = %id, source = %draft.source, "FAQ added");

    let faq = sqlx::query_as::<_, Faq>(
        r#"
        SELECT id, user_id, question, answer, source, source_url, created_at
        FROM faqs
        WHERE id = ?
        "#,
    )
    .bind(&id)
    .fetch_one(pool)
    .await?;

    Ok(faq)
}

/// Store a batch of FAQ entries in one transaction.
///
/// Either every draft is stored or none is. Returns the number inserted.
pub async fn insert_faqs(pool: &SqlitePool, user_id: &str, drafts: &[FaqDraft]) -> Result<usize> {
    for draft in drafts {
        validate_draft(draft)?;
    }

    let mut tx = pool.begin().await?;

    for draft in drafts {
        sqlx::query(
            r#"
            INSERT INTO faqs (id, user_id, question, answer, source, source_url)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(draft.question.trim())
        .bind(draft.answer.trim())
        .bind(draft.source.as_str())
        .bind(draft.source_url.as_deref())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(user_id = %user_id, count = drafts.len(), "FAQ batch inserted");
    Ok(drafts.len())
}

/// A user's FAQs, newest first.
pub async fn list_faqs(pool: &SqlitePool, user_id: &str) -> Result<Vec<Faq>> {
    let rows = sqlx::query_as::<_, Faq>(
        r#"
        SELECT id, user_id, question, answer, source, source_url, created_at
        FROM faqs
        WHERE user_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Delete one of the user's FAQs.
pub async fn delete_faq(pool: &SqlitePool, user_id: &str, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM faqs
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Faq",
            id: id.to_string(),
        });
    }

    tracing::info!(user_id = %user_id, faq_id = %id, "FAQ deleted");
    Ok(())
}
