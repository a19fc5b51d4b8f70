//! Custom agent request operations.

use hub_core::{RequestStatus, Urgency};
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{CustomAgentRequest, NewCustomRequest};
use crate::validation::{validate_required, ValidationError, MAX_NAME_LENGTH, MAX_TEXT_LENGTH};

/// Maximum number of listed requirements or attachments.
pub const MAX_LIST_ITEMS: usize = 50;

const REQUEST_COLUMNS: &str = "id, user_id, agent_name, description, category, urgency, budget, \
     requirements, attachments, status, admin_notes, created_at, updated_at";

fn clean_list(field: &str, items: &[String]) -> std::result::Result<Vec<String>, ValidationError> {
    let cleaned: Vec<String> = items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    if cleaned.len() > MAX_LIST_ITEMS {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_LIST_ITEMS,
            actual: cleaned.len(),
        });
    }

    Ok(cleaned)
}

/// Submit a new request. It starts in `submitted`.
pub async fn create_request(
    pool: &SqlitePool,
    user_id: &str,
    new: &NewCustomRequest,
) -> Result<CustomAgentRequest> {
    let agent_name = validate_required("agent name", &new.agent_name, MAX_NAME_LENGTH)?;
    let description = validate_required("description", &new.description, MAX_TEXT_LENGTH)?;
    let category = validate_required("category", &new.category, MAX_NAME_LENGTH)?;
    let urgency = new
        .urgency
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(|u| {
            u.parse::<Urgency>().map_err(|_| ValidationError::Unknown {
                field: "urgency".to_string(),
                value: u.to_string(),
            })
        })
        .transpose()?;
    let budget = new
        .budget
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty());
    let requirements = clean_list("requirements", &new.requirements)?;
    let attachments = clean_list("attachments", &new.attachments)?;

    let id = uuid::Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO custom_agent_requests
            (id, user_id, agent_name, description, category, urgency, budget, requirements, attachments, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(agent_name)
    .bind(description)
    .bind(category)
    .bind(urgency.as_ref().map(Urgency::as_str))
    .bind(budget)
    .bind(Json(&requirements))
    .bind(Json(&attachments))
    .bind(RequestStatus::Submitted.as_str())
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "CustomAgentRequest", id.clone()))?;

    tracing::info!(user_id = %user_id, request_id = %id, agent_name = %agent_name, "Custom request submitted");

    get_request(pool, user_id, &id).await
}

/// A user's requests, newest first.
pub async fn list_requests(pool: &SqlitePool, user_id: &str) -> Result<Vec<CustomAgentRequest>> {
    let rows = sqlx::query_as::<_, CustomAgentRequest>(&format!(
        r#"
        SELECT {REQUEST_COLUMNS}
        FROM custom_agent_requests
        WHERE user_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Get one of the user's requests.
pub async fn get_request(pool: &SqlitePool, user_id: &str, id: &str) -> Result<CustomAgentRequest> {
    sqlx::query_as::<_, CustomAgentRequest>(&format!(
        r#"
        SELECT {REQUEST_COLUMNS}
        FROM custom_agent_requests
        WHERE id = ? AND user_id = ?
        "#
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "CustomAgentRequest",
        id: id.to_string(),
    })
}

/// Back-office status change. Transitions are not checked.
pub async fn update_request_status(
    pool: &SqlitePool,
    id: &str,
    status: RequestStatus,
    admin_notes: Option<&str>,
) -> Result<CustomAgentRequest> {
    let result = sqlx::query(
        r#"
        UPDATE custom_agent_requests
        SET status = ?,
            admin_notes = COALESCE(?, admin_notes),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(status.as_str())
    .bind(admin_notes)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "CustomAgentRequest",
            id: id.to_string(),
        });
    }

    tracing::info!(request_id = %id, status = %status, "Custom request status updated");

    sqlx::query_as::<_, CustomAgentRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM custom_agent_requests WHERE id = ?"
    ))
    .bind(id)
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::from)
}

/// Count a user's requests grouped by stored status.
pub async fn count_requests_by_status(pool: &SqlitePool, user_id: &str) -> Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT status, COUNT(*) as count
        FROM custom_agent_requests
        WHERE user_id = ?
        GROUP BY status
        ORDER BY count DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
