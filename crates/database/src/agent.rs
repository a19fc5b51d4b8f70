//! Agent catalog and per-agent subscriptions.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Agent, AgentSubscription};

/// Status of a new agent subscription.
pub const AGENT_SUBSCRIPTION_ACTIVE: &str = "active";

/// List active catalog agents in creation order.
pub async fn list_active_agents(pool: &SqlitePool) -> Result<Vec<Agent>> {
    let agents = sqlx::query_as::<_, Agent>(
        r#"
        SELECT id, name, description, category, icon, price_monthly, is_active, created_at
        FROM agents
        WHERE is_active = 1
        ORDER BY created_at
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(agents)
}

/// Get a catalog agent by ID.
pub async fn get_agent(pool: &SqlitePool, id: &str) -> Result<Agent> {
    sqlx::query_as::<_, Agent>(
        r#"
        SELECT id, name, description, category, icon, price_monthly, is_active, created_at
        FROM agents
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Agent",
        id: id.to_string(),
    })
}

/// Subscribe a user to an active agent for 30 days.
pub async fn subscribe_to_agent(
    pool: &SqlitePool,
    user_id: &str,
    agent_id: &str,
) -> Result<AgentSubscription> {
    let agent = get_agent(pool, agent_id).await?;
    if !agent.is_active {
        return Err(DatabaseError::NotFound {
            entity: "Agent",
            id: agent_id.to_string(),
        });
    }

    let id = uuid::Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO agent_subscriptions (id, user_id, agent_id, status, expires_at)
        VALUES (?, ?, ?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now', '+30 days'))
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(agent_id)
    .bind(AGENT_SUBSCRIPTION_ACTIVE)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "AgentSubscription", format!("{}/{}", user_id, agent_id)))?;

    tracing::info!(user_id = %user_id, agent_id = %agent_id, "Subscribed to agent");

    let record = sqlx::query_as::<_, AgentSubscription>(
        r#"
        SELECT id, user_id, agent_id, status, expires_at, created_at
        FROM agent_subscriptions
        WHERE id = ?
        "#,
    )
    .bind(&id)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// All agent subscriptions of a user.
pub async fn list_agent_subscriptions(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<AgentSubscription>> {
    let rows = sqlx::query_as::<_, AgentSubscription>(
        r#"
        SELECT id, user_id, agent_id, status, expires_at, created_at
        FROM agent_subscriptions
        WHERE user_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
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
    async fn test_catalog_is_seeded_in_order() {
        let db = test_db().await;
        let agents = list_active_agents(db.pool()).await.unwrap();

        let ids: Vec<&str> = agents.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["email-organizer", "whatsapp-assistant", "content-creator", "data-analyst"]
        );
        assert_eq!(agents[0].price_monthly, 2500);
    }

    #[tokio::test]
    async fn test_get_agent_not_found() {
        let db = test_db().await;
        let result = get_agent(db.pool(), "nope").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_subscribe_once() {
        let db = test_db().await;

        let sub = subscribe_to_agent(db.pool(), "user-1", "content-creator").await.unwrap();
        assert_eq!(sub.status, AGENT_SUBSCRIPTION_ACTIVE);
        assert!(sub.expires_at.as_deref().unwrap() > sub.created_at.as_str());

        let again = subscribe_to_agent(db.pool(), "user-1", "content-creator").await;
        assert!(matches!(again, Err(DatabaseError::AlreadyExists { .. })));

        let subs = list_agent_subscriptions(db.pool(), "user-1").await.unwrap();
        assert_eq!(subs.len(), 1);
        assert!(list_agent_subscriptions(db.pool(), "user-2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_unknown_agent() {
        let db = test_db().await;
        let result = subscribe_to_agent(db.pool(), "user-1", "nope").await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}
