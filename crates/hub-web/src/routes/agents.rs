//! Agent catalog routes.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use database::agent;
use database::models::{Agent, AgentSubscription};
use hub_core::{ListFilter, Searchable};
use serde::Serialize;

use crate::error::Result;
use crate::extract::QueryParams;
use crate::routes::Saved;
use crate::session::Session;
use crate::state::AppState;

/// Subscription status shown for agents the user has not subscribed to.
pub const NOT_SUBSCRIBED: &str = "not_subscribed";

/// A catalog agent with the user's subscription state.
#[derive(Debug, Clone, Serialize)]
pub struct AgentView {
    #[serde(flatten)]
    pub agent: Agent,
    pub subscription_status: String,
    pub expires_at: Option<String>,
}

impl Searchable for AgentView {
    fn name(&self) -> &str {
        &self.agent.name
    }

    fn description(&self) -> &str {
        &self.agent.description
    }

    fn status(&self) -> &str {
        &self.subscription_status
    }
}

/// List active agents, filtered by `search` and `status`.
pub async fn list_api(
    State(state): State<AppState>,
    session: Session,
    QueryParams(filter): QueryParams<ListFilter>,
) -> Result<Json<Vec<AgentView>>> {
    let pool = state.db.pool();

    let agents = agent::list_active_agents(pool).await?;
    let mut subscriptions: HashMap<String, AgentSubscription> =
        agent::list_agent_subscriptions(pool, &session.user_id)
            .await?
            .into_iter()
            .map(|sub| (sub.agent_id.clone(), sub))
            .collect();

    let views = agents
        .into_iter()
        .map(|agent| {
            let sub = subscriptions.remove(&agent.id);
            AgentView {
                subscription_status: sub
                    .as_ref()
                    .map(|s| s.status.clone())
                    .unwrap_or_else(|| NOT_SUBSCRIBED.to_string()),
                expires_at: sub.and_then(|s| s.expires_at),
                agent,
            }
        })
        .collect();

    Ok(Json(filter.apply(views)))
}

/// Subscribe to a catalog agent.
pub async fn subscribe_api(
    State(state): State<AppState>,
    session: Session,
    Path(agent_id): Path<String>,
) -> Result<Json<Saved<AgentSubscription>>> {
    let pool = state.db.pool();
    let record = agent::subscribe_to_agent(pool, &session.user_id, &agent_id).await?;
    let agent = agent::get_agent(pool, &agent_id).await?;

    Ok(Json(Saved::new(format!("Subscribed to {}", agent.name), record)))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_list_and_subscribe() {
        let app = app(test_state().await);

        let (status, body) = send(&app, user_request(Method::GET, "/api/agents", "sarah", None)).await;
        assert_eq!(status, StatusCode::OK);
        let agents = body.as_array().unwrap();
        assert_eq!(agents.len(), 4);
        assert!(agents.iter().all(|a| a["subscription_status"] == "not_subscribed"));

        let (status, body) = send(
            &app,
            user_request(Method::POST, "/api/agents/data-analyst/subscribe", "sarah", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Subscribed to Data Analysis Agent");
        assert_eq!(body["status"], "active");

        let (status, body) = send(
            &app,
            user_request(Method::GET, "/api/agents?status=active", "sarah", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let agents = body.as_array().unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0]["id"], "data-analyst");
        assert!(agents[0]["expires_at"].is_string());
    }

    #[tokio::test]
    async fn test_duplicate_subscription_conflicts() {
        let app = app(test_state().await);
        let uri = "/api/agents/email-organizer/subscribe";

        send(&app, user_request(Method::POST, uri, "sarah", None)).await;
        let (status, _) = send(&app, user_request(Method::POST, uri, "sarah", None)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_unknown_agent() {
        let app = app(test_state().await);
        let (status, _) = send(
            &app,
            user_request(Method::POST, "/api/agents/nope/subscribe", "sarah", None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let app = app(test_state().await);
        let (_, body) = send(
            &app,
            user_request(Method::GET, "/api/agents?search=WHATSAPP", "sarah", None),
        )
        .await;
        let agents = body.as_array().unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0]["id"], "whatsapp-assistant");
    }
}
