//! Custom agent request routes.

use axum::extract::{Path, State};
use axum::Json;
use database::custom_request;
use database::models::{CustomAgentRequest, NewCustomRequest};
use hub_core::{ListFilter, RequestProgress, RequestStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{HubError, Result};
use crate::extract::{JsonBody, QueryParams};
use crate::routes::Saved;
use crate::session::{AdminAccess, Session};
use crate::state::AppState;

/// A request together with its step-by-step progress.
#[derive(Debug, Clone, Serialize)]
pub struct RequestView {
    #[serde(flatten)]
    pub request: CustomAgentRequest,
    pub progress: RequestProgress,
}

impl From<CustomAgentRequest> for RequestView {
    fn from(request: CustomAgentRequest) -> Self {
        let progress = RequestProgress::for_status(&request.status);
        Self { request, progress }
    }
}

/// List the user's requests, newest first.
pub async fn list_api(
    State(state): State<AppState>,
    session: Session,
    QueryParams(filter): QueryParams<ListFilter>,
) -> Result<Json<Vec<RequestView>>> {
    let requests = custom_request::list_requests(state.db.pool(), &session.user_id).await?;
    let views = filter.apply(requests).into_iter().map(RequestView::from).collect();
    Ok(Json(views))
}

/// Submit a custom request.
pub async fn create_api(
    State(state): State<AppState>,
    session: Session,
    JsonBody(new): JsonBody<NewCustomRequest>,
) -> Result<Json<Saved<RequestView>>> {
    let request = custom_request::create_request(state.db.pool(), &session.user_id, &new).await?;

    Ok(Json(Saved::new(
        "Request submitted. We'll review it and get back to you.",
        request.into(),
    )))
}

/// Get one of the user's requests.
pub async fn get_api(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<RequestView>> {
    let request = custom_request::get_request(state.db.pool(), &session.user_id, &id).await?;
    Ok(Json(request.into()))
}

/// Back-office status change.
#[derive(Deserialize)]
pub struct StatusUpdate {
    pub status: String,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

pub async fn update_status_api(
    State(state): State<AppState>,
    _admin: AdminAccess,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> Result<Json<Saved<RequestView>>> {
    let status: RequestStatus = update
        .status
        .parse()
        .map_err(|_| HubError::BadRequest(format!("Unknown request status: {}", update.status)))?;

    let request = custom_request::update_request_status(
        state.db.pool(),
        &id,
        status,
        update.admin_notes.as_deref(),
    )
    .await?;

    info!(request_id = %id, status = %status, "Request status changed by back office");

    Ok(Json(Saved::new(format!("Request marked {}", status), request.into())))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    fn new_request(name: &str) -> Value {
        json!({
            "agent_name": name,
            "description": "AI-powered meeting notes",
            "category": "Other",
            "urgency": "medium",
            "budget": "$100-$500",
            "requirements": ["Zoom integration", " "],
        })
    }

    #[tokio::test]
    async fn test_submit_and_get_request() {
        let app = app(test_state().await);

        let (status, body) = send(
            &app,
            user_request(Method::POST, "/api/requests", "sarah", Some(new_request("Meeting Summarizer"))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "submitted");
        assert_eq!(body["requirements"], json!(["Zoom integration"]));
        assert_eq!(body["progress"]["steps"][0]["current"], true);
        assert_eq!(body["progress"]["steps"][1]["reached"], false);

        let id = body["id"].as_str().unwrap().to_string();
        let (status, body) = send(
            &app,
            user_request(Method::GET, &format!("/api/requests/{}", id), "sarah", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["agent_name"], "Meeting Summarizer");

        // Another user cannot see it.
        let (status, _) = send(
            &app,
            user_request(Method::GET, &format!("/api/requests/{}", id), "omar", None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected() {
        let app = app(test_state().await);
        let mut body = new_request("Bot");
        body["urgency"] = json!("yesterday");

        let (status, _) = send(&app, user_request(Method::POST, "/api/requests", "sarah", Some(body))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, list) = send(&app, user_request(Method::GET, "/api/requests", "sarah", None)).await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_urgency() {
        let app = app(test_state().await);
        let (status, body) = send(
            &app,
            user_request(
                Method::POST,
                "/api/requests",
                "sarah",
                Some(json!({
                    "agent_name": "Greeter",
                    "description": "Welcome new customers",
                    "category": "Customer Service",
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["urgency"].is_null());

        let mut blank = new_request("Scheduler");
        blank["urgency"] = json!("");
        let (status, body) = send(&app, user_request(Method::POST, "/api/requests", "sarah", Some(blank))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["urgency"].is_null());
    }

    #[tokio::test]
    async fn test_list_newest_first_and_filtered() {
        let app = app(test_state().await);
        for name in ["First Bot", "Second Bot"] {
            send(&app, user_request(Method::POST, "/api/requests", "sarah", Some(new_request(name)))).await;
        }

        let (_, body) = send(&app, user_request(Method::GET, "/api/requests", "sarah", None)).await;
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["agent_name"], "Second Bot");

        let (_, body) = send(
            &app,
            user_request(Method::GET, "/api/requests?search=first&status=submitted", "sarah", None),
        )
        .await;
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["agent_name"], "First Bot");

        let (_, body) = send(
            &app,
            user_request(Method::GET, "/api/requests?status=completed", "sarah", None),
        )
        .await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_back_office_status_change() {
        let app = app(test_state().await);
        let (_, created) = send(
            &app,
            user_request(Method::POST, "/api/requests", "sarah", Some(new_request("Bot"))),
        )
        .await;
        let uri = format!("/api/admin/requests/{}/status", created["id"].as_str().unwrap());

        let (status, _) = send(
            &app,
            admin_request(Method::PUT, &uri, "wrong", Some(json!({ "status": "accepted" }))),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            admin_request(Method::PUT, &uri, ADMIN_TOKEN, Some(json!({ "status": "done" }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            admin_request(
                Method::PUT,
                &uri,
                ADMIN_TOKEN,
                Some(json!({ "status": "accepted", "admin_notes": "Starting next week" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "accepted");
        assert_eq!(body["admin_notes"], "Starting next week");
        assert_eq!(body["progress"]["steps"][2]["current"], true);
        assert_eq!(body["progress"]["steps"][1]["connector_filled"], true);
        assert_eq!(body["progress"]["steps"][2]["connector_filled"], false);
    }

    #[tokio::test]
    async fn test_rejected_request_reaches_no_step() {
        let app = app(test_state().await);
        let (_, created) = send(
            &app,
            user_request(Method::POST, "/api/requests", "sarah", Some(new_request("Bot"))),
        )
        .await;
        let uri = format!("/api/admin/requests/{}/status", created["id"].as_str().unwrap());

        let (status, body) = send(
            &app,
            admin_request(Method::PUT, &uri, ADMIN_TOKEN, Some(json!({ "status": "rejected" }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["progress"]["rejected"], true);
        let steps = body["progress"]["steps"].as_array().unwrap();
        assert!(steps.iter().all(|s| s["reached"] == false));
    }
}
