//! Route handlers for the hub API.

pub mod agents;
pub mod billing;
pub mod dashboard;
pub mod faqs;
pub mod health;
pub mod me;
pub mod pricing;
pub mod requests;
pub mod subscriptions;

use axum::routing::{delete, get, post, put};
use axum::Router;
use serde::Serialize;

use crate::state::AppState;

/// Body of a mutation response: the saved record plus the toast text.
#[derive(Debug, Serialize)]
pub struct Saved<T> {
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Saved<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Public catalog
        .route("/api/pricing", get(pricing::pricing_api))
        .route("/api/catalog/request-options", get(pricing::request_options_api))
        // Account
        .route("/api/me", get(me::me_api).put(me::update_me_api))
        .route("/api/dashboard", get(dashboard::dashboard_api))
        .route("/api/channels", get(dashboard::channels_api))
        .route("/api/billing", get(billing::billing_api))
        // Agents and plans
        .route("/api/agents", get(agents::list_api))
        .route("/api/agents/:id/subscribe", post(agents::subscribe_api))
        .route("/api/subscriptions", post(subscriptions::purchase_api))
        .route("/api/setup/email", post(subscriptions::setup_email_api))
        .route("/api/setup/whatsapp", post(subscriptions::setup_whatsapp_api))
        .route("/api/setup/social", post(subscriptions::setup_social_api))
        // Custom requests
        .route("/api/requests", get(requests::list_api).post(requests::create_api))
        .route("/api/requests/:id", get(requests::get_api))
        // FAQs
        .route("/api/faqs", get(faqs::list_api).post(faqs::create_api))
        .route("/api/faqs/url", post(faqs::website_api))
        .route("/api/faqs/import", post(faqs::import_api))
        .route("/api/faqs/:id", delete(faqs::delete_api))
        // Back office
        .route("/api/admin/requests/:id/status", put(requests::update_status_api))
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use database::Database;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::session::{ADMIN_TOKEN_HEADER, USER_EMAIL_HEADER, USER_ID_HEADER};
    use crate::state::AppState;

    pub const ADMIN_TOKEN: &str = "back-office";

    pub async fn test_state() -> AppState {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        AppState {
            db,
            gateway_token: None,
            admin_token: Some(ADMIN_TOKEN.to_string()),
        }
    }

    pub fn app(state: AppState) -> Router {
        super::router().with_state(state)
    }

    /// A request as forwarded by the auth gateway for `user_id`.
    pub fn user_request(method: Method, uri: &str, user_id: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(USER_ID_HEADER, user_id)
            .header(USER_EMAIL_HEADER, format!("{}@example.com", user_id));
        with_body(builder, body)
    }

    pub fn admin_request(method: Method, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(ADMIN_TOKEN_HEADER, token);
        with_body(builder, body)
    }

    pub fn anonymous_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn with_body(builder: axum::http::request::Builder, body: Option<Value>) -> Request<Body> {
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    /// Send a request and decode the JSON body.
    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
