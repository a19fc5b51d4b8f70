//! Current user routes.

use axum::extract::State;
use axum::Json;
use database::models::Profile;
use database::{profile, ProfileUpdate};
use serde::Serialize;

use crate::error::Result;
use crate::extract::JsonBody;
use crate::routes::Saved;
use crate::session::Session;
use crate::state::AppState;

/// The signed-in user as the dashboard shows it.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: Option<String>,
    pub name: String,
    /// Stored avatar, or a generated initials image.
    pub avatar_url: String,
    pub plan: String,
    pub role: Option<String>,
    pub renewal_date: Option<String>,
    pub joined_at: String,
}

impl From<Profile> for CurrentUser {
    fn from(profile: Profile) -> Self {
        let avatar_url = profile
            .avatar_url
            .clone()
            .unwrap_or_else(|| fallback_avatar(&profile.name));

        Self {
            id: profile.id,
            email: profile.email,
            name: profile.name,
            avatar_url,
            plan: profile.plan,
            role: profile.role,
            renewal_date: profile.renewal_date,
            joined_at: profile.created_at,
        }
    }
}

/// Generated initials avatar for users without an image.
pub fn fallback_avatar(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=6366f1&color=fff",
        urlencoding::encode(name)
    )
}

/// Get the current user.
pub async fn me_api(session: Session) -> Json<CurrentUser> {
    Json(session.profile.into())
}

/// Apply settings changes to the current user.
pub async fn update_me_api(
    State(state): State<AppState>,
    session: Session,
    JsonBody(update): JsonBody<ProfileUpdate>,
) -> Result<Json<Saved<CurrentUser>>> {
    let profile = profile::update_profile(state.db.pool(), &session.user_id, &update).await?;

    Ok(Json(Saved::new("Profile updated", profile.into())))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[test]
    fn test_fallback_avatar() {
        assert_eq!(
            fallback_avatar("sarah"),
            "https://ui-avatars.com/api/?name=sarah&background=6366f1&color=fff"
        );
    }

    #[tokio::test]
    async fn test_me_requires_session() {
        let app = app(test_state().await);
        let (status, body) = send(&app, anonymous_request(Method::GET, "/api/me")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Not authenticated");
    }

    #[tokio::test]
    async fn test_gateway_token_is_required_when_configured() {
        let mut state = test_state().await;
        state.gateway_token = Some("gateway-secret".to_string());
        let app = app(state);

        let (status, _) = send(&app, user_request(Method::GET, "/api/me", "sarah", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let mut request = user_request(Method::GET, "/api/me", "sarah", None);
        request
            .headers_mut()
            .insert("authorization", "Bearer gateway-secret".parse().unwrap());
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "sarah");
    }

    #[tokio::test]
    async fn test_me_creates_profile_lazily() {
        let state = test_state().await;
        let app = app(state.clone());

        let (status, body) = send(&app, user_request(Method::GET, "/api/me", "sarah", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "sarah");
        assert_eq!(body["name"], "sarah");
        assert_eq!(body["plan"], "starter");
        assert_eq!(body["avatar_url"], fallback_avatar("sarah"));

        let stored = profile::get_profile(state.db.pool(), "sarah").await.unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_update_me() {
        let app = app(test_state().await);

        let (status, body) = send(
            &app,
            user_request(
                Method::PUT,
                "/api/me",
                "sarah",
                Some(json!({ "name": "Sarah", "avatar_url": "https://cdn.example.com/s.png" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Profile updated");
        assert_eq!(body["name"], "Sarah");
        assert_eq!(body["avatar_url"], "https://cdn.example.com/s.png");

        let (status, _) = send(
            &app,
            user_request(Method::PUT, "/api/me", "sarah", Some(json!({ "name": "  " }))),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
