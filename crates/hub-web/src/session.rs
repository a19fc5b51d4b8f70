//! Request identity.
//!
//! The auth gateway in front of the hub authenticates the user and forwards
//! the identity as headers. Handlers take a [`Session`] argument to require
//! one; the user's profile is created the first time a session is seen.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use database::models::Profile;
use database::{profile, NewProfile};
use subtle::ConstantTimeEq;

use crate::error::HubError;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-auth-user-id";
pub const USER_EMAIL_HEADER: &str = "x-auth-user-email";
pub const USER_NAME_HEADER: &str = "x-auth-user-name";
pub const USER_AVATAR_HEADER: &str = "x-auth-user-avatar";
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// The authenticated user of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    /// Stored profile as of the start of the request.
    pub profile: Profile,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Compare a presented token with the configured one in constant time.
fn token_matches(presented: Option<&str>, expected: &str) -> bool {
    match presented {
        Some(token) if token.len() == expected.len() => {
            token.as_bytes().ct_eq(expected.as_bytes()).into()
        }
        _ => false,
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = HubError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(expected) = state.gateway_token.as_deref() {
            if !token_matches(bearer_token(&parts.headers), expected) {
                return Err(HubError::Unauthenticated);
            }
        }

        let user_id = header_value(&parts.headers, USER_ID_HEADER).ok_or(HubError::Unauthenticated)?;

        let identity = NewProfile {
            id: user_id,
            email: header_value(&parts.headers, USER_EMAIL_HEADER),
            name: header_value(&parts.headers, USER_NAME_HEADER),
            avatar_url: header_value(&parts.headers, USER_AVATAR_HEADER),
        };
        let profile = profile::get_or_create_profile(state.db.pool(), &identity).await?;

        Ok(Session {
            user_id: identity.id,
            email: identity.email,
            name: identity.name,
            avatar_url: identity.avatar_url,
            profile,
        })
    }
}

/// Proof that the request carries the back-office token.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminAccess {
    type Rejection = HubError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_token.as_deref() else {
            return Err(HubError::Forbidden("Back-office access is disabled".to_string()));
        };

        let presented = header_value(&parts.headers, ADMIN_TOKEN_HEADER);
        if token_matches(presented.as_deref(), expected) {
            Ok(AdminAccess)
        } else {
            Err(HubError::Forbidden("Invalid admin token".to_string()))
        }
    }
}
