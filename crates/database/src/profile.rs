//! Profile storage.
//!
//! Profiles are created lazily the first time an authenticated user is seen.

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Profile;
use crate::validation::{validate_email, validate_required, validate_url, MAX_NAME_LENGTH};

/// Plan given to newly created profiles.
pub const DEFAULT_PLAN: &str = "starter";

/// Identity data used to seed a new profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProfile {
    /// Auth provider user id.
    pub id: String,
    pub email: Option<String>,
    /// Name from the auth provider's user metadata.
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

impl NewProfile {
    /// Display name for a new profile: the provided name, else the local
    /// part of the email, else "User".
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .map(str::trim)
            .filter(|local| !local.is_empty())
            .unwrap_or("User")
            .to_string()
    }
}

/// Settings-page changes. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    /// An empty string clears the avatar.
    pub avatar_url: Option<String>,
}

const SELECT_PROFILE: &str = r#"
    SELECT id, email, name, avatar_url, plan, renewal_date, role, created_at, updated_at
    FROM profiles
    WHERE id = ?
"#;

/// Get a profile by user id.
pub async fn get_profile(pool: &SqlitePool, id: &str) -> Result<Option<Profile>> {
    let record = sqlx::query_as::<_, Profile>(SELECT_PROFILE)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(record)
}

/// Get a profile, creating it from the identity if it does not exist yet.
pub async fn get_or_create_profile(pool: &SqlitePool, identity: &NewProfile) -> Result<Profile> {
    if let Some(profile) = get_profile(pool, &identity.id).await? {
        return Ok(profile);
    }

    let name = identity.display_name();
    let result = sqlx::query(
        r#"
        INSERT INTO profiles (id, email, name, avatar_url, plan)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(id) DO NOTHING
        "#,
    )
    .bind(&identity.id)
    .bind(&identity.email)
    .bind(&name)
    .bind(&identity.avatar_url)
    .bind(DEFAULT_PLAN)
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        tracing::info!(user_id = %identity.id, name = %name, "Created profile");
    }

    get_profile(pool, &identity.id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Profile",
            id: identity.id.clone(),
        })
}

/// Apply settings-page changes to a profile.
pub async fn update_profile(pool: &SqlitePool, id: &str, update: &ProfileUpdate) -> Result<Profile> {
    let name = match update.name.as_deref() {
        Some(name) => Some(validate_required("name", name, MAX_NAME_LENGTH)?),
        None => None,
    };

    let email = match update.email.as_deref() {
        Some(email) => {
            validate_email(email)?;
            Some(email.trim())
        }
        None => None,
    };

    let avatar_url = match update.avatar_url.as_deref().map(str::trim) {
        Some("") => Some(None),
        Some(url) => {
            validate_url(url)?;
            Some(Some(url))
        }
        None => None,
    };

    let result = sqlx::query(
        r#"
        UPDATE profiles
        SET name = COALESCE(?, name),
            email = COALESCE(?, email),
            avatar_url = CASE WHEN ? THEN ? ELSE avatar_url END,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(avatar_url.is_some())
    .bind(avatar_url.flatten())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Profile",
            id: id.to_string(),
        });
    }

    get_profile(pool, id).await?.ok_or_else(|| DatabaseError::NotFound {
        entity: "Profile",
        id: id.to_string(),
    })
}
