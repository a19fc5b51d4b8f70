//! Plan subscriptions and channel setup.

use hub_core::{Channel, Plan};
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Subscription;
use crate::validation::{validate_phone, validate_required, MAX_NAME_LENGTH};

/// Status of a freshly purchased subscription.
pub const PENDING_SETUP: &str = "pending_setup";

/// Details recorded when a channel finishes setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelSetup {
    Email,
    Whatsapp { phone: String },
    Social { platform: String },
}

impl ChannelSetup {
    pub fn channel(&self) -> Channel {
        match self {
            ChannelSetup::Email => Channel::Email,
            ChannelSetup::Whatsapp { .. } => Channel::Whatsapp,
            ChannelSetup::Social { .. } => Channel::Social,
        }
    }
}

const SUBSCRIPTION_COLUMNS: &str = "id, user_id, plan, status, email_connected, whatsapp_connected, \
     whatsapp_phone, social_connected, social_platform, created_at, updated_at";

/// Record a plan purchase.
///
/// The profile's plan and renewal date are updated in the same transaction.
pub async fn create_subscription(pool: &SqlitePool, user_id: &str, plan: Plan) -> Result<Subscription> {
    let id = uuid::Uuid::new_v4().to_string();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO subscriptions (id, user_id, plan, status)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(plan.as_str())
    .bind(PENDING_SETUP)
    .execute(&mut *tx)
    .await
    .map_err(|e| DatabaseError::from_insert(e, "Subscription", id.clone()))?;

    sqlx::query(
        r#"
        UPDATE profiles
        SET plan = ?,
            renewal_date = date('now', '+1 month'),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(plan.as_str())
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    let subscription = sqlx::query_as::<_, Subscription>(&format!(
        "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE id = ?"
    ))
    .bind(&id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(user_id = %user_id, plan = %plan, "Created subscription");
    Ok(subscription)
}

/// The user's effective (most recent) subscription.
pub async fn latest_subscription(pool: &SqlitePool, user_id: &str) -> Result<Option<Subscription>> {
    let record = sqlx::query_as::<_, Subscription>(&format!(
        r#"
        SELECT {SUBSCRIPTION_COLUMNS}
        FROM subscriptions
        WHERE user_id = ?
        ORDER BY created_at DESC, rowid DESC
        LIMIT 1
        "#
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// All of a user's subscriptions, newest first.
pub async fn list_subscriptions(pool: &SqlitePool, user_id: &str) -> Result<Vec<Subscription>> {
    let rows = sqlx::query_as::<_, Subscription>(&format!(
        r#"
        SELECT {SUBSCRIPTION_COLUMNS}
        FROM subscriptions
        WHERE user_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Mark a channel as connected on every subscription row of the user.
///
/// Returns the number of rows updated. A user with no subscription gets
/// `NotFound`.
pub async fn mark_channel_connected(
    pool: &SqlitePool,
    user_id: &str,
    setup: &ChannelSetup,
) -> Result<u64> {
    let query = match setup {
        ChannelSetup::Email => sqlx::query(
            r#"
            UPDATE subscriptions
            SET email_connected = 1,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            WHERE user_id = ?
            "#,
        )
        .bind(user_id),
        ChannelSetup::Whatsapp { phone } => {
            validate_phone(phone)?;
            sqlx::query(
                r#"
                UPDATE subscriptions
                SET whatsapp_connected = 1,
                    whatsapp_phone = ?,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                WHERE user_id = ?
                "#,
            )
            .bind(phone.trim().to_string())
            .bind(user_id)
        }
        ChannelSetup::Social { platform } => {
            let platform = validate_required("platform", platform, MAX_NAME_LENGTH)?;
            sqlx::query(
                r#"
                UPDATE subscriptions
                SET social_connected = 1,
                    social_platform = ?,
                    updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                WHERE user_id = ?
                "#,
            )
            .bind(platform.to_string())
            .bind(user_id)
        }
    };

    let result = query.execute(pool).await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Subscription",
            id: user_id.to_string(),
        });
    }

    tracing::info!(
        user_id = %user_id,
        channel = %setup.channel(),
        rows = result.rows_affected(),
        "Channel connected"
    );
    Ok(result.rows_affected())
}
