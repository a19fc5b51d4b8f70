//! Database models.

use hub_core::{Searchable, SubscriptionSnapshot};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A user's profile, keyed by the auth provider's user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Profile {
    /// Auth provider user id.
    pub id: String,
    /// Email reported by the auth provider at creation time.
    pub email: Option<String>,
    /// Display name.
    pub name: String,
    /// Avatar image URL, if the user has one.
    pub avatar_url: Option<String>,
    /// Account plan label (e.g. "starter", "pro").
    pub plan: String,
    /// Next renewal date, if billed.
    pub renewal_date: Option<String>,
    /// Role within the account (e.g. "Owner").
    pub role: Option<String>,
    /// When the profile was created.
    pub created_at: String,
    /// When the profile was last updated.
    pub updated_at: String,
}

/// A purchased plan and the setup state of its channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub id: String,
    pub user_id: String,
    /// Plan identifier (tier1..tier4, email, whatsapp, social).
    pub plan: String,
    /// Lifecycle status (e.g. "pending_setup").
    pub status: String,
    pub email_connected: bool,
    pub whatsapp_connected: bool,
    /// WhatsApp number given during setup.
    pub whatsapp_phone: Option<String>,
    pub social_connected: bool,
    /// Social platform chosen during setup.
    pub social_platform: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Subscription {
    /// The fields the entitlement resolver reads.
    pub fn snapshot(&self) -> SubscriptionSnapshot {
        SubscriptionSnapshot {
            plan: self.plan.clone(),
            email_connected: self.email_connected,
            whatsapp_connected: self.whatsapp_connected,
            social_connected: self.social_connected,
        }
    }
}

/// A prebuilt agent in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub icon: Option<String>,
    /// Monthly price in cents.
    pub price_monthly: i64,
    pub is_active: bool,
    pub created_at: String,
}

/// A user's subscription to a single catalog agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AgentSubscription {
    pub id: String,
    pub user_id: String,
    pub agent_id: String,
    pub status: String,
    pub expires_at: Option<String>,
    pub created_at: String,
}

/// A user-submitted request for a bespoke agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CustomAgentRequest {
    pub id: String,
    pub user_id: String,
    pub agent_name: String,
    pub description: String,
    pub category: String,
    /// Lowercase urgency, if the user picked one.
    pub urgency: Option<String>,
    /// Free-form budget (e.g. "150" or "$100-$500").
    pub budget: Option<String>,
    pub requirements: Json<Vec<String>>,
    /// Names of supporting files the user attached.
    pub attachments: Json<Vec<String>>,
    /// One of submitted, reviewing, accepted, completed, rejected.
    pub status: String,
    pub admin_notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Searchable for CustomAgentRequest {
    fn name(&self) -> &str {
        &self.agent_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn status(&self) -> &str {
        &self.status
    }
}

/// Fields of a new custom request; everything else is defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewCustomRequest {
    pub agent_name: String,
    pub description: String,
    pub category: String,
    pub urgency: Option<String>,
    pub budget: Option<String>,
    pub requirements: Vec<String>,
    pub attachments: Vec<String>,
}

/// A stored FAQ entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Faq {
    pub id: String,
    pub user_id: String,
    pub question: String,
    pub answer: String,
    /// One of manual, csv, url.
    pub source: String,
    pub source_url: Option<String>,
    pub created_at: String,
}
