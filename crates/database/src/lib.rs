//! SQLite persistence layer for Upesi Hub.
//!
//! This crate provides async database operations for profiles, plan
//! subscriptions, the agent catalog, custom agent requests and FAQs using
//! SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, profile::{self, NewProfile}, subscription};
//! use hub_core::Plan;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:upesi.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // First authenticated access creates the profile
//!     let identity = NewProfile {
//!         id: "c27fb365-0c84-4cf2-8555-814bb065e448".to_string(),
//!         email: Some("sarah@example.com".to_string()),
//!         ..Default::default()
//!     };
//!     profile::get_or_create_profile(db.pool(), &identity).await?;
//!
//!     // Purchase a bundle
//!     subscription::create_subscription(db.pool(), &identity.id, Plan::Tier2).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod custom_request;
pub mod error;
pub mod faq;
pub mod models;
pub mod profile;
pub mod subscription;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{
    Agent, AgentSubscription, CustomAgentRequest, Faq, NewCustomRequest, Profile, Subscription,
};
pub use profile::{NewProfile, ProfileUpdate};
pub use subscription::ChannelSetup;
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    pub const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/upesi.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_core::{resolve_all, AgentStatus, FaqDraft, Plan};

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let db = test_db().await;
        db.migrate().await.unwrap();
        assert_eq!(agent::list_active_agents(db.pool()).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_user_journey() {
        let db = test_db().await;
        let identity = NewProfile {
            id: "user-1".to_string(),
            email: Some("sarah@example.com".to_string()),
            ..Default::default()
        };

        // First access
        let profile = profile::get_or_create_profile(db.pool(), &identity).await.unwrap();
        assert_eq!(profile.name, "sarah");
        let statuses = resolve_all(None);
        assert_eq!(statuses.count(AgentStatus::Locked), 3);

        // Purchase and set up email
        subscription::create_subscription(db.pool(), "user-1", Plan::Tier3).await.unwrap();
        subscription::mark_channel_connected(db.pool(), "user-1", &ChannelSetup::Email)
            .await
            .unwrap();
        let sub = subscription::latest_subscription(db.pool(), "user-1")
            .await
            .unwrap()
            .unwrap();
        let statuses = resolve_all(Some(&sub.snapshot()));
        assert_eq!(statuses.email, AgentStatus::Active);
        assert_eq!(statuses.whatsapp, AgentStatus::Locked);
        assert_eq!(statuses.social, AgentStatus::NeedsSetup);

        // FAQ and request
        faq::create_faq(db.pool(), "user-1", &FaqDraft::manual("Hours?", "9 to 5"))
            .await
            .unwrap();
        custom_request::create_request(
            db.pool(),
            "user-1",
            &NewCustomRequest {
                agent_name: "Meeting Summarizer".to_string(),
                description: "AI-powered meeting notes".to_string(),
                category: "Other".to_string(),
                urgency: Some("low".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(faq::list_faqs(db.pool(), "user-1").await.unwrap().len(), 1);
        assert_eq!(
            custom_request::list_requests(db.pool(), "user-1").await.unwrap().len(),
            1
        );
    }
}
