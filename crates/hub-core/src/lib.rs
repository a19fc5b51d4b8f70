//! Domain types and decision logic for Upesi Hub.
//!
//! Everything in this crate is pure: it works over data that has already
//! been fetched from storage and never performs I/O. It defines:
//!
//! - [`Channel`] / [`Plan`] - the three agent channels and the purchasable plans
//! - [`resolve_status`] - derives the display status of a channel from a subscription
//! - [`RequestProgress`] - step-by-step progress for a custom request
//! - [`parse_faq_csv`] - turns an uploaded CSV file into FAQ drafts
//! - [`ListFilter`] - search and status filtering for already-fetched lists
//!
//! # Example
//!
//! ```rust
//! use hub_core::{resolve_status, AgentStatus, Channel, SubscriptionSnapshot};
//!
//! let sub = SubscriptionSnapshot::new("tier2").with_connected(Channel::Email, true);
//!
//! assert_eq!(resolve_status(Some(&sub), Channel::Email), AgentStatus::Active);
//! assert_eq!(resolve_status(Some(&sub), Channel::Whatsapp), AgentStatus::NeedsSetup);
//! assert_eq!(resolve_status(Some(&sub), Channel::Social), AgentStatus::Locked);
//! ```

mod channel;
mod entitlement;
mod error;
mod faq_import;
mod filter;
mod lifecycle;
mod plan;

pub use channel::Channel;
pub use entitlement::{
    entitled_channels, is_entitled, resolve_all, resolve_status, AgentStatus, ChannelStatuses,
    SubscriptionSnapshot,
};
pub use error::{ImportError, ParseError};
pub use faq_import::{parse_faq_csv, FaqDraft, FaqSource};
pub use filter::{ListFilter, Searchable};
pub use lifecycle::{RequestProgress, RequestStatus, StepProgress, STEP_ORDER};
pub use plan::{Plan, PlanInfo, Urgency, REQUEST_CATEGORIES};
