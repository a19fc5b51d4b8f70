//! Channel entitlement and display status.
//!
//! A subscription's plan decides which channels the user may use; the
//! per-channel connection flags decide whether setup is finished. The
//! resulting [`AgentStatus`] is a derived view, recomputed on every read.

use serde::{Deserialize, Serialize};

use crate::channel::Channel;

/// Display status of a channel's agent for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// The user's plan does not include this channel (or there is no plan).
    Locked,
    /// Included in the plan but the channel has not been connected yet.
    NeedsSetup,
    /// Included and connected.
    Active,
}

/// The parts of a stored subscription the resolver looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSnapshot {
    /// Plan identifier as stored (e.g. "tier2", "email").
    pub plan: String,
    pub email_connected: bool,
    pub whatsapp_connected: bool,
    pub social_connected: bool,
}

impl SubscriptionSnapshot {
    /// A snapshot for `plan` with nothing connected.
    pub fn new(plan: impl Into<String>) -> Self {
        Self {
            plan: plan.into(),
            email_connected: false,
            whatsapp_connected: false,
            social_connected: false,
        }
    }

    /// Set the connection flag for one channel.
    pub fn with_connected(mut self, channel: Channel, connected: bool) -> Self {
        match channel {
            Channel::Email => self.email_connected = connected,
            Channel::Whatsapp => self.whatsapp_connected = connected,
            Channel::Social => self.social_connected = connected,
        }
        self
    }

    /// Whether `channel` has been connected.
    pub fn is_connected(&self, channel: Channel) -> bool {
        match channel {
            Channel::Email => self.email_connected,
            Channel::Whatsapp => self.whatsapp_connected,
            Channel::Social => self.social_connected,
        }
    }
}

/// Whether `plan` grants access to `channel`.
///
/// Unknown plans grant nothing. `tier1` is not part of the table either.
pub fn is_entitled(plan: &str, channel: Channel) -> bool {
    match plan {
        "tier4" => true,
        "tier2" => matches!(channel, Channel::Email | Channel::Whatsapp),
        "tier3" => matches!(channel, Channel::Email | Channel::Social),
        other => other == channel.as_str(),
    }
}

/// Channels granted by `plan`, in display order.
pub fn entitled_channels(plan: &str) -> Vec<Channel> {
    Channel::ALL
        .into_iter()
        .filter(|channel| is_entitled(plan, *channel))
        .collect()
}

/// Resolve the display status of `channel` for an optional subscription.
pub fn resolve_status(subscription: Option<&SubscriptionSnapshot>, channel: Channel) -> AgentStatus {
    let Some(sub) = subscription else {
        return AgentStatus::Locked;
    };

    if !is_entitled(&sub.plan, channel) {
        return AgentStatus::Locked;
    }

    if sub.is_connected(channel) {
        AgentStatus::Active
    } else {
        AgentStatus::NeedsSetup
    }
}

/// Status of every channel, as rendered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStatuses {
    pub email: AgentStatus,
    pub whatsapp: AgentStatus,
    pub social: AgentStatus,
}

impl ChannelStatuses {
    pub fn get(&self, channel: Channel) -> AgentStatus {
        match channel {
            Channel::Email => self.email,
            Channel::Whatsapp => self.whatsapp,
            Channel::Social => self.social,
        }
    }

    /// Number of channels with the given status.
    pub fn count(&self, status: AgentStatus) -> usize {
        Channel::ALL
            .into_iter()
            .filter(|channel| self.get(*channel) == status)
            .count()
    }
}

/// Resolve all three channels at once.
pub fn resolve_all(subscription: Option<&SubscriptionSnapshot>) -> ChannelStatuses {
    ChannelStatuses {
        email: resolve_status(subscription, Channel::Email),
        whatsapp: resolve_status(subscription, Channel::Whatsapp),
        social: resolve_status(subscription, Channel::Social),
    }
}
