//! Purchasable plans and custom-request reference data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::entitlement::entitled_channels;
use crate::error::ParseError;

/// A plan a user can purchase: a single agent or a bundled tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Email,
    Whatsapp,
    Social,
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl Plan {
    /// Single agents first, then bundles, as on the pricing page.
    pub const ALL: [Plan; 7] = [
        Plan::Email,
        Plan::Whatsapp,
        Plan::Social,
        Plan::Tier1,
        Plan::Tier2,
        Plan::Tier3,
        Plan::Tier4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Email => "email",
            Plan::Whatsapp => "whatsapp",
            Plan::Social => "social",
            Plan::Tier1 => "tier1",
            Plan::Tier2 => "tier2",
            Plan::Tier3 => "tier3",
            Plan::Tier4 => "tier4",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Email => "Email Agent",
            Plan::Whatsapp => "WhatsApp Agent",
            Plan::Social => "Social Agent",
            Plan::Tier1 => "Tier 1",
            Plan::Tier2 => "Tier 2",
            Plan::Tier3 => "Tier 3",
            Plan::Tier4 => "Tier 4",
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            Plan::Email => "Smart inbox management",
            Plan::Whatsapp => "Automated customer replies",
            Plan::Social => "Content scheduling and engagement",
            Plan::Tier1 => "Email Starter",
            Plan::Tier2 => "Email + WhatsApp",
            Plan::Tier3 => "Email + Social",
            Plan::Tier4 => "All agents",
        }
    }

    /// Monthly price in US cents.
    pub fn monthly_price_cents(&self) -> u32 {
        match self {
            Plan::Email => 2500,
            Plan::Whatsapp => 3500,
            Plan::Social => 3000,
            Plan::Tier1 => 2500,
            Plan::Tier2 => 5500,
            Plan::Tier3 => 5000,
            Plan::Tier4 => 8000,
        }
    }

    pub fn is_bundle(&self) -> bool {
        matches!(self, Plan::Tier1 | Plan::Tier2 | Plan::Tier3 | Plan::Tier4)
    }

    /// Monthly saving against buying the included agents separately.
    pub fn monthly_savings_cents(&self) -> u32 {
        let separate: u32 = self
            .channels()
            .into_iter()
            .map(|channel| Plan::from(channel).monthly_price_cents())
            .sum();
        separate.saturating_sub(self.monthly_price_cents())
    }

    /// Channels this plan unlocks.
    pub fn channels(&self) -> Vec<Channel> {
        entitled_channels(self.as_str())
    }

    pub fn info(&self) -> PlanInfo {
        PlanInfo {
            id: *self,
            name: self.display_name(),
            tagline: self.tagline(),
            monthly_price_cents: self.monthly_price_cents(),
            monthly_savings_cents: self.monthly_savings_cents(),
            bundle: self.is_bundle(),
            channels: self.channels(),
        }
    }
}

impl From<Channel> for Plan {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Email => Plan::Email,
            Channel::Whatsapp => Plan::Whatsapp,
            Channel::Social => Plan::Social,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plan::ALL
            .into_iter()
            .find(|plan| plan.as_str() == s)
            .ok_or_else(|| ParseError::Plan(s.to_string()))
    }
}

/// Pricing-page entry for a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanInfo {
    pub id: Plan,
    pub name: &'static str,
    pub tagline: &'static str,
    pub monthly_price_cents: u32,
    pub monthly_savings_cents: u32,
    pub bundle: bool,
    pub channels: Vec<Channel>,
}

/// Categories offered on the custom request form.
pub const REQUEST_CATEGORIES: [&str; 10] = [
    "Email Management",
    "Calendar & Scheduling",
    "Social Media",
    "Content Creation",
    "Data Analysis",
    "Customer Support",
    "Finance & Accounting",
    "Project Management",
    "Marketing Automation",
    "Other",
];

/// How soon a custom request is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Low, Urgency::Medium, Urgency::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "Low - 2-4 weeks",
            Urgency::Medium => "Medium - 1-2 weeks",
            Urgency::High => "High - 3-7 days",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = ParseError;

    /// Case-insensitive; older rows store "Medium".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            _ => Err(ParseError::Urgency(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_parse_round_trip() {
        for plan in Plan::ALL {
            assert_eq!(plan.as_str().parse::<Plan>(), Ok(plan));
        }
        assert!("tier5".parse::<Plan>().is_err());
    }

    #[test]
    fn test_bundle_savings() {
        assert_eq!(Plan::Tier2.monthly_savings_cents(), 500);
        assert_eq!(Plan::Tier3.monthly_savings_cents(), 500);
        assert_eq!(Plan::Tier4.monthly_savings_cents(), 1000);
        assert_eq!(Plan::Email.monthly_savings_cents(), 0);
    }

    #[test]
    fn test_plan_channels_follow_entitlements() {
        assert_eq!(Plan::Whatsapp.channels(), vec![Channel::Whatsapp]);
        assert_eq!(Plan::Tier3.channels(), vec![Channel::Email, Channel::Social]);
        assert!(Plan::Tier1.channels().is_empty());
    }

    #[test]
    fn test_urgency_parse_is_case_insensitive() {
        assert_eq!("Medium".parse::<Urgency>(), Ok(Urgency::Medium));
        assert_eq!("high".parse::<Urgency>(), Ok(Urgency::High));
        assert!("urgent".parse::<Urgency>().is_err());
    }
}
