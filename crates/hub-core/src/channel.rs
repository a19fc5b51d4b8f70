//! Agent channels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A channel a prebuilt agent automates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Whatsapp,
    Social,
}

impl Channel {
    /// All channels in display order.
    pub const ALL: [Channel; 3] = [Channel::Email, Channel::Whatsapp, Channel::Social];

    /// Stored and wire name of the channel.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Whatsapp => "whatsapp",
            Channel::Social => "social",
        }
    }

    /// Name of the agent serving this channel.
    pub fn agent_name(&self) -> &'static str {
        match self {
            Channel::Email => "Email Agent",
            Channel::Whatsapp => "WhatsApp Agent",
            Channel::Social => "Social Agent",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Channel::Email),
            "whatsapp" => Ok(Channel::Whatsapp),
            "social" => Ok(Channel::Social),
            other => Err(ParseError::Channel(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_exact() {
        assert_eq!("email".parse::<Channel>(), Ok(Channel::Email));
        assert_eq!("whatsapp".parse::<Channel>(), Ok(Channel::Whatsapp));
        assert!("Email".parse::<Channel>().is_err());
        assert!("sms".parse::<Channel>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&Channel::Whatsapp).unwrap();
        assert_eq!(json, "\"whatsapp\"");
    }
}
