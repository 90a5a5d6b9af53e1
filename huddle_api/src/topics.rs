use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// A named channel of the event broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    /// Failures worth an operator's attention, carries [`crate::ErrorEvent`].
    Error,
    /// Pictures to broadcast, carries [`crate::PhotoEvent`].
    Photo,
    /// Text to broadcast, carries [`crate::TextEvent`].
    Text,
    /// Classified game changes, carries [`crate::GameEvent`].
    Games,
    /// Control messages for the handlers, carries [`crate::CommandEvent`].
    Command,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::Error,
        Topic::Photo,
        Topic::Text,
        Topic::Games,
        Topic::Command,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Error => "error",
            Topic::Photo => "photo",
            Topic::Text => "text",
            Topic::Games => "games",
            Topic::Command => "command",
        }
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown topic {s:?}"))
    }
}
