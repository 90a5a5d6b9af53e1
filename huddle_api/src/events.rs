//! Payloads carried by the topics of the event broker.

use std::fmt::Display;

use espn::Game;
use serde::{Deserialize, Serialize};

/// The single label describing what changed between two observations of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameChange {
    NoChanges,
    NewGame,
    Started,
    Rescheduled,
    HomeScore,
    AwayScore,
    PeriodFinished,
    Finished,
}

impl GameChange {
    pub const ALL: [GameChange; 8] = [
        GameChange::NoChanges,
        GameChange::NewGame,
        GameChange::Started,
        GameChange::Rescheduled,
        GameChange::HomeScore,
        GameChange::AwayScore,
        GameChange::PeriodFinished,
        GameChange::Finished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameChange::NoChanges => "NoChanges",
            GameChange::NewGame => "NewGame",
            GameChange::Started => "Started",
            GameChange::Rescheduled => "Rescheduled",
            GameChange::HomeScore => "HomeScore",
            GameChange::AwayScore => "AwayScore",
            GameChange::PeriodFinished => "PeriodFinished",
            GameChange::Finished => "Finished",
        }
    }
}

impl Display for GameChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A game together with the change that caused it to be published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    #[serde(flatten)]
    pub game: Game,
    pub last_game_change: GameChange,
}

impl GameEvent {
    pub fn new(game: &Game, change: GameChange) -> Self {
        Self {
            game: game.clone(),
            last_game_change: change,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEvent {
    pub text: String,
}

impl TextEvent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A picture with its caption. The content travels as base64.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoEvent {
    pub caption: String,
    pub file_id: String,
    pub file_url: String,
    pub file_size: i64,
    #[serde(with = "base64_bytes")]
    pub file_content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub error: String,
}

impl ErrorEvent {
    pub fn new(error: impl Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// What a handler is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Command {
    /// Stop sending notifications.
    Stop = 0,
    /// Resume sending notifications.
    Resume = 1,
}

impl From<Command> for u8 {
    fn from(value: Command) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for Command {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Command::Stop),
            1 => Ok(Command::Resume),
            other => Err(format!("unknown command {other}")),
        }
    }
}

/// A command for one handler, or for all of them when `handler` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEvent {
    pub command: Command,
    #[serde(default)]
    pub handler: String,
}

impl CommandEvent {
    pub fn new(command: Command, handler: impl Into<String>) -> Self {
        Self {
            command,
            handler: handler.into(),
        }
    }
}

mod base64_bytes {
    use base64::{prelude::BASE64_STANDARD, Engine};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64_STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        BASE64_STANDARD.decode(encoded).map_err(D::Error::custom)
    }
}
