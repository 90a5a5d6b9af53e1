//! The game model shared by the client and everything downstream of it.

use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A league under which games are grouped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Competition {
    #[default]
    NFL,
    CFL,
    NCAA,
}

impl Competition {
    pub const ALL: [Competition; 3] = [Competition::NFL, Competition::CFL, Competition::NCAA];

    /// The competitions that are actually polled. Only the NFL has live data.
    pub fn active() -> &'static [Competition] {
        &[Competition::NFL]
    }

    /// Path segment used by ESPN for this competition.
    pub fn slug(&self) -> &'static str {
        match self {
            Competition::NFL => "nfl",
            Competition::CFL => "cfl",
            Competition::NCAA => "college-football",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Competition::NFL => "NFL",
            Competition::CFL => "CFL",
            Competition::NCAA => "NCAA",
        }
    }
}

impl Display for Competition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Competition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Competition::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown competition {s:?}"))
    }
}

/// Where a game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    #[serde(rename = "ScheduledState")]
    Scheduled,
    #[serde(rename = "RescheduledState")]
    Rescheduled,
    #[serde(rename = "InProgressState")]
    InProgress,
    #[serde(rename = "FinishedState")]
    Finished,
    #[serde(rename = "CancelledState")]
    Cancelled,
}

impl GameState {
    pub const ALL: [GameState; 5] = [
        GameState::Scheduled,
        GameState::Rescheduled,
        GameState::InProgress,
        GameState::Finished,
        GameState::Cancelled,
    ];

    /// The symbolic name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Scheduled => "ScheduledState",
            GameState::Rescheduled => "RescheduledState",
            GameState::InProgress => "InProgressState",
            GameState::Finished => "FinishedState",
            GameState::Cancelled => "CancelledState",
        }
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameState::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown game state {s:?}"))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub full_name: String,
    pub city: String,
    pub state: String,
    pub capacity: i32,
    pub indoor: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub clock: f64,
    pub display_clock: String,
    pub period: i32,
    pub state: GameState,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub display_value: String,
    pub temperature: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamScore {
    pub score: i32,
    pub name: String,
    pub short_display_name: String,
    pub logo: String,
    pub record: String,
}

/// One observation of a game. Identity is `(competition, id)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub competition: Competition,
    pub start: DateTime<Utc>,
    pub name: String,
    pub venue: Venue,
    pub status: GameStatus,
    pub weather: Weather,
    pub home_team: TeamScore,
    pub away_team: TeamScore,
    pub week_name: String,
}

impl Game {
    /// A game is being played once its start has passed and until it has finished.
    pub fn is_in_progress(&self, now: DateTime<Utc>) -> bool {
        now > self.start && !self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.status.state == GameState::Finished
    }
}
