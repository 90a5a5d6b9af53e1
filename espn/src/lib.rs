pub mod client;
pub mod constants;
pub mod error;
pub mod game;
pub mod parsing;
pub mod settings;

pub use client::EspnClient;
pub use error::EspnError;
pub use game::{Competition, Game, GameState, GameStatus, TeamScore, Venue, Weather};
pub use settings::EspnSettings;
