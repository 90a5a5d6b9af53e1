use std::sync::Arc;

use async_trait::async_trait;
use espn::{Competition, EspnClient, Game};

use crate::clock::Clock;

pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// Where games come from.
#[async_trait]
pub trait GameInfoSource: Send + Sync + 'static {
    /// All games of the current week.
    async fn games(&self, competition: Competition) -> Result<Vec<Game>, FetchError>;

    /// The live detail of a single game.
    async fn game(&self, competition: Competition, id: &str) -> Result<Game, FetchError>;
}

pub struct EspnSource {
    client: EspnClient,
    clock: Arc<dyn Clock>,
}

impl EspnSource {
    pub fn new(client: EspnClient, clock: Arc<dyn Clock>) -> Self {
        Self { client, clock }
    }
}

#[async_trait]
impl GameInfoSource for EspnSource {
    async fn games(&self, competition: Competition) -> Result<Vec<Game>, FetchError> {
        Ok(self.client.fetch_games(competition, self.clock.now()).await?)
    }

    async fn game(&self, competition: Competition, id: &str) -> Result<Game, FetchError> {
        Ok(self.client.fetch_game(competition, id).await?)
    }
}
