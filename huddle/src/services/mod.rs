pub mod game_store;

use std::sync::Arc;

use espn::EspnClient;
use game_store::GameStore;

use crate::{
    broker::Broker,
    clock::{Clock, UtcClock},
    config::AppConfig,
    platforms::{telegram::TelegramBot, twitter::TwitterClient},
    polling::{
        source::{EspnSource, GameInfoSource},
        PollingContext,
    },
};

/// The shared services every component is built from.
#[derive(Clone)]
pub struct DiContainer {
    pub config: Arc<AppConfig>,
    pub broker: Broker,
    pub store: GameStore,
    pub clock: Arc<dyn Clock>,
    pub source: Arc<dyn GameInfoSource>,
    pub telegram: TelegramBot,
    pub twitter: Option<TwitterClient>,
}

impl DiContainer {
    pub fn create(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let clock: Arc<dyn Clock> = Arc::new(UtcClock);
        let espn = EspnClient::new(config.espn.clone())?;
        let telegram = TelegramBot::new(&config.telegram);
        let twitter = config.twitter.clone().map(TwitterClient::new).transpose()?;

        Ok(Self {
            source: Arc::new(EspnSource::new(espn, clock.clone())),
            broker: Broker::new(),
            store: GameStore::new(),
            config: Arc::new(config),
            clock,
            telegram,
            twitter,
        })
    }

    pub fn polling_context(&self) -> PollingContext {
        PollingContext {
            config: self.config.polling.clone(),
            store: self.store.clone(),
            broker: self.broker.clone(),
            source: self.source.clone(),
            clock: self.clock.clone(),
        }
    }
}
