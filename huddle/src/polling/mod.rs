use std::sync::Arc;

use crate::{broker::Broker, clock::Clock, config::PollingConfig, services::game_store::GameStore};

pub mod classify;
pub mod scheduler;
pub mod source;

use source::GameInfoSource;

/// Everything a polling task needs.
#[derive(Clone)]
pub struct PollingContext {
    pub config: PollingConfig,
    pub store: GameStore,
    pub broker: Broker,
    pub source: Arc<dyn GameInfoSource>,
    pub clock: Arc<dyn Clock>,
}
