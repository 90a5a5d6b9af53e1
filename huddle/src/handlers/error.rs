use std::sync::Arc;

use huddle_api::{ErrorEvent, Topic};
use tokio::task::JoinHandle;
use tracing::error;

use crate::{broker::Broker, cancel::Cancellation};

use super::{spawn_consumer, Handler};

/// Logs every reported failure. Cannot be muted.
pub struct ErrorHandler {
    broker: Broker,
}

impl ErrorHandler {
    pub fn new(broker: Broker) -> Self {
        Self { broker }
    }
}

impl Handler for ErrorHandler {
    fn id(&self) -> &str {
        "error"
    }

    fn execute_handlers(self: Arc<Self>, cancel: Cancellation) -> Vec<JoinHandle<()>> {
        spawn_consumer(self.id(), &self.broker, Topic::Error, cancel, |e: ErrorEvent| {
            error!("{}", e.error);
            futures::future::ready(())
        })
        .into_iter()
        .collect()
    }

    fn stop_notifications(&self) {}

    fn resume_notifications(&self) {}
}
