//! Named consumers of the broker which can be muted at runtime.

pub mod error;
pub mod games;
pub mod manager;
pub mod telegram;
pub mod twitter;

#[cfg(test)]
pub mod testing;

use std::{
    fmt::Display,
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use huddle_api::{ErrorEvent, Topic};
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, error, Instrument};

use crate::{broker::Broker, cancel::Cancellation};

/// A consumer of one or more topics.
///
/// Muting only suppresses the outward action. A muted handler keeps
/// consuming and acknowledging its messages.
pub trait Handler: Send + Sync + 'static {
    fn id(&self) -> &str;

    /// Subscribe and spawn the consumption loops, returns without waiting for them.
    fn execute_handlers(self: Arc<Self>, cancel: Cancellation) -> Vec<JoinHandle<()>>;

    fn stop_notifications(&self);

    fn resume_notifications(&self);
}

/// The mute flag shared by a handler and its consumption loops.
#[derive(Debug, Default)]
pub struct Notifications {
    muted: AtomicBool,
}

impl Notifications {
    pub fn stop(&self) {
        self.muted.store(true, Ordering::Release);
    }

    pub fn resume(&self) {
        self.muted.store(false, Ordering::Release);
    }

    pub fn enabled(&self) -> bool {
        !self.muted.load(Ordering::Acquire)
    }
}

/// Report a failure on the error topic.
pub fn send_error(broker: &Broker, err: impl Display) {
    let event = ErrorEvent::new(err);
    if let Err(e) = broker.publish_event(Topic::Error, &event) {
        error!("Failed to report {:?}: {e}", event.error);
    }
}

/// Subscribe to `topic` and feed every decoded payload to `handle`.
///
/// Payloads that fail to decode are reported and acknowledged. When the
/// subscription cannot be made the failure is reported and no task is started.
pub fn spawn_consumer<E, F, Fut>(
    handler: &str,
    broker: &Broker,
    topic: Topic,
    cancel: Cancellation,
    handle: F,
) -> Option<JoinHandle<()>>
where
    E: DeserializeOwned + Send + 'static,
    F: Fn(E) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send,
{
    let mut subscription = match broker.subscribe(topic) {
        Ok(subscription) => subscription,
        Err(e) => {
            send_error(broker, format!("{handler} could not subscribe to {topic}: {e}"));
            return None;
        }
    };

    let broker = broker.clone();
    let span = tracing::debug_span!("consumer", handler, %topic);
    let task = async move {
        loop {
            let message = tokio::select! {
                _ = cancel.cancelled() => break,
                message = subscription.recv() => match message {
                    Some(message) => message,
                    None => break,
                },
            };

            match serde_json::from_slice::<E>(&message.payload) {
                Ok(event) => handle(event).await,
                Err(e) => send_error(&broker, e),
            }
            message.ack();
        }

        debug!("Consumer stopped");
    };

    Some(tokio::spawn(task.instrument(span)))
}
