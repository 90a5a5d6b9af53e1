//! A minimal in-process publish/subscribe bus over named topics.
//!
//! Delivery is at-most-once. A message published to a topic without
//! subscribers is dropped, nothing is persisted or replayed.

mod message;
mod subscription;

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use bytes::Bytes;
use huddle_api::Topic;
use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::trace;
use uuid::Uuid;

pub use message::{Delivery, Message};
pub use subscription::Subscription;

#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("The broker has been closed.")]
    Closed,

    #[error("Failed to serialize the payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct Broker {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    subscribers: Mutex<HashMap<Topic, Vec<mpsc::UnboundedSender<Message>>>>,
    closed: AtomicBool,
}

impl Broker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand `payload` to every current subscriber of `topic`.
    pub fn publish(&self, topic: Topic, payload: impl Into<Bytes>) -> Result<Delivery, BrokerError> {
        let payload = payload.into();
        let id = Uuid::new_v4();
        let mut subscribers = self.inner.subscribers.lock();
        if self.inner.closed.load(Ordering::Acquire) {
            return Err(BrokerError::Closed);
        }

        let mut acks = vec![];
        if let Some(senders) = subscribers.get_mut(&topic) {
            senders.retain(|tx| {
                let (ack_tx, ack_rx) = oneshot::channel();
                match tx.send(Message::new(id, payload.clone(), ack_tx)) {
                    Ok(()) => {
                        acks.push(ack_rx);
                        true
                    }
                    Err(_) => false,
                }
            });
        }

        if acks.is_empty() {
            trace!("No subscriber on {topic}, dropped message {id}");
        } else {
            trace!("Published {id} on {topic} to {} subscribers", acks.len());
        }

        Ok(Delivery::new(id, acks))
    }

    /// Serialize `event` as JSON and publish it.
    pub fn publish_event<E: Serialize>(
        &self,
        topic: Topic,
        event: &E,
    ) -> Result<Delivery, BrokerError> {
        let payload = serde_json::to_vec(event)?;
        self.publish(topic, payload)
    }

    /// Start an independent stream of everything published on `topic` from now on.
    pub fn subscribe(&self, topic: Topic) -> Result<Subscription, BrokerError> {
        let mut subscribers = self.inner.subscribers.lock();
        if self.inner.closed.load(Ordering::Acquire) {
            return Err(BrokerError::Closed);
        }

        let (tx, rx) = mpsc::unbounded_channel();
        subscribers.entry(topic).or_default().push(tx);
        trace!("New subscriber on {topic}");
        Ok(Subscription::new(topic, rx))
    }

    /// End all subscriptions. Consumers drain what is already queued and then
    /// see the end of their stream.
    pub fn close(&self) {
        let mut subscribers = self.inner.subscribers.lock();
        self.inner.closed.store(true, Ordering::Release);
        subscribers.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}
