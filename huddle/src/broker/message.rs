use std::fmt;

use bytes::Bytes;
use futures::future::join_all;
use tokio::sync::oneshot;
use uuid::Uuid;

/// A single delivery of a published payload to one subscriber.
pub struct Message {
    pub id: Uuid,
    pub payload: Bytes,
    ack: Option<oneshot::Sender<()>>,
}

impl Message {
    pub(super) fn new(id: Uuid, payload: Bytes, ack: oneshot::Sender<()>) -> Self {
        Self {
            id,
            payload,
            ack: Some(ack),
        }
    }

    /// Signal that processing has finished. There is no redelivery, this only
    /// tells the publisher that the message was consumed.
    pub fn ack(mut self) {
        if let Some(ack) = self.ack.take() {
            _ = ack.send(());
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("id", &self.id)
            .field("len", &self.payload.len())
            .finish()
    }
}

/// Receipt of a publish. Resolves once every reached subscriber acknowledged.
#[derive(Debug)]
pub struct Delivery {
    pub id: Uuid,
    acks: Vec<oneshot::Receiver<()>>,
}

impl Delivery {
    pub(super) fn new(id: Uuid, acks: Vec<oneshot::Receiver<()>>) -> Self {
        Self { id, acks }
    }

    /// Number of subscribers the message was handed to.
    pub fn receivers(&self) -> usize {
        self.acks.len()
    }

    /// Wait for all acknowledgements, returns how many arrived. A message
    /// dropped without an ack is not counted.
    pub async fn acknowledged(self) -> usize {
        join_all(self.acks)
            .await
            .into_iter()
            .filter(Result::is_ok)
            .count()
    }
}
