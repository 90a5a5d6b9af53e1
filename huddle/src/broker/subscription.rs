use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures::Stream;
use huddle_api::Topic;
use tokio::sync::mpsc;

use super::message::Message;

/// An independent stream of the messages published on one topic.
#[derive(Debug)]
pub struct Subscription {
    topic: Topic,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl Subscription {
    pub(super) fn new(topic: Topic, rx: mpsc::UnboundedReceiver<Message>) -> Self {
        Self { topic, rx }
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// The next message, `None` once the broker has been closed.
    pub async fn recv(&mut self) -> Option<Message> {
        self.rx.recv().await
    }
}

impl Stream for Subscription {
    type Item = Message;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}
