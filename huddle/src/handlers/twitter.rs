use std::sync::Arc;

use huddle_api::{PhotoEvent, TextEvent, Topic};
use tokio::task::JoinHandle;

use crate::{broker::Broker, cancel::Cancellation, platforms::twitter::TwitterApi};

use super::{send_error, spawn_consumer, Handler, Notifications};

/// Tweets texts and photos.
pub struct TwitterHandler {
    api: Arc<dyn TwitterApi>,
    broker: Broker,
    notifications: Notifications,
}

impl TwitterHandler {
    pub fn new(api: Arc<dyn TwitterApi>, broker: Broker) -> Self {
        Self {
            api,
            broker,
            notifications: Notifications::default(),
        }
    }

    async fn on_text(&self, event: TextEvent) {
        if !self.notifications.enabled() {
            return;
        }

        if let Err(e) = self.api.post_text(&event.text).await {
            send_error(&self.broker, e);
        }
    }

    async fn on_photo(&self, event: PhotoEvent) {
        if !self.notifications.enabled() {
            return;
        }

        if let Err(e) = self
            .api
            .post_photo(&event.caption, &event.file_content)
            .await
        {
            send_error(&self.broker, e);
        }
    }
}

impl Handler for TwitterHandler {
    fn id(&self) -> &str {
        "twitter"
    }

    fn execute_handlers(self: Arc<Self>, cancel: Cancellation) -> Vec<JoinHandle<()>> {
        let text = self.clone();
        let photo = self.clone();

        [
            spawn_consumer(self.id(), &self.broker, Topic::Text, cancel.clone(), move |e: TextEvent| {
                let this = text.clone();
                async move { this.on_text(e).await }
            }),
            spawn_consumer(self.id(), &self.broker, Topic::Photo, cancel, move |e: PhotoEvent| {
                let this = photo.clone();
                async move { this.on_photo(e).await }
            }),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn stop_notifications(&self) {
        self.notifications.stop();
    }

    fn resume_notifications(&self) {
        self.notifications.resume();
    }
}
