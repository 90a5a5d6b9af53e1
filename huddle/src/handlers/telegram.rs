use std::sync::Arc;

use huddle_api::{PhotoEvent, TextEvent, Topic};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{broker::Broker, cancel::Cancellation, platforms::telegram::TelegramApi};

use super::{send_error, spawn_consumer, Handler, Notifications};

/// Broadcasts texts and photos to a Telegram chat.
pub struct TelegramHandler {
    api: Arc<dyn TelegramApi>,
    broker: Broker,
    chat: i64,
    notifications: Notifications,
}

impl TelegramHandler {
    pub fn new(api: Arc<dyn TelegramApi>, broker: Broker, chat: i64) -> Self {
        Self {
            api,
            broker,
            chat,
            notifications: Notifications::default(),
        }
    }

    async fn on_text(&self, event: TextEvent) {
        if !self.notifications.enabled() {
            debug!("Muted, not sending text");
            return;
        }

        if let Err(e) = self.api.send_text(self.chat, &event.text).await {
            send_error(&self.broker, e);
        }
    }

    async fn on_photo(&self, event: PhotoEvent) {
        if !self.notifications.enabled() {
            debug!("Muted, not sending photo");
            return;
        }

        if let Err(e) = self.api.send_photo(self.chat, &event).await {
            send_error(&self.broker, e);
        }
    }
}

impl Handler for TelegramHandler {
    fn id(&self) -> &str {
        "telegram"
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
