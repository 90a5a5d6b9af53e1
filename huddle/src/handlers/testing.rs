//! Recording fakes of the platform clients.

use async_trait::async_trait;
use huddle_api::PhotoEvent;
use tokio::sync::mpsc;

use crate::platforms::{telegram::TelegramApi, twitter::TwitterApi, PlatformError};

/// Records every outward call and reports it on a channel.
pub struct Recorder {
    pub fail: bool,
    tx: mpsc::UnboundedSender<String>,
}

impl Recorder {
    pub fn new(fail: bool) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                fail,
                tx,
            },
            rx,
        )
    }

    fn record(&self, call: String) -> Result<(), PlatformError> {
        _ = self.tx.send(call);
        if self.fail {
            return Err(PlatformError::Rejected {
                platform: "Fake",
                status: 500,
                reason: "unavailable".to_string(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl TelegramApi for Recorder {
    async fn send_text(&self, chat: i64, text: &str) -> Result<(), PlatformError> {
        self.record(format!("{chat}: {text}"))
    }

    async fn send_photo(&self, chat: i64, photo: &PhotoEvent) -> Result<(), PlatformError> {
        self.record(format!("{chat}: [{}] {}", photo.file_id, photo.caption))
    }
}

#[async_trait]
impl TwitterApi for Recorder {
    async fn post_text(&self, text: &str) -> Result<(), PlatformError> {
        self.record(text.to_string())
    }

    async fn post_photo(&self, caption: &str, content: &[u8]) -> Result<(), PlatformError> {
        self.record(format!("[{} bytes] {caption}", content.len()))
    }
}
