//! Telegram through `teloxide`.

use async_trait::async_trait;
use huddle_api::PhotoEvent;
use teloxide::{
    net::Download as _,
    prelude::*,
    types::{BotCommand, FileId, InputFile},
};
use tracing::{info, instrument};

use crate::config::TelegramConfig;

use super::PlatformError;

/// The outward calls the telegram handler and the bot make.
#[async_trait]
pub trait TelegramApi: Send + Sync + 'static {
    async fn send_text(&self, chat: i64, text: &str) -> Result<(), PlatformError>;

    async fn send_photo(&self, chat: i64, photo: &PhotoEvent) -> Result<(), PlatformError>;
}

/// Fetches the content of files sent to the bot.
#[async_trait]
pub trait FileSource: Send + Sync + 'static {
    async fn download(&self, file_id: &str) -> Result<Download, PlatformError>;
}

/// A downloaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub url: String,
    pub content: Vec<u8>,
}

/// The parts of an incoming message the bot looks at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Incoming {
    pub chat: i64,
    pub private: bool,
    pub sender: Option<i64>,
    pub text: Option<String>,
    pub caption: Option<String>,
    /// Offered sizes of a photo, smallest first.
    pub photo: Vec<PhotoSize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSize {
    pub file_id: String,
    pub file_size: i64,
}

impl From<&Message> for Incoming {
    fn from(message: &Message) -> Self {
        Self {
            chat: message.chat.id.0,
            private: message.chat.is_private(),
            sender: message.from.as_ref().map(|user| user.id.0 as i64),
            text: message.text().map(str::to_string),
            caption: message.caption().map(str::to_string),
            photo: message
                .photo()
                .unwrap_or_default()
                .iter()
                .map(|size| PhotoSize {
                    file_id: size.file.id.0.clone(),
                    file_size: i64::from(size.file.size),
                })
                .collect(),
        }
    }
}

#[derive(Clone)]
pub struct TelegramBot {
    bot: Bot,
}

impl TelegramBot {
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            bot: Bot::new(&config.bot_token),
        }
    }

    pub fn bot(&self) -> Bot {
        self.bot.clone()
    }

    /// Publish the command list shown by Telegram clients.
    pub async fn set_my_commands(&self, commands: &[(&str, &str)]) -> Result<(), PlatformError> {
        let commands: Vec<_> = commands
            .iter()
            .map(|(command, description)| BotCommand::new(*command, *description))
            .collect();

        self.bot.set_my_commands(commands).await?;
        info!("Registered bot commands with Telegram");
        Ok(())
    }
}

#[async_trait]
impl TelegramApi for TelegramBot {
    async fn send_text(&self, chat: i64, text: &str) -> Result<(), PlatformError> {
        self.bot.send_message(ChatId(chat), text).await?;
        Ok(())
    }

    async fn send_photo(&self, chat: i64, photo: &PhotoEvent) -> Result<(), PlatformError> {
        self.bot
            .send_photo(
                ChatId(chat),
                InputFile::file_id(FileId(photo.file_id.clone())),
            )
            .caption(photo.caption.clone())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl FileSource for TelegramBot {
    #[instrument(level = "debug", skip(self), err)]
    async fn download(&self, file_id: &str) -> Result<Download, PlatformError> {
        let file = self.bot.get_file(FileId(file_id.to_string())).await?;
        let mut content = Vec::new();
        self.bot.download_file(&file.path, &mut content).await?;

        Ok(Download {
            url: file.path,
            content,
        })
    }
}
