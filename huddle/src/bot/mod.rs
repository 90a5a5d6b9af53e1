//! The inbound side of Telegram: admins talk to the bot in private chats and
//! their messages become events on the broker.

pub mod commands;

use huddle_api::{CommandEvent, PhotoEvent, TextEvent, Topic};
use teloxide::prelude::*;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    broker::{Broker, BrokerError},
    cancel::Cancellation,
    platforms::telegram::{FileSource, Incoming, TelegramApi, TelegramBot},
};

use commands::{help_text, parse_command, BotCommand, COMMANDS};

const GREETING: &str = "Thanks for using the bot! You can type /help command to know what can I do";

/// What to do with one incoming message.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Reply(String),
    Command(CommandEvent),
    Text(TextEvent),
    /// A captioned photo. Its content is filled in once downloaded.
    Photo(PhotoEvent),
}

/// Decide what a message asks for. Anything not sent by an admin in a
/// private chat is ignored.
pub fn interpret(message: &Incoming, admins: &[i64]) -> Option<Action> {
    if !message.private || !message.sender.is_some_and(|id| admins.contains(&id)) {
        warn!(
            chat = message.chat,
            sender = ?message.sender,
            "Ignoring message from unauthorized chat"
        );
        return None;
    }

    if let Some(photo) = message.photo.last() {
        let caption = message.caption.as_deref().unwrap_or_default().trim();
        if caption.is_empty() {
            debug!("Ignoring photo without caption");
            return None;
        }

        return Some(Action::Photo(PhotoEvent {
            caption: caption.to_string(),
            file_id: photo.file_id.clone(),
            file_size: photo.file_size,
            ..Default::default()
        }));
    }

    let text = message.text.as_deref()?.trim();
    match parse_command(text) {
        Some(Ok(BotCommand::Start)) => Some(Action::Reply(GREETING.to_string())),
        Some(Ok(BotCommand::Help)) => Some(Action::Reply(help_text())),
        Some(Ok(BotCommand::Handler { command, handler })) => {
            Some(Action::Command(CommandEvent::new(command, handler)))
        }
        Some(Err(e)) => Some(Action::Reply(format!("{e}\n\n{}", help_text()))),
        None if text.is_empty() => None,
        None => Some(Action::Text(TextEvent::new(text))),
    }
}

/// Publish what an action produces. Returns the reply to send back, if any.
pub fn dispatch(broker: &Broker, action: Action) -> Result<Option<String>, BrokerError> {
    match action {
        Action::Reply(reply) => return Ok(Some(reply)),
        Action::Command(event) => broker.publish_event(Topic::Command, &event)?,
        Action::Text(event) => broker.publish_event(Topic::Text, &event)?,
        Action::Photo(event) => broker.publish_event(Topic::Photo, &event)?,
    };
    Ok(None)
}

/// Interpret one message and carry it out. Photos are downloaded first and
/// dropped when that fails.
pub async fn handle<A>(api: &A, broker: &Broker, admins: &[i64], message: &Incoming)
where
    A: TelegramApi + FileSource,
{
    let Some(mut action) = interpret(message, admins) else {
        return;
    };

    if let Action::Photo(photo) = &mut action {
        match api.download(&photo.file_id).await {
            Ok(download) => {
                photo.file_url = download.url;
                photo.file_content = download.content;
            }
            Err(e) => {
                warn!("Ignoring photo {}: {e}", photo.file_id);
                return;
            }
        }
    }

    match dispatch(broker, action) {
        Ok(Some(reply)) => {
            if let Err(e) = api.send_text(message.chat, &reply).await {
                warn!("Could not reply to {}: {e}", message.chat);
            }
        }
        Ok(None) => {}
        Err(e) => error!("Failed to publish message of {}: {e}", message.chat),
    }
}

/// Listen for updates until cancelled. Polling, offsets and retries are left
/// to the teloxide dispatcher.
#[instrument(level = "debug", skip_all, name = "bot")]
pub async fn run(bot: TelegramBot, broker: Broker, admins: Vec<i64>, cancel: Cancellation) {
    if let Err(e) = bot.set_my_commands(&COMMANDS).await {
        warn!("Could not register the bot commands: {e}");
    }

    info!("Bot listening for {} admins", admins.len());
    let api = bot.clone();
    let listener = teloxide::repl(bot.bot(), move |_bot: Bot, msg: Message| {
        let api = api.clone();
        let broker = broker.clone();
        let admins = admins.clone();
        async move {
            handle(&api, &broker, &admins, &Incoming::from(&msg)).await;
            respond(())
        }
    });

    tokio::select! {
        _ = cancel.cancelled() => {}
        _ = listener => {}
    }

    debug!("Bot stopped");
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use huddle_api::Command;
    use parking_lot::Mutex;

    use crate::platforms::{
        telegram::{Download, PhotoSize},
        PlatformError,
    };

    use super::*;

    const ADMIN: i64 = 42;

    /// Records replies and serves downloads from memory.
    #[derive(Default)]
    struct FakeBot {
        replies: Mutex<Vec<(i64, String)>>,
        files: Mutex<Vec<String>>,
        missing: bool,
    }

    #[async_trait]
    impl TelegramApi for FakeBot {
        async fn send_text(&self, chat: i64, text: &str) -> Result<(), PlatformError> {
            self.replies.lock().push((chat, text.to_string()));
            Ok(())
        }

        async fn send_photo(&self, _chat: i64, _photo: &PhotoEvent) -> Result<(), PlatformError> {
            Ok(())
        }
    }

    #[async_trait]
    impl FileSource for FakeBot {
        async fn download(&self, file_id: &str) -> Result<Download, PlatformError> {
            self.files.lock().push(file_id.to_string());
            if self.missing {
                return Err(PlatformError::InvalidResponse("Telegram"));
            }

            Ok(Download {
                url: format!("photos/{file_id}.jpg"),
                content: vec![1, 2, 3],
            })
        }
    }

    fn private(text: &str) -> Incoming {
        Incoming {
            chat: ADMIN,
            private: true,
            sender: Some(ADMIN),
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    fn photo(caption: Option<&str>) -> Incoming {
        Incoming {
            text: None,
            caption: caption.map(str::to_string),
            photo: vec![
                PhotoSize {
                    file_id: "small".to_string(),
                    file_size: 10,
                },
                PhotoSize {
                    file_id: "big".to_string(),
                    file_size: 900,
                },
            ],
            ..private("")
        }
    }

    #[test]
    fn only_admins_in_private_chats_are_heard() {
        let mut group = private("/stop");
        group.private = false;
        assert_eq!(interpret(&group, &[ADMIN]), None);

        let stranger = private("/stop");
        assert_eq!(interpret(&stranger, &[7]), None);

        let mut anonymous = private("/stop");
        anonymous.sender = None;
        assert_eq!(interpret(&anonymous, &[ADMIN]), None);
    }

    #[test]
    fn commands_become_command_events() {
        assert_eq!(
            interpret(&private("/stop"), &[ADMIN]),
            Some(Action::Command(CommandEvent::new(Command::Stop, "")))
        );
        assert_eq!(
            interpret(&private("/resume@huddle_bot telegram"), &[ADMIN]),
            Some(Action::Command(CommandEvent::new(Command::Resume, "telegram")))
        );
        assert_eq!(
            interpret(&private("/start"), &[ADMIN]),
            Some(Action::Reply(GREETING.to_string()))
        );
        assert!(matches!(
            interpret(&private("/kickoff"), &[ADMIN]),
            Some(Action::Reply(reply)) if reply.starts_with("Unknown command /kickoff")
        ));
    }

    #[test]
    fn text_is_trimmed_and_empty_text_ignored() {
        assert_eq!(
            interpret(&private("  Touchdown!  "), &[ADMIN]),
            Some(Action::Text(TextEvent::new("Touchdown!")))
        );
        assert_eq!(interpret(&private("   "), &[ADMIN]), None);
    }

    #[test]
    fn photos_need_a_caption() {
        assert_eq!(interpret(&photo(None), &[ADMIN]), None);
        assert_eq!(interpret(&photo(Some("  ")), &[ADMIN]), None);

        let Some(Action::Photo(event)) = interpret(&photo(Some(" TD Lions ")), &[ADMIN]) else {
            panic!("expected a photo");
        };
        assert_eq!(event.caption, "TD Lions");
        assert_eq!(event.file_id, "big");
        assert_eq!(event.file_size, 900);
    }

    #[tokio::test]
    async fn dispatch_publishes_on_the_matching_topic() {
        let broker = Broker::new();
        let mut commands = broker.subscribe(Topic::Command).unwrap();
        let mut texts = broker.subscribe(Topic::Text).unwrap();

        let reply = dispatch(&broker, Action::Command(CommandEvent::new(Command::Stop, ""))).unwrap();
        assert_eq!(reply, None);
        let message = commands.recv().await.unwrap();
        let event: CommandEvent = serde_json::from_slice(&message.payload).unwrap();
        assert_eq!(event, CommandEvent::new(Command::Stop, ""));

        dispatch(&broker, Action::Text(TextEvent::new("hola"))).unwrap();
        let message = texts.recv().await.unwrap();
        assert_eq!(&message.payload[..], br#"{"text":"hola"}"#);

        let reply = dispatch(&broker, Action::Reply("hi".to_string())).unwrap();
        assert_eq!(reply.as_deref(), Some("hi"));
    }

    #[tokio::test]
    async fn captioned_photos_are_downloaded_and_published() {
        let broker = Broker::new();
        let mut photos = broker.subscribe(Topic::Photo).unwrap();
        let api = FakeBot::default();

        handle(&api, &broker, &[ADMIN], &photo(Some("Pick six"))).await;

        assert_eq!(*api.files.lock(), vec!["big".to_string()]);
        let message = photos.recv().await.unwrap();
        let event: PhotoEvent = serde_json::from_slice(&message.payload).unwrap();
        assert_eq!(event.caption, "Pick six");
        assert_eq!(event.file_id, "big");
        assert_eq!(event.file_url, "photos/big.jpg");
        assert_eq!(event.file_content, vec![1, 2, 3]);
        assert!(api.replies.lock().is_empty());
    }

    #[tokio::test]
    async fn failed_downloads_are_dropped() {
        let broker = Broker::new();
        let mut photos = broker.subscribe(Topic::Photo).unwrap();
        let api = FakeBot {
            missing: true,
            ..Default::default()
        };

        handle(&api, &broker, &[ADMIN], &photo(Some("Pick six"))).await;

        assert_eq!(api.files.lock().len(), 1);
        let nothing =
            tokio::time::timeout(std::time::Duration::from_millis(50), photos.recv()).await;
        assert!(nothing.is_err());
    }

    #[tokio::test]
    async fn greetings_and_help_are_sent_back() {
        let broker = Broker::new();
        let api = FakeBot::default();

        handle(&api, &broker, &[ADMIN], &private("/start")).await;
        handle(&api, &broker, &[ADMIN], &private("/help@huddle_bot")).await;

        let replies = api.replies.lock();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0], (ADMIN, GREETING.to_string()));
        assert_eq!(replies[1], (ADMIN, help_text()));
    }

    #[tokio::test]
    async fn strangers_get_no_answer() {
        let broker = Broker::new();
        let mut commands = broker.subscribe(Topic::Command).unwrap();
        let api = FakeBot::default();

        let mut message = private("/stop");
        message.sender = Some(7);
        handle(&api, &broker, &[ADMIN], &message).await;

        assert!(api.replies.lock().is_empty());
        let nothing =
            tokio::time::timeout(std::time::Duration::from_millis(50), commands.recv()).await;
        assert!(nothing.is_err());
    }
}
