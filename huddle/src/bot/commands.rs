use huddle_api::Command;

/// The commands the bot understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    /// Forward a command for the named handler, all handlers when empty.
    Handler { command: Command, handler: String },
}

/// Command name and description, in the order shown to users.
pub const COMMANDS: [(&str, &str); 4] = [
    ("help", "Show help"),
    ("start", "Start a conversation with the bot"),
    ("stop", "Stop notifications for all handlers or specific handler"),
    ("resume", "Resume notifications for all handlers or specific handler"),
];

pub fn help_text() -> String {
    COMMANDS
        .iter()
        .map(|(command, description)| format!("/{command} - {description}\n"))
        .collect()
}

/// Parse a message text. `None` when the text is not a command at all.
pub fn parse_command(text: &str) -> Option<Result<BotCommand, String>> {
    let mut parts = text.split_whitespace();
    let raw = parts.next()?;
    if !raw.starts_with('/') {
        return None;
    }

    let command = raw.split_once('@').map_or(raw, |(head, _)| head);
    let handler = parts.next().unwrap_or_default().to_string();

    let parsed = match command {
        "/start" => Ok(BotCommand::Start),
        "/help" => Ok(BotCommand::Help),
        "/stop" => Ok(BotCommand::Handler {
            command: Command::Stop,
            handler,
        }),
        "/resume" => Ok(BotCommand::Handler {
            command: Command::Resume,
            handler,
        }),
        other => Err(format!("Unknown command {other}")),
    };
    Some(parsed)
}
