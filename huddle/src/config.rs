//! All file configuration and CLI parameter operation.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use espn::EspnSettings;
use serde::Deserialize;
use serde_with::serde_as;

/// Configuration
#[derive(Parser, Debug)]
#[command(name = "Huddle", version, about = "Relays live football games to Telegram and Twitter.")]
pub struct CliConfig {
    /// The configuration file to use.
    #[clap(short, long, value_parser, default_value = "huddle-config.toml")]
    pub config_file: PathBuf,

    /// Increase the log verbosity, may be repeated.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Decrease the log verbosity, may be repeated.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Broadcast to the test channel instead of the public one.
    #[clap(long)]
    pub test: bool,
}

impl CliConfig {
    pub fn verbosity(&self) -> i32 {
        self.verbose as i32 - self.quiet as i32
    }
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    /// Interval between two live detail refreshes.
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    #[serde(rename = "info_interval_ms", default = "default_info_interval")]
    pub info_interval: Duration,

    /// Interval between two game list refreshes.
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    #[serde(rename = "list_interval_ms", default = "default_list_interval")]
    pub list_interval: Duration,

    /// Window in which game notifications are merged into one text.
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    #[serde(rename = "buffer_event_ms", default = "default_buffer_event")]
    pub buffer_event: Duration,

    #[serde(default = "default_retention_days")]
    pub retention_days: i64,

    /// Only refresh games that are being played.
    #[serde(default = "default_only_playing")]
    pub only_playing: bool,
}

/// Longest retention accepted, in days.
pub const MAX_RETENTION_DAYS: i64 = 365;

impl PollingConfig {
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::days(self.retention_days)
    }

    /// Reject values the polling tasks cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, interval) in [
            ("info_interval_ms", self.info_interval),
            ("list_interval_ms", self.list_interval),
            ("buffer_event_ms", self.buffer_event),
        ] {
            if interval.is_zero() {
                return Err(ConfigError::Message(format!(
                    "polling.{key} must be greater than zero"
                )));
            }
        }

        if !(1..=MAX_RETENTION_DAYS).contains(&self.retention_days) {
            return Err(ConfigError::Message(format!(
                "polling.retention_days must be between 1 and {MAX_RETENTION_DAYS}, got {}",
                self.retention_days
            )));
        }

        Ok(())
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            info_interval: default_info_interval(),
            list_interval: default_list_interval(),
            buffer_event: default_buffer_event(),
            retention_days: default_retention_days(),
            only_playing: default_only_playing(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,

    /// Chat all notifications are broadcast to.
    pub broadcast_channel: i64,

    /// Chat used instead of the broadcast channel when started with `--test`.
    #[serde(default)]
    pub test_channel: Option<i64>,

    /// Users allowed to command the bot.
    #[serde(default)]
    pub admins: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwitterConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// OAuth 2.0 user context token.
    #[serde(default)]
    pub access_token: String,

    #[serde(default = "default_twitter_url")]
    pub api_url: String,

    #[serde(default = "default_twitter_upload_url")]
    pub upload_url: String,
}

/// Overall configuration of the application.
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub espn: EspnSettings,

    pub telegram: TelegramConfig,

    pub twitter: Option<TwitterConfig>,
}

impl FileConfig {
    /// Read the file and layer `HUDDLE__SECTION__KEY` environment variables over it.
    pub fn new(config_file: PathBuf) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(config_file).required(false))
            .add_source(
                Environment::with_prefix("HUDDLE")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("telegram.admins")
                    .try_parsing(true),
            )
            .build()?;

        let file: Self = config.try_deserialize()?;
        file.polling.validate()?;
        Ok(file)
    }
}

/// The fully resolved configuration shared by all components.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub polling: PollingConfig,
    pub espn: EspnSettings,
    pub telegram: TelegramConfig,
    pub twitter: Option<TwitterConfig>,

    /// Chat the telegram handler sends to.
    pub channel: i64,
}

impl AppConfig {
    pub fn new(file: FileConfig, cli: &CliConfig) -> Self {
        let channel = match (cli.test, file.telegram.test_channel) {
            (true, Some(test)) => test,
            _ => file.telegram.broadcast_channel,
        };

        Self {
            polling: file.polling,
            espn: file.espn,
            telegram: file.telegram,
            twitter: file.twitter.filter(|t| t.enabled),
            channel,
        }
    }
}

fn default_info_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_list_interval() -> Duration {
    Duration::from_secs(60 * 60)
}

fn default_buffer_event() -> Duration {
    Duration::from_secs(30)
}

fn default_retention_days() -> i64 {
    4
}

fn default_only_playing() -> bool {
    true
}

fn default_true() -> bool {
    true
}

fn default_twitter_url() -> String {
    "https://api.twitter.com".to_string()
}

fn default_twitter_upload_url() -> String {
    "https://upload.twitter.com".to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const FILE: &str = r#"
        [polling]
        info_interval_ms = 5000
        only_playing = false

        [telegram]
        bot_token = "123:abc"
        broadcast_channel = -100
        test_channel = -200
        admins = [1, 2]

        [twitter]
        enabled = false
    "#;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("huddle-{name}-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn load(name: &str, contents: &str) -> Result<FileConfig, ConfigError> {
        let path = write_config(name, contents);
        let file = FileConfig::new(path.clone());
        std::fs::remove_file(path).unwrap();
        file
    }

    #[test]
    fn reads_file_with_defaults() {
        let file = load("defaults", FILE).unwrap();

        assert_eq!(file.polling.info_interval, Duration::from_secs(5));
        assert_eq!(file.polling.list_interval, Duration::from_secs(3600));
        assert_eq!(file.polling.buffer_event, Duration::from_secs(30));
        assert_eq!(file.polling.retention(), chrono::Duration::days(4));
        assert!(!file.polling.only_playing);
        assert_eq!(file.espn.lang, "es");
        assert_eq!(file.telegram.admins, vec![1, 2]);
    }

    #[test]
    fn zero_intervals_are_rejected() {
        for key in ["info_interval_ms", "list_interval_ms", "buffer_event_ms"] {
            let contents = FILE.replace("info_interval_ms = 5000", &format!("{key} = 0"));
            let err = load(key, &contents).unwrap_err();
            assert!(err.to_string().contains(key), "{err}");
        }
    }

    #[test]
    fn retention_must_stay_in_range() {
        for days in ["0", "-3", "366", "9223372036854775807"] {
            let contents = FILE.replace(
                "only_playing = false",
                &format!("only_playing = false\n        retention_days = {days}"),
            );
            let err = load(&format!("retention{days}"), &contents).unwrap_err();
            assert!(err.to_string().contains("retention_days"), "{err}");
        }

        let contents = FILE.replace(
            "only_playing = false",
            "only_playing = false\n        retention_days = 365",
        );
        let file = load("retention-max", &contents).unwrap();
        assert_eq!(file.polling.retention(), chrono::Duration::days(365));
    }

    #[test]
    fn test_flag_picks_the_test_channel() {
        let file = load("channel", FILE).unwrap();

        let cli = CliConfig::parse_from(["huddle", "--test", "-vv"]);
        assert_eq!(cli.verbosity(), 2);

        let config = AppConfig::new(file.clone(), &cli);
        assert_eq!(config.channel, -200);
        assert!(config.twitter.is_none());

        let config = AppConfig::new(file, &CliConfig::parse_from(["huddle"]));
        assert_eq!(config.channel, -100);
    }
}
