use std::time::Duration;

/// Default root for all football endpoints.
pub const DEFAULT_BASE_URL: &str = "https://site.api.espn.com/apis/site/v2/sports/football";

/// Amount of time before an HTTP request is abandoned.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Lists the calendar and the games of a date range.
pub const SCOREBOARD_ENDPOINT: &str = "scoreboard";

/// The live detail of one game.
pub const SUMMARY_ENDPOINT: &str = "summary";

/// Layout of the `dates` query parameter.
pub const DATES_FORMAT: &str = "%Y%m%d";

pub const STATUS_FINAL: &str = "STATUS_FINAL";
pub const STATUS_SCHEDULED: &str = "STATUS_SCHEDULED";
pub const STATUS_IN_PROGRESS: &str = "STATUS_IN_PROGRESS";
pub const STATUS_HALFTIME: &str = "STATUS_HALFTIME";
pub const STATUS_END_PERIOD: &str = "STATUS_END_PERIOD";

pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
pub const ORIGIN: &str = "https://espndeportes.espn.com";
pub const REFERER: &str = "https://espndeportes.espn.com/";
