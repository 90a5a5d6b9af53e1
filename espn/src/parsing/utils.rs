use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{constants::*, game::GameState, EspnError};

/// ESPN dates are minute precision with a literal `Z`, e.g. `2023-09-08T00:20Z`.
/// Some endpoints send full RFC 3339 values instead, those are accepted too.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, EspnError> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%MZ") {
        return Ok(naive.and_utc());
    }

    DateTime::parse_from_rfc3339(input)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| EspnError::InvalidDate(input.to_string()))
}

/// Map the name of an ESPN status type onto a [`GameState`].
pub fn parse_state(name: &str) -> GameState {
    match name {
        STATUS_IN_PROGRESS | STATUS_HALFTIME | STATUS_END_PERIOD => GameState::InProgress,
        STATUS_FINAL => GameState::Finished,
        STATUS_SCHEDULED | _ => GameState::Scheduled,
    }
}

/// Scores are transmitted as strings, a missing or broken one counts as zero.
pub fn parse_score(input: &str) -> i32 {
    input.trim().parse().unwrap_or_default()
}

/// The summary endpoint reports Fahrenheit. Integer division truncates toward zero.
pub fn fahrenheit_to_celsius(fahrenheit: i32) -> i32 {
    (fahrenheit - 32) * 5 / 9
}
