//! An HTTP client for the football endpoints of the ESPN site API.
use chrono::{DateTime, Utc};
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use crate::{
    constants::*,
    parsing::{scoreboard::Scoreboard, summary::Summary},
    Competition, EspnError, EspnSettings, Game,
};

/// Fetches schedules and live game details from ESPN.
#[derive(Debug, Clone)]
pub struct EspnClient {
    http: reqwest::Client,
    settings: EspnSettings,
}

impl EspnClient {
    pub fn new(settings: EspnSettings) -> Result<Self, EspnError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(header::ORIGIN, HeaderValue::from_static(ORIGIN));
        headers.insert(header::REFERER, HeaderValue::from_static(REFERER));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(settings.timeout())
            .build()?;

        Ok(Self { http, settings })
    }

    /// Get the games of the calendar week that contains `now`.
    ///
    /// The first request reads the season calendar, the second one the
    /// scoreboard restricted to the current week. Outside of the season no
    /// week matches and the unrestricted scoreboard is used instead.
    #[instrument(level = "debug", skip(self), err)]
    pub async fn fetch_games(
        &self,
        competition: Competition,
        now: DateTime<Utc>,
    ) -> Result<Vec<Game>, EspnError> {
        let scoreboard: Scoreboard = self.get(competition, SCOREBOARD_ENDPOINT, &[]).await?;
        let calendar = scoreboard.calendar();

        let mut params = vec![];
        if let Some(week) = calendar.iter().find(|w| w.contains(now)) {
            debug!("Current {competition} week is {:?}", week.name);
            params.push((
                "dates",
                format!(
                    "{}-{}",
                    week.start.format(DATES_FORMAT),
                    week.end.format(DATES_FORMAT)
                ),
            ));
        }

        let scoreboard: Scoreboard = self.get(competition, SCOREBOARD_ENDPOINT, &params).await?;
        Ok(scoreboard.games(competition, &calendar))
    }

    /// Get the live state of a single game.
    #[instrument(level = "debug", skip(self), err)]
    pub async fn fetch_game(&self, competition: Competition, id: &str) -> Result<Game, EspnError> {
        let summary: Summary = self
            .get(competition, SUMMARY_ENDPOINT, &[("event", id.to_string())])
            .await?;
        summary.to_game(competition)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        competition: Competition,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, EspnError> {
        let url = format!(
            "{}/{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            competition.slug(),
            endpoint
        );
        trace!("GET {url} {params:?}");

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[
                ("lang", self.settings.lang.as_str()),
                ("region", self.settings.region.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EspnError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
