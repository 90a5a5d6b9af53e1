//! The `scoreboard` endpoint: the season calendar and the games of a date range.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::game::{Competition, Game, GameStatus, TeamScore, Venue, Weather};

use super::{
    utils::{parse_date, parse_score, parse_state},
    Record, StatusDto,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scoreboard {
    pub leagues: Vec<League>,
    pub events: Vec<Event>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct League {
    pub calendar: Vec<CalendarSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarSection {
    pub label: String,
    pub entries: Vec<CalendarEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarEntry {
    pub label: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub date: String,
    pub name: String,
    pub competitions: Vec<EventCompetition>,
    pub weather: WeatherDto,
    pub status: StatusDto,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventCompetition {
    pub venue: VenueDto,
    pub competitors: Vec<Competitor>,
    pub status: StatusDto,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VenueDto {
    pub full_name: String,
    pub address: AddressDto,
    pub capacity: i32,
    pub indoor: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddressDto {
    pub city: String,
    pub state: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeatherDto {
    pub display_value: String,
    pub temperature: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Competitor {
    pub home_away: String,
    pub team: TeamDto,
    pub score: String,
    pub records: Vec<Record>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamDto {
    pub display_name: String,
    pub short_display_name: String,
    pub logo: String,
}

/// One week of the season calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Week {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant > self.start && instant < self.end
    }
}

impl Scoreboard {
    /// All weeks of the first league's calendar. Entries with broken dates are skipped.
    pub fn calendar(&self) -> Vec<Week> {
        let Some(league) = self.leagues.first() else {
            return vec![];
        };

        league
            .calendar
            .iter()
            .flat_map(|section| section.entries.iter())
            .filter_map(|entry| {
                let start = parse_date(&entry.start_date).ok()?;
                let end = parse_date(&entry.end_date).ok()?;
                Some(Week {
                    name: entry.label.clone(),
                    start,
                    end,
                })
            })
            .collect()
    }

    /// Convert every event into a [`Game`]. Events with an unparsable date or
    /// without competition data are dropped.
    pub fn games(&self, competition: Competition, calendar: &[Week]) -> Vec<Game> {
        self.events
            .iter()
            .filter_map(|event| match event.to_game(competition, calendar) {
                Some(game) => Some(game),
                None => {
                    warn!("Skipping malformed scoreboard event {:?}", event.id);
                    None
                }
            })
            .collect()
    }
}

impl Event {
    fn to_game(&self, competition: Competition, calendar: &[Week]) -> Option<Game> {
        let start = parse_date(&self.date).ok()?;
        let details = self.competitions.first()?;

        let mut game = Game {
            id: self.id.clone(),
            competition,
            start,
            name: self.name.clone(),
            venue: Venue {
                full_name: details.venue.full_name.clone(),
                city: details.venue.address.city.clone(),
                state: details.venue.address.state.clone(),
                capacity: details.venue.capacity,
                indoor: details.venue.indoor,
            },
            status: GameStatus {
                clock: self.status.clock,
                display_clock: self.status.display_clock.clone(),
                period: self.status.period,
                state: parse_state(&details.status.kind.name),
            },
            weather: Weather {
                display_value: self.weather.display_value.clone(),
                temperature: self.weather.temperature,
            },
            week_name: calendar
                .iter()
                .find(|w| w.contains(start))
                .map(|w| w.name.clone())
                .unwrap_or_default(),
            ..Default::default()
        };

        for competitor in &details.competitors {
            let team = TeamScore {
                score: parse_score(&competitor.score),
                name: competitor.team.display_name.clone(),
                short_display_name: competitor.team.short_display_name.clone(),
                logo: competitor.team.logo.clone(),
                record: competitor
                    .records
                    .first()
                    .map(|r| r.summary.clone())
                    .unwrap_or_default(),
            };

            if competitor.home_away == "home" {
                game.home_team = team;
            } else {
                game.away_team = team;
            }
        }

        Some(game)
    }
}
