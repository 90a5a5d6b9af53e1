//! The `summary` endpoint: the live detail of a single game.

use serde::Deserialize;

use crate::{
    game::{Competition, Game, GameStatus, TeamScore, Venue, Weather},
    EspnError,
};

use super::{
    scoreboard::{VenueDto, WeatherDto},
    utils::{fahrenheit_to_celsius, parse_date, parse_score, parse_state},
    Logo, Record, StatusDto,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Summary {
    pub game_info: GameInfo,
    pub header: Header,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GameInfo {
    pub venue: VenueDto,
    pub weather: WeatherDto,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Header {
    pub id: String,
    pub competitions: Vec<HeaderCompetition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HeaderCompetition {
    pub date: String,
    pub status: StatusDto,
    pub competitors: Vec<HeaderCompetitor>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderCompetitor {
    pub home_away: String,
    pub team: HeaderTeam,
    pub score: String,
    pub record: Vec<Record>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderTeam {
    pub name: String,
    pub display_name: String,
    pub logos: Vec<Logo>,
}

impl Summary {
    pub fn to_game(&self, competition: Competition) -> Result<Game, EspnError> {
        let details = self
            .header
            .competitions
            .first()
            .ok_or(EspnError::MissingData("header.competitions"))?;
        let start = parse_date(&details.date)?;

        let venue = &self.game_info.venue;
        let mut game = Game {
            id: self.header.id.clone(),
            competition,
            start,
            venue: Venue {
                full_name: venue.full_name.clone(),
                city: venue.address.city.clone(),
                state: venue.address.state.clone(),
                capacity: venue.capacity,
                indoor: venue.indoor,
            },
            status: GameStatus {
                clock: details.status.clock,
                display_clock: details.status.display_clock.clone(),
                period: details.status.period,
                state: parse_state(&details.status.kind.name),
            },
            weather: Weather {
                display_value: self.game_info.weather.display_value.clone(),
                temperature: fahrenheit_to_celsius(self.game_info.weather.temperature),
            },
            ..Default::default()
        };

        for competitor in &details.competitors {
            let team = TeamScore {
                score: parse_score(&competitor.score),
                name: competitor.team.display_name.clone(),
                short_display_name: competitor.team.name.clone(),
                logo: competitor
                    .team
                    .logos
                    .first()
                    .map(|l| l.href.clone())
                    .unwrap_or_default(),
                record: competitor
                    .record
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

        game.name = format!("{} @ {}", game.away_team.name, game.home_team.name);

        Ok(game)
    }
}
