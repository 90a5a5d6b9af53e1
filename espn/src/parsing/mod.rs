//! Wire shapes of the ESPN site API and their conversion into [`crate::Game`].

use serde::Deserialize;

pub mod scoreboard;
pub mod summary;
pub mod utils;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusDto {
    pub clock: f64,
    pub display_clock: String,
    pub period: i32,
    #[serde(rename = "type")]
    pub kind: StatusType,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusType {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Record {
    pub summary: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Logo {
    pub href: String,
}
