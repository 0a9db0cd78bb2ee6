// src/schema/mod.rs
pub mod write;

use serde::{Deserialize, Serialize};

pub use write::{write_table, OutputFormat};

/// One NFL/NBA game. Spreads are negative for the moneyline favorite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FootballRecord {
    pub season: i32,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(rename = "home_1stQtr")]
    pub home_1st_qtr: i64,
    #[serde(rename = "away_1stQtr")]
    pub away_1st_qtr: i64,
    #[serde(rename = "home_2ndQtr")]
    pub home_2nd_qtr: i64,
    #[serde(rename = "away_2ndQtr")]
    pub away_2nd_qtr: i64,
    #[serde(rename = "home_3rdQtr")]
    pub home_3rd_qtr: i64,
    #[serde(rename = "away_3rdQtr")]
    pub away_3rd_qtr: i64,
    #[serde(rename = "home_4thQtr")]
    pub home_4th_qtr: i64,
    #[serde(rename = "away_4thQtr")]
    pub away_4th_qtr: i64,
    pub home_final: i64,
    pub away_final: i64,
    pub home_close_ml: i64,
    pub away_close_ml: i64,
    pub home_open_spread: f64,
    pub away_open_spread: f64,
    pub home_close_spread: f64,
    pub away_close_spread: f64,
    #[serde(rename = "home_2H_spread")]
    pub home_2h_spread: f64,
    #[serde(rename = "away_2H_spread")]
    pub away_2h_spread: f64,
    #[serde(rename = "2H_total")]
    pub second_half_total: f64,
    pub open_over_under: f64,
    pub close_over_under: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HockeyRecord {
    pub season: i32,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(rename = "home_1stPeriod")]
    pub home_1st_period: i64,
    #[serde(rename = "away_1stPeriod")]
    pub away_1st_period: i64,
    #[serde(rename = "home_2ndPeriod")]
    pub home_2nd_period: i64,
    #[serde(rename = "away_2ndPeriod")]
    pub away_2nd_period: i64,
    #[serde(rename = "home_3rdPeriod")]
    pub home_3rd_period: i64,
    #[serde(rename = "away_3rdPeriod")]
    pub away_3rd_period: i64,
    pub home_final: i64,
    pub away_final: i64,
    pub home_open_ml: i64,
    pub away_open_ml: i64,
    pub home_close_ml: i64,
    pub away_close_ml: i64,
    pub home_close_spread: f64,
    pub away_close_spread: f64,
    pub home_close_spread_odds: f64,
    pub away_close_spread_odds: f64,
    pub home_open_over_under: f64,
    pub away_open_over_under: f64,
    pub home_open_over_under_odds: f64,
    pub away_open_over_under_odds: f64,
    pub home_close_over_under: f64,
    pub away_close_over_under: f64,
    pub home_close_over_under_odds: f64,
    pub away_close_over_under_odds: f64,
}

/// One MLB game. Line fields are the home team's; an unplayed inning is null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseballRecord {
    pub season: i32,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(rename = "home_1stInn")]
    pub home_1st_inn: Option<i64>,
    #[serde(rename = "away_1stInn")]
    pub away_1st_inn: Option<i64>,
    #[serde(rename = "home_2ndInn")]
    pub home_2nd_inn: Option<i64>,
    #[serde(rename = "away_2ndInn")]
    pub away_2nd_inn: Option<i64>,
    #[serde(rename = "home_3rdInn")]
    pub home_3rd_inn: Option<i64>,
    #[serde(rename = "away_3rdInn")]
    pub away_3rd_inn: Option<i64>,
    #[serde(rename = "home_4thInn")]
    pub home_4th_inn: Option<i64>,
    #[serde(rename = "away_4thInn")]
    pub away_4th_inn: Option<i64>,
    #[serde(rename = "home_5thInn")]
    pub home_5th_inn: Option<i64>,
    #[serde(rename = "away_5thInn")]
    pub away_5th_inn: Option<i64>,
    #[serde(rename = "home_6thInn")]
    pub home_6th_inn: Option<i64>,
    #[serde(rename = "away_6thInn")]
    pub away_6th_inn: Option<i64>,
    #[serde(rename = "home_7thInn")]
    pub home_7th_inn: Option<i64>,
    #[serde(rename = "away_7thInn")]
    pub away_7th_inn: Option<i64>,
    #[serde(rename = "home_8thInn")]
    pub home_8th_inn: Option<i64>,
    #[serde(rename = "away_8thInn")]
    pub away_8th_inn: Option<i64>,
    #[serde(rename = "home_9thInn")]
    pub home_9th_inn: Option<i64>,
    #[serde(rename = "away_9thInn")]
    pub away_9th_inn: Option<i64>,
    pub home_final: i64,
    pub away_final: i64,
    pub open_ml: i64,
    pub close_ml: i64,
    pub close_spread: f64,
    pub close_spread_odds: f64,
    pub open_over_under: f64,
    pub open_over_under_odds: f64,
    pub close_over_under: f64,
    pub close_over_under_odds: f64,
}

/// The final one-row-per-game result of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum GameTable {
    Football(Vec<FootballRecord>),
    Hockey(Vec<HockeyRecord>),
    Baseball(Vec<BaseballRecord>),
}

impl GameTable {
    pub fn len(&self) -> usize {
        match self {
            GameTable::Football(r) => r.len(),
            GameTable::Hockey(r) => r.len(),
            GameTable::Baseball(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(home_team, away_team)` per record, in table order.
    pub fn matchups(&self) -> Vec<(&str, &str)> {
        match self {
            GameTable::Football(r) => r
                .iter()
                .map(|g| (g.home_team.as_str(), g.away_team.as_str()))
                .collect(),
            GameTable::Hockey(r) => r
                .iter()
                .map(|g| (g.home_team.as_str(), g.away_team.as_str()))
                .collect(),
            GameTable::Baseball(r) => r
                .iter()
                .map(|g| (g.home_team.as_str(), g.away_team.as_str()))
                .collect(),
        }
    }
}
