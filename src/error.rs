// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the requested run, detected before any network traffic.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid season range {start}..={end}: must be between {min} and {max}")]
    SeasonOutOfRange {
        start: i32,
        end: i32,
        min: i32,
        max: i32,
    },
    #[error("invalid season range: start {start} is after end {end}")]
    InvertedRange { start: i32, end: i32 },
    #[error("unknown sport {0:?} (expected nfl, nba, nhl or mlb)")]
    UnknownSport(String),
    #[error("unknown output format {0:?} (expected csv, json or parquet)")]
    UnknownFormat(String),
    #[error("loading {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

/// Numeric coercion failure while turning a row pair into a game record.
#[derive(Debug, Error, PartialEq)]
#[error("season {season}: field `{field}` has non-numeric value {value:?}")]
pub struct PairError {
    pub season: i32,
    pub field: &'static str,
    pub value: String,
}

/// A season's source table could not be retrieved or decoded.
#[derive(Debug, Error)]
#[error("fetching season {season} from {url}: {source}")]
pub struct FetchError {
    pub season: i32,
    pub url: String,
    #[source]
    pub source: anyhow::Error,
}
