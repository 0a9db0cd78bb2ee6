// src/config.rs

use crate::error::ConfigError;
use crate::process::{PairingMode, PairingOptions};
use crate::translate::NameTranslator;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// What the driver does when one season's table cannot be fetched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchFailurePolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Log the failure and continue without that season.
    Skip,
}

/// Run settings. Every field has a default, so a config file only needs the
/// keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub min_season: i32,
    pub max_season: i32,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    /// Season fetches in flight at once.
    pub concurrency: usize,
    pub pairing: PairingMode,
    pub pair_across_seasons: bool,
    pub on_fetch_error: FetchFailurePolicy,
    /// Team name table; the embedded one is used when unset.
    pub translations: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_season: 2007,
            max_season: 2022,
            // the archive rejects requests without a browser-like agent
            user_agent: "Mozilla/5.0".to_string(),
            timeout_secs: 30,
            max_retries: 0,
            retry_backoff_ms: 500,
            concurrency: 1,
            pairing: PairingMode::Disjoint,
            pair_across_seasons: false,
            on_fetch_error: FetchFailurePolicy::Abort,
            translations: None,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let load_err = |source: anyhow::Error| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        };
        let text = fs::read_to_string(path).map_err(|e| load_err(e.into()))?;
        serde_yaml::from_str(&text).map_err(|e| load_err(e.into()))
    }

    /// Expand an inclusive season range after checking it against the
    /// supported window.
    pub fn seasons(&self, start: i32, end: i32) -> Result<Vec<i32>, ConfigError> {
        if start < self.min_season || end > self.max_season {
            return Err(ConfigError::SeasonOutOfRange {
                start,
                end,
                min: self.min_season,
                max: self.max_season,
            });
        }
        if start > end {
            return Err(ConfigError::InvertedRange { start, end });
        }
        Ok((start..=end).collect())
    }

    pub fn pairing_options(&self) -> PairingOptions {
        PairingOptions {
            mode: self.pairing,
            across_seasons: self.pair_across_seasons,
        }
    }

    pub fn translator(&self) -> Result<NameTranslator> {
        match &self.translations {
            Some(path) => NameTranslator::from_path(path),
            None => NameTranslator::embedded(),
        }
    }
}
