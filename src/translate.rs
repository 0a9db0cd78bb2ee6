// src/translate.rs

use crate::sport::Sport;
use anyhow::{Context, Result};
use std::{collections::HashMap, fs, path::Path};
use tracing::debug;

/// Translation table shipped with the crate.
const EMBEDDED: &str = include_str!("../config/translated.json");

/// Per-sport raw team name → canonical name lookup.
///
/// Loaded once and shared read-only for the whole run. Lookups are exact and
/// case-sensitive; unknown names pass through unchanged.
#[derive(Debug, Default, Clone)]
pub struct NameTranslator {
    tables: HashMap<Sport, HashMap<String, String>>,
}

impl NameTranslator {
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED).context("parsing embedded translation table")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse `{ "<sport>": { "<raw>": "<canonical>" } }`. Keys that are not a
    /// known sport are ignored.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: HashMap<String, HashMap<String, String>> = serde_json::from_str(text)?;
        let mut tables = HashMap::new();
        for (key, names) in raw {
            match key.parse::<Sport>() {
                Ok(sport) => {
                    debug!(%sport, entries = names.len(), "loaded translations");
                    tables.insert(sport, names);
                }
                Err(_) => debug!(key, "skipping translations for unknown sport"),
            }
        }
        Ok(Self { tables })
    }

    pub fn translate<'a>(&'a self, sport: Sport, raw_name: &'a str) -> &'a str {
        self.tables
            .get(&sport)
            .and_then(|names| names.get(raw_name))
            .map(String::as_str)
            .unwrap_or(raw_name)
    }
}
