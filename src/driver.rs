// src/driver.rs
use crate::config::{Config, FetchFailurePolicy};
use crate::fetch::RawTableFetcher;
use crate::process::{pair, reformat, IntermediateRow, PairingOptions};
use crate::schema::GameTable;
use crate::sport::SportProfile;
use crate::translate::NameTranslator;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

/// Runs one sport over a range of seasons: fetch, reformat and accumulate
/// every season, then pair the accumulated rows once.
pub struct SeasonDriver<'a, F> {
    profile: &'static SportProfile,
    fetcher: &'a F,
    translator: &'a NameTranslator,
    concurrency: usize,
    on_fetch_error: FetchFailurePolicy,
    pairing: PairingOptions,
}

impl<'a, F: RawTableFetcher> SeasonDriver<'a, F> {
    pub fn new(
        profile: &'static SportProfile,
        fetcher: &'a F,
        translator: &'a NameTranslator,
        config: &Config,
    ) -> Self {
        Self {
            profile,
            fetcher,
            translator,
            concurrency: config.concurrency.max(1),
            on_fetch_error: config.on_fetch_error,
            pairing: config.pairing_options(),
        }
    }

    #[instrument(level = "info", skip(self, seasons), fields(sport = %self.profile.sport, seasons = seasons.len()))]
    pub async fn run(&self, seasons: &[i32]) -> Result<GameTable> {
        let rows = self.accumulate(seasons).await?;
        let table = pair(self.profile, self.translator, &rows, self.pairing)
            .with_context(|| format!("pairing {} rows", self.profile.sport))?;
        info!(rows = rows.len(), games = table.len(), "run complete");
        Ok(table)
    }

    /// Intermediate rows of every season, in request order.
    pub async fn accumulate(&self, seasons: &[i32]) -> Result<Vec<IntermediateRow>> {
        let profile = self.profile;
        let fetcher = self.fetcher;

        // `buffered` yields in input order however the fetches complete
        let mut fetches = stream::iter(seasons.iter().copied())
            .map(|season| async move { (season, fetcher.fetch(profile, season).await) })
            .buffered(self.concurrency);

        let mut rows = Vec::new();
        while let Some((season, result)) = fetches.next().await {
            let table = match result {
                Ok(t) => t,
                Err(e) if self.on_fetch_error == FetchFailurePolicy::Skip => {
                    warn!(season, error = %e, "season fetch failed, skipping");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let before = rows.len();
            rows.extend(reformat(profile, table.data_rows(), season));
            info!(season, rows = rows.len() - before, "reformatted");
        }
        Ok(rows)
    }
}
