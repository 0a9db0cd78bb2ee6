use super::{html, urls, xlsx, RawTable, RawTableFetcher};
use crate::config::Config;
use crate::error::FetchError;
use crate::sport::{SourceKind, SportProfile};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};
use url::Url;

/// Fetches season tables from the archive over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    initial_backoff_ms: u64,
    /// Replaces the profile's URL base; used to point tests at a local server.
    base_override: Option<String>,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            max_retries: config.max_retries,
            initial_backoff_ms: config.retry_backoff_ms,
            base_override: None,
        })
    }

    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base_override = Some(base.into());
        self
    }

    pub fn url_for(&self, profile: &SportProfile, season: i32) -> Result<Url> {
        let raw = match &self.base_override {
            Some(base) => format!(
                "{}{}{}",
                base,
                urls::season_label(profile, season),
                profile.url_suffix
            ),
            None => urls::season_url(profile, season),
        };
        Url::parse(&raw).with_context(|| format!("parsing season URL {}", raw))
    }

    async fn get_bytes_core(&self, url: &Url) -> Result<Vec<u8>> {
        debug!("Fetching {}", url);
        Ok(self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .bytes()
            .await
            .with_context(|| format!("Reading body from {}", url))?
            .to_vec())
    }

    async fn get_bytes_with_retry(&self, url: &Url) -> Result<Vec<u8>> {
        let mut attempts = 0;
        loop {
            match self.get_bytes_core(url).await {
                Ok(b) => return Ok(b),
                Err(e) if attempts < self.max_retries => {
                    attempts += 1;
                    let backoff = backoff_ms(self.initial_backoff_ms, attempts);
                    warn!(%url, attempt = attempts, delay_ms = backoff, error = %e, "Retrying");
                    sleep(Duration::from_millis(backoff)).await;
                }
                Err(e) => {
                    if self.max_retries > 0 {
                        error!(%url, error = %e, "Exhausted retries");
                    }
                    return Err(e);
                }
            }
        }
    }

    async fn fetch_table(&self, profile: &SportProfile, url: &Url) -> Result<RawTable> {
        let body = self.get_bytes_with_retry(url).await?;
        let source = profile.source;

        // parsing a full season page is CPU-bound; keep it off the runtime threads
        tokio::task::spawn_blocking(move || match source {
            SourceKind::Html => html::parse_first_table(&String::from_utf8_lossy(&body)),
            SourceKind::Spreadsheet => xlsx::parse_workbook(&body),
        })
        .await
        .context("parser task panicked")?
    }
}

/// Delay before retry `attempt` (1-based): doubles each time, saturating.
fn backoff_ms(initial_ms: u64, attempt: u32) -> u64 {
    initial_ms.saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)))
}

#[async_trait]
impl RawTableFetcher for HttpFetcher {
    #[instrument(level = "info", skip(self, profile), fields(sport = %profile.sport))]
    async fn fetch(
        &self,
        profile: &'static SportProfile,
        season: i32,
    ) -> Result<RawTable, FetchError> {
        let url = self.url_for(profile, season).map_err(|source| FetchError {
            season,
            url: profile.url_base.to_string(),
            source,
        })?;
        let table = self
            .fetch_table(profile, &url)
            .await
            .map_err(|source| FetchError {
                season,
                url: url.to_string(),
                source,
            })?;
        debug!(rows = table.rows.len(), "fetched season table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::xlsx::fixture;
    use crate::process::{reformat, RowOdds};
    use crate::sport::{MLB, NFL, NHL};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = "<table>\
        <tr><td>Date</td><td>Rot</td><td>VH</td><td>Team</td></tr>\
        <tr><td>905</td><td>451</td><td>V</td><td>GreenBay</td></tr>\
        </table>";

    fn fetcher(server: &MockServer, retries: u32) -> HttpFetcher {
        let cfg = Config {
            max_retries: retries,
            retry_backoff_ms: 1,
            ..Config::default()
        };
        HttpFetcher::new(&cfg)
            .unwrap()
            .with_base_url(format!("{}/odds-", server.uri()))
    }

    #[tokio::test]
    async fn fetches_html_table_with_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/odds-2019-20"))
            .and(header("user-agent", "Mozilla/5.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let table = fetcher(&server, 0).fetch(&NFL, 2019).await.unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.data_rows()[0].get(3).as_deref(), Some("GreenBay"));
    }

    #[tokio::test]
    async fn uses_label_override() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/odds-2021"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        assert!(fetcher(&server, 0).fetch(&NHL, 2020).await.is_ok());
    }

    #[tokio::test]
    async fn fetches_baseball_workbook() -> Result<()> {
        let header = vec![
            "Date", "Rot", "VH", "Team", "Pitcher", "1st", "2nd", "3rd", "4th", "5th", "6th",
            "7th", "8th", "9th", "Final", "Open", "Close", "Run Line", "Odds", "Open OU",
            "Odds", "Close OU", "Odds",
        ];
        let away = vec![
            "401", "901", "V", "NYY", "Cole", "0", "1", "0", "0", "2", "0", "0", "1", "0", "4",
            "-150", "-160", "-1.5", "120", "8.5", "-110", "9", "-105",
        ];
        let home = vec![
            "401", "902", "H", "BOS", "Sale", "1", "0", "0", "0", "0", "0", "0", "0", "x", "1",
            "130", "140", "1.5", "-140", "8.5", "-110", "9", "-115",
        ];
        let bytes = fixture::workbook(&[("Sheet1", vec![header, away, home])])?;

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/odds-2019.xlsx"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes))
            .mount(&server)
            .await;

        let table = fetcher(&server, 0).fetch(&MLB, 2019).await?;
        assert_eq!(table.data_rows().len(), 2);

        let rows = reformat(&MLB, table.data_rows(), 2019);
        assert_eq!(rows[0].team.as_deref(), Some("NYY"));
        assert_eq!(rows[0].date.as_deref(), Some("04012019"));
        assert_eq!(rows[1].periods[8].as_deref(), Some("x"));
        let RowOdds::Moneyline(odds) = &rows[1].odds else {
            panic!("expected moneyline odds");
        };
        assert_eq!(odds.open_ml.as_deref(), Some("130"));
        assert_eq!(odds.close_ml.as_deref(), Some("140"));
        assert_eq!(odds.close_spread.as_deref(), Some("1.5"));
        assert_eq!(odds.close_over_under_odds.as_deref(), Some("-115"));
        Ok(())
    }

    #[test]
    fn backoff_doubles_and_saturates() {
        assert_eq!(backoff_ms(500, 1), 500);
        assert_eq!(backoff_ms(500, 2), 1000);
        assert_eq!(backoff_ms(500, 4), 4000);
        assert_eq!(backoff_ms(500, 64), u64::MAX);
        assert_eq!(backoff_ms(500, u32::MAX), u64::MAX);
        assert_eq!(backoff_ms(0, 100), 0);
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let fetcher = HttpFetcher::new(&Config::default())
            .unwrap()
            .with_base_url("not a url/");
        assert!(fetcher.url_for(&NFL, 2019).is_err());
        let url = HttpFetcher::new(&Config::default())
            .unwrap()
            .url_for(&NHL, 2020)
            .unwrap();
        assert_eq!(url.path(), "/scoresoddsarchives/nhl-odds-2021");
    }

    #[tokio::test]
    async fn http_error_carries_season_and_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let err = fetcher(&server, 2).fetch(&NFL, 2016).await.unwrap_err();
        assert_eq!(err.season, 2016);
        assert!(err.url.ends_with("/odds-2016-17"));
    }
}
