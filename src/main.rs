// src/main.rs
use anyhow::{Context, Result};
use clap::Parser;
use sbrscraper::{
    config::Config,
    driver::SeasonDriver,
    fetch::HttpFetcher,
    schema::{write_table, OutputFormat},
    sport::Sport,
};
use std::{fs, path::PathBuf, time::Instant};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Scrape a range of seasons from the sportsbook odds archive into one row
/// per game.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// nfl, nba, nhl or mlb
    #[arg(long)]
    sport: String,

    /// First season, by the year it starts in
    #[arg(long)]
    start: i32,

    /// Last season, inclusive
    #[arg(long)]
    end: i32,

    /// Output file name without extension
    #[arg(long)]
    filename: String,

    /// json, csv or parquet
    #[arg(long, default_value = "json")]
    format: String,

    #[arg(long, default_value = "data")]
    out_dir: PathBuf,

    /// YAML run settings; defaults apply to anything left out
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    // ─── 2) validate the request before touching the network ────────
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let sport: Sport = args.sport.parse()?;
    let format: OutputFormat = args.format.parse()?;
    let seasons = config.seasons(args.start, args.end)?;
    info!(%sport, start = args.start, end = args.end, %format, "startup");

    // ─── 3) collaborators ────────────────────────────────────────────
    let translator = config.translator().context("loading team names")?;
    let fetcher = HttpFetcher::new(&config)?;
    let driver = SeasonDriver::new(sport.profile(), &fetcher, &translator, &config);

    // ─── 4) fetch, reformat, pair ────────────────────────────────────
    let started = Instant::now();
    let table = driver.run(&seasons).await?;
    if table.is_empty() {
        warn!(%sport, "no games survived cleaning");
    }
    info!(games = table.len(), elapsed = ?started.elapsed(), "scraped");

    // ─── 5) write output ─────────────────────────────────────────────
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let path = args
        .out_dir
        .join(format!("{}.{}", args.filename, format.extension()));
    write_table(&table, format, &path)?;
    info!(path = %path.display(), "all done");
    Ok(())
}
