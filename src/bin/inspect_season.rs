// src/bin/inspect_season.rs
//! Print one season's raw table with column indices, for checking where
//! the archive moved a column.
use anyhow::Result;
use clap::Parser;
use sbrscraper::{
    config::Config,
    fetch::{HttpFetcher, RawTableFetcher},
    sport::Sport,
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    sport: String,

    #[arg(long)]
    season: i32,

    /// Stop after this many data rows
    #[arg(long, default_value_t = 10)]
    rows: usize,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let sport: Sport = args.sport.parse()?;
    let profile = sport.profile();
    let fetcher = HttpFetcher::new(&config)?;

    println!("=== {} {} ===", sport, args.season);
    println!("URL:            {}", fetcher.url_for(profile, args.season)?);
    println!("Current layout: {}", profile.is_current_layout(args.season));
    println!();

    let table = fetcher.fetch(profile, args.season).await?;
    println!("Rows: {} (plus header)", table.data_rows().len());
    for (i, row) in table.rows.iter().take(args.rows + 1).enumerate() {
        let label = if i == 0 { "header".to_string() } else { format!("row {i}") };
        println!("--- {label} ---");
        for (col, cell) in row.cells.iter().enumerate() {
            println!("  [{:>2}] {}", col, cell.as_deref().unwrap_or("<empty>"));
        }
    }
    Ok(())
}
