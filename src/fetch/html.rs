use super::{RawRow, RawTable};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("table selector should parse"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("row selector should parse"));
static CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td, th").expect("cell selector should parse"));

/// Extract the first `<table>` of a page, one [`RawRow`] per `<tr>`.
pub fn parse_first_table(html: &str) -> Result<RawTable> {
    let document = Html::parse_document(html);
    let table = document
        .select(&TABLE)
        .next()
        .context("no <table> in document")?;

    let rows = table
        .select(&ROW)
        .map(|tr| {
            let texts: Vec<String> = tr
                .select(&CELL)
                .map(|cell| cell.text().collect::<String>())
                .collect();
            RawRow::from_texts(&texts)
        })
        .filter(|row| !row.is_empty())
        .collect();

    Ok(RawTable { rows })
}
