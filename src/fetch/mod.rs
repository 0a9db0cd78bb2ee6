// src/fetch/mod.rs
pub mod html;
pub mod http;
pub mod urls;
pub mod xlsx;

use crate::error::FetchError;
use crate::process::{utils::cell_value, Cell};
use crate::sport::SportProfile;
use async_trait::async_trait;

pub use http::HttpFetcher;

/// One row of a source table, addressed by column position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub cells: Vec<Cell>,
}

impl RawRow {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Build a row from raw cell text, treating blank cells as missing.
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        Self::new(texts.iter().map(|t| cell_value(t.as_ref())).collect())
    }

    /// Cell at `idx`; out-of-range columns are missing values.
    pub fn get(&self, idx: usize) -> Cell {
        self.cells.get(idx).cloned().flatten()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A season's table exactly as published, header row included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Rows after the header.
    pub fn data_rows(&self) -> &[RawRow] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// Source of raw season tables. The HTTP implementation is [`HttpFetcher`];
/// tests substitute in-memory tables.
#[async_trait]
pub trait RawTableFetcher: Send + Sync {
    async fn fetch(&self, profile: &'static SportProfile, season: i32)
        -> Result<RawTable, FetchError>;
}
