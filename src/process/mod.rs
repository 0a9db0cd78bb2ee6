// src/process/mod.rs
pub mod date_parser;
pub mod pair;
pub mod reformat;
pub mod utils;

pub use pair::{pair, PairingMode, PairingOptions};
pub use reformat::reformat;

/// An untyped cell value; `None` when the source cell was empty.
pub type Cell = Option<String>;

/// Odds fields of one NFL/NBA team row.
///
/// `open`/`close`/`second_half` hold either the spread or the total depending
/// on which team the row belongs to; the pairer decides which by value.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadOdds<T = Cell> {
    pub open: T,
    pub close: T,
    pub close_ml: T,
    pub second_half: T,
}

/// Odds fields of one NHL/MLB team row.
#[derive(Debug, Clone, PartialEq)]
pub struct MoneylineOdds<T = Cell> {
    pub open_ml: T,
    pub close_ml: T,
    pub close_spread: T,
    pub close_spread_odds: T,
    pub open_over_under: T,
    pub open_over_under_odds: T,
    pub close_over_under: T,
    pub close_over_under_odds: T,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOdds {
    Spread(SpreadOdds),
    Moneyline(MoneylineOdds),
}

/// One team's line for one game, as extracted from a source row.
#[derive(Debug, Clone, PartialEq)]
pub struct IntermediateRow {
    pub season: i32,
    pub date: Cell,
    pub team: Cell,
    /// Quarter, period or inning scores in game order.
    pub periods: Vec<Cell>,
    pub final_score: Cell,
    pub odds: RowOdds,
}

/// An [`IntermediateRow`] with every field present.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRow<O> {
    pub season: i32,
    pub date: String,
    pub team: String,
    pub periods: Vec<String>,
    pub final_score: String,
    pub odds: O,
}

impl SpreadOdds<Cell> {
    fn complete(&self) -> Option<SpreadOdds<String>> {
        Some(SpreadOdds {
            open: self.open.clone()?,
            close: self.close.clone()?,
            close_ml: self.close_ml.clone()?,
            second_half: self.second_half.clone()?,
        })
    }
}

impl MoneylineOdds<Cell> {
    fn complete(&self) -> Option<MoneylineOdds<String>> {
        Some(MoneylineOdds {
            open_ml: self.open_ml.clone()?,
            close_ml: self.close_ml.clone()?,
            close_spread: self.close_spread.clone()?,
            close_spread_odds: self.close_spread_odds.clone()?,
            open_over_under: self.open_over_under.clone()?,
            open_over_under_odds: self.open_over_under_odds.clone()?,
            close_over_under: self.close_over_under.clone()?,
            close_over_under_odds: self.close_over_under_odds.clone()?,
        })
    }
}

impl IntermediateRow {
    fn complete_with<O>(&self, odds: O) -> Option<GameRow<O>> {
        Some(GameRow {
            season: self.season,
            date: self.date.clone()?,
            team: self.team.clone()?,
            periods: self.periods.iter().cloned().collect::<Option<Vec<_>>>()?,
            final_score: self.final_score.clone()?,
            odds,
        })
    }

    /// `None` if any field is missing or the row is not a spread-family row.
    pub fn complete_spread(&self) -> Option<GameRow<SpreadOdds<String>>> {
        match &self.odds {
            RowOdds::Spread(odds) => self.complete_with(odds.complete()?),
            RowOdds::Moneyline(_) => None,
        }
    }

    /// `None` if any field is missing or the row is not a moneyline-family row.
    pub fn complete_moneyline(&self) -> Option<GameRow<MoneylineOdds<String>>> {
        match &self.odds {
            RowOdds::Moneyline(odds) => self.complete_with(odds.complete()?),
            RowOdds::Spread(_) => None,
        }
    }
}
