use super::date_parser::normalize_date;
use super::utils::pick_em_to_zero;
use super::{Cell, IntermediateRow, MoneylineOdds, RowOdds, SpreadOdds};
use crate::fetch::RawRow;
use crate::sport::{MoneylineColumns, OddsColumns, SportProfile, SpreadColumns};
use tracing::debug;

/// Extract one [`IntermediateRow`] per data row of a season table.
///
/// Column positions come from the profile; moneyline sports switch to the
/// legacy layout up to the profile's threshold season. Rows are not dropped
/// here, missing cells stay `None` until the pairer cleans them.
pub fn reformat(profile: &SportProfile, rows: &[RawRow], season: i32) -> Vec<IntermediateRow> {
    let months = profile.months_for(season);
    let cols = &profile.columns;
    debug!(
        sport = %profile.sport,
        season,
        rows = rows.len(),
        current_layout = profile.is_current_layout(season),
        "reformatting"
    );

    rows.iter()
        .map(|row| IntermediateRow {
            season,
            date: row.get(cols.date).map(|d| normalize_date(&d, season, months)),
            team: row.get(cols.team),
            periods: cols.periods.iter().map(|&i| row.get(i)).collect(),
            final_score: row.get(cols.final_score),
            odds: match &cols.odds {
                OddsColumns::Spread(c) => RowOdds::Spread(spread_odds(row, c, profile.pick_em)),
                OddsColumns::Moneyline(c) => RowOdds::Moneyline(moneyline_odds(
                    row,
                    c,
                    profile.is_current_layout(season),
                )),
            },
        })
        .collect()
}

fn odds_cell(row: &RawRow, idx: usize, pick_em: bool) -> Cell {
    let v = row.get(idx)?;
    Some(if pick_em { pick_em_to_zero(v) } else { v })
}

fn spread_odds(row: &RawRow, c: &SpreadColumns, pick_em: bool) -> SpreadOdds {
    SpreadOdds {
        open: odds_cell(row, c.open, pick_em),
        close: odds_cell(row, c.close, pick_em),
        close_ml: row.get(c.close_ml),
        second_half: odds_cell(row, c.second_half, pick_em),
    }
}

fn moneyline_odds(row: &RawRow, c: &MoneylineColumns, current: bool) -> MoneylineOdds {
    let lines = if current { &c.current } else { &c.legacy };
    let zero = || Some("0".to_string());
    let (close_spread, close_spread_odds) = match lines.spread {
        Some((spread, odds)) => (row.get(spread), row.get(odds)),
        None => (zero(), zero()),
    };

    MoneylineOdds {
        open_ml: row.get(c.open_ml),
        close_ml: row.get(c.close_ml),
        close_spread,
        close_spread_odds,
        open_over_under: row.get(lines.open_over_under),
        open_over_under_odds: row.get(lines.open_over_under_odds),
        close_over_under: row.get(lines.close_over_under),
        close_over_under_odds: row.get(lines.close_over_under_odds),
    }
}
