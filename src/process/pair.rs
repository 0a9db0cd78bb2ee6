use super::utils::{parse_f64, parse_i64};
use super::{GameRow, IntermediateRow, MoneylineOdds, SpreadOdds};
use crate::error::PairError;
use crate::schema::{BaseballRecord, FootballRecord, GameTable, HockeyRecord};
use crate::sport::{Layout, PairingRule, Sport, SportProfile};
use crate::translate::NameTranslator;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Second-half odds placeholder for games the book never lined.
const NOT_LINED: &str = "NL";

/// How consecutive rows are grouped into (away, home) pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingMode {
    /// `(0,1), (2,3), ...`: each row belongs to exactly one game.
    #[default]
    Disjoint,
    /// `(0,1), (1,2), ...`: every adjacent pair, including the ones that
    /// straddle two games. Matches the archive scraper this crate replaces
    /// row for row.
    Overlapping,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PairingOptions {
    pub mode: PairingMode,
    /// Walk the accumulated rows as one sequence instead of restarting the
    /// walk at every season change.
    pub across_seasons: bool,
}

/// `(away, home)` index pairs over `len` rows.
pub fn pair_indices(len: usize, mode: PairingMode) -> Vec<(usize, usize)> {
    match mode {
        PairingMode::Disjoint => (0..len / 2).map(|i| (2 * i, 2 * i + 1)).collect(),
        PairingMode::Overlapping => (1..len).map(|i| (i - 1, i)).collect(),
    }
}

/// Turn the accumulated per-team rows of one sport into one record per game.
///
/// Rows with any missing field are dropped first (football additionally drops
/// rows whose second-half line is `NL`), then the survivors are walked in
/// their original order. Row order is the only thing tying a team to its
/// opponent, so callers must never re-sort `rows`.
///
/// Football pairs that fail numeric coercion are logged and skipped. Hockey
/// and baseball coercion failures are returned as errors.
pub fn pair(
    profile: &SportProfile,
    translator: &NameTranslator,
    rows: &[IntermediateRow],
    opts: PairingOptions,
) -> Result<GameTable, PairError> {
    let sport = profile.sport;
    let rule = profile.pairing_rule();
    let table = match profile.layout {
        Layout::Football => {
            let clean = clean_spread_rows(rows);
            GameTable::Football(build_all(rule, walk(&clean, opts), |away, home| {
                football_record(sport, translator, away, home)
            })?)
        }
        Layout::Hockey => {
            let clean = clean_moneyline_rows(rows);
            GameTable::Hockey(build_all(rule, walk(&clean, opts), |away, home| {
                hockey_record(sport, translator, away, home)
            })?)
        }
        Layout::Baseball => {
            let clean = clean_moneyline_rows(rows);
            GameTable::Baseball(build_all(rule, walk(&clean, opts), |away, home| {
                baseball_record(sport, translator, away, home)
            })?)
        }
    };
    info!(%sport, rows = rows.len(), games = table.len(), "paired");
    Ok(table)
}

fn clean_spread_rows(rows: &[IntermediateRow]) -> Vec<GameRow<SpreadOdds<String>>> {
    let complete: Vec<_> = rows
        .iter()
        .filter_map(IntermediateRow::complete_spread)
        .collect();
    let incomplete = rows.len() - complete.len();
    let lined: Vec<_> = complete
        .into_iter()
        .filter(|r| r.odds.second_half != NOT_LINED)
        .collect();
    debug!(
        incomplete,
        not_lined = rows.len() - incomplete - lined.len(),
        "dropped rows"
    );
    lined
}

fn clean_moneyline_rows(rows: &[IntermediateRow]) -> Vec<GameRow<MoneylineOdds<String>>> {
    let complete: Vec<_> = rows
        .iter()
        .filter_map(IntermediateRow::complete_moneyline)
        .collect();
    debug!(incomplete = rows.len() - complete.len(), "dropped rows");
    complete
}

/// Split into runs of equal season, unless pairing may cross seasons.
fn segments<O>(rows: &[GameRow<O>], across_seasons: bool) -> Vec<&[GameRow<O>]> {
    if across_seasons {
        return vec![rows];
    }
    rows.chunk_by(|a, b| a.season == b.season).collect()
}

fn walk<O>(rows: &[GameRow<O>], opts: PairingOptions) -> Vec<(&GameRow<O>, &GameRow<O>)> {
    let mut pairs = Vec::with_capacity(rows.len());
    for seg in segments(rows, opts.across_seasons) {
        if opts.mode == PairingMode::Disjoint && seg.len() % 2 == 1 {
            if let Some(last) = seg.last() {
                warn!(season = last.season, team = %last.team, "odd row count, last row left unpaired");
            }
        }
        for (a, h) in pair_indices(seg.len(), opts.mode) {
            let (away, home) = (&seg[a], &seg[h]);
            if away.date != home.date {
                warn!(
                    away = %away.team,
                    home = %home.team,
                    away_date = %away.date,
                    home_date = %home.date,
                    "paired rows disagree on date"
                );
            }
            pairs.push((away, home));
        }
    }
    pairs
}

/// Build one record per pair. Under [`PairingRule::SignedSpread`] a pair that
/// fails coercion is logged and skipped; otherwise the first failure is
/// returned.
fn build_all<O, R>(
    rule: PairingRule,
    pairs: Vec<(&GameRow<O>, &GameRow<O>)>,
    mut build: impl FnMut(&GameRow<O>, &GameRow<O>) -> Result<R, PairError>,
) -> Result<Vec<R>, PairError> {
    let mut records = Vec::with_capacity(pairs.len());
    let mut skipped = 0usize;
    for (away, home) in pairs {
        match build(away, home) {
            Ok(r) => records.push(r),
            Err(e) if rule == PairingRule::SignedSpread => {
                skipped += 1;
                error!(season = away.season, away = %away.team, home = %home.team, error = %e, "skipping pair");
            }
            Err(e) => return Err(e),
        }
    }
    if skipped > 0 {
        warn!(skipped, "pairs skipped on bad numeric values");
    }
    Ok(records)
}

/// `-v` without producing a negative zero.
fn negate(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        -v
    }
}

fn scores(row: &GameRow<impl Sized>) -> Result<(Vec<i64>, i64), PairError> {
    let periods = row
        .periods
        .iter()
        .map(|p| parse_i64(p, "period", row.season))
        .collect::<Result<Vec<_>, _>>()?;
    let final_score = parse_i64(&row.final_score, "final", row.season)?;
    Ok((periods, final_score))
}

fn football_record(
    sport: Sport,
    translator: &NameTranslator,
    away: &GameRow<SpreadOdds<String>>,
    home: &GameRow<SpreadOdds<String>>,
) -> Result<FootballRecord, PairError> {
    let season = away.season;
    let home_ml = parse_i64(&home.odds.close_ml, "close_ml", season)?;
    let away_ml = parse_i64(&away.odds.close_ml, "close_ml", season)?;

    // one team's row carries the spread, the other's the total; the spread is
    // always the smaller opening number
    let away_open = parse_f64(&away.odds.open, "open", season)?;
    let home_open = parse_f64(&home.odds.open, "open", season)?;
    let (spread_row, total_row, open_spread, open_over_under) = if away_open < home_open {
        (away, home, away_open, home_open)
    } else {
        (home, away, home_open, away_open)
    };
    let close_spread = parse_f64(&spread_row.odds.close, "close", season)?;
    let h2_spread = parse_f64(&spread_row.odds.second_half, "2H", season)?;
    let second_half_total = parse_f64(&total_row.odds.second_half, "2H", season)?;
    let close_over_under = parse_f64(&total_row.odds.close, "close", season)?;

    let home_favored = home_ml < away_ml;
    let home_side = |v: f64| if home_favored { negate(v) } else { v };
    let home_open_spread = home_side(open_spread);
    let home_close_spread = home_side(close_spread);
    let home_2h_spread = home_side(h2_spread);

    let (hp, home_final) = scores(home)?;
    let (ap, away_final) = scores(away)?;
    if hp.len() < 4 || ap.len() < 4 {
        return Err(too_few_periods(season, hp.len().min(ap.len())));
    }

    Ok(FootballRecord {
        season,
        date: away.date.clone(),
        home_team: translator.translate(sport, &home.team).to_string(),
        away_team: translator.translate(sport, &away.team).to_string(),
        home_1st_qtr: hp[0],
        away_1st_qtr: ap[0],
        home_2nd_qtr: hp[1],
        away_2nd_qtr: ap[1],
        home_3rd_qtr: hp[2],
        away_3rd_qtr: ap[2],
        home_4th_qtr: hp[3],
        away_4th_qtr: ap[3],
        home_final,
        away_final,
        home_close_ml: home_ml,
        away_close_ml: away_ml,
        home_open_spread,
        away_open_spread: negate(home_open_spread),
        home_close_spread,
        away_close_spread: negate(home_close_spread),
        home_2h_spread,
        away_2h_spread: negate(home_2h_spread),
        second_half_total,
        open_over_under,
        close_over_under,
    })
}

/// Numeric view of a moneyline-family row's lines.
struct Lines {
    open_ml: i64,
    close_ml: i64,
    close_spread: f64,
    close_spread_odds: f64,
    open_over_under: f64,
    open_over_under_odds: f64,
    close_over_under: f64,
    close_over_under_odds: f64,
}

impl Lines {
    fn parse(row: &GameRow<MoneylineOdds<String>>) -> Result<Self, PairError> {
        let s = row.season;
        let o = &row.odds;
        Ok(Self {
            open_ml: parse_i64(&o.open_ml, "open_ml", s)?,
            close_ml: parse_i64(&o.close_ml, "close_ml", s)?,
            close_spread: parse_f64(&o.close_spread, "close_spread", s)?,
            close_spread_odds: parse_f64(&o.close_spread_odds, "close_spread_odds", s)?,
            open_over_under: parse_f64(&o.open_over_under, "open_over_under", s)?,
            open_over_under_odds: parse_f64(&o.open_over_under_odds, "open_over_under_odds", s)?,
            close_over_under: parse_f64(&o.close_over_under, "close_over_under", s)?,
            close_over_under_odds: parse_f64(
                &o.close_over_under_odds,
                "close_over_under_odds",
                s,
            )?,
        })
    }
}

fn too_few_periods(season: i32, got: usize) -> PairError {
    PairError {
        season,
        field: "period",
        value: format!("{got} periods"),
    }
}

fn hockey_record(
    sport: Sport,
    translator: &NameTranslator,
    away: &GameRow<MoneylineOdds<String>>,
    home: &GameRow<MoneylineOdds<String>>,
) -> Result<HockeyRecord, PairError> {
    let h = Lines::parse(home)?;
    let a = Lines::parse(away)?;
    let (hp, home_final) = scores(home)?;
    let (ap, away_final) = scores(away)?;
    if hp.len() < 3 || ap.len() < 3 {
        return Err(too_few_periods(away.season, hp.len().min(ap.len())));
    }
    Ok(HockeyRecord {
        season: away.season,
        date: away.date.clone(),
        home_team: translator.translate(sport, &home.team).to_string(),
        away_team: translator.translate(sport, &away.team).to_string(),
        home_1st_period: hp[0],
        away_1st_period: ap[0],
        home_2nd_period: hp[1],
        away_2nd_period: ap[1],
        home_3rd_period: hp[2],
        away_3rd_period: ap[2],
        home_final,
        away_final,
        home_open_ml: h.open_ml,
        away_open_ml: a.open_ml,
        home_close_ml: h.close_ml,
        away_close_ml: a.close_ml,
        home_close_spread: h.close_spread,
        away_close_spread: a.close_spread,
        home_close_spread_odds: h.close_spread_odds,
        away_close_spread_odds: a.close_spread_odds,
        home_open_over_under: h.open_over_under,
        away_open_over_under: a.open_over_under,
        home_open_over_under_odds: h.open_over_under_odds,
        away_open_over_under_odds: a.open_over_under_odds,
        home_close_over_under: h.close_over_under,
        away_close_over_under: a.close_over_under,
        home_close_over_under_odds: h.close_over_under_odds,
        away_close_over_under_odds: a.close_over_under_odds,
    })
}

/// Inning scores; a non-numeric inning (the unplayed bottom of the ninth is
/// marked `x`) is `None`.
fn innings(row: &GameRow<MoneylineOdds<String>>) -> Result<Vec<Option<i64>>, PairError> {
    if row.periods.len() < 9 {
        return Err(too_few_periods(row.season, row.periods.len()));
    }
    Ok(row
        .periods
        .iter()
        .map(|p| parse_i64(p, "period", row.season).ok())
        .collect())
}

fn baseball_record(
    sport: Sport,
    translator: &NameTranslator,
    away: &GameRow<MoneylineOdds<String>>,
    home: &GameRow<MoneylineOdds<String>>,
) -> Result<BaseballRecord, PairError> {
    let h = Lines::parse(home)?;
    let hp = innings(home)?;
    let ap = innings(away)?;
    Ok(BaseballRecord {
        season: away.season,
        date: away.date.clone(),
        home_team: translator.translate(sport, &home.team).to_string(),
        away_team: translator.translate(sport, &away.team).to_string(),
        home_1st_inn: hp[0],
        away_1st_inn: ap[0],
        home_2nd_inn: hp[1],
        away_2nd_inn: ap[1],
        home_3rd_inn: hp[2],
        away_3rd_inn: ap[2],
        home_4th_inn: hp[3],
        away_4th_inn: ap[3],
        home_5th_inn: hp[4],
        away_5th_inn: ap[4],
        home_6th_inn: hp[5],
        away_6th_inn: ap[5],
        home_7th_inn: hp[6],
        away_7th_inn: ap[6],
        home_8th_inn: hp[7],
        away_8th_inn: ap[7],
        home_9th_inn: hp[8],
        away_9th_inn: ap[8],
        home_final: parse_i64(&home.final_score, "final", home.season)?,
        away_final: parse_i64(&away.final_score, "final", away.season)?,
        open_ml: h.open_ml,
        close_ml: h.close_ml,
        close_spread: h.close_spread,
        close_spread_odds: h.close_spread_odds,
        open_over_under: h.open_over_under,
        open_over_under_odds: h.open_over_under_odds,
        close_over_under: h.close_over_under,
        close_over_under_odds: h.close_over_under_odds,
    })
}
