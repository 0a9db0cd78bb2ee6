// src/sport.rs

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// League key. Selects a fixed [`SportProfile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Nfl,
    Nba,
    Nhl,
    Mlb,
}

impl Sport {
    pub const ALL: [Sport; 4] = [Sport::Nfl, Sport::Nba, Sport::Nhl, Sport::Mlb];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Nfl => "nfl",
            Sport::Nba => "nba",
            Sport::Nhl => "nhl",
            Sport::Mlb => "mlb",
        }
    }

    pub fn profile(&self) -> &'static SportProfile {
        match self {
            Sport::Nfl => &NFL,
            Sport::Nba => &NBA,
            Sport::Nhl => &NHL,
            Sport::Mlb => &MLB,
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nfl" => Ok(Sport::Nfl),
            "nba" => Ok(Sport::Nba),
            "nhl" => Ok(Sport::Nhl),
            "mlb" => Ok(Sport::Mlb),
            _ => Err(ConfigError::UnknownSport(s.to_string())),
        }
    }
}

/// Inclusive range of calendar months that belong to a season's start year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthRange {
    pub start: u32,
    pub end: u32,
}

impl MonthRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, month: u32) -> bool {
        (self.start..=self.end).contains(&month)
    }
}

/// Whether the archive publishes a season as an HTML page or a workbook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Html,
    Spreadsheet,
}

/// How the season segment of the fetch URL is spelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelStyle {
    /// `2019-20`
    SeasonSpan,
    /// `2019`
    Year,
}

/// Table layout family. Decides both the reformat columns and the output schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// NFL and NBA: quarters, spread/total sharing one odds column per row.
    Football,
    /// NHL: periods, moneyline plus puck line and totals per row.
    Hockey,
    /// MLB: innings, moneyline plus run line and totals per row.
    Baseball,
}

/// How a (away, home) row pair becomes one game record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairingRule {
    /// Spread vs total is decided by value and signed by the moneyline favorite.
    /// Coercion failures skip the pair.
    SignedSpread,
    /// Field-by-field home/away copy. Coercion failures abort.
    Direct,
}

impl Layout {
    pub fn pairing_rule(&self) -> PairingRule {
        match self {
            Layout::Football => PairingRule::SignedSpread,
            Layout::Hockey | Layout::Baseball => PairingRule::Direct,
        }
    }
}

/// Odds columns of a spread-family row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpreadColumns {
    pub open: usize,
    pub close: usize,
    pub close_ml: usize,
    pub second_half: usize,
}

/// Columns holding spread and total lines for a line-family row in one era.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineColumns {
    /// `(spread, spread_odds)`; `None` means the era has no spread and it is zero-filled.
    pub spread: Option<(usize, usize)>,
    pub open_over_under: usize,
    pub open_over_under_odds: usize,
    pub close_over_under: usize,
    pub close_over_under_odds: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoneylineColumns {
    pub open_ml: usize,
    pub close_ml: usize,
    /// Used for seasons strictly after the profile's threshold.
    pub current: LineColumns,
    /// Used up to and including the threshold season.
    pub legacy: LineColumns,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OddsColumns {
    Spread(SpreadColumns),
    Moneyline(MoneylineColumns),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub team: usize,
    pub periods: &'static [usize],
    pub final_score: usize,
    pub odds: OddsColumns,
}

/// Everything that differs between the four archive layouts.
#[derive(Debug, PartialEq)]
pub struct SportProfile {
    pub sport: Sport,
    pub source: SourceKind,
    pub url_base: &'static str,
    pub url_suffix: &'static str,
    pub label_style: LabelStyle,
    /// Seasons published under a fixed label instead of the computed one.
    pub label_overrides: &'static [(i32, &'static str)],
    pub layout: Layout,
    pub months: MonthRange,
    /// Seasons whose schedule crossed the calendar year at a different point.
    pub month_overrides: &'static [(i32, MonthRange)],
    /// Last season published with the legacy column layout.
    pub threshold: Option<i32>,
    /// Normalize "pk" to zero in odds columns.
    pub pick_em: bool,
    pub columns: ColumnMap,
}

impl SportProfile {
    pub fn months_for(&self, season: i32) -> MonthRange {
        self.month_overrides
            .iter()
            .find(|(s, _)| *s == season)
            .map(|(_, m)| *m)
            .unwrap_or(self.months)
    }

    /// True when `season` uses the current (post-threshold) column layout.
    pub fn is_current_layout(&self, season: i32) -> bool {
        self.threshold.map_or(true, |t| season > t)
    }

    pub fn pairing_rule(&self) -> PairingRule {
        self.layout.pairing_rule()
    }
}

const FOOTBALL_COLUMNS: ColumnMap = ColumnMap {
    date: 0,
    team: 3,
    periods: &[4, 5, 6, 7],
    final_score: 8,
    odds: OddsColumns::Spread(SpreadColumns {
        open: 9,
        close: 10,
        close_ml: 11,
        second_half: 12,
    }),
};

pub static NFL: SportProfile = SportProfile {
    sport: Sport::Nfl,
    source: SourceKind::Html,
    url_base: "https://www.sportsbookreviewsonline.com/scoresoddsarchives/nfl-odds-",
    url_suffix: "",
    label_style: LabelStyle::SeasonSpan,
    label_overrides: &[],
    layout: Layout::Football,
    months: MonthRange::new(8, 12),
    month_overrides: &[],
    threshold: None,
    pick_em: true,
    columns: FOOTBALL_COLUMNS,
};

pub static NBA: SportProfile = SportProfile {
    sport: Sport::Nba,
    source: SourceKind::Html,
    url_base: "https://www.sportsbookreviewsonline.com/scoresoddsarchives/nba-odds-",
    url_suffix: "",
    label_style: LabelStyle::SeasonSpan,
    label_overrides: &[],
    layout: Layout::Football,
    months: MonthRange::new(8, 12),
    month_overrides: &[],
    threshold: None,
    pick_em: true,
    columns: FOOTBALL_COLUMNS,
};

pub static NHL: SportProfile = SportProfile {
    sport: Sport::Nhl,
    source: SourceKind::Html,
    url_base: "https://www.sportsbookreviewsonline.com/scoresoddsarchives/nhl-odds-",
    url_suffix: "",
    label_style: LabelStyle::SeasonSpan,
    // shortened season, played entirely in 2021
    label_overrides: &[(2020, "2021")],
    layout: Layout::Hockey,
    months: MonthRange::new(8, 12),
    month_overrides: &[(2020, MonthRange::new(1, 3))],
    threshold: Some(2013),
    pick_em: false,
    columns: ColumnMap {
        date: 0,
        team: 3,
        periods: &[4, 5, 6],
        final_score: 7,
        odds: OddsColumns::Moneyline(MoneylineColumns {
            open_ml: 8,
            close_ml: 9,
            current: LineColumns {
                spread: Some((10, 11)),
                open_over_under: 12,
                open_over_under_odds: 13,
                close_over_under: 14,
                close_over_under_odds: 15,
            },
            legacy: LineColumns {
                spread: None,
                open_over_under: 10,
                open_over_under_odds: 11,
                close_over_under: 12,
                close_over_under_odds: 13,
            },
        }),
    },
};

pub static MLB: SportProfile = SportProfile {
    sport: Sport::Mlb,
    source: SourceKind::Spreadsheet,
    url_base: "https://www.sportsbookreviewsonline.com/wp-content/uploads/sportsbookreviewsonline_com_737/mlb-odds-",
    url_suffix: ".xlsx",
    label_style: LabelStyle::Year,
    label_overrides: &[],
    layout: Layout::Baseball,
    months: MonthRange::new(3, 10),
    month_overrides: &[],
    threshold: Some(2013),
    pick_em: false,
    columns: ColumnMap {
        date: 0,
        team: 3,
        periods: &[5, 6, 7, 8, 9, 10, 11, 12, 13],
        final_score: 14,
        odds: OddsColumns::Moneyline(MoneylineColumns {
            open_ml: 15,
            close_ml: 16,
            current: LineColumns {
                spread: Some((17, 18)),
                open_over_under: 19,
                open_over_under_odds: 20,
                close_over_under: 21,
                close_over_under_odds: 22,
            },
            legacy: LineColumns {
                spread: None,
                open_over_under: 17,
                open_over_under_odds: 18,
                close_over_under: 19,
                close_over_under_odds: 20,
            },
        }),
    },
};
