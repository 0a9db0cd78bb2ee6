use crate::sport::MonthRange;
use tracing::trace;

/// Turn a short `MDD`/`MMDD` token into `MMDDYYYY`.
///
/// Months inside `months` belong to the season's start year, everything else
/// to the following year. Tokens that do not carry a numeric month are not
/// rejected; they get `season + 1` appended.
pub fn normalize_date(raw: &str, season: i32, months: MonthRange) -> String {
    let token = format!("{:0>4}", raw.trim());
    let month = token.get(..2).and_then(|m| m.parse::<u32>().ok());

    let year = match month {
        Some(m) if months.contains(m) => season,
        Some(_) => season + 1,
        None => {
            trace!(raw, "date token without a numeric month");
            season + 1
        }
    };
    format!("{token}{year}")
}
