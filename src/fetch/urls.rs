use crate::sport::{LabelStyle, SportProfile};

/// Season segment of the archive URL: `2019-20` for split-year leagues,
/// `2019` for baseball, or a fixed override for irregular seasons.
pub fn season_label(profile: &SportProfile, season: i32) -> String {
    if let Some((_, label)) = profile.label_overrides.iter().find(|(s, _)| *s == season) {
        return (*label).to_string();
    }
    match profile.label_style {
        LabelStyle::SeasonSpan => format!("{}-{:02}", season, (season + 1).rem_euclid(100)),
        LabelStyle::Year => season.to_string(),
    }
}

pub fn season_url(profile: &SportProfile, season: i32) -> String {
    format!(
        "{}{}{}",
        profile.url_base,
        season_label(profile, season),
        profile.url_suffix
    )
}
