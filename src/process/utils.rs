use crate::error::PairError;

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Clean a raw cell; empty cells are missing values.
pub fn cell_value(raw: &str) -> Option<String> {
    let cleaned = clean_str(raw);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// "pk" (pick 'em, any case) means a zero spread.
pub fn pick_em_to_zero(value: String) -> String {
    if value.eq_ignore_ascii_case("pk") {
        "0".to_string()
    } else {
        value
    }
}

/// Render a spreadsheet float the way the archive's HTML tables print it:
/// whole numbers without a fractional part.
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

pub fn parse_f64(value: &str, field: &'static str, season: i32) -> Result<f64, PairError> {
    value.trim().parse::<f64>().map_err(|_| PairError {
        season,
        field,
        value: value.to_string(),
    })
}

/// Integer coercion; accepts `150` and `150.0` but not `150.5`.
pub fn parse_i64(value: &str, field: &'static str, season: i32) -> Result<i64, PairError> {
    let v = value.trim();
    if let Ok(n) = v.parse::<i64>() {
        return Ok(n);
    }
    match v.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f.is_finite() => Ok(f as i64),
        _ => Err(PairError {
            season,
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_quotes_and_whitespace() {
        assert_eq!(clean_str("  \" 47.5 \" "), "47.5");
        assert_eq!(clean_str("GreenBay"), "GreenBay");
        assert_eq!(cell_value("   "), None);
        assert_eq!(cell_value(" -110 "), Some("-110".into()));
    }

    #[test]
    fn pick_em_sentinel_is_zero() {
        assert_eq!(pick_em_to_zero("pk".into()), "0");
        assert_eq!(pick_em_to_zero("PK".into()), "0");
        assert_eq!(pick_em_to_zero("Pk".into()), "0");
        assert_eq!(pick_em_to_zero("3.5".into()), "3.5");
        assert_eq!(pick_em_to_zero("NL".into()), "NL");
    }

    #[test]
    fn formats_whole_floats_as_integers() {
        assert_eq!(format_number(330.0), "330");
        assert_eq!(format_number(-110.0), "-110");
        assert_eq!(format_number(8.5), "8.5");
    }

    #[test]
    fn integer_coercion() {
        assert_eq!(parse_i64("-200", "close_ml", 2019), Ok(-200));
        assert_eq!(parse_i64("150.0", "close_ml", 2019), Ok(150));
        let err = parse_i64("NL", "close_ml", 2019).unwrap_err();
        assert_eq!(err.field, "close_ml");
        assert_eq!(err.value, "NL");
        assert!(parse_i64("1.5", "close_ml", 2019).is_err());
    }

    #[test]
    fn float_coercion() {
        assert_eq!(parse_f64("46.5", "open", 2019), Ok(46.5));
        assert!(parse_f64("pk", "open", 2019).is_err());
    }
}
