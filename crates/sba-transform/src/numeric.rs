//! Numeric normalization utilities.

use sba_model::{CleanFlag, Cleaned, CleanedValue};

/// Parses a currency or count cell as f64.
///
/// Accepts `$`, thousands separators, a trailing `%`, and accounting-style
/// negatives such as `(1,200)`.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (negative, body) = match trimmed.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };
    let digits: String = body
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%' | ' '))
        .collect();
    let parsed = digits.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(if negative { -parsed } else { parsed })
}

/// Formats a floating-point number without trailing fractional zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Cleans a numeric cell, clamping into `[min, max]` when bounds are given.
pub fn clean_numeric(raw: &str, min: Option<f64>, max: Option<f64>) -> Cleaned {
    if raw.trim().is_empty() {
        return Cleaned::absent();
    }
    let Some(value) = parse_f64(raw) else {
        return Cleaned::flagged(
            CleanedValue::Absent,
            CleanFlag::Unparsable {
                raw: raw.trim().to_string(),
            },
        );
    };
    let mut clamped = value;
    if let Some(min) = min {
        clamped = clamped.max(min);
    }
    if let Some(max) = max {
        clamped = clamped.min(max);
    }
    let kept = format_numeric(clamped);
    if clamped == value {
        Cleaned::text(kept)
    } else {
        Cleaned::flagged(
            CleanedValue::text(kept.clone()),
            CleanFlag::OutOfRange {
                raw: raw.trim().to_string(),
                kept,
            },
        )
    }
}

/// Cleans a percentage cell into `[0, 100]`.
pub fn clean_percentage(raw: &str) -> Cleaned {
    clean_numeric(raw, Some(0.0), Some(100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(10.5), "10.5");
        assert_eq!(format_numeric(0.0), "0");
    }

    #[test]
    fn parses_currency_and_accounting_negatives() {
        assert_eq!(parse_f64("$1,250.50"), Some(1250.5));
        assert_eq!(parse_f64("(500)"), Some(-500.0));
        assert_eq!(parse_f64("45%"), Some(45.0));
        assert_eq!(parse_f64("n/a"), None);
    }

    #[test]
    fn clamps_and_flags_percentages() {
        assert_eq!(clean_percentage("51"), Cleaned::text("51"));
        let cleaned = clean_percentage("150");
        assert_eq!(cleaned.value, CleanedValue::text("100"));
        assert!(matches!(cleaned.flag, Some(CleanFlag::OutOfRange { .. })));
    }

    #[test]
    fn unparsable_numbers_are_flagged() {
        let cleaned = clean_numeric("lots", Some(0.0), None);
        assert!(cleaned.value.is_absent());
        assert!(matches!(cleaned.flag, Some(CleanFlag::Unparsable { .. })));
    }
}
