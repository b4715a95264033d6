/// Delimiters used when a multi-value field declares none.
pub const DEFAULT_DELIMITERS: &[char] = &[';'];

/// Splits a multi-value cell into trimmed, non-empty tokens in input order.
pub fn split_multi_value(raw: &str, delimiters: &[char]) -> Vec<String> {
    let delimiters = if delimiters.is_empty() {
        DEFAULT_DELIMITERS
    } else {
        delimiters
    };
    raw.split(delimiters)
        .map(str::trim)
        .filter(|token| !token.is_empty() && !sba_model::is_missing_value(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims_tokens() {
        assert_eq!(
            split_multi_value(" Asian ;; White;", &[';']),
            vec!["Asian".to_string(), "White".to_string()]
        );
    }

    #[test]
    fn honors_declared_delimiters() {
        assert_eq!(split_multi_value("English, Spanish", &[';', ',']).len(), 2);
        assert_eq!(split_multi_value("English, Spanish", &[]).len(), 1);
    }

    #[test]
    fn blank_input_yields_no_tokens() {
        assert!(split_multi_value("  ", &[';']).is_empty());
    }
}
