/// Strips invisible characters spreadsheet exports leave behind and trims the cell.
pub(crate) fn clean_cell(value: &str) -> Option<String> {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Coerces a numeric cell. Anything that is not a finite number reads as missing.
pub(crate) fn parse_number(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_cell_drops_invisible_characters() {
        assert_eq!(clean_cell("\u{feff} 1234 "), Some("1234".to_string()));
        assert_eq!(clean_cell("\u{200b}"), None);
        assert_eq!(clean_cell("running  shoes"), Some("running  shoes".to_string()));
    }

    #[test]
    fn parse_number_coerces_garbage_to_none() {
        assert_eq!(parse_number(Some("12.50")), Some(12.5));
        assert_eq!(parse_number(Some("-35")), Some(-35.0));
        assert_eq!(parse_number(Some("$12.50")), None);
        assert_eq!(parse_number(Some("1,234")), None);
        assert_eq!(parse_number(Some("NaN")), None);
        assert_eq!(parse_number(Some("inf")), None);
        assert_eq!(parse_number(None), None);
    }
}
