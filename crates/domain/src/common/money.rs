//! Monetary amount formatting and lenient parsing.

/// Formats an amount with exactly two decimals and `,` thousands separators.
///
/// # Examples
///
/// ```
/// use citegen_domain::common::format_money;
///
/// assert_eq!(format_money(20425.0), "20,425.00");
/// assert_eq!(format_money(0.5), "0.50");
/// assert_eq!(format_money(-1234567.891), "-1,234,567.89");
/// ```
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 4);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// Parses the longest numeric prefix of an amount such as `20,425.00`.
///
/// Thousands separators are dropped first. Trailing garbage after the
/// numeric prefix is ignored (`1.2.3` reads as `1.2`); input without any
/// digits yields `None`.
pub fn parse_amount_prefix(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in cleaned.char_indices() {
        if c.is_ascii_digit() {
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
    }

    if end == 0 {
        return None;
    }
    cleaned[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_small_amounts() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(150.0), "150.00");
        assert_eq!(format_money(999.999), "1,000.00");
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_money(1000.0), "1,000.00");
        assert_eq!(format_money(1234567.5), "1,234,567.50");
    }

    #[test]
    fn test_format_negative_zero_has_no_sign() {
        assert_eq!(format_money(-0.001), "0.00");
    }

    #[test]
    fn test_parse_amount_prefix() {
        assert_eq!(parse_amount_prefix("20,425.00"), Some(20425.0));
        assert_eq!(parse_amount_prefix("1.2.3"), Some(1.2));
        assert_eq!(parse_amount_prefix(".5"), Some(0.5));
        assert_eq!(parse_amount_prefix("7."), Some(7.0));
        assert_eq!(parse_amount_prefix(",,"), None);
        assert_eq!(parse_amount_prefix("."), None);
    }
}
