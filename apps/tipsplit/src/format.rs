//! Display formatting for amounts and percentages.

/// Format `value` as US dollars with two decimals and thousands separators,
/// e.g. `$1,234.50` or `-$3.00`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() * 2);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // "-0.00" is shown without a sign
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Format a 0-100 percentage with at most two decimals, e.g. `18%` or `18.77%`.
pub fn format_percent(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}%")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn currency_has_two_decimals() {
        assert_eq!(format_currency(10.0), "$10.00");
        assert_eq!(format_currency(7.5), "$7.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(19.005_000_1), "$19.01");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(999.99), "$999.99");
        assert_eq!(format_currency(1_000.0), "$1,000.00");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
    }

    #[test]
    fn negative_currency_has_leading_sign() {
        assert_eq!(format_currency(-3.0), "-$3.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn percent_drops_trailing_zeros() {
        assert_eq!(format_percent(15.0), "15%");
        assert_eq!(format_percent(18.77), "18.77%");
        assert_eq!(format_percent(12.5), "12.5%");
        assert_eq!(format_percent(0.0), "0%");
    }
}
