//! Amount parsing for locale-ambiguous balance figures.

/// Parse an amount written in either the EU (`1.234,56`) or the US
/// (`1,234.56`) convention into a signed `f64`.
///
/// Negative markers recognized: a leading `-`, the whole value wrapped in
/// parentheses, or a trailing `-` (common in older ledger exports).
/// Total over any input; unrecoverable text yields `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let negative = trimmed.starts_with('-')
        || trimmed.ends_with('-')
        || (trimmed.starts_with('(') && trimmed.ends_with(')'));

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        // Both separators present: the one occurring last is the decimal
        // separator, the other is thousands grouping.
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        // Comma only: a single comma followed by at most two digits is a
        // decimal separator, anything else is grouping.
        (Some(_), None) => {
            let decimals = cleaned.rsplit(',').next().unwrap_or("").len();
            if cleaned.matches(',').count() == 1 && decimals <= 2 {
                cleaned.replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        // Dot only (or none): already a valid decimal form.
        _ => cleaned,
    };

    let value: f64 = normalized.parse().unwrap_or(0.0);
    if negative { -value } else { value }
}

/// Format an amount in the Italian convention (`1.234,56`).
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped},{dec_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eu_convention() {
        assert_eq!(parse_amount("1.234,56"), 1234.56);
        assert_eq!(parse_amount("12.345.678,90"), 12345678.90);
        assert_eq!(parse_amount("1500,00"), 1500.00);
    }

    #[test]
    fn test_parse_us_convention() {
        assert_eq!(parse_amount("1,234.56"), 1234.56);
        assert_eq!(parse_amount("12,345,678.90"), 12345678.90);
        assert_eq!(parse_amount("1500.00"), 1500.00);
    }

    #[test]
    fn test_parse_lone_comma() {
        // One comma with two decimals is a decimal separator.
        assert_eq!(parse_amount("7,5"), 7.5);
        // Three digits after a single comma is thousands grouping.
        assert_eq!(parse_amount("1,234"), 1234.0);
        assert_eq!(parse_amount("1,234,567"), 1234567.0);
    }

    #[test]
    fn test_parse_negative_markers() {
        assert_eq!(parse_amount("-250,00"), -250.00);
        assert_eq!(parse_amount("(500,00)"), -500.00);
        assert_eq!(parse_amount("120,50-"), -120.50);
    }

    #[test]
    fn test_parse_total_on_garbage() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("  €  "), 0.0);
        assert_eq!(parse_amount("1.2.3"), 0.0);
    }

    #[test]
    fn test_parse_currency_noise() {
        assert_eq!(parse_amount("€ 1.500,00"), 1500.00);
        assert_eq!(parse_amount("1 234,56"), 1234.56);
    }

    #[test]
    fn test_format_italian() {
        assert_eq!(format_amount(1234.56), "1.234,56");
        assert_eq!(format_amount(12345678.9), "12.345.678,90");
        assert_eq!(format_amount(-500.0), "-500,00");
        assert_eq!(format_amount(0.0), "0,00");
    }
}
