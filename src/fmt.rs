//! Display formatting helpers shared by the GUI, charts and exports.

/// Format a monetary value with the configured currency symbol and
/// thousands separators, e.g. `₵1,234.56`.
pub fn currency(symbol: &str, value: f64) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{frac_part}")
}

/// Format a period-over-period delta with an explicit sign.
pub fn signed_currency(symbol: &str, change: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "-" };
    format!("{sign}{}", currency(symbol, change.abs()))
}
