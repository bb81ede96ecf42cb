// src/utils/format_utils.rs

/// Two-decimal amount, e.g. `18.00`.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Dollar amount with thousands separators, e.g. `$1,234.50` or `-$5.00`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.001 rounds to 0.00 and should not print a sign
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// One-decimal percentage, e.g. `42.5%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
