//! Display formatting used by the planner popovers.
//!
//! Money is always rendered as Brazilian reais with pt-BR separators,
//! regardless of the interface language.

use chrono::NaiveDate;

/// Currency symbol followed by a no-break space, as pt-BR locales print it.
const BRL_PREFIX: &str = "R$\u{a0}";

/// Formats a monetary value as BRL, e.g. `R$ 1.234,56`.
///
/// Values are rounded to the nearest cent. Non-finite values render as zero.
pub fn format_brl(value: f64) -> String {
    let cents = if value.is_finite() {
        (value * 100.0).round() as i64
    } else {
        0
    };

    let negative = cents < 0;
    let cents = cents.unsigned_abs();
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{BRL_PREFIX}{grouped},{fraction:02}")
}

/// Formats a date as `dd/MM/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// First word of a display name, used as the short cell label.
pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or("")
}
