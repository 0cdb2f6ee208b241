//! Formatting of monetary amounts for display.
use crate::units::Money;
use itertools::Itertools;

/// Currency symbol for Argentine pesos, followed by a non-breaking space
const ARS_PREFIX: &str = "$\u{a0}";

/// Separator between groups of three digits
const THOUSANDS_SEPARATOR: &str = ".";

/// Format an amount of money as whole Argentine pesos (e.g. `$ 26.374.410`).
///
/// Amounts are rounded to the nearest peso, with halves rounded away from zero. Negative amounts
/// (including negative zero) get a leading minus sign. Non-finite amounts are shown as `∞` or
/// `NaN` rather than rejected.
pub fn format_ars(amount: Money) -> String {
    let value = amount.value();
    if value.is_nan() {
        return format!("{ARS_PREFIX}NaN");
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let digits = if value.is_infinite() {
        "∞".to_string()
    } else {
        group_digits(&format!("{:.0}", value.abs().round()))
    };

    format!("{sign}{ARS_PREFIX}{digits}")
}

/// Insert thousands separators into a string of digits
fn group_digits(digits: &str) -> String {
    let first_group_len = match digits.len() % 3 {
        0 => 3,
        n => n,
    };
    let (head, tail) = digits.split_at(first_group_len.min(digits.len()));

    std::iter::once(head)
        .chain(tail.as_bytes().chunks(3).map(|chunk| {
            // Chunks of an ASCII digit string are always valid UTF-8
            std::str::from_utf8(chunk).unwrap_or_default()
        }))
        .join(THOUSANDS_SEPARATOR)
}
