//! Display helpers shared by the quote wizard and chat forms.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of digits kept from a phone input.
const PHONE_MAX_DIGITS: usize = 11;

/// Exact layout accepted for customer phone numbers.
pub static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^010-\d{4}-\d{4}$").expect("phone pattern is a valid regex")
});

/// Groups the digits of `input` with hyphens as the user types.
///
/// Non-digits are dropped and the digits are truncated to eleven. Up to three
/// digits pass through, four to seven become `XXX-YYYY`, and eight to eleven
/// become `XXX-YYYY-ZZZZ`.
pub fn format_phone_number(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_MAX_DIGITS)
        .collect();

    match digits.len() {
        0..=3 => digits,
        4..=7 => format!("{}-{}", &digits[..3], &digits[3..]),
        _ => format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..]),
    }
}

/// Checks that `phone` is exactly `010-XXXX-XXXX`.
pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Renders a whole-currency amount with thousands separators, e.g. `1,234,567원`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}원")
    } else {
        format!("{grouped}원")
    }
}
