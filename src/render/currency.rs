use num_format::{Locale, ToFormattedString as _};
use rust_decimal::Decimal;

/// Format an amount with a dollar sign, two decimals and `,` thousands
/// separators (en locale regardless of the user's), e.g. `$1,234.50`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let fixed = format!("{:.2}", rounded.abs());
    let (integer_part, fractional_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = integer_part
        .parse::<u128>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| integer_part.to_string());
    format!("{}${}.{}", sign, grouped, fractional_part)
}
