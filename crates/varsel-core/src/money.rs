use rust_decimal::Decimal;

/// Formats an amount for display with the shop's currency symbol and two
/// decimal places, e.g. `"$19.99"`.
#[must_use]
pub fn format_price(symbol: &str, amount: Decimal) -> String {
    format!("{symbol}{amount:.2}")
}
