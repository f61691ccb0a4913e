use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

/// `R$ 1.500.000,00`: dotted thousands, optional comma cents
const AMOUNT: &str = r"(\d{1,3}(?:\.\d{3})*(?:,\d{2})?)";

static PRICE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"R\$\s*{}", AMOUNT),
        format!(r"(?i)valor[:\s]*R\$\s*{}", AMOUNT),
        format!(r"(?i)preço[:\s]*R\$\s*{}", AMOUNT),
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Highest amount quoted anywhere in `text`, zero when none is.
pub fn extract_price(text: &str) -> Decimal {
    PRICE_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .filter_map(|caps| caps.get(1))
        .filter_map(|amount| parse_amount(amount.as_str()))
        .fold(Decimal::ZERO, Decimal::max)
}

/// `1.234,56` → `1234.56`
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let normalized = raw.replace('.', "").replacen(',', ".", 1);
    Decimal::from_str(&normalized).ok()
}
