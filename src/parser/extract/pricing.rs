use std::sync::LazyLock;

use regex::Regex;

use crate::model::{PriceType, Pricing};

static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+(?:\.\d{2})?)").unwrap());

/// First `$<decimal>` in the text becomes the base price; later figures
/// are ignored. Price type is classified by keyword with priority
/// "per person" > "varies" > per-night default.
pub fn extract(text: &str) -> Pricing {
    let base_price = PRICE_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<f64>().ok());

    let lower = text.to_lowercase();
    let price_type = if lower.contains("per person") {
        PriceType::PerPerson
    } else if lower.contains("varies") {
        PriceType::Varies
    } else {
        PriceType::PerNight
    };

    Pricing {
        base_price,
        currency: "USD".to_string(),
        price_type,
    }
}
