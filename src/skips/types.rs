//! Skip records, pricing and classification

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// One rentable skip as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skip {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub size: String,
    pub hire_period_days: u32,
    pub price_before_vat: f64,
    pub vat: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
}

impl Skip {
    pub fn total_price(&self) -> f64 {
        self.price_before_vat + self.vat
    }

    /// Total including VAT with two decimals
    pub fn formatted_total(&self) -> String {
        format_price(self.price_before_vat, self.vat)
    }

    pub fn size_class(&self) -> SizeClass {
        SizeClass::of(&self.size)
    }

    fn matches(&self, needle: &str) -> bool {
        self.size.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number for id, got {}",
            other
        ))),
    }
}

/// Decode a JSON array of skips
pub fn parse_skips(json: &str) -> Result<Vec<Skip>> {
    Ok(serde_json::from_str(json)?)
}

/// `price_before_vat + vat` with two decimals, exact halves rounded away from zero
pub fn format_price(price_before_vat: f64, vat: f64) -> String {
    let total = price_before_vat + vat;
    let cents = total * 100.0;
    // Only multiples of 1/8 can sit exactly on a half cent; `{:.2}` would round those to even
    if cents.fract().abs() == 0.5 && (total * 8.0).fract() == 0.0 {
        return format!("{:.2}", cents.round() / 100.0);
    }
    format!("{:.2}", total)
}

/// Case-insensitive search on size or description; an empty query keeps all
pub fn filter_skips<'a>(skips: &'a [Skip], query: &str) -> Vec<&'a Skip> {
    let needle = query.trim().to_lowercase();
    skips
        .iter()
        .filter(|s| needle.is_empty() || s.matches(&needle))
        .collect()
}

/// Size bucket by the number of yards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl SizeClass {
    /// Classify by the leading integer of `size`; no number counts as 0
    pub fn of(size: &str) -> Self {
        let yards = leading_integer(size).unwrap_or(0);
        match yards {
            i64::MIN..=4 => SizeClass::Small,
            5..=8 => SizeClass::Medium,
            9..=12 => SizeClass::Large,
            _ => SizeClass::ExtraLarge,
        }
    }
}

impl std::fmt::Display for SizeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeClass::Small => write!(f, "small"),
            SizeClass::Medium => write!(f, "medium"),
            SizeClass::Large => write!(f, "large"),
            SizeClass::ExtraLarge => write!(f, "extra large"),
        }
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").expect("leading integer pattern"));
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
