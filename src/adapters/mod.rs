// Adapters layer: one module per job board, each implementing `SourceAdapter`.

pub mod headhunter;
pub mod superjob;

use crate::domain::model::Listing;
use crate::utils::error::{Result, StatsError};

pub use headhunter::HeadHunterAdapter;
pub use superjob::SuperJobAdapter;

fn malformed(field: &str, expected: &str) -> StatsError {
    StatsError::ApiError {
        status: None,
        message: format!("response field '{}' is missing or not {}", field, expected),
    }
}

pub(crate) fn envelope_u64(raw: &serde_json::Value, field: &str) -> Result<u64> {
    raw.get(field)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| malformed(field, "a non-negative integer"))
}

pub(crate) fn envelope_bool(raw: &serde_json::Value, field: &str) -> Result<bool> {
    raw.get(field)
        .and_then(|v| v.as_bool())
        .ok_or_else(|| malformed(field, "a boolean"))
}

pub(crate) fn envelope_array<'a>(
    raw: &'a serde_json::Value,
    field: &str,
) -> Result<&'a Vec<serde_json::Value>> {
    raw.get(field)
        .and_then(|v| v.as_array())
        .ok_or_else(|| malformed(field, "an array"))
}

pub(crate) fn listings_from(items: &[serde_json::Value]) -> Vec<Listing> {
    items
        .iter()
        .filter_map(|item| match item {
            serde_json::Value::Object(obj) => Some(Listing::from_object(obj.clone())),
            other => {
                tracing::debug!("Skipping non-object item: {}", other);
                None
            }
        })
        .collect()
}

/// Numeric salary bound; `null` and non-numbers read as missing.
pub(crate) fn amount(value: &serde_json::Value) -> Option<f64> {
    value.as_f64()
}
