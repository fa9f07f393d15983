use serde::{Deserialize, Deserializer, Serialize};

use crate::status::RunStatus;

// ── Run submission ────────────────────────────────────────────

/// Configuration object sent when starting a scraping run. Only the options
/// this system actually drives are modelled; the actor applies its own
/// defaults for the rest.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_crawled_places: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(rename = "restaurant_type", skip_serializing_if = "Option::is_none")]
    pub restaurant_type: Option<String>,
}

/// Identifier and initial status returned when a run is started.
#[derive(Debug, Clone)]
pub struct StartedRun {
    pub id: String,
    pub status: RunStatus,
}

/// Current state of a run, as reported by the polling endpoint.
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub status: RunStatus,
    /// Dataset holding the run's results; present once the service has
    /// allocated one.
    pub dataset_id: Option<String>,
}

// ── Raw records ───────────────────────────────────────────────

/// One loosely-typed record from a run's result dataset.
///
/// Every field is optional: upstream omits keys freely and sends explicit
/// nulls. Unknown keys are ignored. The rating tolerates integers, numeric
/// strings, and nothing else; anything unusable comes through as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawReview {
    pub google_maps_place_id: Option<String>,
    pub place_name: Option<String>,
    pub place_url: Option<String>,
    pub place_address: Option<String>,
    pub provider: Option<String>,
    pub review_title: Option<String>,
    pub review_text: Option<String>,
    pub review_date: Option<String>,
    #[serde(deserialize_with = "lenient_rating")]
    pub review_rating: Option<i16>,
    pub author_name: Option<String>,
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<i16>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_i64().and_then(|i| i16::try_from(i).ok()),
        serde_json::Value::String(s) => s.trim().parse::<i16>().ok(),
        _ => None,
    }))
}
