//! VIN decode collaborator.
//!
//! Thin client for an external VIN decoding API (NHTSA vPIC shape) plus
//! the listing-creation workflow that turns a decode payload into a
//! persistable draft. The core never interprets the payload beyond its
//! flat `{Variable, Value}` list; everything schema-aware goes through
//! the mapping engine and per-type normalization.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::Utc;
use log::info;
use serde::Deserialize;

use crate::error::Result;
use crate::listing::{self, FieldValue};
use crate::manager::FieldManager;
use crate::mapping::DecodedAttribute;

const DEFAULT_BASE_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Wire shape of a decode response
#[derive(Debug, Deserialize)]
struct DecodeResponse {
    #[serde(rename = "Results", default)]
    results: Vec<DecodedAttribute>,
}

/// Async client for the external VIN decoding API
#[derive(Debug, Clone)]
pub struct DecodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for DecodeClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl DecodeClient {
    /// Create a client against a specific API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Decode a VIN into its flat attribute list
    ///
    /// # Errors
    /// `Http` on transport or non-success status; `Serialization` never
    /// occurs here because reqwest decodes the body itself.
    pub async fn decode_vin(&self, vin: &str) -> Result<Vec<DecodedAttribute>> {
        let url = format!("{}/DecodeVin/{vin}?format=json", self.base_url);
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let payload: DecodeResponse = response.json().await?;
        info!("decoded VIN {vin}: {} attributes", payload.results.len());
        Ok(payload.results)
    }
}

/// A listing ready to be persisted by the host application
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    /// `"{year} {make} {model}"`, or `"Vehicle - {vin}"` when the decode
    /// data carries none of the three
    pub title: String,
    /// Plain-text specification summary with an import timestamp
    pub summary: String,
    /// Per-field values, normalized against the field definitions
    pub updates: BTreeMap<String, FieldValue>,
}

/// Build a listing draft from an already-fetched decode payload.
///
/// Runs the mapping engine, routes mapped values through per-type
/// normalization, and always includes the VIN itself and the raw decode
/// dump under `extended_vehicle_details`.
pub fn build_listing_draft(
    manager: &FieldManager,
    vin: &str,
    attributes: &[DecodedAttribute],
) -> Result<ListingDraft> {
    let outcome = manager.apply_mapping(attributes)?;
    let fields = manager.fields()?;

    let mut updates = listing::normalize_mapped_values(&fields, &outcome.updates);
    updates.insert("vin".to_string(), FieldValue::text(vin));
    updates.insert(
        "extended_vehicle_details".to_string(),
        FieldValue::text(outcome.raw_dump.clone()),
    );

    let title = draft_title(vin, attributes);
    let summary = if outcome.raw_dump.is_empty() {
        String::new()
    } else {
        format!(
            "{}\n\nImported via VIN decode on {}",
            outcome.raw_dump,
            Utc::now().format("%B %d, %Y at %H:%M UTC")
        )
    };

    Ok(ListingDraft {
        title,
        summary,
        updates,
    })
}

fn draft_title(vin: &str, attributes: &[DecodedAttribute]) -> String {
    let pick = |name: &str| {
        attributes
            .iter()
            .find(|a| a.variable == name)
            .map(DecodedAttribute::trimmed)
            .unwrap_or("")
    };
    let title = format!(
        "{} {} {}",
        pick("Model Year"),
        pick("Make"),
        pick("Model")
    );
    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() {
        format!("Vehicle - {vin}")
    } else {
        title
    }
}
