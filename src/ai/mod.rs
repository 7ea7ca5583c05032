//! AI-assisted value lookup.
//!
//! Queries an external search or LLM backend for a single missing field
//! value. The core contract is deliberately small: given a vehicle
//! context and a field key, the lookup yields one opaque value or
//! nothing. Query construction, prompts and answer extraction live here;
//! everything schema-related stays in the manager.

pub mod config;

use log::{debug, warn};
use regex_lite::Regex;
use serde_json::{Value, json};

use crate::error::{Result, SchemaError};

pub use config::{AiConfig, SearchMethod};

/// The vehicle identity a lookup query is built from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleContext {
    pub year: String,
    pub make: String,
    pub model: String,
    pub trim: String,
}

impl VehicleContext {
    /// Year, make and model must be known before a lookup makes sense
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.year.is_empty() && !self.make.is_empty() && !self.model.is_empty()
    }

    /// `"{year} {make} {model} {trim}"` with empty parts dropped
    #[must_use]
    pub fn display_name(&self) -> String {
        [&self.year, &self.make, &self.model, &self.trim]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Build the search query for one field, with a generic fallback for
/// fields without a tuned query
#[must_use]
pub fn search_query(ctx: &VehicleContext, field_key: &str) -> String {
    let vehicle = ctx.display_name();
    match field_key {
        "horsepower" => format!("{vehicle} horsepower hp"),
        "torque" => format!("{vehicle} torque lb-ft"),
        "zero_to_sixty" => format!("{vehicle} 0-60 mph time acceleration"),
        "engine_configuration" => format!("{vehicle} engine type configuration"),
        "transmission" => format!("{vehicle} transmission type"),
        "fuel_type" => format!("{vehicle} fuel type gas diesel electric"),
        "drive_type" => format!("{vehicle} drivetrain FWD RWD AWD 4WD"),
        "seating_capacity" => format!("{vehicle} seating capacity seats"),
        "mpg_gas_equivalent" => format!("{vehicle} MPG fuel economy"),
        "estimated_electric_range" => format!("{vehicle} electric range miles"),
        "exterior_color" => format!("{vehicle} exterior colors available"),
        "interior_color" => format!("{vehicle} interior colors available"),
        "cargo_space" => format!("{vehicle} cargo space cubic feet"),
        other => format!("{vehicle} {other}"),
    }
}

/// Build the LLM prompt for one field
#[must_use]
pub fn prompt(ctx: &VehicleContext, field_key: &str) -> String {
    let vehicle = ctx.display_name();
    match field_key {
        "horsepower" => {
            format!("What is the horsepower of the {vehicle}? Respond with just the number.")
        }
        "torque" => format!(
            "What is the torque of the {vehicle}? Respond with just the number and unit (e.g., 300 lb-ft)."
        ),
        "zero_to_sixty" => format!(
            "What is the 0-60 mph time of the {vehicle}? Respond with just the time in seconds."
        ),
        "transmission" => {
            format!("What transmission type does the {vehicle} have? Respond briefly.")
        }
        "fuel_type" => format!(
            "What fuel type does the {vehicle} use? Respond with: gasoline, diesel, electric, hybrid, or plug_in_hybrid."
        ),
        "drive_type" => format!(
            "What drivetrain does the {vehicle} have? Respond with: fwd, rwd, awd, or 4wd."
        ),
        "seating_capacity" => {
            format!("How many seats does the {vehicle} have? Respond with just the number.")
        }
        "cargo_space" => format!(
            "What is the cargo space of the {vehicle} in cubic feet? Respond with just the number."
        ),
        other => format!("What is the {other} of the {vehicle}? Respond briefly."),
    }
}

/// Pull a field value out of free search-result text.
///
/// Only fields with a known answer pattern extract; anything else yields
/// `None` and the caller treats it as not found.
#[must_use]
pub fn extract_value(text: &str, field_key: &str) -> Option<String> {
    let pattern = match field_key {
        "horsepower" => r"(?i)(\d+)\s*(?:hp|horsepower|bhp)",
        "torque" => r"(?i)(\d+)\s*(?:lb-?ft|pound-?feet)",
        "zero_to_sixty" => r"(?i)(?:0-60|zero.to.sixty).*?(\d+\.?\d*)\s*(?:seconds?|sec)",
        "seating_capacity" => r"(?i)(\d+)\s*(?:seat|passenger)",
        "cargo_space" => r"(?i)(\d+\.?\d*)\s*(?:cubic feet|cu\.?\s*ft)",
        _ => return None,
    };
    let re = Regex::new(pattern).ok()?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Looks up single field values through the configured backend
#[derive(Debug, Clone)]
pub struct AiLookup {
    http: reqwest::Client,
    config: AiConfig,
    serp_base: String,
    google_base: String,
    openai_base: String,
}

impl AiLookup {
    pub fn new(config: AiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            serp_base: "https://serpapi.com".to_string(),
            google_base: "https://www.googleapis.com".to_string(),
            openai_base: "https://api.openai.com".to_string(),
        }
    }

    /// Point every backend at one base URL; test hook
    #[must_use]
    pub fn with_base_url(mut self, base: &str) -> Self {
        self.serp_base = base.to_string();
        self.google_base = base.to_string();
        self.openai_base = base.to_string();
        self
    }

    /// Look up a single field value.
    ///
    /// `Ok(None)` means the backend answered but nothing usable was
    /// found; transport failures and missing credentials are errors.
    pub async fn lookup(&self, ctx: &VehicleContext, field_key: &str) -> Result<Option<String>> {
        if !ctx.is_complete() {
            return Err(SchemaError::validation(
                "vehicle year, make and model are required for lookup",
            ));
        }
        if !self.config.is_configured() {
            return Err(SchemaError::validation(format!(
                "missing credentials for search method '{}'",
                self.config.method
            )));
        }
        let result = match self.config.method {
            SearchMethod::Serp => self.lookup_serp(ctx, field_key).await?,
            SearchMethod::Google => self.lookup_google(ctx, field_key).await?,
            SearchMethod::OpenAi => self.lookup_openai(ctx, field_key).await?,
        };
        match &result {
            Some(value) => debug!("lookup for '{field_key}' found '{value}'"),
            None => debug!("lookup for '{field_key}' found nothing"),
        }
        Ok(result)
    }

    async fn lookup_serp(&self, ctx: &VehicleContext, field_key: &str) -> Result<Option<String>> {
        let url = format!("{}/search.json", self.serp_base);
        let query = search_query(ctx, field_key);
        let payload: Value = self
            .http
            .get(&url)
            .query(&[
                ("engine", "google"),
                ("q", query.as_str()),
                ("api_key", self.config.serp_api_key.as_str()),
                ("num", "5"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let Some(results) = payload["organic_results"].as_array() else {
            warn!("serp response carried no organic results");
            return Ok(None);
        };
        let text = results
            .iter()
            .flat_map(|r| [r["snippet"].as_str(), r["title"].as_str()])
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        Ok(extract_value(&text, field_key))
    }

    async fn lookup_google(&self, ctx: &VehicleContext, field_key: &str) -> Result<Option<String>> {
        let url = format!("{}/customsearch/v1", self.google_base);
        let query = search_query(ctx, field_key);
        let payload: Value = self
            .http
            .get(&url)
            .query(&[
                ("key", self.config.google_api_key.as_str()),
                ("cx", self.config.google_cse_id.as_str()),
                ("q", query.as_str()),
                ("num", "5"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let Some(items) = payload["items"].as_array() else {
            return Ok(None);
        };
        let text = items
            .iter()
            .filter_map(|i| i["snippet"].as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Ok(extract_value(&text, field_key))
    }

    async fn lookup_openai(&self, ctx: &VehicleContext, field_key: &str) -> Result<Option<String>> {
        let url = format!("{}/v1/chat/completions", self.openai_base);
        let body = json!({
            "model": "gpt-3.5-turbo",
            "messages": [{"role": "user", "content": prompt(ctx, field_key)}],
            "max_tokens": 50,
            "temperature": 0.1,
        });
        let payload: Value = self
            .http
            .post(&url)
            .bearer_auth(&self.config.openai_api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let answer = payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string);
        Ok(answer)
    }
}
