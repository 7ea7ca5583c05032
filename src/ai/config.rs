//! Configuration for the AI value lookup collaborator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which search backend answers lookup queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    /// SerpAPI Google results
    #[default]
    Serp,
    /// Google Custom Search Engine
    Google,
    /// OpenAI chat completion
    OpenAi,
}

impl FromStr for SearchMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serp" => Ok(Self::Serp),
            "google" => Ok(Self::Google),
            "openai" => Ok(Self::OpenAi),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serp => write!(f, "serp"),
            Self::Google => write!(f, "google"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

/// API credentials and backend selection for value lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiConfig {
    pub method: SearchMethod,
    #[serde(default)]
    pub serp_api_key: String,
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub google_api_key: String,
    #[serde(default)]
    pub google_cse_id: String,
}

impl AiConfig {
    /// Whether the selected backend has the credentials it needs
    #[must_use]
    pub fn is_configured(&self) -> bool {
        match self.method {
            SearchMethod::Serp => !self.serp_api_key.is_empty(),
            SearchMethod::OpenAi => !self.openai_api_key.is_empty(),
            SearchMethod::Google => {
                !self.google_api_key.is_empty() && !self.google_cse_id.is_empty()
            }
        }
    }
}
