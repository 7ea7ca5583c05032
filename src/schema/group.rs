//! Field group definitions.
//!
//! Groups collect field definitions that share a display placement. The
//! `context` and `priority` attributes are hints for the external render
//! layer; the core only stores and orders them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::schema::field::DEFAULT_POSITION;

/// Placement hint for the render layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupContext {
    #[default]
    Normal,
    Side,
    Advanced,
}

impl FromStr for GroupContext {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "side" => Ok(Self::Side),
            "advanced" => Ok(Self::Advanced),
            _ => Err(()),
        }
    }
}

impl fmt::Display for GroupContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Side => write!(f, "side"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

/// Ordering hint among groups sharing a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupPriority {
    High,
    Default,
    Low,
}

impl FromStr for GroupPriority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "default" => Ok(Self::Default),
            "low" => Ok(Self::Low),
            _ => Err(()),
        }
    }
}

impl fmt::Display for GroupPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Default => write!(f, "default"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// A named collection of field definitions sharing a display placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDefinition {
    /// Unique `[a-z0-9_]` identifier
    pub id: String,
    /// Display label
    pub label: String,
    /// Sort key, 999 pushes to the end
    #[serde(default = "default_position")]
    pub position: i64,
    #[serde(default)]
    pub context: GroupContext,
    #[serde(default = "default_priority")]
    pub priority: GroupPriority,
}

const fn default_position() -> i64 {
    DEFAULT_POSITION
}

const fn default_priority() -> GroupPriority {
    GroupPriority::High
}

impl GroupDefinition {
    /// Create a group with the default context and priority
    pub fn new(id: impl Into<String>, label: impl Into<String>, position: i64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
            context: GroupContext::Normal,
            priority: GroupPriority::High,
        }
    }

    /// Set the placement context
    #[must_use]
    pub const fn with_context(mut self, context: GroupContext) -> Self {
        self.context = context;
        self
    }

    /// Set the ordering priority
    #[must_use]
    pub const fn with_priority(mut self, priority: GroupPriority) -> Self {
        self.priority = priority;
        self
    }
}
