//! Recommendation models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How soon the grower should act on a recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
}

impl UrgencyLevel {
    pub const ALL: [UrgencyLevel; 3] = [UrgencyLevel::Low, UrgencyLevel::Medium, UrgencyLevel::High];

    /// Wire tag used by the model reply
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => "Low",
            UrgencyLevel::Medium => "Medium",
            UrgencyLevel::High => "High",
        }
    }

    /// Badge caption, e.g. "High Urgency"
    pub fn label(&self) -> String {
        format!("{} Urgency", self.as_str())
    }

    /// Badge colours and icon for the recommendation card
    pub fn style(&self) -> UrgencyStyle {
        match self {
            UrgencyLevel::High => UrgencyStyle {
                background: "bg-red-100",
                text: "text-red-800",
                border: "border-red-400",
                icon: UrgencyIcon::ExclamationTriangle,
            },
            UrgencyLevel::Medium => UrgencyStyle {
                background: "bg-yellow-100",
                text: "text-yellow-800",
                border: "border-yellow-400",
                icon: UrgencyIcon::ExclamationTriangle,
            },
            UrgencyLevel::Low => UrgencyStyle {
                background: "bg-green-100",
                text: "text-green-800",
                border: "border-green-400",
                icon: UrgencyIcon::CheckCircle,
            },
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is case-sensitive: only the exact tags are accepted.
impl FromStr for UrgencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(UrgencyLevel::Low),
            "Medium" => Ok(UrgencyLevel::Medium),
            "High" => Ok(UrgencyLevel::High),
            other => Err(format!("Unknown urgency level: {}", other)),
        }
    }
}

/// Presentation hints for an urgency badge
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct UrgencyStyle {
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
    pub icon: UrgencyIcon,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyIcon {
    ExclamationTriangle,
    CheckCircle,
}

/// The validated shape of a model reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelReply {
    pub field_name: String,
    pub urgency: UrgencyLevel,
    pub recommendation_text: String,
}

/// A validated, timestamped recommendation for one farm observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Id of the originating [`crate::FarmInput`]
    pub id: String,
    pub field_name: String,
    pub urgency: UrgencyLevel,
    pub recommendation_text: String,
    pub timestamp: DateTime<Utc>,
}

impl Recommendation {
    pub fn from_reply(id: impl Into<String>, reply: ModelReply, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            field_name: reply.field_name,
            urgency: reply.urgency,
            recommendation_text: reply.recommendation_text,
            timestamp,
        }
    }
}
