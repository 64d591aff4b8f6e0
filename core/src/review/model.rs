use crate::config::TierThresholds;
use crate::error::CoreResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One extracted data point awaiting human review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Field {
    pub id: String,
    pub label: String,
    /// Proposed value from extraction.
    pub value: String,
    pub confidence: u8,
    pub category: String,
    pub required: bool,
    /// Value currently held by the downstream system of record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_value: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub const ALL: [ConfidenceTier; 3] = [
        ConfidenceTier::High,
        ConfidenceTier::Medium,
        ConfidenceTier::Low,
    ];

    pub fn classify(confidence: u8, thresholds: &TierThresholds) -> Self {
        if confidence >= thresholds.high_min {
            ConfidenceTier::High
        } else if confidence >= thresholds.medium_min {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfidenceTier::High => "High Confidence",
            ConfidenceTier::Medium => "Medium Confidence",
            ConfidenceTier::Low => "Low Confidence",
        }
    }

    pub fn range_label(self) -> &'static str {
        match self {
            ConfidenceTier::High => "≥90%",
            ConfidenceTier::Medium => "70-89%",
            ConfidenceTier::Low => "<70%",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

/// Extracted fields, already partitioned into tiers by the extraction side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfidenceGroups {
    #[serde(default)]
    pub high_confidence: Vec<Field>,
    #[serde(default)]
    pub medium_confidence: Vec<Field>,
    #[serde(default)]
    pub low_confidence: Vec<Field>,
}

impl ConfidenceGroups {
    pub fn tier(&self, tier: ConfidenceTier) -> &[Field] {
        match tier {
            ConfidenceTier::High => &self.high_confidence,
            ConfidenceTier::Medium => &self.medium_confidence,
            ConfidenceTier::Low => &self.low_confidence,
        }
    }

    pub fn total_len(&self) -> usize {
        self.high_confidence.len() + self.medium_confidence.len() + self.low_confidence.len()
    }

    /// All fields in tier order (high, medium, low), each tier in input order.
    pub fn iter(&self) -> impl Iterator<Item = (ConfidenceTier, &Field)> + '_ {
        ConfidenceTier::ALL
            .into_iter()
            .flat_map(move |t| self.tier(t).iter().map(move |f| (t, f)))
    }

    pub fn find(&self, field_id: &str) -> Option<(ConfidenceTier, &Field)> {
        self.iter().find(|(_, f)| f.id == field_id)
    }

    pub fn from_json_str(s: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

/// Demo collection for a letter of proposal: 31 fields across the three tiers.
pub fn mock_lop_fields() -> CoreResult<ConfidenceGroups> {
    ConfidenceGroups::from_json_str(include_str!("mock_lop_v1.json"))
}
