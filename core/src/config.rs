use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_PNG: &str = "image/png";
pub const MIME_JPEG: &str = "image/jpeg";

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IntakePolicy {
    pub accepted_mime_types: Vec<String>,
    pub max_upload_bytes: u64,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            accepted_mime_types: [MIME_PDF, MIME_DOCX, MIME_PNG, MIME_JPEG]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl IntakePolicy {
    pub fn accepts_mime(&self, mime_type: &str) -> bool {
        self.accepted_mime_types.iter().any(|m| m == mime_type)
    }
}

/// Lower bounds (inclusive) of the high and medium tiers. Anything below
/// `medium_min` is low.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TierThresholds {
    pub high_min: u8,
    pub medium_min: u8,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            high_min: 90,
            medium_min: 70,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReviewPolicy {
    pub thresholds: TierThresholds,
    pub enforce_tier_boundaries: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub intake: IntakePolicy,
    pub review: ReviewPolicy,
}

impl AppConfig {
    pub fn from_json_str(s: &str) -> CoreResult<Self> {
        let cfg: AppConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let cfg = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Ok(cfg)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.intake.max_upload_bytes == 0 {
            return Err(CoreError::InvalidInput(
                "intake.max_upload_bytes must be > 0".to_string(),
            ));
        }
        if self.intake.accepted_mime_types.is_empty() {
            return Err(CoreError::InvalidInput(
                "intake.accepted_mime_types must not be empty".to_string(),
            ));
        }
        let t = self.review.thresholds;
        if t.high_min > 100 {
            return Err(CoreError::InvalidInput(
                "review.thresholds.high_min must be <= 100".to_string(),
            ));
        }
        if t.medium_min > t.high_min {
            return Err(CoreError::InvalidInput(
                "review.thresholds.medium_min must be <= high_min".to_string(),
            ));
        }
        Ok(())
    }
}
