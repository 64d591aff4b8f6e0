use crate::intake::model::ValidationIssue;
use crate::review::model::ConfidenceTier;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("duplicate field id: {0}")]
    DuplicateField(String),

    #[error("field {field_id} has confidence {confidence} outside the {tier:?} tier")]
    TierMismatch {
        field_id: String,
        tier: ConfidenceTier,
        confidence: u8,
    },

    #[error("intake incomplete: {}", join_issues(.0))]
    IncompleteIntake(Vec<ValidationIssue>),

    #[error("review incomplete: {accepted} of {total} fields accepted")]
    IncompleteReview { accepted: usize, total: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type CoreResult<T> = Result<T, CoreError>;
