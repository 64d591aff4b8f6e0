use super::grouping::group_by_category;
use super::model::{ConfidenceTier, Field};
use super::state::ReviewSession;
use crate::error::CoreResult;
use std::fmt;

pub const REFERENCE_NOT_SET: &str = "Not set";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceDisplay<'a> {
    NotSet,
    Value(&'a str),
}

impl fmt::Display for ReferenceDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceDisplay::NotSet => f.write_str(REFERENCE_NOT_SET),
            ReferenceDisplay::Value(v) => f.write_str(v),
        }
    }
}

/// An empty reference value is shown the same as a missing one.
pub fn reference_display(field: &Field) -> ReferenceDisplay<'_> {
    match field.reference_value.as_deref() {
        None | Some("") => ReferenceDisplay::NotSet,
        Some(v) => ReferenceDisplay::Value(v),
    }
}

pub fn tier_heading(session: &ReviewSession, tier: ConfidenceTier) -> String {
    format!(
        "{} ({} confidence, {} fields)",
        tier.label(),
        tier.range_label(),
        session.groups().tier(tier).len()
    )
}

pub fn render_review_csv(session: &ReviewSession) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record([
        "tier",
        "category",
        "field_id",
        "label",
        "confidence",
        "required",
        "proposed_value",
        "effective_value",
        "reference_value",
        "accepted",
    ])?;
    let state = session.state();
    for tier in ConfidenceTier::ALL {
        for group in group_by_category(session.groups().tier(tier)) {
            for field in group.fields {
                let reference = match reference_display(field) {
                    ReferenceDisplay::NotSet => "",
                    ReferenceDisplay::Value(v) => v,
                };
                let confidence = field.confidence.to_string();
                wtr.write_record([
                    tier.as_str(),
                    group.category,
                    field.id.as_str(),
                    field.label.as_str(),
                    confidence.as_str(),
                    bool_cell(field.required),
                    field.value.as_str(),
                    state.effective_value(field),
                    reference,
                    bool_cell(state.is_accepted(&field.id)),
                ])?;
            }
        }
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}

fn bool_cell(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}
