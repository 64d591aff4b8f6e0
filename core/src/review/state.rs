use super::model::{ConfidenceGroups, ConfidenceTier, Field};
use crate::config::ReviewPolicy;
use crate::error::{CoreError, CoreResult};
use crate::ids::review_session_id_ulid;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Reviewer decisions, kept apart from the field records so the proposed
/// values stay untouched for comparison and reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewState {
    pub accepted_field_ids: BTreeSet<String>,
    pub edited_values: BTreeMap<String, String>,
}

impl ReviewState {
    pub fn is_accepted(&self, field_id: &str) -> bool {
        self.accepted_field_ids.contains(field_id)
    }

    pub fn edited_value(&self, field_id: &str) -> Option<&str> {
        self.edited_values.get(field_id).map(String::as_str)
    }

    /// An edit to the empty string still counts as an edit.
    pub fn effective_value<'a>(&'a self, field: &'a Field) -> &'a str {
        self.edited_value(&field.id).unwrap_or(&field.value)
    }

    pub fn is_empty(&self) -> bool {
        self.accepted_field_ids.is_empty() && self.edited_values.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewProgress {
    pub accepted: usize,
    pub total: usize,
}

impl ReviewProgress {
    pub fn is_complete(&self) -> bool {
        self.accepted == self.total
    }

    pub fn label(&self) -> String {
        format!("{} of {} fields reviewed", self.accepted, self.total)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmittedField {
    pub field_id: String,
    pub value: String,
    pub edited: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewSubmission {
    pub session_id: String,
    pub fields: Vec<SubmittedField>,
}

/// A review over one immutable field collection.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    session_id: String,
    groups: ConfidenceGroups,
    known_ids: BTreeSet<String>,
    policy: ReviewPolicy,
    state: ReviewState,
}

impl ReviewSession {
    pub fn new(groups: ConfidenceGroups, policy: &ReviewPolicy) -> CoreResult<Self> {
        let known_ids = check_groups(&groups, policy)?;
        let session = Self {
            session_id: review_session_id_ulid(),
            groups,
            known_ids,
            policy: policy.clone(),
            state: ReviewState::default(),
        };
        tracing::debug!(
            session_id = %session.session_id,
            fields = session.known_ids.len(),
            "review session started"
        );
        Ok(session)
    }

    /// Swap in a new document's fields. Earlier decisions are discarded.
    pub fn load_fields(&mut self, groups: ConfidenceGroups) -> CoreResult<()> {
        let known_ids = check_groups(&groups, &self.policy)?;
        self.groups = groups;
        self.known_ids = known_ids;
        self.state = ReviewState::default();
        self.session_id = review_session_id_ulid();
        tracing::debug!(
            session_id = %self.session_id,
            fields = self.known_ids.len(),
            "review fields reloaded"
        );
        Ok(())
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn groups(&self) -> &ConfidenceGroups {
        &self.groups
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    pub fn restore(&mut self, state: ReviewState) -> CoreResult<()> {
        for id in state
            .accepted_field_ids
            .iter()
            .chain(state.edited_values.keys())
        {
            self.ensure_known(id)?;
        }
        self.state = state;
        Ok(())
    }

    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.groups.find(field_id).map(|(_, f)| f)
    }

    pub fn toggle_accept(&mut self, field_id: &str) -> CoreResult<bool> {
        self.ensure_known(field_id)?;
        let accepted = if self.state.accepted_field_ids.remove(field_id) {
            false
        } else {
            self.state.accepted_field_ids.insert(field_id.to_string());
            true
        };
        tracing::debug!(field_id, accepted, "field acceptance toggled");
        Ok(accepted)
    }

    /// Editing does not accept the field.
    pub fn edit_value(&mut self, field_id: &str, value: impl Into<String>) -> CoreResult<()> {
        self.ensure_known(field_id)?;
        self.state
            .edited_values
            .insert(field_id.to_string(), value.into());
        tracing::debug!(field_id, "field value edited");
        Ok(())
    }

    pub fn accept_all(&mut self) {
        self.state.accepted_field_ids = self.known_ids.clone();
        tracing::debug!(accepted = self.known_ids.len(), "all fields accepted");
    }

    pub fn reset(&mut self) {
        self.state = ReviewState::default();
        tracing::debug!(session_id = %self.session_id, "review state reset");
    }

    pub fn is_accepted(&self, field_id: &str) -> bool {
        self.state.is_accepted(field_id)
    }

    pub fn effective_value(&self, field_id: &str) -> CoreResult<&str> {
        let field = self
            .field(field_id)
            .ok_or_else(|| CoreError::UnknownField(field_id.to_string()))?;
        Ok(self.state.effective_value(field))
    }

    /// True when the edited value differs from the proposed one.
    pub fn is_edited(&self, field_id: &str) -> bool {
        match (self.field(field_id), self.state.edited_value(field_id)) {
            (Some(field), Some(edit)) => edit != field.value,
            _ => false,
        }
    }

    pub fn progress(&self) -> ReviewProgress {
        ReviewProgress {
            accepted: self.state.accepted_field_ids.len(),
            total: self.groups.total_len(),
        }
    }

    pub fn tier_progress(&self, tier: ConfidenceTier) -> ReviewProgress {
        let fields = self.groups.tier(tier);
        ReviewProgress {
            accepted: fields
                .iter()
                .filter(|f| self.state.is_accepted(&f.id))
                .count(),
            total: fields.len(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress().is_complete()
    }

    pub fn pending_required(&self) -> Vec<&Field> {
        self.groups
            .iter()
            .map(|(_, f)| f)
            .filter(|f| f.required && !self.state.is_accepted(&f.id))
            .collect()
    }

    pub fn submission(&self) -> CoreResult<ReviewSubmission> {
        let progress = self.progress();
        if !progress.is_complete() {
            return Err(CoreError::IncompleteReview {
                accepted: progress.accepted,
                total: progress.total,
            });
        }
        let fields = self
            .groups
            .iter()
            .map(|(_, f)| SubmittedField {
                field_id: f.id.clone(),
                value: self.state.effective_value(f).to_string(),
                edited: self.is_edited(&f.id),
            })
            .collect();
        Ok(ReviewSubmission {
            session_id: self.session_id.clone(),
            fields,
        })
    }

    fn ensure_known(&self, field_id: &str) -> CoreResult<()> {
        if self.known_ids.contains(field_id) {
            Ok(())
        } else {
            tracing::info!(field_id, "review action on unknown field");
            Err(CoreError::UnknownField(field_id.to_string()))
        }
    }
}

fn check_groups(
    groups: &ConfidenceGroups,
    policy: &ReviewPolicy,
) -> CoreResult<BTreeSet<String>> {
    let mut ids = BTreeSet::new();
    for (tier, field) in groups.iter() {
        if !ids.insert(field.id.clone()) {
            return Err(CoreError::DuplicateField(field.id.clone()));
        }
        if field.confidence > 100 {
            return Err(CoreError::InvalidInput(format!(
                "field {} has confidence {} (must be 0-100)",
                field.id, field.confidence
            )));
        }
        if policy.enforce_tier_boundaries
            && ConfidenceTier::classify(field.confidence, &policy.thresholds) != tier
        {
            return Err(CoreError::TierMismatch {
                field_id: field.id.clone(),
                tier,
                confidence: field.confidence,
            });
        }
    }
    Ok(ids)
}
