use super::model::{
    ClassificationPayload, DocumentSource, DocumentSubType, DocumentType, FileCandidate,
    UploadedFile, UrlPreview, ValidationIssue,
};
use super::policy::{check_file, looks_like_draft};
use crate::config::IntakePolicy;
use crate::error::{CoreError, CoreResult};
use crate::ids::{intake_id_ulid, now_rfc3339_utc};
use serde::{Deserialize, Serialize};
use url::Url;

pub const SIGNED_DRAFT_ADVISORY: &str = "This document appears to be a draft but is marked as \
     \"Signed\". Please verify the classification is correct.";

/// Document intake form state. A file and a URL are mutually exclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntakeState {
    policy: IntakePolicy,
    uploaded_file: Option<UploadedFile>,
    document_url: String,
    document_type: Option<DocumentType>,
    document_sub_type: Option<DocumentSubType>,
    signed_draft_flag: bool,
    last_file_error: Option<ValidationIssue>,
}

impl IntakeState {
    pub fn new(policy: IntakePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn uploaded_file(&self) -> Option<&UploadedFile> {
        self.uploaded_file.as_ref()
    }

    pub fn document_url(&self) -> Option<&str> {
        if self.document_url.is_empty() {
            None
        } else {
            Some(&self.document_url)
        }
    }

    pub fn document_type(&self) -> Option<DocumentType> {
        self.document_type
    }

    pub fn document_sub_type(&self) -> Option<DocumentSubType> {
        self.document_sub_type
    }

    pub fn last_file_error(&self) -> Option<ValidationIssue> {
        self.last_file_error
    }

    pub fn signed_draft_flag(&self) -> bool {
        self.signed_draft_flag
    }

    pub fn signed_draft_advisory(&self) -> Option<&'static str> {
        self.signed_draft_flag.then_some(SIGNED_DRAFT_ADVISORY)
    }

    /// On rejection the current file (if any) is kept and the issue replaces
    /// any earlier file error.
    pub fn submit_file(
        &mut self,
        candidate: FileCandidate,
    ) -> Result<&UploadedFile, ValidationIssue> {
        match check_file(&self.policy, &candidate) {
            Ok(file) => {
                tracing::debug!(
                    name = %file.name,
                    size = %file.size_label,
                    kind = file.kind.label(),
                    "file accepted"
                );
                self.last_file_error = None;
                self.document_url.clear();
                self.update_signed_draft_flag(signed_draft(self.document_sub_type, Some(&file)));
                let file = self.uploaded_file.insert(file);
                Ok(&*file)
            }
            Err(issue) => {
                tracing::info!(
                    name = %candidate.name,
                    mime = %candidate.mime_type,
                    bytes = candidate.size_bytes,
                    %issue,
                    "file rejected"
                );
                self.last_file_error = Some(issue);
                Err(issue)
            }
        }
    }

    pub fn submit_url(&mut self, url: impl Into<String>) {
        self.document_url = url.into();
        if !self.document_url.is_empty() && self.uploaded_file.take().is_some() {
            tracing::debug!("url entered; cleared uploaded file");
        }
        self.refresh_signed_draft_flag();
    }

    pub fn remove_file(&mut self) {
        self.uploaded_file = None;
        self.refresh_signed_draft_flag();
    }

    pub fn remove_url(&mut self) {
        self.document_url.clear();
    }

    pub fn set_document_type(&mut self, document_type: DocumentType) {
        tracing::debug!(document_type = document_type.short_label(), "document type set");
        self.document_type = Some(document_type);
        self.document_sub_type = None;
        self.refresh_signed_draft_flag();
    }

    pub fn set_document_sub_type(&mut self, sub_type: DocumentSubType) -> CoreResult<()> {
        let offered = self
            .document_type
            .map(|t| t.sub_types().contains(&sub_type))
            .unwrap_or(false);
        if !offered {
            return Err(CoreError::InvalidInput(format!(
                "sub-type {} is not offered for {}",
                sub_type.label(),
                self.document_type
                    .map(|t| t.short_label())
                    .unwrap_or("an unselected document type")
            )));
        }
        self.document_sub_type = Some(sub_type);
        self.refresh_signed_draft_flag();
        Ok(())
    }

    fn refresh_signed_draft_flag(&mut self) {
        self.update_signed_draft_flag(signed_draft(
            self.document_sub_type,
            self.uploaded_file.as_ref(),
        ));
    }

    fn update_signed_draft_flag(&mut self, flag: bool) {
        if flag && !self.signed_draft_flag {
            tracing::info!("file name looks like a draft but sub-type is Signed");
        }
        self.signed_draft_flag = flag;
    }

    /// Pure check of the current state; issues come back in display order.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.uploaded_file.is_none() && self.document_url.is_empty() {
            issues.push(ValidationIssue::MissingDocument);
        }
        match self.document_type {
            None => issues.push(ValidationIssue::MissingDocumentType),
            Some(t) if t.requires_sub_type() && self.document_sub_type.is_none() => {
                issues.push(ValidationIssue::MissingSubType(t));
            }
            Some(_) => {}
        }
        issues
    }

    /// A URL counts as a document here, same as in `validate`.
    pub fn is_ready_to_advance(&self) -> bool {
        self.validate().is_empty()
    }

    pub fn clear(&mut self) {
        let policy = std::mem::take(&mut self.policy);
        *self = Self::new(policy);
    }

    pub fn url_preview(&self) -> Option<UrlPreview> {
        let url = Url::parse(self.document_url()?).ok()?;
        Some(UrlPreview {
            host: url.host_str()?.to_string(),
            path: url.path().to_string(),
        })
    }

    pub fn handoff(&self) -> CoreResult<ClassificationPayload> {
        let issues = self.validate();
        if !issues.is_empty() {
            return Err(CoreError::IncompleteIntake(issues));
        }
        let document = match (&self.uploaded_file, self.document_url()) {
            (Some(file), _) => DocumentSource::File(file.clone()),
            (None, Some(url)) => DocumentSource::Url {
                url: url.to_string(),
            },
            (None, None) => {
                return Err(CoreError::IncompleteIntake(vec![
                    ValidationIssue::MissingDocument,
                ]))
            }
        };
        let document_type = self.document_type.ok_or_else(|| {
            CoreError::IncompleteIntake(vec![ValidationIssue::MissingDocumentType])
        })?;
        let payload = ClassificationPayload {
            intake_id: intake_id_ulid(),
            document,
            document_type,
            document_sub_type: self.document_sub_type,
            signed_draft_advisory: self.signed_draft_flag,
            created_at_utc: now_rfc3339_utc(),
        };
        tracing::info!(
            intake_id = %payload.intake_id,
            classification = %payload.classification_label(),
            "intake handed off"
        );
        Ok(payload)
    }
}

/// The advisory follows the current file and sub-type; a URL document never raises it.
fn signed_draft(sub_type: Option<DocumentSubType>, file: Option<&UploadedFile>) -> bool {
    sub_type == Some(DocumentSubType::Signed)
        && file.map(|f| looks_like_draft(&f.name)).unwrap_or(false)
}
