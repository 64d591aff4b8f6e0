use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Lop,
    #[serde(rename = "cv")]
    CvResume,
    Contract,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Lop,
        DocumentType::CvResume,
        DocumentType::Contract,
        DocumentType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DocumentType::Lop => "Letter of Proposal (LOP)",
            DocumentType::CvResume => "CV/Resume",
            DocumentType::Contract => "Contract",
            DocumentType::Other => "Other",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            DocumentType::Lop => "LOP",
            other => other.label(),
        }
    }

    pub fn sub_types(self) -> &'static [DocumentSubType] {
        match self {
            DocumentType::Lop => &[DocumentSubType::Draft, DocumentSubType::Signed],
            _ => &[],
        }
    }

    pub fn requires_sub_type(self) -> bool {
        !self.sub_types().is_empty()
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lop" => Some(DocumentType::Lop),
            "cv" | "resume" | "cv/resume" => Some(DocumentType::CvResume),
            "contract" => Some(DocumentType::Contract),
            "other" => Some(DocumentType::Other),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSubType {
    Draft,
    Signed,
}

impl DocumentSubType {
    pub fn label(self) -> &'static str {
        match self {
            DocumentSubType::Draft => "Draft",
            DocumentSubType::Signed => "Signed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(DocumentSubType::Draft),
            "signed" => Some(DocumentSubType::Signed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileKind {
    Pdf,
    Docx,
    Image,
}

impl FileKind {
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.contains("pdf") {
            FileKind::Pdf
        } else if mime_type.contains("word") {
            FileKind::Docx
        } else {
            FileKind::Image
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Pdf => "PDF",
            FileKind::Docx => "DOCX",
            FileKind::Image => "Image",
        }
    }
}

/// A file offered to the intake, before any policy checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub size_label: String,
    pub kind: FileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Error)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationIssue {
    #[error("Please upload a document or provide a URL")]
    MissingDocument,
    #[error("Please select a document type")]
    MissingDocumentType,
    #[error("Please select a document sub-type for {}", .0.short_label())]
    MissingSubType(DocumentType),
    #[error("Please upload a valid file type: PDF, DOCX, PNG, or JPG")]
    UnsupportedFileType,
    #[error("File size must be less than 50MB")]
    FileTooLarge,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DocumentSource {
    File(UploadedFile),
    Url { url: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrlPreview {
    pub host: String,
    pub path: String,
}

/// What the intake hands to the review step once validation passes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassificationPayload {
    pub intake_id: String,
    pub document: DocumentSource,
    pub document_type: DocumentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_sub_type: Option<DocumentSubType>,
    pub signed_draft_advisory: bool,
    pub created_at_utc: String,
}

impl ClassificationPayload {
    pub fn classification_label(&self) -> String {
        match self.document_sub_type {
            Some(sub) => format!("{} - {}", self.document_type.short_label(), sub.label()),
            None => self.document_type.short_label().to_string(),
        }
    }

    pub fn to_upload_record(&self, status: UploadStatus) -> UploadRecord {
        let file_name = match &self.document {
            DocumentSource::File(f) => f.name.clone(),
            DocumentSource::Url { url } => url.clone(),
        };
        UploadRecord {
            file_name,
            uploaded_at_utc: self.created_at_utc.clone(),
            document_type_label: self.classification_label(),
            status,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UploadStatus {
    Processing,
    Completed,
    Failed,
}

/// Summary of the most recent upload, as shown in the recent activity card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadRecord {
    pub file_name: String,
    pub uploaded_at_utc: String,
    pub document_type_label: String,
    pub status: UploadStatus,
}
