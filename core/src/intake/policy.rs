use super::model::{FileCandidate, FileKind, UploadedFile, ValidationIssue};
use crate::config::IntakePolicy;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size in base-1024 units, rounded to two decimals with
/// trailing zeros dropped ("1.5 KB", "2 MB"). Sizes past the GB range stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0usize;
    let mut divisor = 1u64;
    while unit + 1 < SIZE_UNITS.len() && bytes >= divisor * 1024 {
        divisor *= 1024;
        unit += 1;
    }
    let rounded = format!("{:.2}", bytes as f64 / divisor as f64);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Type check runs before the size check, so an oversized unsupported file
/// reports the type problem.
pub fn check_file(
    policy: &IntakePolicy,
    candidate: &FileCandidate,
) -> Result<UploadedFile, ValidationIssue> {
    if !policy.accepts_mime(&candidate.mime_type) {
        return Err(ValidationIssue::UnsupportedFileType);
    }
    if candidate.size_bytes > policy.max_upload_bytes {
        return Err(ValidationIssue::FileTooLarge);
    }
    Ok(UploadedFile {
        name: candidate.name.clone(),
        mime_type: candidate.mime_type.clone(),
        size_bytes: candidate.size_bytes,
        size_label: format_file_size(candidate.size_bytes),
        kind: FileKind::from_mime(&candidate.mime_type),
        sha256: candidate.sha256.clone(),
    })
}

pub fn looks_like_draft(file_name: &str) -> bool {
    file_name.to_lowercase().contains("draft")
}
