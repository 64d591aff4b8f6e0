use intake_review_core::config::{IntakePolicy, MIME_PDF};
use intake_review_core::error::CoreError;
use intake_review_core::intake::model::{
    DocumentSource, DocumentSubType, DocumentType, FileCandidate, FileKind, UploadStatus,
    ValidationIssue,
};
use intake_review_core::intake::workflow::{IntakeState, SIGNED_DRAFT_ADVISORY};

fn pdf(name: &str, size_bytes: u64) -> FileCandidate {
    FileCandidate {
        name: name.to_string(),
        mime_type: MIME_PDF.to_string(),
        size_bytes,
        sha256: None,
    }
}

#[test]
fn empty_intake_reports_document_then_type() {
    let s = IntakeState::new(IntakePolicy::default());
    let messages: Vec<String> = s.validate().iter().map(|i| i.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "Please upload a document or provide a URL".to_string(),
            "Please select a document type".to_string(),
        ]
    );
    assert!(!s.is_ready_to_advance());
}

#[test]
fn lop_without_sub_type_is_incomplete() {
    let mut s = IntakeState::default();
    s.submit_file(pdf("proposal.pdf", 1024)).unwrap();
    s.set_document_type(DocumentType::Lop);
    assert_eq!(
        s.validate(),
        vec![ValidationIssue::MissingSubType(DocumentType::Lop)]
    );
    assert_eq!(
        s.validate()[0].to_string(),
        "Please select a document sub-type for LOP"
    );
    s.set_document_sub_type(DocumentSubType::Draft).unwrap();
    assert!(s.validate().is_empty());
    assert!(s.is_ready_to_advance());
}

#[test]
fn non_lop_types_need_no_sub_type() {
    let mut s = IntakeState::default();
    s.submit_file(pdf("cv.pdf", 1024)).unwrap();
    s.set_document_type(DocumentType::CvResume);
    assert!(s.is_ready_to_advance());
}

#[test]
fn oversized_pdf_is_rejected_without_touching_current_file() {
    let mut s = IntakeState::default();
    s.submit_file(pdf("small.pdf", 10)).unwrap();

    let err = s.submit_file(pdf("huge.pdf", 60 * 1024 * 1024)).unwrap_err();
    assert_eq!(err, ValidationIssue::FileTooLarge);
    assert_eq!(err.to_string(), "File size must be less than 50MB");
    assert_eq!(s.uploaded_file().unwrap().name, "small.pdf");
    assert_eq!(s.last_file_error(), Some(ValidationIssue::FileTooLarge));

    let fresh = {
        let mut f = IntakeState::default();
        let _ = f.submit_file(pdf("huge.pdf", 60 * 1024 * 1024));
        f
    };
    assert!(fresh.uploaded_file().is_none());
}

#[test]
fn unsupported_type_replaces_earlier_file_error() {
    let mut s = IntakeState::default();
    let _ = s.submit_file(pdf("huge.pdf", 60 * 1024 * 1024));
    let err = s
        .submit_file(FileCandidate {
            name: "notes.txt".to_string(),
            mime_type: "text/plain".to_string(),
            size_bytes: 5,
            sha256: None,
        })
        .unwrap_err();
    assert_eq!(err, ValidationIssue::UnsupportedFileType);
    assert_eq!(s.last_file_error(), Some(ValidationIssue::UnsupportedFileType));

    s.submit_file(pdf("ok.pdf", 5)).unwrap();
    assert_eq!(s.last_file_error(), None);
}

#[test]
fn accepted_file_records_normalized_metadata() {
    let mut s = IntakeState::default();
    let file = s.submit_file(pdf("Q4 proposal.pdf", 1536)).unwrap();
    assert_eq!(file.size_label, "1.5 KB");
    assert_eq!(file.kind, FileKind::Pdf);
    assert_eq!(file.kind.label(), "PDF");
}

#[test]
fn file_and_url_are_mutually_exclusive() {
    let mut s = IntakeState::default();
    s.submit_url("https://example.com/lop.pdf");
    s.submit_file(pdf("a.pdf", 1)).unwrap();
    assert_eq!(s.document_url(), None);
    assert!(s.uploaded_file().is_some());

    s.submit_url("https://example.com/lop.pdf");
    assert!(s.uploaded_file().is_none());
    assert_eq!(s.document_url(), Some("https://example.com/lop.pdf"));
}

#[test]
fn empty_url_keeps_file() {
    let mut s = IntakeState::default();
    s.submit_file(pdf("a.pdf", 1)).unwrap();
    s.submit_url("");
    assert!(s.uploaded_file().is_some());
}

#[test]
fn signed_sub_type_on_draft_named_file_raises_advisory() {
    let mut s = IntakeState::default();
    s.submit_file(pdf("Q4_draft_proposal.pdf", 2048)).unwrap();
    s.set_document_type(DocumentType::Lop);
    s.set_document_sub_type(DocumentSubType::Signed).unwrap();
    assert!(s.signed_draft_flag());
    assert_eq!(s.signed_draft_advisory(), Some(SIGNED_DRAFT_ADVISORY));

    s.set_document_sub_type(DocumentSubType::Draft).unwrap();
    assert!(!s.signed_draft_flag());
    assert_eq!(s.signed_draft_advisory(), None);
}

#[test]
fn signed_url_document_never_raises_advisory() {
    let mut s = IntakeState::default();
    s.submit_url("https://example.com/draft.pdf");
    s.set_document_type(DocumentType::Lop);
    s.set_document_sub_type(DocumentSubType::Signed).unwrap();
    assert!(!s.signed_draft_flag());
}

#[test]
fn switching_draft_file_to_url_drops_advisory_from_payload() {
    let mut s = IntakeState::default();
    s.submit_file(pdf("Q4_draft.pdf", 1024)).unwrap();
    s.set_document_type(DocumentType::Lop);
    s.set_document_sub_type(DocumentSubType::Signed).unwrap();
    assert!(s.signed_draft_flag());

    s.submit_url("https://example.com/lop.pdf");
    assert!(!s.signed_draft_flag());
    assert_eq!(s.signed_draft_advisory(), None);

    let payload = s.handoff().unwrap();
    assert!(matches!(payload.document, DocumentSource::Url { .. }));
    assert!(!payload.signed_draft_advisory);
}

#[test]
fn removing_draft_file_clears_advisory() {
    let mut s = IntakeState::default();
    s.submit_file(pdf("Q4_draft.pdf", 1024)).unwrap();
    s.set_document_type(DocumentType::Lop);
    s.set_document_sub_type(DocumentSubType::Signed).unwrap();
    assert!(s.signed_draft_flag());

    s.remove_file();
    assert!(!s.signed_draft_flag());
}

#[test]
fn draft_file_after_signed_sub_type_raises_advisory() {
    let mut s = IntakeState::default();
    s.set_document_type(DocumentType::Lop);
    s.set_document_sub_type(DocumentSubType::Signed).unwrap();
    assert!(!s.signed_draft_flag());

    s.submit_file(pdf("LOP_DRAFT_v3.pdf", 1024)).unwrap();
    assert!(s.signed_draft_flag());
    assert!(s.handoff().unwrap().signed_draft_advisory);

    s.submit_file(pdf("LOP_final.pdf", 1024)).unwrap();
    assert!(!s.signed_draft_flag());
}

#[test]
fn removing_document_restores_missing_document() {
    let mut s = IntakeState::default();
    s.set_document_type(DocumentType::Other);

    s.submit_file(pdf("notes.pdf", 1024)).unwrap();
    assert!(s.validate().is_empty());
    s.remove_file();
    assert!(s.uploaded_file().is_none());
    assert_eq!(s.validate(), vec![ValidationIssue::MissingDocument]);

    s.submit_url("https://example.com/notes.pdf");
    assert!(s.validate().is_empty());
    s.remove_url();
    assert_eq!(s.document_url(), None);
    assert_eq!(s.validate(), vec![ValidationIssue::MissingDocument]);
    assert!(!s.is_ready_to_advance());
}

#[test]
fn url_alone_is_enough_to_advance() {
    let mut s = IntakeState::default();
    s.submit_url("https://example.com/contract.pdf");
    s.set_document_type(DocumentType::Contract);
    assert!(s.validate().is_empty());
    assert!(s.is_ready_to_advance());

    let payload = s.handoff().unwrap();
    assert_eq!(
        payload.document,
        DocumentSource::Url {
            url: "https://example.com/contract.pdf".to_string()
        }
    );
    assert_eq!(payload.classification_label(), "Contract");
}

#[test]
fn handoff_refuses_incomplete_intake() {
    let s = IntakeState::default();
    match s.handoff() {
        Err(CoreError::IncompleteIntake(issues)) => assert_eq!(
            issues,
            vec![
                ValidationIssue::MissingDocument,
                ValidationIssue::MissingDocumentType
            ]
        ),
        other => panic!("expected IncompleteIntake, got {:?}", other),
    }
}

#[test]
fn handoff_payload_builds_upload_record() {
    let mut s = IntakeState::default();
    s.submit_file(FileCandidate {
        sha256: Some("ab".repeat(32)),
        ..pdf("ABC_Corp_Proposal_Q4.pdf", 4096)
    })
    .unwrap();
    s.set_document_type(DocumentType::Lop);
    s.set_document_sub_type(DocumentSubType::Signed).unwrap();

    let payload = s.handoff().unwrap();
    assert!(payload.intake_id.starts_with("i_"));
    assert!(!payload.signed_draft_advisory);
    match &payload.document {
        DocumentSource::File(f) => {
            assert_eq!(f.sha256.as_deref(), Some("ab".repeat(32).as_str()))
        }
        other => panic!("expected file source, got {:?}", other),
    }

    let record = payload.to_upload_record(UploadStatus::Completed);
    assert_eq!(record.file_name, "ABC_Corp_Proposal_Q4.pdf");
    assert_eq!(record.document_type_label, "LOP - Signed");
    assert_eq!(record.uploaded_at_utc, payload.created_at_utc);

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["document_type"], "lop");
    assert_eq!(json["document_sub_type"], "signed");
    assert_eq!(json["document"]["source"], "file");
}

#[test]
fn clear_resets_everything() {
    let mut s = IntakeState::default();
    s.submit_file(pdf("draft.pdf", 1)).unwrap();
    s.set_document_type(DocumentType::Lop);
    s.set_document_sub_type(DocumentSubType::Signed).unwrap();
    s.clear();
    assert!(s.uploaded_file().is_none());
    assert_eq!(s.document_type(), None);
    assert_eq!(s.document_sub_type(), None);
    assert!(!s.signed_draft_flag());
    assert_eq!(s.validate().len(), 2);
}

#[test]
fn document_type_parsing_and_labels() {
    assert_eq!(DocumentType::parse("LOP"), Some(DocumentType::Lop));
    assert_eq!(DocumentType::parse("cv"), Some(DocumentType::CvResume));
    assert_eq!(DocumentType::parse("invoice"), None);
    assert_eq!(DocumentType::Lop.label(), "Letter of Proposal (LOP)");
    assert!(DocumentType::ALL
        .iter()
        .filter(|t| t.requires_sub_type())
        .eq([DocumentType::Lop].iter()));
    assert_eq!(DocumentSubType::parse("Signed"), Some(DocumentSubType::Signed));
}
