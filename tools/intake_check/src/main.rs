use anyhow::{bail, Context, Result};
use clap::Parser;
use intake_review_core::config::{AppConfig, MIME_DOCX, MIME_JPEG, MIME_PDF, MIME_PNG};
use intake_review_core::ids::sha256_hex;
use intake_review_core::intake::model::{DocumentSubType, DocumentType, FileCandidate};
use intake_review_core::intake::workflow::IntakeState;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Run a document through intake validation and print the classification payload.
#[derive(Parser, Debug)]
#[command(name = "intake_check")]
#[command(version)]
struct Args {
    /// Local document to upload
    #[arg(long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Public document URL
    #[arg(long)]
    url: Option<String>,

    /// Document type: lop, cv, contract, other
    #[arg(long = "type")]
    document_type: Option<String>,

    /// Document sub-type (LOP only): draft, signed
    #[arg(long)]
    sub_type: Option<String>,

    /// JSON config overriding the intake policy
    #[arg(long, env = "INTAKE_REVIEW_CONFIG")]
    config: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    match run(&args) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("intake_check error: {:#}", e);
            std::process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("intake_review_core=debug,intake_check=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("intake_review_core=info,intake_check=info"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(args: &Args) -> Result<bool> {
    let config = match &args.config {
        Some(path) => AppConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    let mut intake = IntakeState::new(config.intake);

    if let Some(path) = &args.file {
        let candidate = read_candidate(path)?;
        if let Err(issue) = intake.submit_file(candidate) {
            println!("REJECTED {}", issue);
        }
    }
    if let Some(url) = &args.url {
        intake.submit_url(url.as_str());
        if let Some(preview) = intake.url_preview() {
            println!("URL host={} path={}", preview.host, preview.path);
        }
    }
    if let Some(raw) = &args.document_type {
        let Some(t) = DocumentType::parse(raw) else {
            bail!("unknown document type: {}", raw);
        };
        intake.set_document_type(t);
    }
    if let Some(raw) = &args.sub_type {
        let Some(sub) = DocumentSubType::parse(raw) else {
            bail!("unknown document sub-type: {}", raw);
        };
        intake.set_document_sub_type(sub)?;
    }

    if let Some(file) = intake.uploaded_file() {
        println!(
            "FILE {} {} {}",
            file.name,
            file.kind.label(),
            file.size_label
        );
    }
    for issue in intake.validate() {
        println!("ISSUE {}", issue);
    }
    if let Some(advisory) = intake.signed_draft_advisory() {
        println!("ADVISORY {}", advisory);
    }

    if !intake.is_ready_to_advance() {
        return Ok(false);
    }
    let payload = intake.handoff()?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(true)
}

fn read_candidate(path: &Path) -> Result<FileCandidate> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FileCandidate {
        name,
        mime_type: mime_for_path(path).to_string(),
        size_bytes: bytes.len() as u64,
        sha256: Some(sha256_hex(&bytes)),
    })
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => MIME_PDF,
        "docx" => MIME_DOCX,
        "png" => MIME_PNG,
        "jpg" | "jpeg" => MIME_JPEG,
        _ => "application/octet-stream",
    }
}
