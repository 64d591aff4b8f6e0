use anyhow::{anyhow, Context, Result};
use clap::Parser;
use intake_review_core::config::AppConfig;
use intake_review_core::error::CoreError;
use intake_review_core::review::grouping::group_by_category;
use intake_review_core::review::model::{mock_lop_fields, ConfidenceGroups, ConfidenceTier};
use intake_review_core::review::render::{render_review_csv, tier_heading};
use intake_review_core::review::state::ReviewSession;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Apply review actions to an extracted field collection and report progress.
///
/// Actions run in order: `accept:<id>` toggles acceptance, `edit:<id>=<value>`
/// overrides a value, `accept-all` and `reset` act on the whole collection.
#[derive(Parser, Debug)]
#[command(name = "review_runner")]
#[command(version)]
struct Args {
    /// Field collection JSON; the built-in LOP sample is used when omitted
    #[arg(long)]
    fields: Option<PathBuf>,

    #[arg(long = "action")]
    actions: Vec<String>,

    /// Write the reviewed fields as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the submission payload (fails unless every field is accepted)
    #[arg(long)]
    submission: bool,

    /// Exit non-zero unless every field is accepted
    #[arg(long)]
    require_complete: bool,

    #[arg(long, env = "INTAKE_REVIEW_CONFIG")]
    config: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReviewAction {
    Toggle(String),
    Edit(String, String),
    AcceptAll,
    Reset,
}

fn parse_action(raw: &str) -> Result<ReviewAction> {
    match raw {
        "accept-all" => return Ok(ReviewAction::AcceptAll),
        "reset" => return Ok(ReviewAction::Reset),
        _ => {}
    }
    if let Some(id) = raw.strip_prefix("accept:") {
        return Ok(ReviewAction::Toggle(id.to_string()));
    }
    if let Some(rest) = raw.strip_prefix("edit:") {
        let (id, value) = rest
            .split_once('=')
            .ok_or_else(|| anyhow!("edit action needs <id>=<value>: {}", raw))?;
        return Ok(ReviewAction::Edit(id.to_string(), value.to_string()));
    }
    Err(anyhow!("unknown action: {}", raw))
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    match run(&args) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("review_runner error: {:#}", e);
            std::process::exit(2);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("intake_review_core=debug,review_runner=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("intake_review_core=info,review_runner=info"))
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
    let groups = match &args.fields {
        Some(path) => ConfidenceGroups::from_json_file(path)
            .with_context(|| format!("failed to load fields {}", path.display()))?,
        None => mock_lop_fields()?,
    };
    let mut session = ReviewSession::new(groups, &config.review)?;
    tracing::info!(session_id = session.session_id(), "review started");

    let actions = args
        .actions
        .iter()
        .map(|a| parse_action(a))
        .collect::<Result<Vec<_>>>()?;
    for action in actions {
        match action {
            ReviewAction::Toggle(id) => {
                session.toggle_accept(&id)?;
            }
            ReviewAction::Edit(id, value) => session.edit_value(&id, value)?,
            ReviewAction::AcceptAll => session.accept_all(),
            ReviewAction::Reset => session.reset(),
        }
    }

    for tier in ConfidenceTier::ALL {
        let p = session.tier_progress(tier);
        println!(
            "TIER {} {}/{} {}",
            tier.as_str(),
            p.accepted,
            p.total,
            tier_heading(&session, tier)
        );
        for group in group_by_category(session.groups().tier(tier)) {
            println!(
                "CATEGORY {} {} {}/{}",
                tier.as_str(),
                group.category,
                group.accepted_count(session.state()),
                group.len()
            );
        }
    }
    let progress = session.progress();
    println!("PROGRESS {}", progress.label());
    for field in session.pending_required() {
        println!("PENDING_REQUIRED {}", field.id);
    }

    if let Some(path) = &args.csv {
        std::fs::write(path, render_review_csv(&session)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    if args.submission {
        match submission_output(&session)? {
            Some(json) => println!("{}", json),
            None => return Ok(false),
        }
    }

    Ok(!args.require_complete || progress.is_complete())
}

/// `None` when the review is incomplete; that is a failed gate, not a usage error.
fn submission_output(session: &ReviewSession) -> Result<Option<String>> {
    match session.submission() {
        Ok(submission) => Ok(Some(serde_json::to_string_pretty(&submission)?)),
        Err(e @ CoreError::IncompleteReview { .. }) => {
            println!("INCOMPLETE {}", e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
