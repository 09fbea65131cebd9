use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use faq_core::persist::{save_entries, EntryExport};
use faq_core::source::load_entries;
use faq_core::{AnswerEngine, EngineConfig, Outcome};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "faq-indexer")]
#[command(about = "Extract and query question/answer entries from an FAQ document", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and write its entries as a JSON export
    Extract {
        /// Source document (PDF or text)
        #[arg(long)]
        document: PathBuf,
        /// Output export file
        #[arg(long)]
        output: PathBuf,
    },
    /// List the entries and vocabulary size of a document
    Inspect {
        #[arg(long)]
        document: PathBuf,
    },
    /// Answer a single question against a document
    Ask {
        #[arg(long)]
        document: PathBuf,
        /// Minimum similarity for an answer (inclusive)
        #[arg(long, default_value_t = faq_core::matcher::DEFAULT_THRESHOLD)]
        threshold: f32,
        question: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { document, output } => extract(&document, &output),
        Commands::Inspect { document } => inspect(&document),
        Commands::Ask { document, threshold, question } => ask(&document, threshold, &question),
    }
}

fn extract(document: &Path, output: &Path) -> Result<()> {
    let entries = load_entries(document).with_context(|| format!("extracting {}", document.display()))?;
    let created_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "".into());
    let export = EntryExport::new(document.display().to_string(), created_at, &entries);
    save_entries(output, &export)?;
    tracing::info!(entries = entries.len(), output = %output.display(), "export complete");
    Ok(())
}

fn inspect(document: &Path) -> Result<()> {
    let engine = AnswerEngine::open(document, EngineConfig::default())?;
    for entry in engine.entries() {
        println!("{:>4}  {}", entry.ordinal, entry.question);
    }
    println!(
        "{} entries, {} terms",
        engine.len(),
        engine.matcher().index().vocabulary().len()
    );
    Ok(())
}

fn ask(document: &Path, threshold: f32, question: &str) -> Result<()> {
    let engine = AnswerEngine::open(document, EngineConfig::default().with_threshold(threshold))?;
    let reply = engine.respond(question);
    let matched = match reply.outcome {
        Outcome::Answered { ordinal } => Some(ordinal),
        _ => None,
    };
    let summary = serde_json::json!({
        "answer": reply.text,
        "score": reply.score,
        "matched": matched,
        "escalate": reply.needs_escalation(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
