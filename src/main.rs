// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use symptom_advisor::utils::logging::{format_error, format_step, format_success, format_warning};
use symptom_advisor::{
    AdvisorError, Config, DiagnosisSession, EmbedOutcome, ProgressTracker, Validator,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "symptom_advisor")]
#[command(version = "0.1.0")]
#[command(about = "Retrieval-augmented symptom advice over a local medical corpus", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the symptom form on the configured address
    Serve,

    /// Embed the document directory and report index statistics
    Embed {
        #[arg(long)]
        force: bool,
    },

    /// Embed the corpus, then answer one symptom description
    Ask {
        symptoms: String,

        #[arg(short = 'k', long, value_name = "NUM")]
        top_k: Option<usize>,
    },

    /// Report credential, corpus and index health
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    symptom_advisor::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Symptom Advisor");

    let config = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using defaults and environment",
            cli.config.display()
        );
        Config::load(None).context("Failed to load configuration")?
    };

    match cli.command {
        Commands::Serve => cmd_serve(config).await?,
        Commands::Embed { force } => cmd_embed(config, force, cli.color).await?,
        Commands::Ask { symptoms, top_k } => cmd_ask(config, &symptoms, top_k, cli.color).await?,
        Commands::Check => cmd_check(config).await?,
    }

    Ok(())
}

async fn cmd_serve(config: Config) -> Result<()> {
    let session = Arc::new(DiagnosisSession::new(config).context("Failed to start session")?);

    if !session.has_credential() {
        eprintln!("{}", format_warning(&AdvisorError::MissingCredential.to_string()));
    }

    symptom_advisor::web::serve(session)
        .await
        .context("Web server failed")
}

async fn cmd_embed(config: Config, force: bool, color: bool) -> Result<()> {
    let session = DiagnosisSession::new(config).context("Failed to start session")?;

    println!(
        "{}",
        format_step(
            1,
            1,
            &format!(
                "Embedding documents from {}",
                session.config().corpus.data_dir.display()
            )
        )
    );

    let tracker = ProgressTracker::with_color(0, color);
    let outcome = session.embed_documents(force, Some(&tracker)).await;
    tracker.finish();

    match outcome {
        Ok(EmbedOutcome::Built(stats)) | Ok(EmbedOutcome::AlreadyReady(stats)) => {
            let progress = tracker.get_stats();
            println!("{}", format_success("Medical Vector Store DB is Ready!"));
            println!("  Documents:  {}", stats.documents);
            println!("  Chunks:     {}", stats.chunks);
            println!("  Dimension:  {}", stats.dimension);
            println!(
                "  Batches:    {} (avg {:.1} chunks)",
                progress.batches_sent,
                progress.average_batch_size()
            );
            println!("  Throughput: {:.1} chunks/sec", progress.chunks_per_second());
            println!("  Duration:   {:.2}s", stats.elapsed_secs);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            Err(e).context("Embedding failed")
        }
    }
}

async fn cmd_ask(config: Config, symptoms: &str, top_k: Option<usize>, color: bool) -> Result<()> {
    let mut config = config;
    if let Some(top_k) = top_k {
        config.retrieval.similarity_top_k = top_k;
    }

    let session = DiagnosisSession::new(config).context("Failed to start session")?;
    let symptoms = Validator::validate_query(symptoms, session.config().server.max_query_chars)?;
    info!("Symptoms: {}", Validator::truncate_text(&symptoms, 60));

    println!("{}", format_step(1, 2, "Embedding documents"));
    let tracker = ProgressTracker::with_color(0, color);
    let embedded = session.embed_documents(false, Some(&tracker)).await;
    tracker.finish();
    embedded.context("Error during embedding process")?;

    println!("{}", format_step(2, 2, "Retrieving and generating advice"));
    let answer = session
        .ask(&symptoms)
        .await
        .context("Error during retrieval process")?;

    println!("\nResponse time: {:.3}s\n", answer.elapsed_secs);
    println!("{}", "Medical Advice & Disease Diagnosis:".bold());
    println!("{}\n", answer.response);

    if answer.source_nodes.is_empty() {
        return Ok(());
    }

    println!("{}", "Related Medical Information".bold());
    println!("{}", "=".repeat(80));
    for (idx, source) in answer.source_nodes.iter().enumerate() {
        println!("\n{}. {}", idx + 1, source.format_summary(300));
    }

    Ok(())
}

async fn cmd_check(config: Config) -> Result<()> {
    let session = DiagnosisSession::new(config).context("Failed to start session")?;
    let report = session.health().await;

    print!("{}", report);

    if report.is_unhealthy() {
        anyhow::bail!("Health check failed");
    }

    println!("{}", format_success("Ready to serve"));
    Ok(())
}
