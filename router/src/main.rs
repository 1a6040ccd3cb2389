//! Ticket Router CLI
//!
//! - `analyze <TICKET_ID>`: route one ticket from the test dataset
//! - `evaluate`: accuracy and consistency evaluation over the whole dataset
//!
//! Results go to stdout as JSON; logs go to stderr.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticket_router::adapters::{load_ground_truth, load_test_cases, GroqClassifier};
use ticket_router::app::{
    analyze_keywords, label_cases, DecisionEngine, RoutingPipeline, SystemEvaluator,
};
use ticket_router::config::Config;
use ticket_router::domain::entities::{PriorityRecord, TicketId, TriageRecord};

#[derive(Parser)]
#[command(name = "ticket-router", version, about = "Support ticket routing and evaluation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Route a single ticket from the test dataset
    Analyze {
        ticket_id: String,
        /// Also print intermediate records, the rule trace and keyword diagnostics
        #[arg(long)]
        explain: bool,
    },
    /// Evaluate accuracy and consistency over the test dataset
    Evaluate {
        /// Pipeline runs per ticket for consistency
        #[arg(long)]
        runs: Option<usize>,
        /// Triage-only runs per ticket
        #[arg(long)]
        triage_runs: Option<usize>,
    },
}

type GroqPipeline = RoutingPipeline<GroqClassifier<TriageRecord>, GroqClassifier<PriorityRecord>>;

fn build_pipeline(config: &Config) -> Result<GroqPipeline> {
    if !config.classifier_configured() {
        tracing::warn!("GROQ_API_KEY is not set; every ticket will take the fallback route");
    }

    let triage = GroqClassifier::triage(&config.classifier)
        .context("Failed to build triage classifier")?;
    let prioritization = GroqClassifier::prioritization(&config.classifier)
        .context("Failed to build prioritization classifier")?;

    Ok(RoutingPipeline::new(Arc::new(triage), Arc::new(prioritization)))
}

async fn analyze(config: &Config, ticket_id: &str, explain: bool) -> Result<()> {
    let tickets = load_test_cases(&config.test_cases_path)
        .await
        .context("Failed to load test cases")?;
    let id = TicketId::from(ticket_id);
    let ticket = tickets
        .into_iter()
        .find(|ticket| ticket.ticket_id == id)
        .with_context(|| format!("Ticket {} not found in test cases", ticket_id))?;

    let pipeline = build_pipeline(config)?;
    let outcome = pipeline.run_detailed(&ticket).await;

    if !explain {
        println!("{}", serde_json::to_string_pretty(&outcome.decision)?);
        return Ok(());
    }

    let trace = match (&outcome.triage, &outcome.priority) {
        (Some(triage), Some(priority)) => Some(DecisionEngine::new().trace(triage, priority)),
        _ => None,
    };
    let report = json!({
        "decision": outcome.decision,
        "triage": outcome.triage,
        "priority": outcome.priority,
        "fault": outcome.fault,
        "trace": trace,
        "keywords": analyze_keywords(&ticket.subject, &ticket.message),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

async fn evaluate(config: &Config, runs: Option<usize>, triage_runs: Option<usize>) -> Result<()> {
    let tickets = load_test_cases(&config.test_cases_path)
        .await
        .context("Failed to load test cases")?;
    let ground_truth = load_ground_truth(&config.ground_truth_path)
        .await
        .context("Failed to load ground truth")?;
    let cases = label_cases(tickets, &ground_truth)?;

    let pipeline = Arc::new(build_pipeline(config)?);
    let triage = pipeline.triage_classifier();
    let evaluator = SystemEvaluator::new(
        pipeline,
        triage,
        runs.unwrap_or(config.consistency_runs),
        triage_runs.unwrap_or(config.triage_runs),
    )
    .with_max_in_flight(config.max_in_flight);

    let evaluation = evaluator.evaluate(&cases).await?;
    println!("{}", serde_json::to_string_pretty(&evaluation)?);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs to stderr; stdout carries the JSON results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ticket_router=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Command::Analyze { ticket_id, explain } => analyze(&config, &ticket_id, explain).await,
        Command::Evaluate { runs, triage_runs } => evaluate(&config, runs, triage_runs).await,
    }
}
