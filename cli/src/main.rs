//! CLI entrypoint for gatewarden
//!
//! Wires the layers together with dependency injection: config is loaded
//! here, the provider and gateway are constructed here, and the use case is
//! handed its collaborators.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use warden_application::EvaluateQuestionnaireUseCase;
use warden_domain::{Answer, Language, QuestionnaireDefinition};
use warden_infrastructure::{
    ConfigLoader, FileConfig, JsonlAuditLog, QuestionnaireStore, RemoteEssayScorer, provider_for,
};

#[derive(Parser)]
#[command(
    name = "gatewarden",
    version,
    about = "Registration gatekeeper with LLM-assisted questionnaire scoring"
)]
struct Cli {
    /// Path to an explicit config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a submission of questionnaire answers
    Evaluate {
        /// JSON file mapping question ids to answers
        #[arg(long)]
        answers: PathBuf,

        /// Append the evaluation to this JSONL audit file
        #[arg(long)]
        audit: Option<PathBuf>,
    },

    /// Print the applicant-facing questionnaire
    Show {
        /// Language to render (zh or en)
        #[arg(long, default_value = "en")]
        language: String,
    },

    /// Print the configuration files considered, in priority order
    ConfigSources,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Command::ConfigSources => {
            ConfigLoader::print_config_sources();
            Ok(())
        }
        Command::Show { language } => run_show(cli.config.as_ref(), &language),
        Command::Evaluate { answers, audit } => {
            run_evaluate(cli.config.as_ref(), &answers, audit.as_deref()).await
        }
    }
}

fn load_config(config_path: Option<&PathBuf>) -> Result<FileConfig> {
    ConfigLoader::load(config_path).map_err(|e| anyhow!("failed to load configuration: {e}"))
}

fn load_definition(config: &FileConfig) -> Result<QuestionnaireDefinition> {
    let store = QuestionnaireStore::new(&config.questionnaire.file);
    let mut definition = store.load().context("failed to load questionnaire")?;
    config.questionnaire.apply_to(&mut definition);
    Ok(definition)
}

fn run_show(config_path: Option<&PathBuf>, language: &str) -> Result<()> {
    let language: Language = language.parse()?;
    let config = load_config(config_path)?;
    let definition = load_definition(&config)?;

    println!("{}", serde_json::to_string_pretty(&definition.view(language))?);
    Ok(())
}

async fn run_evaluate(
    config_path: Option<&PathBuf>,
    answers_path: &Path,
    audit_path: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let definition = load_definition(&config)?;

    let raw = std::fs::read_to_string(answers_path)
        .with_context(|| format!("failed to read answers file {}", answers_path.display()))?;
    let answers: HashMap<u32, Answer> =
        serde_json::from_str(&raw).context("failed to parse answers file")?;

    // === Dependency Injection ===
    let scoring = config.scoring.to_runtime();
    let provider = provider_for(&scoring.provider);
    let scorer = Arc::new(RemoteEssayScorer::new(scoring, provider));
    let use_case = EvaluateQuestionnaireUseCase::new(scorer);

    let result = use_case.execute(&definition, &answers).await;

    info!(
        passed = result.passed,
        manual_review_required = result.manual_review_required,
        auto_approve = result.auto_approvable(definition.auto_approve_on_pass),
        "submission evaluated"
    );

    if let Some(path) = audit_path
        && let Some(log) = JsonlAuditLog::open(path)
    {
        log.record(&result);
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
