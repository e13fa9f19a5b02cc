//! Talent Match - staff projects from complementary freelancers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use talent_match::ai::{AiClient, AiError, LlmSkillParser};
use talent_match::config::{AppConfig, ConfigError, ConfigLoader};
use talent_match::display;
use talent_match::matching::format_profile;
use talent_match::pipeline::Matcher;
use talent_match::profile::{ProfileStore, StoreError};
use talent_match::review::{NotaryDispatch, ReviewError, ReviewLedger, TransactionStore};

#[derive(Parser)]
#[command(
    name = "talent-match",
    about = "Staff projects from complementary freelancers",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: ./.talent-match.toml, then the user config dir).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Company making the request; overrides `company` from the config.
    #[arg(long, global = true)]
    company: Option<String>,

    /// Profile store document; overrides `store.profiles`.
    #[arg(long, global = true)]
    profiles: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find freelancer combinations covering a project's skills.
    Match {
        /// Project description, parsed into skills by the configured model.
        #[arg(required_unless_present = "skills")]
        description: Option<String>,
        /// Required skill; repeat to skip the model and match these directly.
        #[arg(short, long = "skill", conflicts_with = "description")]
        skills: Vec<String>,
        /// Stop after this many combinations.
        #[arg(long)]
        max_combinations: Option<usize>,
    },
    /// Review the freelancers of a completed transaction.
    Review {
        /// Transaction identifier.
        transaction: String,
        /// One review per freelancer, in transaction order.
        #[arg(short, long = "review")]
        reviews: Vec<String>,
        /// Only list the freelancers to review.
        #[arg(long)]
        list: bool,
        /// Transaction document; overrides `store.transactions`.
        #[arg(long)]
        transactions: Option<PathBuf>,
    },
    /// Show a single profile.
    Show {
        /// Profile identifier.
        profile: String,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig, CliError> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_path(path.clone()),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;
    if let Some(company) = &cli.company {
        config.company.clone_from(company);
    }
    if let Some(profiles) = &cli.profiles {
        config.store.profiles.clone_from(profiles);
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Match {
            description,
            skills,
            max_combinations,
        } => {
            if max_combinations.is_some() {
                config.search.max_combinations = max_combinations;
                config.validate()?;
            }
            let store = ProfileStore::load(&config.store.profiles)?;
            let matcher =
                Matcher::new(&store, &config.company).with_limit(config.search.max_combinations);

            let result = if skills.is_empty() {
                let description = description.unwrap_or_default();
                tracing::info!(model = %config.ai.model, "Parsing skills from description");
                let parser = LlmSkillParser::new(AiClient::from_config(&config.ai)?);
                matcher.match_description(&parser, &description).await?
            } else {
                matcher.match_skills(&skills)
            };

            display::print_skills(&result.skills_text, result.required.names());
            if result.outcome.truncated {
                display::print_warning("Combination limit reached; results are incomplete");
            }
            display::print_report(
                &result.report,
                result.outcome.combinations.len(),
                result.outcome.truncated,
            );
        }
        Commands::Review {
            transaction,
            reviews,
            list,
            transactions,
        } => {
            let transactions_path = transactions.unwrap_or_else(|| config.store.transactions.clone());
            let transactions = TransactionStore::load(&transactions_path)?;
            let transaction = transactions.get(&transaction)?;

            if list {
                let store = ProfileStore::load(&config.store.profiles)?;
                for (i, id) in transaction.freelancers.iter().enumerate() {
                    let name = store.get(id).map_or("<unknown>", |p| p.name.as_str());
                    display::print_review_prompt(i, name, id);
                }
                return Ok(());
            }

            let ledger = ReviewLedger::new(
                config.store.profiles.clone(),
                NotaryDispatch::from_config(&config.notary),
            );
            let confirmation = ledger.submit_reviews(transaction, &config.company, &reviews)?;
            let pending = ledger.notary().flush().await;
            tracing::debug!(
                entries = confirmation.entries_filed,
                notarizations = pending,
                "Review submission complete"
            );
            display::print_confirmation(&confirmation.to_string());
        }
        Commands::Show { profile } => {
            let store = ProfileStore::load(&config.store.profiles)?;
            let found = store
                .get(&profile)
                .ok_or_else(|| CliError::ProfileNotFound(profile.clone()))?;
            print!("{}", format_profile(&profile, found, &config.company));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            display::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
