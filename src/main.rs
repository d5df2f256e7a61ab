//! Penguin Classifier Client - Command-Line Entry Point

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use penguin_classify::api::{self, ClassifierContext};
use penguin_classify::constants::{APP_NAME, APP_VERSION};
use penguin_classify::logic::config::{ClientConfig, FlagOverrides};
use penguin_classify::logic::endpoint::OrchestrationOutcome;
use penguin_classify::logic::features::find_preset;
use penguin_classify::logic::session::{SessionObserver, Settlement, SubmissionSession};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Classify penguin species from four measurements",
    long_about = None
)]
struct Cli {
    /// JSON config file (overrides PENGUIN_CLIENT_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Candidate endpoint as "[METHOD ]URL"; repeat to build the try order
    #[arg(long = "endpoint", global = true)]
    endpoints: Vec<String>,

    /// Per-attempt timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Itemize every failed endpoint
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one penguin
    Classify {
        /// Culmen length (mm)
        #[arg(required_unless_present = "preset")]
        culmen_length: Option<String>,
        /// Culmen depth (mm)
        #[arg(required_unless_present = "preset")]
        culmen_depth: Option<String>,
        /// Flipper length (mm)
        #[arg(required_unless_present = "preset")]
        flipper_length: Option<String>,
        /// Body mass (g)
        #[arg(required_unless_present = "preset")]
        body_mass: Option<String>,
        /// Use reference measurements for a species instead
        #[arg(
            long,
            conflicts_with_all = ["culmen_length", "culmen_depth", "flipper_length", "body_mass"]
        )]
        preset: Option<String>,
        /// Print the submission report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List species reference measurements
    Presets,
    /// Show the resolved endpoint try order
    Endpoints,
}

/// Reflects session transitions on the terminal
struct ConsoleObserver;

impl SessionObserver for ConsoleObserver {
    fn on_submitting(&self, submission_id: Uuid) {
        log::info!("Processing submission {}...", submission_id);
    }

    fn on_settled(&self, submission_id: Uuid, outcome: &OrchestrationOutcome) {
        match outcome {
            OrchestrationOutcome::Success(result) => {
                log::info!("Submission {} settled: {}", submission_id, result.species)
            }
            OrchestrationOutcome::Exhausted(failures) => log::info!(
                "Submission {} settled with {} failed attempt(s)",
                submission_id,
                failures.len()
            ),
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let flags = FlagOverrides {
        endpoints: cli.endpoints,
        timeout_secs: cli.timeout,
        debug: cli.debug,
    };
    let config_path = cli.config;
    let load_config = || ClientConfig::load(config_path.as_deref(), &flags);

    match cli.command {
        Commands::Presets => {
            for p in api::list_presets() {
                println!(
                    "{:<10} culmen {} x {} mm, flipper {} mm, mass {} g",
                    p.species, p.culmen_length, p.culmen_depth, p.flipper_length, p.body_mass
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Endpoints => {
            let config = load_config()?;
            for (i, endpoint) in api::list_endpoints(&config).iter().enumerate() {
                println!("{}. {}", i + 1, endpoint);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Classify {
            culmen_length,
            culmen_depth,
            flipper_length,
            body_mass,
            preset,
            json,
        } => {
            let config = load_config()?;
            let debug = config.debug;
            let session = SubmissionSession::with_observer(Arc::new(ConsoleObserver));
            let context = ClassifierContext::from_config(config, session)?;

            let submission = match preset {
                Some(name) => {
                    let Some(preset) = find_preset(&name) else {
                        bail!("unknown species preset: {}", name);
                    };
                    context.submit_preset(preset).await
                }
                None => {
                    let raw = [culmen_length, culmen_depth, flipper_length, body_mass]
                        .map(Option::unwrap_or_default);
                    context.submit(raw.each_ref().map(String::as_str)).await
                }
            };

            let report = match submission {
                Ok(report) => report,
                Err(api::SubmitError::Encoding(e)) => {
                    eprintln!("Invalid input: {}", e);
                    return Ok(ExitCode::from(2));
                }
                Err(e) => return Err(e).context("submission failed"),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", api::report::render(&report, debug));
            }

            Ok(match report.settlement {
                Settlement::Success => ExitCode::SUCCESS,
                Settlement::Error => ExitCode::FAILURE,
            })
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
