use config::ConfigError;
use fitpair::config::{LoggingSettings, Settings};
use fitpair::models::{Deck, Destination, SessionSummary};
use fitpair::services::{feed, load_deck, read_script, DeckError, RecordingNavigator, ScriptError, SessionDriver};
use serde::Serialize;
use std::process::ExitCode;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Errors surfaced by the replay binary
#[derive(Debug, Error)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),

    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write summary: {0}")]
    Output(#[from] serde_json::Error),
}

/// Summary printed on stdout once the replay finishes
#[derive(Debug, Serialize)]
struct ReplayReport {
    #[serde(flatten)]
    summary: SessionSummary,
    navigations: Vec<Destination>,
}

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    // Logs go to stderr so stdout only carries the report
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

async fn run(settings: Settings) -> Result<(), CliError> {
    let swipe = settings.swipe_config()?;

    let deck = match &settings.deck.path {
        Some(path) => load_deck(path)?,
        None => Deck::mock(),
    };
    info!("Deck loaded with {} candidates", deck.len());

    let steps = match std::env::args().nth(1) {
        Some(path) => read_script(std::fs::File::open(path)?)?,
        None => read_script(std::io::stdin().lock())?,
    };
    info!("Replaying {} scripted inputs", steps.len());

    let driver = SessionDriver::new(deck, swipe, RecordingNavigator::new());
    let (inputs, receiver) = mpsc::channel(64);
    let feeder = tokio::spawn(feed(steps, inputs));

    let session = driver.run(receiver).await;
    feeder.abort();

    let report = ReplayReport {
        summary: session.summary(),
        navigations: session.navigator().visited().to_vec(),
    };
    info!(
        "Replay finished: {} likes, {} rejects, {} matches",
        report.summary.stats.likes, report.summary.stats.rejects, report.summary.stats.matches
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&settings.logging);
    info!("Starting FitPair swipe replay...");

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
