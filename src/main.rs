use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use vend_eng::csv::{read_actions, write_products};
use vend_eng::machine::SeededRandom;
use vend_eng::{Machine, MachineConfig};

/// Replay a csv script of user actions against a simulated vending machine
/// and print the final inventory.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Action script (`action,value` rows)
    script: PathBuf,

    /// Seed for the misread and card approval rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Probability that inserted cash is misread
    #[arg(long, default_value_t = MachineConfig::DEFAULT_MISREAD_PROBABILITY)]
    misread_rate: f64,

    /// Probability that a card payment is approved
    #[arg(long, default_value_t = MachineConfig::DEFAULT_CARD_APPROVAL_PROBABILITY)]
    card_approval_rate: f64,

    /// Simulated card gateway latency in milliseconds
    #[arg(long, default_value_t = 1500)]
    card_delay_ms: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.script.extension().is_none_or(|ext| ext != "csv") {
        warn!(path = %cli.script.display(), "input file seems to not be a csv file");
    }

    let actions = match read_actions(cli.script.clone()) {
        Ok(actions) => actions,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let config = MachineConfig {
        misread_probability: cli.misread_rate,
        card_approval_probability: cli.card_approval_rate,
        card_delay: Duration::from_millis(cli.card_delay_ms),
    };
    let rng = match cli.seed {
        Some(seed) => SeededRandom::from_seed(seed),
        None => SeededRandom::from_entropy(),
    };
    let mut machine = Machine::with_config(config, rng);
    let (action_sender, action_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in actions {
            match result {
                Ok(action) => {
                    if action_sender.send(action).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    machine.run(ReceiverStream::new(action_receiver)).await;
    info!(status = machine.status().name(), "script finished");

    if let Err(e) = write_products(io::stdout().lock(), machine.products()) {
        error!("failed to write inventory: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
