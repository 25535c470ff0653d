mod input;
mod sink;
mod term;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;

use snake_engine::{GameConfig, GameHandle, GameSession, IntervalScheduler, logger};

#[derive(Parser)]
#[command(name = "snake_terminal")]
struct Args {
    /// YAML config file; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the tick interval from the config
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Pin the RNG seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Append engine logs to this file (stdout is owned by the game screen)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        logger::init_file_logger(Some("Terminal".to_string()), path)?;
    }

    let mut config = match args.config {
        Some(ref path) => GameConfig::from_yaml_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(tick_ms) = args.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()?;

    let (handle, command_rx) = GameHandle::channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let session = tokio::spawn(GameSession::run(
        config,
        command_rx,
        sink::ChannelSink::new(event_tx),
        IntervalScheduler::new(),
    ));

    let result = ui::run(handle, event_rx).await;

    // the UI dropped its handle, so the session unwinds on its own
    session.await?;
    result
}
