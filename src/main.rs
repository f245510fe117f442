use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use connect_four_rules::config::GameConfig;
use connect_four_rules::game::GameState;

/// Replay a sequence of Connect Four moves and report the result.
#[derive(Parser)]
#[command(name = "connect-four", about = "Replay Connect Four moves")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    /// Override grid width
    #[arg(long)]
    width: Option<usize>,

    /// Override grid height
    #[arg(long)]
    height: Option<usize>,

    /// Override number of tokens in a row needed to win
    #[arg(long)]
    win_length: Option<usize>,

    /// Print the final grid and outcome as JSON
    #[arg(long)]
    json: bool,

    /// Columns to play, alternating players
    columns: Vec<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(win_length) = cli.win_length {
        config.win_length = win_length;
    }
    config.validate().context("invalid configuration")?;

    let state = GameState::new(&config)
        .replay(&cli.columns)
        .context("replaying moves")?;

    if cli.json {
        let report = serde_json::json!({
            "grid": state.grid(),
            "outcome": state.outcome(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", state.grid());
        println!();
        println!("{}", state.summary());
    }

    Ok(())
}
