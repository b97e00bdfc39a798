use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use pricewatch::Result;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pricewatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "App Store price watcher", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch current prices, detect changes, and archive today's snapshot
    Run {
        /// Path to the watch list config file
        #[arg(long, default_value = "config/apps.yaml")]
        config: PathBuf,

        /// Path to the snapshot data file
        #[arg(long, default_value = "data/history.json")]
        data: PathBuf,

        /// Path to the timeline data file
        #[arg(long, default_value = "data/timeline.json")]
        timeline: PathBuf,
    },

    /// Show the most recent days recorded in the timeline
    History {
        /// Path to the timeline data file
        #[arg(long, default_value = "data/timeline.json")]
        timeline: PathBuf,

        /// How many days to show
        #[arg(short, long, default_value_t = 7)]
        days: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            config,
            data,
            timeline,
        } => pricewatch::cli::run::run(&config, &data, &timeline)?,

        Commands::History { timeline, days } => pricewatch::cli::history::run(&timeline, days)?,
    }

    Ok(())
}
