//! Pest scouting dashboard builder.
//!
//! Reads a scouting CSV and writes the dashboard artifacts: an interactive
//! map page with per-slice marker and heat layers, and a static trend chart.

mod pipeline;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "scoutmap")]
#[command(about = "Builds the pest-pressure dashboard from a scouting CSV")]
struct Args {
    /// Log level (RUST_LOG overrides this)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the dashboard artifacts from a scouting table
    Render {
        /// Input CSV path
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for map.html and chart.svg
        #[arg(short, long, default_value = "out")]
        out_dir: PathBuf,

        /// Optional JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write the empty scouting sheet template
    Template {
        /// Output CSV path
        #[arg(short, long, default_value = "scouting_template.csv")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Commands::Render {
            input,
            out_dir,
            config,
        } => pipeline::render(&input, &out_dir, config.as_deref()),
        Commands::Template { output } => pipeline::write_template(&output),
    }
}
