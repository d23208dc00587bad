use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bounded_pipeline")]
#[command(about = "Bounded producer/consumer pipeline with cancellation and insert timeouts")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the sentence producer/consumer pipeline
    Run(RunArgs),

    /// List available configuration presets
    Presets,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Configuration preset (default, testing, stress)
    #[arg(short = 'p', long)]
    pub preset: Option<String>,

    /// JSON configuration file (overrides the preset)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pipeline capacity
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Number of sentences to produce
    #[arg(short = 'n', long)]
    pub items: Option<usize>,

    /// Insert timeout in milliseconds
    #[arg(long, conflicts_with = "no_timeout")]
    pub timeout_ms: Option<u64>,

    /// Wait for free capacity without a timeout
    #[arg(long)]
    pub no_timeout: bool,

    /// Cancel the producer after this many milliseconds
    #[arg(long, conflicts_with = "no_cancel")]
    pub cancel_after_ms: Option<u64>,

    /// Never cancel the producer on a timer
    #[arg(long)]
    pub no_cancel: bool,

    /// Number of consumer workers
    #[arg(long)]
    pub consumers: Option<usize>,

    /// Pick sentences in a fixed order instead of at random
    #[arg(long)]
    pub deterministic: bool,

    /// Print the summary as JSON (including consumed items)
    #[arg(long)]
    pub json: bool,
}
