//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "plenum",
    version,
    about = "Simulated multi-party deliberation driven by language-model participants"
)]
pub struct Cli {
    /// Policy text to put before the assembly
    #[arg(long)]
    pub policy: Option<String>,

    /// Participant name (repeat or comma-separate for several)
    #[arg(long = "participant", value_delimiter = ',')]
    pub participants: Vec<String>,

    /// Number of rounds, including the terminal voting round
    #[arg(long)]
    pub rounds: Option<u32>,

    /// Cap on speakers in chairperson-gated discussion rounds
    #[arg(long)]
    pub speaker_cap: Option<usize>,

    /// Run without a chairperson (every participant speaks every round)
    #[arg(long)]
    pub no_chairperson: bool,

    /// Coerce unrecognized votes to No instead of Abstain
    #[arg(long)]
    pub no_abstain: bool,

    /// Seed for reproducible speaker shuffles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the gateway model
    #[arg(long)]
    pub model: Option<String>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip config file discovery and use built-in defaults
    #[arg(long)]
    pub no_config: bool,

    /// Briefing file with a [briefings] table
    #[arg(long)]
    pub briefings: Option<PathBuf>,

    /// Write the markdown run log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Write the JSONL event log to this file
    #[arg(long)]
    pub event_file: Option<PathBuf>,

    /// Print the markdown run log to stdout after the run
    #[arg(long)]
    pub print_log: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase diagnostic verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
