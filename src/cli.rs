use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "camp competition scoring and ranking")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Convert exported backend results into their canonical flat form
    Normalize {
        /// JSON file with one result or a list of results
        #[arg(short, long)]
        results: PathBuf,
    },
    /// Compute and rank every club's total for one event
    Score {
        /// JSON file with the event definition
        #[arg(short, long)]
        event: PathBuf,
        /// JSON file with the event's results
        #[arg(short, long)]
        results: PathBuf,
        /// JSON file with the camp's clubs (defaults to the clubs named by the results)
        #[arg(short, long)]
        clubs: Option<PathBuf>,
        /// Print the bulk submission payload instead of the ranking
        #[arg(long)]
        json: bool,
    },
    /// Rank the clubs of a camp across all of its events
    Leaderboard {
        /// Camp id
        #[arg(long)]
        camp: u64,
        /// JSON file with the camp's event definitions
        #[arg(short, long)]
        events: PathBuf,
        /// JSON file with the camp's results
        #[arg(short, long)]
        results: PathBuf,
        /// JSON file with the camp's clubs
        #[arg(short, long)]
        clubs: Option<PathBuf>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the item-by-item breakdown of one result
    Detail {
        /// JSON file with the event definition
        #[arg(short, long)]
        event: PathBuf,
        /// JSON file with the result
        #[arg(short, long)]
        result: PathBuf,
    },
}
