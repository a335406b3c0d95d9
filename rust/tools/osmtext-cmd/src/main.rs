use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "osmtext-cmd")]
#[command(about = "Build and query sharded address prefix indexes")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a shard set from address entries in JSON lines format
    Index {
        /// Input file with one `{"name", "lat", "lon"}` object per line
        input: String,

        /// Directory receiving the shard files and index metadata
        output_dir: String,

        /// Minimum token length, also the shard key length
        #[arg(long, default_value_t = 3)]
        token_length: usize,

        /// Comma-separated stop words
        #[arg(long)]
        stopwords: Option<String>,

        /// Number of in-memory shards that triggers a flush to disk
        #[arg(long)]
        max_pending_shards: Option<usize>,
    },

    /// Search a shard set and print the matching entries as JSON lines
    Search {
        /// Shard set directory, file:// URL or http(s):// URL
        base: String,

        /// Query words
        #[arg(required = true)]
        query: Vec<String>,

        /// Print at most this many matches
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show how a query is tokenized and which shard it selects
    Explain {
        /// Shard set directory, file:// URL or http(s):// URL
        base: String,

        /// Query words
        #[arg(required = true)]
        query: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    match cli.command {
        Commands::Index {
            input,
            output_dir,
            token_length,
            stopwords,
            max_pending_shards,
        } => commands::index::run(
            input,
            output_dir,
            token_length,
            stopwords,
            max_pending_shards,
        ),
        Commands::Search { base, query, limit } => {
            commands::search::run(base, query.join(" "), limit)
        }
        Commands::Explain { base, query } => commands::explain::run(base, query.join(" ")),
    }
}
