use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// 输出格式
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Structured JSON output
    Json,
}

/// Games and reviews on SQLite
///
/// Each game owns any number of reviews; deleting a game deletes its
/// reviews, detaching a review from its game deletes the review.
#[derive(Parser, Debug)]
#[command(name = "game-reviews")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(after_help = "GETTING STARTED:
  1. Create the schema:        game-reviews migrate up
  2. Fill it with sample data: game-reviews seed
  3. Poke around:              game-reviews console")]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(short, long, global = true, value_name = "FILE", env = "GAME_REVIEWS_DB")]
    pub database: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace, off); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Output format (text or json)
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate, apply and roll back schema migrations
    #[command(subcommand)]
    Migrate(MigrateCommand),

    /// Replace all games and reviews with generated sample data
    ///
    /// Pending migrations are applied first.
    Seed {
        /// Number of games to create
        #[arg(long, default_value_t = 50)]
        games: u32,

        /// Number of reviews attached to each game
        #[arg(long, default_value_t = 3)]
        reviews_per_game: u32,

        /// Fixed RNG seed for reproducible data
        #[arg(long, value_name = "SEED")]
        rng_seed: Option<u64>,
    },

    /// List every game together with its reviews
    List,

    /// Interactive console for inspecting and editing records
    Console,

    /// Hot backup of the database with VACUUM INTO
    Backup {
        /// Target directory (defaults to backups/ next to the database)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

/// Migration subcommands
#[derive(Subcommand, Debug)]
pub enum MigrateCommand {
    /// Apply pending migrations
    Up {
        /// Number of pending migrations to apply (all when omitted)
        #[arg(short = 'n', long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations (the database file is backed up first)
    Down {
        /// Number of migrations to roll back
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: u32,
    },
    /// Show which migrations are applied
    Status,
    /// Drop every table and re-apply all migrations (the database file is backed up first)
    Fresh,
}
