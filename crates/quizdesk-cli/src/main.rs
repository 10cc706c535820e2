//! quizdesk CLI — timed multiple-choice tests with a score history.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use quizdesk_core::model::QuestionCount;

mod commands;

#[derive(Parser)]
#[command(
    name = "quizdesk",
    version,
    about = "Timed multiple-choice tests with score history"
)]
struct Cli {
    /// Config file path (default: ./quizdesk.toml, then ~/.config/quizdesk/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a timed test
    Take {
        /// Your name (prompted for if omitted)
        #[arg(long)]
        user: Option<String>,

        /// Number of questions: 5, 10, 20, 30, ... 100
        #[arg(long, default_value = "5")]
        count: QuestionCount,
    },

    /// Show recent scores (admin)
    History {
        /// Admin password
        #[arg(long)]
        password: String,

        /// Only show users whose name contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Maximum number of records to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Export the full score history as CSV (admin)
    Export {
        /// Admin password
        #[arg(long)]
        password: String,

        /// Output file (default: full_score_history.csv in the export directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Delete all score history (admin)
    Clear {
        /// Admin password
        #[arg(long)]
        password: String,

        /// Confirm the irreversible wipe
        #[arg(long)]
        yes: bool,
    },

    /// Check a question pool file
    Validate {
        /// Question pool JSON (default: from config)
        #[arg(long)]
        questions: Option<PathBuf>,
    },

    /// Create a starter config and sample question pool
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizdesk=warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Take { user, count } => commands::take::execute(user, count, config),
        Commands::History {
            password,
            filter,
            limit,
        } => commands::history::execute(password, filter, limit, config),
        Commands::Export { password, output } => {
            commands::export::execute(password, output, config)
        }
        Commands::Clear { password, yes } => commands::clear::execute(password, yes, config),
        Commands::Validate { questions } => commands::validate::execute(questions, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
