//! quizwiz CLI: author, take, and review quizzes from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use quizwiz_core::identity::Role;

mod commands;

#[derive(Parser)]
#[command(name = "quizwiz", version, about = "Quiz authoring, taking, and grading")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store file (overrides config)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Act as this user id
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Display name for --user
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Role: student or instructor
    #[arg(long, global = true)]
    pub role: Option<Role>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and example quiz
    Init,

    /// Validate quiz definition files
    Validate {
        /// Path to quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Publish a quiz definition
    Create {
        /// Path to quiz file
        #[arg(long)]
        quiz: PathBuf,
    },

    /// List published quizzes
    List {
        /// Only quizzes created by the current user
        #[arg(long)]
        mine: bool,
    },

    /// Show a quiz
    Show {
        /// Quiz id
        #[arg(long)]
        id: String,
    },

    /// Take a quiz, reading one answer per line from stdin
    Take {
        /// Quiz id
        #[arg(long)]
        id: String,
    },

    /// Show a graded attempt
    Results {
        /// Quiz id
        #[arg(long)]
        id: String,

        /// Whose result (defaults to the current user)
        #[arg(long = "of", id = "target_user", value_name = "USER")]
        of: Option<String>,

        /// Output format: text, json, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List every stored attempt for a quiz
    Attempts {
        /// Quiz id
        #[arg(long)]
        id: String,
    },

    /// Delete a quiz and its results
    Delete {
        /// Quiz id
        #[arg(long)]
        id: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .parse_lossy(
                    std::env::var(EnvFilter::DEFAULT_ENV)
                        .unwrap_or_else(|_| "quizwiz=info".to_string()),
                ),
        )
        .init();

    let cli = Cli::parse();
    let global = cli.global;

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Create { quiz } => commands::create::execute(&global, quiz),
        Commands::List { mine } => commands::list::execute(&global, mine),
        Commands::Show { id } => commands::show::execute(&global, &id),
        Commands::Take { id } => commands::take::execute(&global, &id),
        Commands::Results {
            id,
            of,
            format,
            output,
        } => commands::results::execute(&global, &id, of, &format, output),
        Commands::Attempts { id } => commands::attempts::execute(&global, &id),
        Commands::Delete { id } => commands::delete::execute(&global, &id),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
