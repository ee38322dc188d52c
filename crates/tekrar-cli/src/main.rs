//! tekrar CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "tekrar", version, about = "Recency-decay vocabulary drill planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build today's drill list from the results log
    Plan {
        /// Path to the results log (CSV or JSON)
        #[arg(long)]
        results: Option<PathBuf>,

        /// Path to the vocabulary catalog file or directory
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Path to the alias table JSON
        #[arg(long)]
        aliases: Option<PathBuf>,

        /// Maximum number of items in the session
        #[arg(long)]
        limit: Option<i64>,

        /// Scoring mode: en-tr, tr-en, both
        #[arg(long)]
        mode: Option<String>,

        /// Keep only items carrying all of these tags (repeatable)
        #[arg(long)]
        include_tag: Vec<String>,

        /// Drop items carrying any of these tags (repeatable)
        #[arg(long)]
        exclude_tag: Vec<String>,

        /// Write the full plan report JSON here
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print a scored table instead of the plain drill list
        #[arg(long)]
        dry_run: bool,

        /// Evaluate scores at this instant instead of the current time
        #[arg(long)]
        now: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check the catalog and alias table for problems
    Validate {
        /// Path to the vocabulary catalog file or directory
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Path to the alias table JSON
        #[arg(long)]
        aliases: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tekrar_core=info".parse().unwrap())
                .add_directive("tekrar_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Plan {
            results,
            catalog,
            aliases,
            limit,
            mode,
            include_tag,
            exclude_tag,
            output,
            dry_run,
            now,
            config,
        } => commands::plan::execute(
            results,
            catalog,
            aliases,
            limit,
            mode,
            include_tag,
            exclude_tag,
            output,
            dry_run,
            now,
            config,
        ),
        Commands::Validate {
            catalog,
            aliases,
            config,
        } => commands::validate::execute(catalog, aliases, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
