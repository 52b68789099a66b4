use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use covsum::cli::{self, Style};
use covsum::summary::ComplexityPolicy;

/// covsum — Aggregate code coverage totals across jobs.
#[derive(Parser)]
#[command(name = "covsum", version, about)]
struct Cli {
    /// Log level for diagnostics on stderr (off when omitted).
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the combined totals for every job in a JSON job document.
    Summary {
        /// Path to the job document.
        file: PathBuf,

        /// Output style.
        #[arg(long, value_enum, default_value = "text")]
        style: Style,

        /// How complexity scores are combined (sum, mean).
        #[arg(long, default_value = "sum")]
        complexity: ComplexityPolicy,
    },

    /// List per-job coverage.
    Jobs {
        /// Path to the job document.
        file: PathBuf,

        /// Sort by line coverage ascending (show worst jobs first).
        #[arg(long)]
        sort_by_coverage: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn init_logging(level: Option<LogLevel>) {
    if let Some(level) = level {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::from(level))
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.log_level);

    let out = match args.command {
        Commands::Summary {
            file,
            style,
            complexity,
        } => cli::cmd_summary(&file, style, complexity)?,
        Commands::Jobs {
            file,
            sort_by_coverage,
        } => cli::cmd_jobs(&file, sort_by_coverage)?,
    };
    print!("{out}");
    Ok(())
}
