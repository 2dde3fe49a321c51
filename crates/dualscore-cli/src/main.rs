//! dualscore CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "dualscore",
    version,
    about = "Compare blind and equity-aware admissions scoring"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score, rank, and compare an applicant batch
    Run {
        /// Applicant CSV file
        #[arg(long, default_value = "applicants.csv")]
        input: PathBuf,

        /// Admission cutoff; malformed values fall back to the configured cutoff
        #[arg(long)]
        cutoff: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for saved reports
        #[arg(long, default_value = "./dualscore-results")]
        output: PathBuf,

        /// Report formats to save: json, html, markdown, all, none
        #[arg(long, default_value = "none")]
        format: String,
    },

    /// Check an applicant CSV and the score config for problems
    Validate {
        /// Applicant CSV file
        #[arg(long, default_value = "applicants.csv")]
        input: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and sample applicant file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dualscore=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input,
            cutoff,
            config,
            output,
            format,
        } => commands::run::execute(input, cutoff, config, output, format),
        Commands::Validate { input, config } => commands::validate::execute(input, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
