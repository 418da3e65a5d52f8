mod report;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use trackscope_report::ReportFolder;

#[derive(Debug, Parser)]
#[command(name = "trackscope")]
#[command(about = "Account-matching report compiler for collected social-media content")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate the full CSV report for the selected folders and date range
    Generate {
        /// Content folder to include, as platform:id or platform:category:id
        /// (e.g. instagram:12, facebook:reels:7). Repeatable.
        #[arg(long = "folder", required = true)]
        folders: Vec<ReportFolder>,

        /// Start of the date range (inclusive), YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,

        /// End of the date range (inclusive), YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,

        /// Directory the CSV file is written to
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Sample the selected folders and report the projected match rate
    /// without generating a report
    Preview {
        /// Content folder to include, as platform:id or platform:category:id.
        /// Repeatable.
        #[arg(long = "folder", required = true)]
        folders: Vec<ReportFolder>,

        /// Start of the date range (inclusive), YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,

        /// End of the date range (inclusive), YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = trackscope_core::load_app_config()?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    match cli.command {
        Commands::Generate {
            folders,
            start,
            end,
            output_dir,
        } => report::run_generate(&config, &folders, start, end, &output_dir).await,
        Commands::Preview {
            folders,
            start,
            end,
        } => report::run_preview(&config, &folders, start, end).await,
    }
}
