mod commands;
mod generator;
mod report;
mod solution;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kattis_core::{KattisFetcher, ProblemId};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kattis")]
#[command(about = "Kattis CLI - Scaffold problems, download samples and test solutions locally", long_about = None)]
struct Cli {
    /// Workspace root holding kattis.json and the problems directory
    #[arg(short, long, global = true, default_value = ".")]
    workspace: PathBuf,

    /// Config file (defaults to <workspace>/kattis.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default kattis.json and create the problems directory
    Init,

    /// Create problem directories from a template, and download the samples
    Create {
        /// Kattis problem IDs
        #[arg(required = true)]
        problem_ids: Vec<ProblemId>,

        /// Overwrite an existing solution file with the template
        #[arg(long, default_value = "false")]
        overwrite: bool,
    },

    /// Download the problem's samples again, replacing the stored ones
    DownloadSamples {
        /// Kattis problem ID
        problem_id: ProblemId,

        /// Write the samples to this file ("-" for stdout) instead of the workspace
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Run the solution once on stdin (or a file) and print its output
    Run {
        /// Kattis problem ID
        problem_id: ProblemId,

        /// Read input from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Run the solution on all of its sample inputs and check the answers
    Test {
        /// Kattis problem ID
        problem_id: ProblemId,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let json = std::env::var("KATTIS_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let workspace = commands::Workspace::open(cli.workspace, cli.config.as_deref())?;
    let fetcher: commands::SharedSource = Arc::new(KattisFetcher::new(&workspace.config.judge));

    let success = match cli.command {
        Commands::Init => commands::init_workspace(&workspace)?,
        Commands::Create {
            problem_ids,
            overwrite,
        } => commands::create_problems(&workspace, fetcher, &problem_ids, overwrite).await?,
        Commands::DownloadSamples { problem_id, out } => {
            commands::download_problem_samples(&workspace, fetcher, problem_id, out.as_deref())
                .await?
        }
        Commands::Run { problem_id, input } => {
            commands::run_solution(&workspace, &problem_id, input.as_deref())?
        }
        Commands::Test { problem_id } => commands::test_solution(&workspace, &problem_id)?,
    };

    if !success {
        std::process::exit(1);
    }

    Ok(())
}
