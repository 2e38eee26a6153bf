//! sphweb CLI - literate programming tangle engine

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sphweb::commands;
use sphweb::config::{read_config, read_config_file};
use sphweb::interface::Context;

#[derive(Parser)]
#[command(name = "sphweb")]
#[command(author, version, about = "Literate programming tangle engine", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every file chunk to its output file
    Tangle {
        /// Directory the documents are read from
        #[arg(long = "in", value_name = "DIR")]
        input: Option<PathBuf>,

        /// Directory tangled files are written to
        #[arg(long = "out", value_name = "DIR")]
        output: Option<PathBuf>,

        /// Dry run - show what would be done without doing it
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Leave out anchor comments
        #[arg(long)]
        naked: bool,

        /// Specific documents to tangle
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Show which chunks every file chunk is built from
    Tree {
        /// Directory the documents are read from
        #[arg(long = "in", value_name = "DIR")]
        input: Option<PathBuf>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let base_dir = cli
        .directory
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let result = match cli.command {
        Commands::Tangle {
            input,
            output,
            dry_run,
            naked,
            files,
        } => build_context(cli.config.as_deref(), &base_dir, input.as_deref()).and_then(|ctx| {
            let mut ctx = match output {
                Some(dir) => ctx.with_output_dir(base_dir.join(dir)),
                None => ctx,
            };
            let files = files.into_iter().map(|f| base_dir.join(f)).collect();
            let options = commands::TangleOptions {
                dry_run,
                naked,
                files,
            };
            commands::tangle(&mut ctx, options)
        }),

        Commands::Tree { input, json } => {
            build_context(cli.config.as_deref(), &base_dir, input.as_deref())
                .and_then(|ctx| commands::tree(&ctx, commands::TreeOptions { json }))
        }

        Commands::Config => build_context(cli.config.as_deref(), &base_dir, None)
            .and_then(|ctx| commands::config(&ctx)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Reads the configuration and sets up the input root.
///
/// Relative paths are taken from the working directory.
fn build_context(
    config_file: Option<&Path>,
    base_dir: &Path,
    input: Option<&Path>,
) -> sphweb::Result<Context> {
    let input_dir = match input {
        Some(dir) => base_dir.join(dir),
        None => base_dir.to_path_buf(),
    };
    let config = match config_file {
        Some(path) => read_config_file(&base_dir.join(path))?,
        None => read_config(&input_dir)?,
    };
    Ok(Context::new(config, input_dir))
}
