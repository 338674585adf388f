//! CLI for the imgbatch downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use imgbatch_core::config;
use std::path::PathBuf;

use commands::{run_fetch, run_get, run_probe, BatchArgs};

/// Top-level CLI for imgbatch.
#[derive(Debug, Parser)]
#[command(name = "imgbatch")]
#[command(about = "imgbatch: download image batches concurrently and report their dimensions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every job in a JSON job file.
    Fetch {
        /// JSON array of {"url", "subdirectory", "file_name"} objects.
        jobs: PathBuf,
        /// Destination root (default: config `destination`, else the current directory).
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
        /// Maximum jobs in flight; values below 1 mean 1 (default: config `concurrency`).
        #[arg(short = 'j', long, value_name = "N", allow_negative_numbers = true)]
        concurrency: Option<i64>,
        /// Print outcomes as a JSON array instead of one line per job.
        #[arg(long)]
        json: bool,
    },

    /// Download a single image.
    Get {
        /// Direct HTTP/HTTPS image URL.
        url: String,
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
        /// Subdirectory under the destination root.
        #[arg(long, default_value = "")]
        subdir: String,
        /// File name (default: last URL path segment).
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Print the dimensions of a local image file.
    Probe {
        /// Path to the image.
        path: PathBuf,
    },
}

impl CliCommand {
    /// Runs the parsed command. Returns the number of failed jobs.
    pub async fn run_from_args() -> Result<usize> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                jobs,
                dest,
                concurrency,
                json,
            } => {
                let args = BatchArgs::resolve(&cfg, dest, concurrency, json)?;
                run_fetch(&cfg, &args, &jobs).await
            }
            CliCommand::Get {
                url,
                dest,
                subdir,
                name,
                json,
            } => {
                let args = BatchArgs::resolve(&cfg, dest, None, json)?;
                run_get(&cfg, &args, url, subdir, name).await
            }
            CliCommand::Probe { path } => run_probe(&path),
        }
    }
}

#[cfg(test)]
mod tests;
