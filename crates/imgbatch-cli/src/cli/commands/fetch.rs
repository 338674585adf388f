//! `imgbatch fetch <jobs.json>` – download a batch from a job file.

use anyhow::Result;
use imgbatch_core::config::ImgbatchConfig;
use imgbatch_core::job::load_jobs;
use imgbatch_core::Downloader;
use std::path::Path;

use super::report::print_outcomes;
use super::BatchArgs;

pub async fn run_fetch(cfg: &ImgbatchConfig, args: &BatchArgs, jobs_path: &Path) -> Result<usize> {
    let jobs = load_jobs(jobs_path)?;
    if jobs.is_empty() {
        println!("No jobs in {}.", jobs_path.display());
        return Ok(0);
    }

    let mut cfg = cfg.clone();
    cfg.concurrency = args.concurrency;
    let downloader = Downloader::from_config(&cfg, &args.dest);
    let outcomes = downloader.download_all(&jobs).await;
    print_outcomes(&outcomes, args.json)
}
