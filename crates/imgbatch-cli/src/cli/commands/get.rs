//! `imgbatch get <url>` – download one image.

use anyhow::Result;
use imgbatch_core::config::ImgbatchConfig;
use imgbatch_core::{Downloader, JobDescriptor};

use super::report::print_outcomes;
use super::BatchArgs;

pub async fn run_get(
    cfg: &ImgbatchConfig,
    args: &BatchArgs,
    url: String,
    subdir: String,
    name: Option<String>,
) -> Result<usize> {
    let job = JobDescriptor::new(url, subdir, name.unwrap_or_default()).with_derived_name();
    let downloader = Downloader::from_config(cfg, &args.dest);
    let outcomes = downloader.download_all(std::slice::from_ref(&job)).await;
    print_outcomes(&outcomes, args.json)
}
