//! CLI command handlers.

mod fetch;
mod get;
mod probe;
mod report;

pub use fetch::run_fetch;
pub use get::run_get;
pub use probe::run_probe;

use anyhow::Result;
use imgbatch_core::config::ImgbatchConfig;
use std::path::PathBuf;

/// Options shared by the batch commands after merging flags over config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchArgs {
    pub dest: PathBuf,
    pub concurrency: usize,
    pub json: bool,
}

impl BatchArgs {
    pub fn resolve(
        cfg: &ImgbatchConfig,
        dest: Option<PathBuf>,
        concurrency: Option<i64>,
        json: bool,
    ) -> Result<Self> {
        let dest = match dest.or_else(|| cfg.destination.clone()) {
            Some(d) => d,
            None => std::env::current_dir()?,
        };
        let concurrency = match concurrency {
            Some(n) => usize::try_from(n.max(1)).unwrap_or(usize::MAX),
            None => cfg.concurrency,
        };
        Ok(Self {
            dest,
            concurrency,
            json,
        })
    }
}
