//! Batch downloader.
//!
//! Runs every job through fetch → persist → probe with at most `concurrency`
//! jobs in flight, and returns one outcome per job at the job's own index.
//! Job failures are recorded in their outcome; they never stop sibling jobs.

mod pipeline;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::ImgbatchConfig;
use crate::error::JobError;
use crate::fetch::{CurlFetcher, Fetch};
use crate::job::{DownloadOutcome, JobDescriptor};

use pipeline::JobContext;

/// A pool of zero would never admit a job.
fn effective_concurrency(requested: usize) -> usize {
    requested.clamp(1, Semaphore::MAX_PERMITS)
}

pub struct Downloader {
    ctx: Arc<JobContext>,
    concurrency: usize,
}

impl Downloader {
    /// Downloader with the default curl transport. `concurrency` 0 is treated as 1.
    pub fn new(destination_root: impl Into<PathBuf>, concurrency: usize) -> Self {
        Self::with_fetcher(
            destination_root,
            concurrency,
            Arc::new(CurlFetcher::default()),
        )
    }

    pub fn with_fetcher(
        destination_root: impl Into<PathBuf>,
        concurrency: usize,
        fetcher: Arc<dyn Fetch>,
    ) -> Self {
        let defaults = ImgbatchConfig::default();
        Self {
            ctx: Arc::new(JobContext {
                root: destination_root.into(),
                fetcher,
                dir_mode: defaults.dir_mode,
                file_mode: defaults.file_mode,
            }),
            concurrency: effective_concurrency(concurrency),
        }
    }

    /// Transport, concurrency and permission modes from `cfg`.
    pub fn from_config(cfg: &ImgbatchConfig, destination_root: impl Into<PathBuf>) -> Self {
        Self {
            ctx: Arc::new(JobContext {
                root: destination_root.into(),
                fetcher: Arc::new(CurlFetcher::new(cfg.http.clone())),
                dir_mode: cfg.dir_mode,
                file_mode: cfg.file_mode,
            }),
            concurrency: effective_concurrency(cfg.concurrency),
        }
    }

    pub fn destination_root(&self) -> &Path {
        &self.ctx.root
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Download every job and return outcomes index-aligned with `jobs`.
    ///
    /// One task per job; each waits on the gate, runs its blocking pipeline on
    /// tokio's blocking pool while holding the permit, and reports back with its
    /// index. Returns only after every job has an outcome.
    pub async fn download_all(&self, jobs: &[JobDescriptor]) -> Vec<DownloadOutcome> {
        let gate = Arc::new(Semaphore::new(self.concurrency));
        let mut slots: Vec<Option<DownloadOutcome>> =
            std::iter::repeat_with(|| None).take(jobs.len()).collect();
        let mut join_set = JoinSet::new();

        tracing::info!(
            jobs = jobs.len(),
            concurrency = self.concurrency,
            root = %self.ctx.root.display(),
            "starting batch"
        );

        for (index, job) in jobs.iter().enumerate() {
            let gate = Arc::clone(&gate);
            let ctx = Arc::clone(&self.ctx);
            let job = job.clone();
            join_set.spawn(async move {
                let url = job.source_url.clone();
                let permit = match gate.acquire_owned().await {
                    Ok(p) => p,
                    Err(e) => {
                        let err = JobError::Internal(format!("admission gate closed: {}", e));
                        return (index, DownloadOutcome::failure(url, None, 0, err));
                    }
                };
                let outcome = tokio::task::spawn_blocking(move || {
                    // Released on every exit path, including unwinding.
                    let _permit = permit;
                    pipeline::run_job(&ctx, index, &job)
                })
                .await
                .unwrap_or_else(|e| {
                    let err = JobError::Internal(format!("worker task failed: {}", e));
                    DownloadOutcome::failure(url, None, 0, err)
                });
                (index, outcome)
            });
        }

        while let Some(res) = join_set.join_next().await {
            match res {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                // Only reachable on runtime shutdown; the slot is filled below.
                Err(e) => tracing::error!("job task failed: {}", e),
            }
        }

        let outcomes: Vec<DownloadOutcome> = slots
            .into_iter()
            .zip(jobs)
            .map(|(slot, job)| {
                slot.unwrap_or_else(|| {
                    let err = JobError::Internal("job task ended without an outcome".to_string());
                    DownloadOutcome::failure(job.source_url.clone(), None, 0, err)
                })
            })
            .collect();

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        tracing::info!(
            jobs = outcomes.len(),
            succeeded = outcomes.len() - failed,
            failed,
            "batch complete"
        );
        outcomes
    }

    /// `download_all` on a dedicated multi-threaded runtime, for synchronous callers.
    /// Must not be called from inside a tokio runtime.
    pub fn download_all_blocking(&self, jobs: &[JobDescriptor]) -> Result<Vec<DownloadOutcome>> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(rt.block_on(self.download_all(jobs)))
    }
}
