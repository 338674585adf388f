//! Per-job pipeline: fetch → persist → probe. The first failing step decides the outcome.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::JobError;
use crate::fetch::Fetch;
use crate::job::{DownloadOutcome, JobDescriptor};
use crate::probe;
use crate::storage::{ensure_dir, ImageFile};
use crate::url_model::resolve_target;

/// Shared, read-only state every job needs.
pub(super) struct JobContext {
    pub(super) root: PathBuf,
    pub(super) fetcher: Arc<dyn Fetch>,
    pub(super) dir_mode: u32,
    pub(super) file_mode: u32,
}

/// Runs one job to completion on the current (blocking) thread.
pub(super) fn run_job(ctx: &JobContext, index: usize, job: &JobDescriptor) -> DownloadOutcome {
    let span = tracing::debug_span!("job", index, url = %job.source_url);
    let _enter = span.enter();
    let url = job.source_url.clone();

    let mut response = match ctx.fetcher.fetch(&job.source_url) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("fetch failed: {}", e);
            return DownloadOutcome::failure(url, None, 0, e.into());
        }
    };

    let target = match resolve_target(&ctx.root, &job.subdirectory, &job.file_name) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("rejected target path: {}", e);
            let attempted = ctx.root.join(&job.subdirectory).join(&job.file_name);
            return DownloadOutcome::failure(url, None, 0, JobError::filesystem(attempted, e));
        }
    };

    let (file, bytes_written) = match persist(ctx, &target, &mut response.body) {
        Ok(written) => written,
        Err(e) => {
            tracing::warn!("persist failed: {}", e);
            return DownloadOutcome::failure(url, Some(target), 0, e);
        }
    };

    match probe::probe_reader(BufReader::new(file)) {
        Ok(dims) => {
            tracing::debug!(
                path = %target.display(),
                width = dims.width,
                height = dims.height,
                bytes = bytes_written,
                "downloaded"
            );
            DownloadOutcome::success(url, target, bytes_written, dims)
        }
        Err(e) => {
            tracing::warn!(path = %target.display(), "probe failed: {}", e);
            DownloadOutcome::failure(url, Some(target), bytes_written, e.into())
        }
    }
}

/// Ensure the directory chain, write the body, and rename into place.
/// Returns the persisted handle (rewound) and the byte count.
fn persist(
    ctx: &JobContext,
    target: &Path,
    body: &mut dyn Read,
) -> Result<(File, u64), JobError> {
    if let Some(dir) = target.parent() {
        ensure_dir(dir, ctx.dir_mode).map_err(|e| JobError::filesystem(dir, e))?;
    }
    let mut image = ImageFile::create(target, ctx.file_mode)
        .map_err(|e| JobError::filesystem(target, e))?;
    let written = image
        .copy_from(body)
        .map_err(|e| JobError::filesystem(image.temp_path(), e))?;
    let file = image
        .finalize()
        .map_err(|e| JobError::filesystem(target, e))?;
    Ok((file, written))
}
