//! Job descriptors (input) and download outcomes (output).

use anyhow::{Context, Result};
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ErrorKind, JobError};
use crate::probe::Dimensions;
use crate::url_model;

/// One requested image download. Target path is `root / subdirectory / file_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescriptor {
    #[serde(alias = "url")]
    pub source_url: String,
    #[serde(default, alias = "subdir")]
    pub subdirectory: String,
    #[serde(default)]
    pub file_name: String,
}

impl JobDescriptor {
    pub fn new(
        source_url: impl Into<String>,
        subdirectory: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            subdirectory: subdirectory.into(),
            file_name: file_name.into(),
        }
    }

    /// Fill an empty `file_name` from the URL's last path segment.
    pub fn with_derived_name(mut self) -> Self {
        if self.file_name.is_empty() {
            self.file_name = url_model::derive_filename(&self.source_url);
        }
        self
    }
}

/// Reads a JSON array of job descriptors. Entries without `file_name` get one
/// derived from their URL.
pub fn load_jobs(path: &Path) -> Result<Vec<JobDescriptor>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("read job file {}", path.display()))?;
    parse_jobs(&data).with_context(|| format!("parse job file {}", path.display()))
}

pub fn parse_jobs(json: &str) -> Result<Vec<JobDescriptor>> {
    let jobs: Vec<JobDescriptor> = serde_json::from_str(json)?;
    Ok(jobs.into_iter().map(JobDescriptor::with_derived_name).collect())
}

/// Terminal result for one job, at the same index as its descriptor.
///
/// On failure `width`/`height` are 0 and `file_path` is `None` if nothing was
/// written yet. On success `file_path` is set and both dimensions are positive.
#[derive(Debug)]
pub struct DownloadOutcome {
    pub source_url: String,
    pub file_path: Option<PathBuf>,
    pub error: Option<JobError>,
    pub width: u32,
    pub height: u32,
    pub format: Option<ImageFormat>,
    pub bytes_written: u64,
}

impl DownloadOutcome {
    pub(crate) fn success(
        source_url: String,
        file_path: PathBuf,
        bytes_written: u64,
        dims: Dimensions,
    ) -> Self {
        Self {
            source_url,
            file_path: Some(file_path),
            error: None,
            width: dims.width,
            height: dims.height,
            format: Some(dims.format),
            bytes_written,
        }
    }

    pub(crate) fn failure(
        source_url: String,
        file_path: Option<PathBuf>,
        bytes_written: u64,
        error: JobError,
    ) -> Self {
        Self {
            source_url,
            file_path,
            error: Some(error),
            width: 0,
            height: 0,
            format: None,
            bytes_written,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.is_success().then_some((self.width, self.height))
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(JobError::kind)
    }
}

/// Serializable, flattened view of an outcome for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeReport {
    pub source_url: String,
    pub file_path: Option<String>,
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub bytes_written: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&DownloadOutcome> for OutcomeReport {
    fn from(o: &DownloadOutcome) -> Self {
        Self {
            source_url: o.source_url.clone(),
            file_path: o.file_path.as_ref().map(|p| p.display().to_string()),
            width: o.width,
            height: o.height,
            format: o.format.map(|f| f.extensions_str()[0].to_string()),
            bytes_written: o.bytes_written,
            error_kind: o.error_kind(),
            error: o.error.as_ref().map(|e| e.to_string()),
        }
    }
}
