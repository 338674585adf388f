pub mod config;
pub mod logging;

pub mod downloader;
pub mod error;
pub mod fetch;
pub mod job;
pub mod probe;
pub mod storage;
pub mod url_model;

pub use downloader::Downloader;
pub use error::{ErrorKind, FetchError, JobError};
pub use job::{DownloadOutcome, JobDescriptor, OutcomeReport};
