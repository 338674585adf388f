//! Target path resolution and filename derivation.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename;

use std::io;
use std::path::{Component, Path, PathBuf};

/// Used when neither the job nor the URL yields a usable name.
pub const DEFAULT_FILENAME: &str = "image.bin";

/// Derives a safe filename from the last URL path segment, falling back to `image.bin`.
pub fn derive_filename(url: &str) -> String {
    let sanitized = filename_from_url_path(url)
        .map(|raw| sanitize_filename(&raw))
        .unwrap_or_default();
    if sanitized.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Joins `root / subdirectory / file_name`, refusing anything that could land outside `root`.
///
/// `subdirectory` may be empty or nested (`a/b`). Absolute parts, `..`, and a
/// `file_name` that is empty or contains a separator are rejected with `InvalidInput`.
pub fn resolve_target(root: &Path, subdirectory: &str, file_name: &str) -> io::Result<PathBuf> {
    let sub = Path::new(subdirectory);
    for component in sub.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("subdirectory escapes destination root: {:?}", subdirectory),
                ))
            }
        }
    }

    let mut name = Path::new(file_name).components();
    match (name.next(), name.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid file name: {:?}", file_name),
            ))
        }
    }

    Ok(root.join(sub).join(file_name))
}
