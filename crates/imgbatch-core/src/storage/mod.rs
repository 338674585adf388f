//! Disk I/O and file lifecycle for downloaded images.
//!
//! Bodies are written to a uniquely named `.part` temp file next to the final
//! path and atomically renamed into place once fully written and synced.

mod writer;

pub use writer::ImageFile;

use std::fs;
use std::io;
use std::path::Path;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Create `dir` and any missing parents. An existing directory is success, so
/// concurrent jobs sharing a subdirectory can all call this.
pub fn ensure_dir(dir: &Path, mode: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(dir)
}
