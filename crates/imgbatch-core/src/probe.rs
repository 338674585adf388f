//! Header-only dimension probing.
//!
//! Sniffs the container format from the leading bytes (not the file extension)
//! and reads just enough of the header to learn the declared pixel size.

use image::{ImageFormat, ImageReader};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
    #[error("unrecognized image format")]
    UnknownFormat,
    #[error("{format:?} header: {source}")]
    Header {
        format: ImageFormat,
        #[source]
        source: image::ImageError,
    },
    #[error("image declares zero width or height")]
    ZeroDimensions,
}

/// Declared size and detected container format of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

/// Probe an already-open, seekable reader positioned at the start of the image.
pub fn probe_reader<R: BufRead + Seek>(reader: R) -> Result<Dimensions, ProbeError> {
    let reader = ImageReader::new(reader).with_guessed_format()?;
    let format = reader.format().ok_or(ProbeError::UnknownFormat)?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|source| ProbeError::Header { format, source })?;
    if width == 0 || height == 0 {
        return Err(ProbeError::ZeroDimensions);
    }
    Ok(Dimensions {
        width,
        height,
        format,
    })
}

/// Open `path` and probe it.
pub fn probe_path(path: &Path) -> Result<Dimensions, ProbeError> {
    let file = File::open(path)?;
    probe_reader(BufReader::new(file))
}
