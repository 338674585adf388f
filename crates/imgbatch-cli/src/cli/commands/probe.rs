//! `imgbatch probe <path>` – print the declared size of a local image.

use anyhow::{Context, Result};
use imgbatch_core::probe;
use std::path::Path;

pub fn run_probe(path: &Path) -> Result<usize> {
    let dims = probe::probe_path(path).with_context(|| format!("probe {}", path.display()))?;
    println!(
        "{}x{}  {:?}  {}",
        dims.width,
        dims.height,
        dims.format,
        path.display()
    );
    Ok(0)
}
