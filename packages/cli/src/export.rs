//! Staged export: output is written to a temporary file in the destination
//! directory and renamed into place once complete. A failed write leaves no
//! partial file behind; the temporary file is removed when dropped.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Write `contents` to `dir/file_name` through a staged temporary file
pub fn write_staged(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory {}", dir.display()))?;

    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("Cannot stage output in {}", dir.display()))?;
    staged.write_all(contents.as_bytes())?;
    staged.flush()?;

    let path = dir.join(file_name);
    staged
        .persist(&path)
        .map_err(|err| err.error)
        .with_context(|| format!("Cannot write {}", path.display()))?;

    debug!(path = %path.display(), bytes = contents.len(), "Exported file");
    Ok(path)
}
