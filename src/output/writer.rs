//! Committing export artifacts to disk

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Write `contents` to `dest` without ever leaving a partial file behind.
///
/// The artifact goes to a temporary file in the destination directory first
/// and is renamed over `dest` only once fully written. On failure `dest` is
/// left as it was. A replaced file keeps its permissions; a new one gets the
/// same mode a plain file creation would give it.
pub fn write_atomic(dest: &Path, contents: &str) -> Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = staging_file(dir).map_err(|e| Error::export_failed(dest, e))?;
    debug!("staging export in {}", tmp.path().display());

    tmp.write_all(contents.as_bytes())
        .and_then(|_| tmp.flush())
        .map_err(|e| Error::export_failed(dest, e))?;
    if let Some(existing) = fs::metadata(dest).ok().filter(|m| m.is_file()) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| Error::export_failed(dest, e))?;
    }
    tmp.persist(dest)
        .map_err(|e| Error::export_failed(dest, e.error))?;

    info!("exported {} bytes to {}", contents.len(), dest.display());
    Ok(())
}

#[cfg(unix)]
fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // open(2) masks this with the umask, as it does for File::create
    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}
