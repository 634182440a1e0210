//! File system utilities.

use crate::services::archive::ArchiveKind;
use crate::Result;
use std::path::{Path, PathBuf};

/// Create a directory and all parent directories if it is missing.
pub fn ensure_dir_all(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| {
            crate::Error::other(format!("mkdir {} failed, err: {}", path.display(), e))
        })?;
    }
    Ok(())
}

/// Path of a timestamped dump file: `<dir>/<name>_<YYYYMMDDhhmmss>.sql`.
pub fn dump_file_path(dir: &Path, name: &str, timestamp: &str) -> PathBuf {
    dir.join(format!("{}_{}.sql", name, timestamp))
}

/// Sibling path with an extra suffix appended, e.g. `a.sql` -> `a.sql.gz`.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Work out how a restore source must be unpacked.
///
/// Returns the plain SQL path to read and, if the source is compressed,
/// the archive kind to decompress it with. `.sql.gz` unpacks to the same
/// path without `.gz`; `.tar.gz` unpacks to the path without `.tar.gz`;
/// anything else is read as-is.
pub fn restore_target(source: &Path) -> (PathBuf, Option<ArchiveKind>) {
    let raw = source.to_string_lossy();
    if let Some(stem) = raw.strip_suffix(".sql.gz") {
        return (PathBuf::from(format!("{}.sql", stem)), Some(ArchiveKind::Gzip));
    }
    if let Some(stem) = raw.strip_suffix(".tar.gz") {
        return (PathBuf::from(stem), Some(ArchiveKind::TarGzip));
    }
    (source.to_path_buf(), None)
}
