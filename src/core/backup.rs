//! Logical backup and restore of a single database.

use crate::core::remote::Remote;
use crate::models::request::{BackupRequest, RestoreRequest};
use crate::utils::fs::{dump_file_path, ensure_dir_all, restore_target, with_suffix};
use crate::{Error, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;

/// Timestamp format used in dump file names.
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

impl Remote {
    /// Dump a database to `<dir>/<name>_<timestamp>.sql` plus a `.gz` copy.
    ///
    /// Returns the path of the uncompressed script. A failed dump leaves the
    /// partial file in place.
    pub async fn backup(&self, info: &BackupRequest) -> Result<PathBuf> {
        ensure_dir_all(&info.target_dir)?;

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let file_name = dump_file_path(&info.target_dir, &info.name, &timestamp);
        let source = self.data_source(&info.name, &info.format);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_name)?;
        self.dump_tool.dump(&source, file).await?;

        let archive = with_suffix(&file_name, ".gz");
        let archiver = self.archiver.clone();
        let src = file_name.clone();
        run_blocking(move || archiver.compress(&src, &archive)).await?;

        tracing::info!("Backed up {} to {}", info.name, file_name.display());
        Ok(file_name)
    }

    /// Load a `.sql`, `.sql.gz` or `.tar.gz` dump into a database.
    ///
    /// Compressed sources are unpacked next to themselves first. Nothing is
    /// rolled back if the restore fails part way.
    pub async fn restore(&self, info: &RestoreRequest) -> Result<()> {
        let (file_name, kind) = restore_target(&info.source_file);
        if let Some(kind) = kind {
            let archiver = self.archiver.clone();
            let src = info.source_file.clone();
            let dst = file_name.clone();
            run_blocking(move || archiver.decompress(&src, &dst, kind)).await?;
        }

        let source = self.data_source(&info.name, &info.format);
        let file = File::open(&file_name)?;
        self.dump_tool.restore(&source, file).await?;

        tracing::info!("Restored {} from {}", info.name, file_name.display());
        Ok(())
    }
}

/// Run file compression on the blocking pool.
async fn run_blocking<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::other(format!("archive task failed: {}", e)))?
}
