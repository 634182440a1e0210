//! Gzip and tar.gz packaging of dump files.

use crate::{Error, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Compression format of a dump archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// A single gzip-compressed file (`.sql.gz`).
    Gzip,
    /// A gzip-compressed tarball holding the script (`.tar.gz`).
    TarGzip,
}

/// Compresses and decompresses dump files.
pub trait Archiver: Send + Sync {
    /// Compress `src` into the gzip file `dst`.
    fn compress(&self, src: &Path, dst: &Path) -> Result<()>;

    /// Decompress `src` into the plain file `dst`.
    fn decompress(&self, src: &Path, dst: &Path, kind: ArchiveKind) -> Result<()>;
}

/// `Archiver` using flate2 and tar.
#[derive(Debug, Clone, Default)]
pub struct GzArchiver;

impl Archiver for GzArchiver {
    fn compress(&self, src: &Path, dst: &Path) -> Result<()> {
        let mut reader = BufReader::new(File::open(src)?);
        let mut encoder = GzEncoder::new(BufWriter::new(File::create(dst)?), Compression::default());
        io::copy(&mut reader, &mut encoder)?;
        encoder.finish()?.flush()?;
        tracing::debug!("Compressed {:?} -> {:?}", src, dst);
        Ok(())
    }

    fn decompress(&self, src: &Path, dst: &Path, kind: ArchiveKind) -> Result<()> {
        let decoder = GzDecoder::new(BufReader::new(File::open(src)?));
        match kind {
            ArchiveKind::Gzip => {
                let mut decoder = decoder;
                let mut writer = BufWriter::new(File::create(dst)?);
                io::copy(&mut decoder, &mut writer)?;
                writer.flush()?;
            }
            ArchiveKind::TarGzip => {
                let mut archive = tar::Archive::new(decoder);
                let mut extracted = false;
                for entry in archive.entries()? {
                    let mut entry = entry?;
                    if entry.header().entry_type().is_file() {
                        let mut writer = BufWriter::new(File::create(dst)?);
                        io::copy(&mut entry, &mut writer)?;
                        writer.flush()?;
                        extracted = true;
                        break;
                    }
                }
                if !extracted {
                    return Err(Error::InvalidArchive(format!(
                        "no file found in {}",
                        src.display()
                    )));
                }
            }
        }
        tracing::debug!("Decompressed {:?} -> {:?}", src, dst);
        Ok(())
    }
}
