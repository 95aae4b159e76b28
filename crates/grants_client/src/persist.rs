use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use grants_logging::grants_debug;
use thiserror::Error;

const PART_SUFFIX: &str = ".part";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("download directory unusable: {0}")]
    DownloadDir(String),
    #[error("backend sent an empty file")]
    EmptyDownload,
    #[error("wrote {written} of {expected} bytes")]
    ShortWrite { written: u64, expected: u64 },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates the download directory (and parents) if needed.
pub fn ensure_download_dir(dir: &Path) -> Result<(), PersistError> {
    fs::create_dir_all(dir).map_err(|e| PersistError::DownloadDir(e.to_string()))?;
    if !dir.is_dir() {
        return Err(PersistError::DownloadDir(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    Ok(())
}

/// Saves downloaded reports into one directory.
///
/// Bytes land in a hidden `.<name>.XXXX.part` file next to the target, are
/// size-checked, then renamed over `{dir}/{filename}`. A failed save leaves
/// neither a truncated PDF nor a stray part file behind.
#[derive(Debug, Clone)]
pub struct DownloadWriter {
    dir: PathBuf,
}

impl DownloadWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn save(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        if content.is_empty() {
            return Err(PersistError::EmptyDownload);
        }
        ensure_download_dir(&self.dir)?;

        let mut part = tempfile::Builder::new()
            .prefix(&format!(".{filename}."))
            .suffix(PART_SUFFIX)
            .tempfile_in(&self.dir)?;
        part.write_all(content)?;
        part.as_file_mut().sync_all()?;

        let expected = content.len() as u64;
        let written = part.as_file().metadata()?.len();
        if written != expected {
            return Err(PersistError::ShortWrite { written, expected });
        }

        let target = self.dir.join(filename);
        // Re-downloading a report replaces the earlier copy.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        part.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        grants_debug!("saved {} bytes to {:?}", written, target);
        Ok(target)
    }
}
