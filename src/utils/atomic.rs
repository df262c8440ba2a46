//! Write-then-rename file replacement.
//!
//! Content goes to a sibling file named `<target>.1`. Only [`AtomicFile::commit`]
//! renames it over the target, so readers of the target path either see the
//! previous complete file or the new complete file. Dropping an uncommitted
//! `AtomicFile` removes the partial sibling.

use crate::error::{IoContext, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct AtomicFile {
    target: PathBuf,
    temp: PathBuf,
    writer: Option<BufWriter<File>>,
    written: u64,
}

impl AtomicFile {
    /// Create (or truncate) the temporary sibling of `target`
    pub fn create(target: &Path) -> Result<Self> {
        let temp = temp_path(target);
        let file = File::create(&temp).at(&temp)?;

        Ok(Self {
            target: target.to_path_buf(),
            temp,
            writer: Some(BufWriter::new(file)),
            written: 0,
        })
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp
    }

    /// Bytes accepted so far
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Flush, sync and rename over the target, replacing any previous copy
    pub fn commit(mut self) -> Result<PathBuf> {
        let result = self.install();
        if result.is_err() {
            let _ = fs::remove_file(&self.temp);
        }
        result
    }

    fn install(&mut self) -> Result<PathBuf> {
        if let Some(writer) = self.writer.take() {
            let file = writer.into_inner().map_err(|e| e.into_error()).at(&self.temp)?;
            file.sync_all().at(&self.temp)?;
        }

        fs::rename(&self.temp, &self.target).at(&self.target)?;
        Ok(self.target.clone())
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::other("atomic file already committed"))?;
        let n = writer.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        if self.writer.take().is_some() {
            let _ = fs::remove_file(&self.temp);
        }
    }
}

/// `index.json` -> `index.json.1`
fn temp_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".1");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_path() {
        assert_eq!(
            temp_path(Path::new("/cache/index.json")),
            PathBuf::from("/cache/index.json.1")
        );
    }

    #[test]
    fn test_commit_replaces_target() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("index.db");
        fs::write(&target, "old\n").unwrap();

        let mut file = AtomicFile::create(&target).unwrap();
        file.write_all(b"new\n").unwrap();
        assert_eq!(file.bytes_written(), 4);

        // Target is untouched until commit
        assert_eq!(fs::read_to_string(&target).unwrap(), "old\n");

        let installed = file.commit().unwrap();
        assert_eq!(installed, target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "new\n");
        assert!(!temp_path(&target).exists());
    }

    #[test]
    fn test_drop_without_commit_keeps_previous() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("index.db");
        fs::write(&target, "old\n").unwrap();

        {
            let mut file = AtomicFile::create(&target).unwrap();
            file.write_all(b"partial").unwrap();
        }

        assert_eq!(fs::read_to_string(&target).unwrap(), "old\n");
        assert!(!temp_path(&target).exists());
    }

    #[test]
    fn test_failed_commit_removes_temp() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("index.db");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("occupied"), "x").unwrap();

        let mut file = AtomicFile::create(&target).unwrap();
        file.write_all(b"new\n").unwrap();

        assert!(file.commit().is_err());
        assert!(!temp_path(&target).exists());
        assert!(target.join("occupied").exists());
    }

    #[test]
    fn test_create_fails_in_missing_directory() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("missing").join("index.db");
        assert!(AtomicFile::create(&target).is_err());
    }
}
