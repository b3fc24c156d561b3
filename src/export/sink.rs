//! Destinations for shaped export files.
//!
//! The [`ExportSink`] trait is the seam between the exporter and the place the
//! file ends up. [`FileSink`] writes into a directory on the host filesystem
//! and is what the background worker uses.

use super::format::ExportFile;
use crate::domain::{Result, UserdeckError};
use std::path::{Path, PathBuf};

/// Somewhere an [`ExportFile`] can be offered to the operator.
pub trait ExportSink {
    /// Delivers the file and returns where it landed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be delivered.
    fn offer(&self, file: &ExportFile) -> Result<PathBuf>;
}

/// Writes exports into a directory, replacing files of the same name.
///
/// # Examples
///
/// ```no_run
/// use userdeck::export::{ExportFile, ExportSink, FileSink};
///
/// let sink = FileSink::new("/tmp/exports");
/// let path = sink.offer(&ExportFile {
///     file_name: "users_2024-01-01.csv".into(),
///     contents: "ID,Name,Email,Phone,City,Company".into(),
/// })?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for FileSink {
    /// Writes to a temporary file first, then renames it over the target so a
    /// reader never sees a partially written export.
    fn offer(&self, file: &ExportFile) -> Result<PathBuf> {
        if file.file_name.is_empty() || file.file_name.contains(['/', '\\']) {
            return Err(UserdeckError::Export(format!(
                "invalid export file name: {:?}",
                file.file_name
            )));
        }

        std::fs::create_dir_all(&self.dir)?;

        let target = self.dir.join(&file.file_name);
        let tmp_path = self.dir.join(format!(".{}.tmp", file.file_name));

        tracing::trace!(tmp_path = ?tmp_path, "writing export to temporary file");
        std::fs::write(&tmp_path, &file.contents)?;
        std::fs::rename(&tmp_path, &target)?;

        tracing::debug!(path = ?target, bytes = file.contents.len(), "export written");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn export(name: &str, contents: &str) -> ExportFile {
        ExportFile {
            file_name: name.to_string(),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn writes_file_and_leaves_no_temp_behind() {
        let dir = TempDir::new().unwrap();
        let sink = FileSink::new(dir.path());

        let path = sink.offer(&export("users_2024-01-01.csv", "ID")).unwrap();

        assert_eq!(path, dir.path().join("users_2024-01-01.csv"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ID");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn overwrites_same_day_export() {
        let dir = TempDir::new().unwrap();
        let sink = FileSink::new(dir.path());
        sink.offer(&export("users.json", "[]")).unwrap();
        let path = sink.offer(&export("users.json", "[1]")).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[1]");
    }

    #[test]
    fn creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let sink = FileSink::new(&nested);
        assert!(sink.offer(&export("users.csv", "x")).unwrap().starts_with(&nested));
    }

    #[test]
    fn rejects_names_that_escape_the_directory() {
        let dir = TempDir::new().unwrap();
        let sink = FileSink::new(dir.path());
        assert!(matches!(
            sink.offer(&export("../users.csv", "x")),
            Err(UserdeckError::Export(_))
        ));
        assert!(sink.offer(&export("", "x")).is_err());
    }
}
