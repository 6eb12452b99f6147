//! Hand-off of generated files to the host's save mechanism.

use crate::error::RustyTabulateError;
use anyhow::Context;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while handing a file to its destination.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Export directory '{0}' does not exist")]
    MissingDirectory(String),

    #[error("Invalid export file name '{0}'")]
    InvalidFileName(String),
}

/// A generated file ready to be saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Destination that saves exported files, standing in for a browser download.
pub trait FileSink {
    /// Saves the file once; failures are reported, never retried.
    fn save(&mut self, file: &ExportFile) -> Result<(), RustyTabulateError>;
}

/// Saves files into a directory on disk.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl FileSink for DirectorySink {
    fn save(&mut self, file: &ExportFile) -> Result<(), RustyTabulateError> {
        if !self.directory.is_dir() {
            Err(SinkError::MissingDirectory(self.directory.display().to_string()))?;
        }
        // Only bare file names; no path components
        let is_bare_name = Path::new(&file.name)
            .file_name()
            .is_some_and(|name| name == file.name.as_str());
        if !is_bare_name {
            Err(SinkError::InvalidFileName(file.name.to_owned()))?;
        }
        let path = self.directory.join(&file.name);
        std::fs::write(&path, &file.bytes)
            .with_context(|| format!("Write '{}' failed", path.display()))?;
        tracing::info!(path = %path.display(), bytes = file.bytes.len(), "saved export file");
        Ok(())
    }
}

/// Keeps saved files in memory, for hosts that deliver them some other way.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    files: Vec<ExportFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[ExportFile] {
        &self.files
    }

    pub fn take(&mut self) -> Vec<ExportFile> {
        std::mem::take(&mut self.files)
    }
}

impl FileSink for MemorySink {
    fn save(&mut self, file: &ExportFile) -> Result<(), RustyTabulateError> {
        self.files.push(file.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> ExportFile {
        ExportFile {
            name: name.to_owned(),
            mime_type: "application/vnd.ms-excel".to_owned(),
            bytes: b"<Workbook/>".to_vec(),
        }
    }

    #[test]
    fn directory_sink_writes_file() {
        let directory = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(directory.path());
        sink.save(&file("extracted-data.xls")).unwrap();
        let saved = std::fs::read(directory.path().join("extracted-data.xls")).unwrap();
        assert_eq!(saved, b"<Workbook/>");
    }

    #[test]
    fn directory_sink_rejects_paths() {
        let directory = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(directory.path());
        let error = sink.save(&file("../escape.xls")).unwrap_err();
        assert!(matches!(error, RustyTabulateError::SinkError(SinkError::InvalidFileName(_))));
    }

    #[test]
    fn directory_sink_requires_directory() {
        let directory = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(directory.path().join("missing"));
        let error = sink.save(&file("extracted-data.xls")).unwrap_err();
        assert!(matches!(error, RustyTabulateError::SinkError(SinkError::MissingDirectory(_))));
    }

    #[test]
    fn memory_sink_collects() {
        let mut sink = MemorySink::new();
        sink.save(&file("a.xls")).unwrap();
        sink.save(&file("b.xls")).unwrap();
        assert_eq!(sink.files().len(), 2);
        assert_eq!(sink.take()[1].name, "b.xls");
        assert!(sink.files().is_empty());
    }
}
