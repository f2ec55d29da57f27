//! Error types for the pdf-maillog library.
//!
//! Only *fatal* conditions surface as [`MailLogError`]: a missing source
//! directory, an unreadable CSV, a failed output write. Everything that can
//! go wrong with a single document fails soft instead — an unparseable PDF
//! is skipped with a warning and a count, an unparseable date keeps its raw
//! string. That split mirrors how the original pipeline behaved: one bad
//! export must never abort a batch of hundreds.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf-maillog library.
#[derive(Debug, Error)]
pub enum MailLogError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Source directory was not found at the given path.
    #[error("Source directory not found: '{path}'\nCheck the path exists and is readable.")]
    SourceDirNotFound { path: PathBuf },

    /// The source path exists but is not a directory.
    #[error("Source path is not a directory: '{path}'")]
    NotADirectory { path: PathBuf },

    /// Enumerating the source directory failed.
    #[error("Failed to read source directory '{path}': {source}")]
    DirReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── CSV errors ────────────────────────────────────────────────────────
    /// The CSV file could not be read or deserialized.
    #[error("Failed to read CSV '{path}': {source}")]
    CsvReadFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Writing a record to the CSV failed.
    #[error("Failed to write CSV '{path}': {source}")]
    CsvWriteFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_dir_not_found_display() {
        let e = MailLogError::SourceDirNotFound {
            path: PathBuf::from("/no/such/dir"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/no/such/dir"), "got: {msg}");
    }

    #[test]
    fn output_write_failed_display() {
        let e = MailLogError::OutputWriteFailed {
            path: PathBuf::from("/tmp/out.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/tmp/out.md"));
    }

    #[test]
    fn invalid_config_display() {
        let e = MailLogError::InvalidConfig("empty marker".into());
        assert!(e.to_string().contains("empty marker"));
    }
}
