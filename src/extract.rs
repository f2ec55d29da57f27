//! Batch extraction: directory of PDFs in, CSV of email records out.
//!
//! The driver is a straight-line, single-threaded pipeline per file:
//! extract page text, scan for the header triplet, truncate trailing
//! disclaimers, collect. Files that fail extraction or lack the triplet are
//! skipped with a warning — one bad export must never abort the batch — and
//! the final [`ExtractStats`] carries the counts.

use crate::config::ExtractConfig;
use crate::error::MailLogError;
use crate::pipeline::pdftext::{PdfExtractBackend, TextExtractor};
use crate::pipeline::scan::{scan_message, truncate_disclaimer};
use crate::record::{records_to_csv, EmailRecord};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Counts for one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractStats {
    /// PDF files found in the source directory.
    pub scanned_files: usize,
    /// Files that yielded a complete record.
    pub parsed_records: usize,
    /// Files dropped for lack of a From/To/Sent triplet.
    pub skipped_files: usize,
}

/// Records plus run counts, as returned by [`extract_dir`].
#[derive(Debug, Clone)]
pub struct ExtractOutput {
    /// Parsed records, sorted by Sent descending.
    pub records: Vec<EmailRecord>,
    pub stats: ExtractStats,
}

/// Extract every parsable email record from the PDFs in `dir`.
///
/// Enumeration is non-recursive and limited to the `.pdf` extension
/// (ASCII case-insensitive). Files are visited in name order so repeated
/// runs log identically; the output order is by Sent, descending.
///
/// # Errors
/// Fatal only: the directory is missing, not a directory, or unreadable.
/// Per-file failures are skips, reflected in [`ExtractStats`].
pub fn extract_dir(
    dir: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<ExtractOutput, MailLogError> {
    let dir = dir.as_ref();
    let files = list_pdf_files(dir)?;
    info!("Found {} PDF files in '{}'", files.len(), dir.display());

    let extractor: Arc<dyn TextExtractor> = config
        .extractor
        .clone()
        .unwrap_or_else(|| Arc::new(PdfExtractBackend));

    let mut records = Vec::with_capacity(files.len());
    let mut skipped = 0usize;

    for path in &files {
        info!("Parsing '{}'", path.display());
        let pages = extractor.extract_pages(path);
        let text = pages.join("\n");

        match scan_message(&text, &config.termination_rules) {
            Some(msg) => {
                let mut record = msg.into_record(path.display().to_string());
                record.content = truncate_disclaimer(&record.content, &config.disclaimer_markers);
                debug!("Parsed record sent '{}' from '{}'", record.sent, record.file);
                records.push(record);
            }
            None => {
                warn!(
                    "Skipping '{}': no From/To/Sent header triplet found",
                    path.display()
                );
                skipped += 1;
            }
        }
    }

    sort_records(&mut records);

    let stats = ExtractStats {
        scanned_files: files.len(),
        parsed_records: records.len(),
        skipped_files: skipped,
    };
    info!(
        "Parsed {}/{} files ({} skipped)",
        stats.parsed_records, stats.scanned_files, stats.skipped_files
    );

    Ok(ExtractOutput { records, stats })
}

/// Extract `dir` and write the records to `csv_path`.
///
/// The write is atomic: a sibling temp file is written first, then renamed
/// over the target, so a crash never leaves a half-written CSV behind.
pub fn extract_dir_to_csv(
    dir: impl AsRef<Path>,
    csv_path: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<ExtractStats, MailLogError> {
    let output = extract_dir(dir, config)?;
    let csv_path = csv_path.as_ref();

    let csv = records_to_csv(&output.records).map_err(|source| MailLogError::CsvWriteFailed {
        path: csv_path.to_path_buf(),
        source,
    })?;

    write_atomic(csv_path, &csv)?;
    info!(
        "Wrote {} records to '{}'",
        output.stats.parsed_records,
        csv_path.display()
    );
    Ok(output.stats)
}

/// Sort records by Sent, newest first.
///
/// The sort key is lexicographic. That is chronologically correct for the
/// RFC 3339 values the normalizer produces, but raw fallback strings (dates
/// that failed to parse) sort by their literal text and can land anywhere.
/// The mixed-key ordering is inherited behaviour, pinned by tests rather
/// than fixed here.
pub fn sort_records(records: &mut [EmailRecord]) {
    records.sort_by(|a, b| b.sent.cmp(&a.sent));
}

/// Enumerate `*.pdf` directly under `dir`, sorted by file name.
fn list_pdf_files(dir: &Path) -> Result<Vec<PathBuf>, MailLogError> {
    if !dir.exists() {
        return Err(MailLogError::SourceDirNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(MailLogError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| MailLogError::DirReadFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| MailLogError::DirReadFailed {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if path.is_file() && is_pdf {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Write `contents` to `path` via a sibling temp file and rename.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), MailLogError> {
    let map_io = |source: std::io::Error| MailLogError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(map_io)?;
        }
    }

    let tmp_path = tmp_sibling(path);
    std::fs::write(&tmp_path, contents).map_err(map_io)?;
    std::fs::rename(&tmp_path, path).map_err(map_io)?;
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "output".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dir_is_fatal() {
        let err = extract_dir("/no/such/dir", &ExtractConfig::default()).unwrap_err();
        assert!(matches!(err, MailLogError::SourceDirNotFound { .. }));
    }

    #[test]
    fn file_as_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();
        let err = extract_dir(&file, &ExtractConfig::default()).unwrap_err();
        assert!(matches!(err, MailLogError::NotADirectory { .. }));
    }

    #[test]
    fn only_pdf_extension_enumerated() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.pdf", "b.PDF", "notes.txt", "c.pdf.bak"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        let files = list_pdf_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.PDF"]);
    }

    #[test]
    fn sort_is_descending_lexicographic() {
        let mut records: Vec<EmailRecord> = ["2020-01-01T00:00:00+00:00", "2021-06-01T00:00:00+00:00"]
            .iter()
            .map(|sent| EmailRecord {
                sent: sent.to_string(),
                ..Default::default()
            })
            .collect();
        sort_records(&mut records);
        assert_eq!(records[0].sent, "2021-06-01T00:00:00+00:00");
        assert_eq!(records[1].sent, "2020-01-01T00:00:00+00:00");
    }

    #[test]
    fn atomic_write_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "old").unwrap();
        write_atomic(&path, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert!(!tmp_sibling(&path).exists());
    }
}
