//! The email record and its CSV form.
//!
//! One [`EmailRecord`] per source PDF. Records are immutable once built; the
//! only transformations applied after construction are disclaimer truncation
//! of the content and list-level sorting, both owned by the batch driver.
//!
//! The CSV schema is fixed: header row `File,From,To,Sent,Subject,Content`,
//! every field quoted, UTF-8. Reading tolerates missing columns (fields
//! default to empty) so hand-edited or older CSVs still render.

use crate::error::MailLogError;
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One email extracted from one PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Path of the source PDF, as given to the extractor.
    #[serde(rename = "File", default)]
    pub file: String,
    /// Sender, cleaned.
    #[serde(rename = "From", default)]
    pub from: String,
    /// Recipient, cleaned.
    #[serde(rename = "To", default)]
    pub to: String,
    /// RFC 3339 UTC timestamp, or the cleaned raw date when parsing failed.
    #[serde(rename = "Sent", default)]
    pub sent: String,
    /// Subject line, cleaned. May be empty; does not gate inclusion.
    #[serde(rename = "Subject", default)]
    pub subject: String,
    /// Space-joined body lines, disclaimer-truncated.
    #[serde(rename = "Content", default)]
    pub content: String,
}

/// Serialize records to CSV with every field quoted.
pub fn records_to_csv(records: &[EmailRecord]) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_writer(&mut buf);
        // serialize() only emits the header row before the first record, so
        // an empty run needs it written explicitly.
        if records.is_empty() {
            writer.write_record(["File", "From", "To", "Sent", "Subject", "Content"])?;
        }
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }
    // The writer only ever receives valid UTF-8.
    Ok(String::from_utf8(buf).expect("CSV writer produced invalid UTF-8"))
}

/// Read every record from a CSV file, preserving file order.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<EmailRecord>, MailLogError> {
    let path = path.as_ref();
    let mut reader =
        ReaderBuilder::new()
            .from_path(path)
            .map_err(|source| MailLogError::CsvReadFailed {
                path: path.to_path_buf(),
                source,
            })?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: EmailRecord = row.map_err(|source| MailLogError::CsvReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}
