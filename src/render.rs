//! CSV-to-Markdown rendering: the correspondence log.
//!
//! The formatter is intentionally dumb: it renders rows in CSV file order
//! (the extractor already sorted them) and substitutes values into a fixed
//! template. Values are trimmed but **not** Markdown-escaped — a `*` in a
//! subject line will italicise. That fidelity gap is inherited from the
//! original output and kept as-is.

use crate::error::MailLogError;
use crate::record::{read_records, EmailRecord};
use std::path::Path;
use tracing::{debug, info};

/// Document title emitted at the top of the log.
const TITLE: &str = "# Email Correspondence";

/// Render records into the Markdown correspondence log, in the given order.
pub fn render_records(records: &[EmailRecord]) -> String {
    let mut md = String::with_capacity(256 + records.len() * 256);
    md.push_str(TITLE);
    md.push_str("\n\n");

    for record in records {
        debug!("Rendering entry sent '{}'", record.sent);
        md.push_str(&format!("## {}\n\n", safe(&record.sent)));
        md.push_str(&format!("**From:** {}\n\n", safe(&record.from)));
        md.push_str(&format!("**To:** {}\n\n", safe(&record.to)));
        md.push_str(&format!("{}\n\n", safe(&record.content)));
        md.push_str(&format!("[Source]({})\n\n", safe(&record.file)));
        md.push_str("---\n\n");
    }

    md
}

/// Read `csv_path` and render it, preserving row order.
pub fn render_csv(csv_path: impl AsRef<Path>) -> Result<String, MailLogError> {
    let records = read_records(csv_path)?;
    Ok(render_records(&records))
}

/// Read `csv_path`, render it, and write the Markdown to `md_path`.
///
/// Returns the number of rendered entries. The write is atomic (temp file
/// plus rename), like the extractor's CSV write.
pub fn render_csv_to_file(
    csv_path: impl AsRef<Path>,
    md_path: impl AsRef<Path>,
) -> Result<usize, MailLogError> {
    let records = read_records(csv_path)?;
    let md = render_records(&records);
    let md_path = md_path.as_ref();
    crate::extract::write_atomic(md_path, &md)?;
    info!("Wrote {} entries to '{}'", records.len(), md_path.display());
    Ok(records.len())
}

/// Trim/empty guard applied to every substituted value.
fn safe(value: &str) -> &str {
    value.trim()
}
