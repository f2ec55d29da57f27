//! # pdf-maillog
//!
//! Convert a directory of PDF-exported email records into a CSV table, then
//! render that CSV as a Markdown correspondence log.
//!
//! ## Why this crate?
//!
//! Email threads exported to PDF are a common deliverable of records
//! requests, and they are miserable to work with: the headers are
//! copy-pasted text, dates come in whatever format the sending client used,
//! and every message trails quoted replies and legal boilerplate. This crate
//! recovers one structured record per PDF using heuristic line scanning,
//! normalizes dates to UTC, cuts trailing disclaimers, and renders the
//! result as a readable log.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF directory
//!  │
//!  ├─ 1. Extract   per-page text via pdf_extract (panic-safe)
//!  ├─ 2. Clean     strip export artefacts (=br>, =NN, =8E)
//!  ├─ 3. Scan      first-occurrence From/To/Sent/Subject + body lines
//!  ├─ 4. Dates     fuzzy parse → RFC 3339 UTC (raw string on failure)
//!  ├─ 5. CSV       one quoted row per record, Sent descending
//!  └─ 6. Markdown  one `##` section per CSV row, file order
//! ```
//!
//! The two stages share nothing but the CSV file and can run independently;
//! the `maillog` binary exposes them as `extract` and `format` subcommands.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_maillog::{extract_dir_to_csv, render_csv_to_file, ExtractConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractConfig::default();
//!     let stats = extract_dir_to_csv("exports/", "emails.csv", &config)?;
//!     eprintln!("parsed {} of {} files", stats.parsed_records, stats.scanned_files);
//!     render_csv_to_file("emails.csv", "correspondence.md")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `maillog` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf-maillog = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod record;
pub mod render;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractConfig, ExtractConfigBuilder, MatchMode, TerminationRule};
pub use error::MailLogError;
pub use extract::{extract_dir, extract_dir_to_csv, sort_records, ExtractOutput, ExtractStats};
pub use pipeline::clean::clean_text;
pub use pipeline::date::normalize_date;
pub use pipeline::pdftext::{PdfExtractBackend, TextExtractor};
pub use pipeline::scan::{scan_message, truncate_disclaimer, ScannedMessage};
pub use record::{read_records, records_to_csv, EmailRecord};
pub use render::{render_csv, render_csv_to_file, render_records};
