//! Pipeline stages for PDF-email extraction.
//!
//! Each stage is an independent module, applied per file in this order:
//!
//! 1. [`pdftext`] — pull per-page text out of the PDF
//! 2. [`clean`] — strip export artefacts from every fragment
//! 3. [`scan`] — recover header fields and body from the line stream
//! 4. [`date`] — normalize the send date to RFC 3339 UTC
//!
//! The [`crate::extract`] driver wires them together.

pub mod clean;
pub mod date;
pub mod pdftext;
pub mod scan;
