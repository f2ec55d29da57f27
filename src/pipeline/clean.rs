//! Text cleaning: deterministic cleanup of PDF-extracted email text.
//!
//! Text pulled out of a PDF export of an email thread is full of transport
//! artefacts: quoted-printable remnants (`=20`, `=8E`), a soft-line-break
//! token (`=br>`) standing in for a wrapped line, and whitespace shredded by
//! the extractor's layout reconstruction. This module applies a small set of
//! ordered, pure string passes that strip those artefacts without touching
//! content. Each pass is independently testable.
//!
//! ## Pass Order
//!
//! The soft-break token must be expanded to a newline *before* whitespace
//! collapsing, so the collapse pass folds it into a single space like any
//! other break. `=8E` is removed after the numeric-escape pass because the
//! numeric pattern only matches digit sequences and would leave it behind.

use once_cell::sync::Lazy;
use regex::Regex;

/// Quoted-printable numeric escape remnants, e.g. `=20`, `=173`.
static RE_NUMERIC_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"=\d{2,3}").unwrap());

/// Any run of whitespace, including the newlines produced by soft-break
/// expansion.
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Soft line break artifact left by the PDF exporter for wrapped lines.
const SOFT_BREAK: &str = "=br>";

/// Encoding artifact that survives the numeric-escape pass.
const ENCODING_ARTIFACT: &str = "=8E";

/// Clean one fragment of extracted text.
///
/// Applied to every header value and every content line before it enters a
/// record. Passes, in order:
/// 1. Expand the soft-break artifact `=br>` to a newline
/// 2. Strip numeric escape remnants (`=\d{2,3}`)
/// 3. Remove the `=8E` encoding artifact
/// 4. Collapse every whitespace run to a single space
/// 5. Trim leading/trailing whitespace
pub fn clean_text(input: &str) -> String {
    let s = input.replace(SOFT_BREAK, "\n");
    let s = RE_NUMERIC_ESCAPE.replace_all(&s, "");
    let s = s.replace(ENCODING_ARTIFACT, "");
    let s = RE_WHITESPACE.replace_all(&s, " ");
    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_break_becomes_space() {
        assert_eq!(clean_text("first half=br>second half"), "first half second half");
    }

    #[test]
    fn numeric_escapes_stripped() {
        assert_eq!(clean_text("hello=20world"), "helloworld");
        assert_eq!(clean_text("a=173b"), "ab");
    }

    #[test]
    fn encoding_artifact_removed() {
        assert_eq!(clean_text("caf=8Ee latte"), "cafe latte");
    }

    #[test]
    fn whitespace_collapsed_and_trimmed() {
        assert_eq!(clean_text("  a \t b\r\nc  "), "a b c");
    }

    #[test]
    fn clean_input_passthrough() {
        assert_eq!(clean_text("already clean"), "already clean");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   "), "");
    }
}
