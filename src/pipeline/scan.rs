//! Header/body line scanner for one extracted email.
//!
//! The input is the concatenated page text of a PDF-exported email: a loose
//! pile of lines where the interesting headers (`From:`, `To:`,
//! `Sent:`/`Date:`, `Subject:`) appear somewhere near the top, in no fixed
//! order, followed by body text, quoted replies, and legal boilerplate.
//!
//! The scanner walks lines once, top to bottom:
//!
//! * each header field is captured on its **first** matching line only;
//!   later occurrences (quoted sub-messages repeat them) are ignored, and
//!   header-prefixed lines never enter the body;
//! * configured [`TerminationRule`]s stop the scan when a line marks the
//!   start of a quoted reply or a disclaimer block;
//! * once From, To and Sent are all present, every later non-empty
//!   non-header line joins the body, cleaned and space-separated.
//!
//! A message without the complete From/To/Sent triplet is not a record;
//! [`scan_message`] returns `None` and the caller skips the file.

use crate::config::TerminationRule;
use crate::pipeline::clean::clean_text;
use crate::pipeline::date::normalize_date;
use crate::record::EmailRecord;

/// The five fields recovered from one message's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedMessage {
    pub from: String,
    pub to: String,
    /// RFC 3339 UTC when the raw date parsed; the cleaned raw string
    /// otherwise.
    pub sent: String,
    pub subject: String,
    pub content: String,
}

impl ScannedMessage {
    /// Attach the source file path, completing the record.
    pub fn into_record(self, file: impl Into<String>) -> EmailRecord {
        EmailRecord {
            file: file.into(),
            from: self.from,
            to: self.to,
            sent: self.sent,
            subject: self.subject,
            content: self.content,
        }
    }
}

/// Scan the full extracted text of one PDF for the first email it contains.
///
/// Returns `None` when any of From, To or Sent is missing — such a document
/// is not a parsable email record.
pub fn scan_message(text: &str, rules: &[TerminationRule]) -> Option<ScannedMessage> {
    let mut msg = ScannedMessage::default();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = strip_header_prefix(line, "from:") {
            if msg.from.is_empty() {
                msg.from = header_value(rest);
            }
            continue;
        }

        if let Some(rest) = strip_header_prefix(line, "to:") {
            if msg.to.is_empty() {
                msg.to = header_value(rest);
            }
            continue;
        }

        if let Some(rest) =
            strip_header_prefix(line, "sent:").or_else(|| strip_header_prefix(line, "date:"))
        {
            if msg.sent.is_empty() {
                let raw = header_value(rest);
                msg.sent = normalize_date(&raw);
            }
            continue;
        }

        if let Some(rest) = strip_header_prefix(line, "subject:") {
            if msg.subject.is_empty() {
                msg.subject = header_value(rest);
            }
            continue;
        }

        // A quoted reply or boilerplate block starts here: everything below
        // belongs to an earlier message in the thread, not this record.
        if rules.iter().any(|rule| rule.matches(&msg.from, line)) {
            break;
        }

        if !msg.from.is_empty() && !msg.to.is_empty() && !msg.sent.is_empty() {
            let cleaned = clean_text(line);
            if cleaned.is_empty() {
                continue;
            }
            if !msg.content.is_empty() {
                msg.content.push(' ');
            }
            msg.content.push_str(&cleaned);
        }
    }

    if msg.from.is_empty() || msg.to.is_empty() || msg.sent.is_empty() {
        None
    } else {
        Some(msg)
    }
}

/// Cut `content` at the earliest occurrence of any disclaimer marker.
///
/// This pass runs after the scan, independently of the termination rules:
/// the rules stop the *scan* for known senders, while this catches
/// boilerplate that arrived through any other path (different sender,
/// disclaimer glued onto a content line).
pub fn truncate_disclaimer(content: &str, markers: &[String]) -> String {
    let mut cut = content.len();
    for marker in markers {
        if let Some(idx) = find_ci(content, marker) {
            if idx < cut && content.is_char_boundary(idx) {
                cut = idx;
            }
        }
    }
    content[..cut].trim_end().to_string()
}

/// Strip a case-insensitive header prefix, returning the remainder.
fn strip_header_prefix<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let bytes = line.as_bytes();
    let p = prefix.as_bytes();
    if bytes.len() >= p.len() && bytes[..p.len()].eq_ignore_ascii_case(p) {
        // The matched prefix is pure ASCII, so the boundary is valid.
        Some(&line[p.len()..])
    } else {
        None
    }
}

/// Normalize a captured header value: trim, drop surrounding quotes, clean.
fn header_value(rest: &str) -> String {
    clean_text(rest.trim().trim_matches('"'))
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`.
pub(crate) fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let n = needle.as_bytes();
    if n.is_empty() {
        return Some(0);
    }
    let h = haystack.as_bytes();
    if n.len() > h.len() {
        return None;
    }
    h.windows(n.len()).position(|w| w.eq_ignore_ascii_case(n))
}

/// ASCII case-insensitive substring test.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    find_ci(haystack, needle).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TerminationRule, DISCLAIMER_MARKER};

    fn rules() -> Vec<TerminationRule> {
        TerminationRule::defaults()
    }

    #[test]
    fn basic_message_parsed() {
        let text = "From: A\nTo: B\nSent: Jan 1 2020\nSubject: Hi\nBody line one\nBody line two";
        let msg = scan_message(text, &rules()).unwrap();
        assert_eq!(msg.from, "A");
        assert_eq!(msg.to, "B");
        assert_eq!(msg.sent, "2020-01-01T00:00:00+00:00");
        assert_eq!(msg.subject, "Hi");
        assert_eq!(msg.content, "Body line one Body line two");
    }

    #[test]
    fn first_occurrence_wins_per_field() {
        let text = "From: First\nTo: B\nSent: Jan 1 2020\nFrom: Second\nTo: C\nSent: Feb 2 2021\nSubject: real\nSubject: quoted";
        let msg = scan_message(text, &rules()).unwrap();
        assert_eq!(msg.from, "First");
        assert_eq!(msg.to, "B");
        assert_eq!(msg.sent, "2020-01-01T00:00:00+00:00");
        assert_eq!(msg.subject, "real");
    }

    #[test]
    fn header_prefixed_lines_after_triplet_excluded_from_content() {
        let text = "From: A\nTo: B\nSent: Jan 1 2020\nbody\nFrom: quoted sender\nmore body";
        let msg = scan_message(text, &rules()).unwrap();
        assert_eq!(msg.content, "body more body");
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let text = "FROM: A\nto: B\nDATE: Jan 1 2020\nSUBJECT: Hi\nbody";
        let msg = scan_message(text, &rules()).unwrap();
        assert_eq!(msg.from, "A");
        assert_eq!(msg.to, "B");
        assert_eq!(msg.sent, "2020-01-01T00:00:00+00:00");
        assert_eq!(msg.content, "body");
    }

    #[test]
    fn surrounding_quotes_stripped() {
        let text = "From: \"Alice\"\nTo: \"Bob\"\nSent: Jan 1 2020\nbody";
        let msg = scan_message(text, &rules()).unwrap();
        assert_eq!(msg.from, "Alice");
        assert_eq!(msg.to, "Bob");
    }

    #[test]
    fn unparseable_date_kept_raw() {
        let text = "From: A\nTo: B\nSent: sometime last spring\nbody";
        let msg = scan_message(text, &rules()).unwrap();
        assert_eq!(msg.sent, "sometime last spring");
    }

    #[test]
    fn content_before_complete_triplet_discarded() {
        let text = "From: A\nearly line\nTo: B\nanother early line\nSent: Jan 1 2020\nreal body";
        let msg = scan_message(text, &rules()).unwrap();
        assert_eq!(msg.content, "real body");
    }

    #[test]
    fn missing_to_yields_none() {
        let text = "From: A\nSent: Jan 1 2020\nbody";
        assert!(scan_message(text, &rules()).is_none());
    }

    #[test]
    fn missing_sent_yields_none() {
        let text = "From: A\nTo: B\nSubject: Hi\nbody";
        assert!(scan_message(text, &rules()).is_none());
    }

    #[test]
    fn empty_text_yields_none() {
        assert!(scan_message("", &rules()).is_none());
    }

    #[test]
    fn reply_quote_rule_stops_scan() {
        let text = "From: Kronprinsessen\nTo: B\nSent: Jan 1 2020\nreal body\nDen 3. mars skrev han:\nquoted reply text";
        let msg = scan_message(text, &rules()).unwrap();
        assert_eq!(msg.content, "real body");
    }

    #[test]
    fn reply_quote_rule_needs_both_words() {
        // "den" alone is an ordinary Norwegian word; without "skrev" the
        // line is body text.
        let text = "From: Kronprinsessen\nTo: B\nSent: Jan 1 2020\nden lange dagen\nmore body";
        let msg = scan_message(text, &rules()).unwrap();
        assert_eq!(msg.content, "den lange dagen more body");
    }

    #[test]
    fn reply_quote_rule_scoped_to_sender() {
        let text = "From: Someone Else\nTo: B\nSent: Jan 1 2020\nDen 3. mars skrev han:\nstill body";
        let msg = scan_message(text, &rules()).unwrap();
        assert_eq!(msg.content, "Den 3. mars skrev han: still body");
    }

    #[test]
    fn disclaimer_rule_stops_scan_on_either_marker() {
        let asterisks = "From: J. Epstein\nTo: B\nSent: Jan 1 2020\nbody\n****************************************************\nlegal text";
        let msg = scan_message(asterisks, &rules()).unwrap();
        assert_eq!(msg.content, "body");

        let sentence = "From: J. Epstein\nTo: B\nSent: Jan 1 2020\nbody\nThe information contained in this communication is confidential\nlegal text";
        let msg = scan_message(sentence, &rules()).unwrap();
        assert_eq!(msg.content, "body");
    }

    #[test]
    fn termination_before_triplet_complete_drops_record() {
        // The rule fires while Sent is still missing; the scan stops and the
        // incomplete record is discarded.
        let text = "From: Epstein\nTo: B\nThe information contained in this communication is\nSent: Jan 1 2020";
        assert!(scan_message(text, &rules()).is_none());
    }

    #[test]
    fn truncate_cuts_at_marker() {
        let markers = vec![DISCLAIMER_MARKER.to_string()];
        let content = "real text The Information Contained In This Communication Is privileged";
        assert_eq!(truncate_disclaimer(content, &markers), "real text");
    }

    #[test]
    fn truncate_without_marker_is_identity() {
        let markers = vec![DISCLAIMER_MARKER.to_string()];
        assert_eq!(truncate_disclaimer("plain body", &markers), "plain body");
    }

    #[test]
    fn truncate_uses_earliest_marker() {
        let markers = vec!["beta".to_string(), "alpha".to_string()];
        assert_eq!(truncate_disclaimer("keep alpha then beta", &markers), "keep");
    }

    #[test]
    fn find_ci_basics() {
        assert_eq!(find_ci("Hello World", "world"), Some(6));
        assert_eq!(find_ci("Hello", "xyz"), None);
        assert_eq!(find_ci("short", "much longer needle"), None);
    }
}
