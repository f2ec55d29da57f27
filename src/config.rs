//! Configuration for the extraction stage.
//!
//! All extraction behaviour is controlled through [`ExtractConfig`], built
//! via its [`ExtractConfigBuilder`]. The library reads no environment
//! variables and keeps no global state; everything the driver needs arrives
//! through this struct, so two runs with the same config and inputs produce
//! the same CSV.
//!
//! # Termination rules as data
//! The source dataset needed two hard-coded heuristics to stop scanning when
//! a quoted/forwarded sub-message begins. Those live here as a pluggable
//! list of [`TerminationRule`]s rather than literals inside the scanner, so
//! new datasets can extend the set without touching scan logic.

use crate::error::MailLogError;
use crate::pipeline::pdftext::TextExtractor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Disclaimer fragment that both the default epstein rule and the post-scan
/// truncation pass look for.
pub(crate) const DISCLAIMER_MARKER: &str =
    "the information contained in this communication is";

/// Long asterisk run that opens the same boilerplate disclaimer block.
pub(crate) const DISCLAIMER_RULE: &str =
    "****************************************************";

/// How a rule's line markers combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// Every marker must appear in the line.
    #[default]
    All,
    /// At least one marker must appear in the line.
    Any,
}

/// A scan-termination heuristic: stop reading lines when a known sender's
/// message runs into the start of a quoted reply or a boilerplate block.
///
/// A rule fires when the already-captured From value contains
/// `sender_contains` (case-insensitive) and the current line contains its
/// `line_markers` per `mode`. Matching is ASCII case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationRule {
    /// Substring of the sender (From) that scopes this rule.
    pub sender_contains: String,
    /// Substrings to look for in the scanned line.
    pub line_markers: Vec<String>,
    /// Whether all markers or any single marker triggers the rule.
    pub mode: MatchMode,
}

impl TerminationRule {
    /// Rule that fires when the line contains **all** markers.
    pub fn all(
        sender_contains: impl Into<String>,
        line_markers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            sender_contains: sender_contains.into(),
            line_markers: line_markers.into_iter().map(Into::into).collect(),
            mode: MatchMode::All,
        }
    }

    /// Rule that fires when the line contains **any** marker.
    pub fn any(
        sender_contains: impl Into<String>,
        line_markers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            sender_contains: sender_contains.into(),
            line_markers: line_markers.into_iter().map(Into::into).collect(),
            mode: MatchMode::Any,
        }
    }

    /// Does this rule fire for the given sender on the given line?
    ///
    /// Never fires while the sender is still unknown (empty).
    pub fn matches(&self, sender: &str, line: &str) -> bool {
        use crate::pipeline::scan::contains_ci;

        if !contains_ci(sender, &self.sender_contains) {
            return false;
        }
        match self.mode {
            MatchMode::All => self.line_markers.iter().all(|m| contains_ci(line, m)),
            MatchMode::Any => self.line_markers.iter().any(|m| contains_ci(line, m)),
        }
    }

    /// The built-in rules for the originating dataset.
    ///
    /// 1. Replies sent by the crown princess carry a Norwegian quote line
    ///    ("Den … skrev …") that marks the start of the quoted message.
    /// 2. Epstein's messages append a legal disclaimer, opened either by a
    ///    long asterisk run or by the disclaimer's first sentence.
    pub fn defaults() -> Vec<TerminationRule> {
        vec![
            TerminationRule::all("kronprinsessen", ["den", "skrev"]),
            TerminationRule::any("epstein", [DISCLAIMER_RULE, DISCLAIMER_MARKER]),
        ]
    }
}

/// Configuration for a directory extraction run.
///
/// Built via [`ExtractConfig::builder()`] or [`ExtractConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf_maillog::{ExtractConfig, TerminationRule};
///
/// let config = ExtractConfig::builder()
///     .termination_rule(TerminationRule::any("legal", ["confidentiality notice"]))
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractConfig {
    /// Scan-termination heuristics, checked in order for every non-header
    /// line. Default: [`TerminationRule::defaults()`].
    pub termination_rules: Vec<TerminationRule>,

    /// Substrings that cut a record's Content at the point they appear
    /// (case-insensitive). Applied after the scan, independently of any
    /// termination rule that may have already stopped it. Default: the
    /// communication disclaimer's first sentence.
    pub disclaimer_markers: Vec<String>,

    /// Pre-constructed text extractor. Defaults to the `pdf_extract`-backed
    /// backend; tests inject a fake here.
    pub extractor: Option<Arc<dyn TextExtractor>>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            termination_rules: TerminationRule::defaults(),
            disclaimer_markers: vec![DISCLAIMER_MARKER.to_string()],
            extractor: None,
        }
    }
}

impl fmt::Debug for ExtractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractConfig")
            .field("termination_rules", &self.termination_rules)
            .field("disclaimer_markers", &self.disclaimer_markers)
            .field(
                "extractor",
                &self.extractor.as_ref().map(|_| "<dyn TextExtractor>"),
            )
            .finish()
    }
}

impl ExtractConfig {
    /// Create a new builder for `ExtractConfig`.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractConfig`].
#[derive(Debug)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    /// Append a termination rule to the current set.
    pub fn termination_rule(mut self, rule: TerminationRule) -> Self {
        self.config.termination_rules.push(rule);
        self
    }

    /// Replace the termination rule set entirely.
    pub fn termination_rules(mut self, rules: Vec<TerminationRule>) -> Self {
        self.config.termination_rules = rules;
        self
    }

    /// Append a disclaimer truncation marker.
    pub fn disclaimer_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.disclaimer_markers.push(marker.into());
        self
    }

    /// Replace the disclaimer marker set entirely.
    pub fn disclaimer_markers(mut self, markers: Vec<String>) -> Self {
        self.config.disclaimer_markers = markers;
        self
    }

    /// Use a caller-provided text extractor instead of the default backend.
    pub fn extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.config.extractor = Some(extractor);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractConfig, MailLogError> {
        for rule in &self.config.termination_rules {
            if rule.sender_contains.trim().is_empty() {
                return Err(MailLogError::InvalidConfig(
                    "Termination rule has an empty sender substring".into(),
                ));
            }
            if rule.line_markers.is_empty()
                || rule.line_markers.iter().any(|m| m.trim().is_empty())
            {
                return Err(MailLogError::InvalidConfig(format!(
                    "Termination rule for sender '{}' has empty line markers",
                    rule.sender_contains
                )));
            }
        }
        if self
            .config
            .disclaimer_markers
            .iter()
            .any(|m| m.trim().is_empty())
        {
            return Err(MailLogError::InvalidConfig(
                "Disclaimer markers must be non-empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_both_dataset_rules() {
        let rules = TerminationRule::defaults();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].mode, MatchMode::All);
        assert_eq!(rules[1].mode, MatchMode::Any);
    }

    #[test]
    fn builder_appends_rule() {
        let config = ExtractConfig::builder()
            .termination_rule(TerminationRule::any("legal", ["notice"]))
            .build()
            .unwrap();
        assert_eq!(config.termination_rules.len(), 3);
    }

    #[test]
    fn empty_sender_rejected() {
        let err = ExtractConfig::builder()
            .termination_rule(TerminationRule::any("  ", ["x"]))
            .build()
            .unwrap_err();
        assert!(matches!(err, MailLogError::InvalidConfig(_)));
    }

    #[test]
    fn empty_marker_rejected() {
        let err = ExtractConfig::builder()
            .termination_rule(TerminationRule::all("someone", Vec::<String>::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, MailLogError::InvalidConfig(_)));
    }

    #[test]
    fn empty_disclaimer_marker_rejected() {
        let err = ExtractConfig::builder()
            .disclaimer_marker("")
            .build()
            .unwrap_err();
        assert!(matches!(err, MailLogError::InvalidConfig(_)));
    }
}
