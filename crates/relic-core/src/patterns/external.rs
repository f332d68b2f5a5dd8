//! External access extraction - outward network/navigation references
//!
//! Independent channel detectors over raw text: fetch-like calls, HTTP-verb
//! client calls, ajax url options, XHR opens, absolute hyperlinks and form
//! actions, iframe sources, navigation assignments, server-side Location
//! redirects, and popup opens. Line numbers come from the first textual
//! occurrence of the target, not true source positions.

use once_cell::sync::Lazy;
use regex::Regex;

use super::first_occurrence_line;
use super::types::{AccessChannel, ExternalAccessRecord};

static FETCH_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bfetch\s*\(\s*['"]([^'"]+)['"]"#).unwrap());

static HTTP_VERB_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:axios|http|client)\s*\.\s*(?:get|post|put|delete|patch)\s*\(\s*['"]([^'"]+)['"]"#)
        .unwrap()
});

static AJAX_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)\.ajax\s*\(\s*\{[^}]*?url\s*:\s*['"]([^'"]+)['"]"#).unwrap());

static XHR_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\.open\s*\(\s*['"][A-Z]+['"]\s*,\s*['"]([^'"]+)['"]"#).unwrap());

static ABSOLUTE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<a\s[^>]*href\s*=\s*['"](https?://[^'"]+)['"]"#).unwrap());

static ABSOLUTE_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<form\s[^>]*action\s*=\s*['"](https?://[^'"]+)['"]"#).unwrap());

static IFRAME_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<iframe\s[^>]*src\s*=\s*['"]([^'"]+)['"]"#).unwrap());

static NAVIGATION_ASSIGN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:window\.|document\.)?location(?:\.href)?\s*=\s*['"]([^'"]+)['"]"#).unwrap()
});

static HEADER_LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bheader\s*\(\s*['"]Location:\s*([^'"]+)['"]"#).unwrap());

static WINDOW_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bwindow\.open\s*\(\s*['"]([^'"]+)['"]"#).unwrap());

/// Detects outward network and navigation references in raw text
pub struct ExternalAccessExtractor;

impl ExternalAccessExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> Vec<ExternalAccessRecord> {
        let detectors: [(&Regex, AccessChannel); 10] = [
            (&*FETCH_CALL, AccessChannel::ApiCall),
            (&*HTTP_VERB_CALL, AccessChannel::ApiCall),
            (&*AJAX_URL, AccessChannel::ApiCall),
            (&*XHR_OPEN, AccessChannel::ApiCall),
            (&*ABSOLUTE_LINK, AccessChannel::ExternalLink),
            (&*ABSOLUTE_FORM, AccessChannel::FormSubmission),
            (&*IFRAME_SRC, AccessChannel::IframeEmbed),
            (&*NAVIGATION_ASSIGN, AccessChannel::Redirect),
            (&*HEADER_LOCATION, AccessChannel::Redirect),
            (&*WINDOW_OPEN, AccessChannel::WindowOpen),
        ];

        let mut records = Vec::new();
        for (re, channel) in detectors {
            for cap in re.captures_iter(text) {
                let target = cap[1].trim().to_string();
                let line = first_occurrence_line(text, &target);
                records.push(ExternalAccessRecord {
                    channel,
                    target,
                    line,
                });
            }
        }
        records
    }
}

impl Default for ExternalAccessExtractor {
    fn default() -> Self {
        Self::new()
    }
}
