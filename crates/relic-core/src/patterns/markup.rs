//! Markup extraction - link, form, script, and image inventory for markup
//! documents

use once_cell::sync::Lazy;
use regex::Regex;

use super::first_occurrence_line;
use super::types::{MarkupElement, MarkupKind};

static LINK_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<a\s[^>]*href\s*=\s*['"]([^'"]+)['"]"#).unwrap());

static FORM_ACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<form\s[^>]*action\s*=\s*['"]([^'"]+)['"]"#).unwrap());

static SCRIPT_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<script\s[^>]*src\s*=\s*['"]([^'"]+)['"]"#).unwrap());

static IMG_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<img\s[^>]*src\s*=\s*['"]([^'"]+)['"]"#).unwrap());

/// Inventories navigational and embedded elements in markup
pub struct MarkupExtractor;

impl MarkupExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> Vec<MarkupElement> {
        let detectors: [(&Regex, MarkupKind); 4] = [
            (&*LINK_HREF, MarkupKind::Link),
            (&*FORM_ACTION, MarkupKind::Form),
            (&*SCRIPT_SRC, MarkupKind::Script),
            (&*IMG_SRC, MarkupKind::Image),
        ];

        let mut elements = Vec::new();
        for (re, kind) in detectors {
            for cap in re.captures_iter(text) {
                let target = cap[1].trim().to_string();
                let line = first_occurrence_line(text, &target);
                elements.push(MarkupElement { kind, target, line });
            }
        }
        elements
    }
}

impl Default for MarkupExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_inventory() {
        let extractor = MarkupExtractor::new();
        let text = r#"
            <a href="/orders/list.php">orders</a>
            <form action="save.php" method="post"></form>
            <script src="js/app.js"></script>
            <img src="img/logo.png" alt="logo">
        "#;
        let elements = extractor.extract(text);
        assert_eq!(elements.len(), 4);
        assert!(elements
            .iter()
            .any(|e| e.kind == MarkupKind::Link && e.target == "/orders/list.php"));
        assert!(elements
            .iter()
            .any(|e| e.kind == MarkupKind::Form && e.target == "save.php"));
        assert!(elements
            .iter()
            .any(|e| e.kind == MarkupKind::Script && e.target == "js/app.js"));
        assert!(elements
            .iter()
            .any(|e| e.kind == MarkupKind::Image && e.target == "img/logo.png"));
    }
}
