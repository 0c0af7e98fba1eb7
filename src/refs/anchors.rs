//! Anchor extraction
//!
//! Recognized declarations:
//! - `[[name]]` / `[[name, label]]`
//! - `* [[[name]]]` / `- [[[name, label]]]` (bibliography entries)
//! - `[#name]`
//! - `anchor:name[label]`

use once_cell::sync::Lazy;
use regex::Regex;

/// Format: [[name]] or [[name, label]]
static BRACKET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\[\]]+)\]\]").expect("Invalid BRACKET_RE regex"));

/// Format: * [[[name]]] at the start of a list item
static BIBLIOGRAPHY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[*-]\s+\[\[\[([^\[\]]+)\]\]\]").expect("Invalid BIBLIOGRAPHY_RE regex")
});

/// Format: [#name]
static INLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[#([^\]]*)\]").expect("Invalid INLINE_RE regex"));

/// Format: anchor:name[label]
static MACRO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"anchor:([^\[]*)\[").expect("Invalid MACRO_RE regex"));

/// Strip an optional `, label` suffix and surrounding whitespace
pub(crate) fn strip_label(raw: &str) -> &str {
    raw.split(',').next().unwrap_or(raw).trim()
}

/// Extract every anchor name declared on a line, in syntax order
pub fn extract_anchors(line: &str) -> Vec<String> {
    let mut names = Vec::new();

    for caps in BRACKET_RE.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        // `[[[` belongs to a bibliography anchor
        if line[..whole.start()].ends_with('[') {
            continue;
        }
        names.push(strip_label(inner.as_str()));
    }

    if let Some(inner) = BIBLIOGRAPHY_RE.captures(line).and_then(|c| c.get(1)) {
        names.push(strip_label(inner.as_str()));
    }

    for caps in INLINE_RE.captures_iter(line) {
        if let Some(inner) = caps.get(1) {
            names.push(strip_label(inner.as_str()));
        }
    }

    for caps in MACRO_RE.captures_iter(line) {
        if let Some(inner) = caps.get(1) {
            names.push(inner.as_str().trim());
        }
    }

    names
        .into_iter()
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_anchor() {
        assert_eq!(extract_anchors("[[intro]]"), vec!["intro"]);
    }

    #[test]
    fn test_bracket_anchor_with_label() {
        assert_eq!(extract_anchors("[[intro, Introduction]]"), vec!["intro"]);
    }

    #[test]
    fn test_multiple_bracket_anchors() {
        assert_eq!(
            extract_anchors("text [[a]] more [[b,B]] end"),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_bibliography_anchor() {
        assert_eq!(extract_anchors("* [[[pp]]] Andy Hunt"), vec!["pp"]);
        assert_eq!(extract_anchors("  - [[[gof, GoF]]] Gang of Four"), vec!["gof"]);
    }

    #[test]
    fn test_triple_bracket_outside_list_ignored() {
        assert!(extract_anchors("see [[[pp]]] here").is_empty());
    }

    #[test]
    fn test_inline_anchor() {
        assert_eq!(extract_anchors("[#install]"), vec!["install"]);
        assert_eq!(extract_anchors("== Install [#setup]"), vec!["setup"]);
    }

    #[test]
    fn test_macro_anchor() {
        assert_eq!(extract_anchors("anchor:step1[First step]"), vec!["step1"]);
        assert_eq!(extract_anchors("anchor:empty-label[]"), vec!["empty-label"]);
    }

    #[test]
    fn test_mixed_syntaxes_on_one_line() {
        assert_eq!(
            extract_anchors("[[a]] [#b] anchor:c[]"),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_references_are_not_anchors() {
        assert!(extract_anchors("See <<intro>> and xref:other.adoc#x[X].").is_empty());
    }

    #[test]
    fn test_empty_names_dropped() {
        assert!(extract_anchors("[#] [[ ]]").is_empty());
    }
}
