// src/text/links.rs
// =============================================================================
// This module finds the links to crawl next inside converted page text.
//
// After html.rs has run, a link looks like: [Shipping](https://site/shipping)
// We only recognise the part in parentheses, and only when it is an
// absolute http:// or https:// URL:
//
//   "(https://a.test/x)"   -> "https://a.test/x"
//   "(/relative/path)"     -> ignored
//   "(ftp://a.test/file)"  -> ignored
//
// This rule is deliberately narrow. Links written any other way are not
// discovered, and that is the expected behaviour.
//
// Rust concepts:
// - Regex: compiled once and reused
// - HashSet: to drop duplicates while keeping first-seen order
// =============================================================================

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

// (http://...) or (https://...) up to the first closing parenthesis
fn parenthesized_url() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // The pattern is a constant, so a parse failure is a programmer error
    PATTERN.get_or_init(|| Regex::new(r"\((https?://[^)]+)\)").expect("link pattern is valid"))
}

/// Extracts the URLs wrapped in parentheses from `text`.
///
/// Duplicates are removed, keeping the first occurrence. When `prefix` is
/// given, only URLs whose string starts with it are returned.
///
/// Example:
///   text = "[a](https://a.test/x) [b](https://b.test/y) [a](https://a.test/x)"
///   prefix = Some("https://a.test")
///   result = ["https://a.test/x"]
pub fn find_links(text: &str, prefix: Option<&str>) -> Vec<String> {
    let mut seen = HashSet::new();

    parenthesized_url()
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str())
        .filter(|url| prefix.map_or(true, |p| url.starts_with(p)))
        .filter(|url| seen.insert(*url))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_markdown_style_links() {
        let text = "Check [Returns](https://a.test/returns) and [Help](http://a.test/help).";
        assert_eq!(
            find_links(text, None),
            vec!["https://a.test/returns", "http://a.test/help"]
        );
    }

    #[test]
    fn test_ftp_decoy_is_ignored() {
        assert!(find_links("see (ftp://x.com)", None).is_empty());
    }

    #[test]
    fn test_bare_and_relative_urls_are_ignored() {
        let text = "visit https://a.test/bare or [docs](/docs) or <https://a.test/angle>";
        assert!(find_links(text, None).is_empty());
    }

    #[test]
    fn test_duplicates_are_removed_in_order() {
        let text = "(https://a.test/2) (https://a.test/1) (https://a.test/2)";
        assert_eq!(
            find_links(text, None),
            vec!["https://a.test/2", "https://a.test/1"]
        );
    }

    #[test]
    fn test_prefix_filter() {
        let text = "(https://a.test/x) (https://b.test/y)";
        assert_eq!(find_links(text, Some("https://a.test")), vec!["https://a.test/x"]);
        assert!(find_links(text, Some("https://c.test")).is_empty());
    }

    #[test]
    fn test_unclosed_parenthesis_is_ignored() {
        assert!(find_links("(https://a.test/never-closed", None).is_empty());
    }
}
