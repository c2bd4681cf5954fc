//! URL pattern matching.

use crate::types::rule::UrlPattern;
use regex::Regex;

/// Test a rule pattern against a request URL.
///
/// Compiled patterns are tested directly against the full URL. A literal
/// containing `*` is translated so each `*` matches zero or more characters.
/// Any other literal matches by unanchored substring containment — a loose
/// policy that lets route templates match concrete paths.
pub fn url_matches(pattern: &UrlPattern, url: &str) -> bool {
    match pattern {
        UrlPattern::Pattern(regex) => regex.is_match(url),
        UrlPattern::Literal(literal) if literal.contains('*') => wildcard_matches(literal, url),
        UrlPattern::Literal(literal) => url.contains(literal.as_str()),
    }
}

fn wildcard_matches(pattern: &str, url: &str) -> bool {
    let regex_str = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&regex_str)
        .expect("escaped pattern is a valid regex")
        .is_match(url)
}
