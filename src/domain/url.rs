use regex::Regex;
use std::sync::LazyLock;

/// Shape of an acceptable proof-of-payment URL: optional http(s) scheme, a
/// dotted host whose last label is alphabetic and at least two characters
/// long, then any path.
static URL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?://)?[A-Za-z0-9.-]+\.[A-Za-z]{2,}(/.*)?$").unwrap());

/// Syntactic check only: no reachability test, no verification that the URL
/// points at an actual transaction. Total and deterministic.
pub fn is_valid_url(candidate: &str) -> bool {
    URL_SHAPE.is_match(candidate)
}
