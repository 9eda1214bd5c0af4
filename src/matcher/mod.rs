//! Request matching logic.

mod pattern;

pub use pattern::{IntoPattern, Pattern};

use crate::request::Request;
use std::collections::BTreeMap;

/// Trait for matching requests.
pub trait Matcher: Send + Sync {
    /// Check if this matcher matches the given request.
    fn matches(&self, request: &Request) -> bool;
}

/// What a mock requires of a request: URL pattern, method and headers.
///
/// Two matchers are equal when their canonical pattern, method and header
/// requirements are equal. This is the identity of a registered mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMatcher {
    pattern: Pattern,
    method: String,
    headers: BTreeMap<String, String>,
}

impl RequestMatcher {
    /// `method` is compared case-insensitively; header names are
    /// case-insensitive, header values exact.
    pub fn new(pattern: Pattern, method: &str, headers: &BTreeMap<String, String>) -> Self {
        RequestMatcher {
            pattern,
            method: method.to_ascii_uppercase(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v.clone()))
                .collect(),
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }
}

impl Matcher for Pattern {
    fn matches(&self, request: &Request) -> bool {
        Pattern::matches(self, request.url())
    }
}

impl Matcher for RequestMatcher {
    fn matches(&self, request: &Request) -> bool {
        Matcher::matches(&self.pattern, request)
            && method_matches(&self.method, request)
            && headers_match(&self.headers, request)
    }
}

fn method_matches(expected: &str, request: &Request) -> bool {
    request.method().as_str().eq_ignore_ascii_case(expected)
}

/// Every required header must be present with an equal value. Extra request
/// headers are ignored.
fn headers_match(expected: &BTreeMap<String, String>, request: &Request) -> bool {
    expected
        .iter()
        .all(|(name, value)| request.header(name).as_deref() == Some(value.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn matcher(pattern: &str, method: &str, headers: &[(&str, &str)]) -> RequestMatcher {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RequestMatcher::new(Pattern::wildcard(pattern).unwrap(), method, &headers)
    }

    #[test]
    fn test_method_is_case_insensitive() {
        let m = matcher("/api/users", "post", &[]);
        let request = Request::new("http://localhost/api/users").with_method(Method::POST);
        assert!(m.matches(&request));
    }

    #[test]
    fn test_method_mismatch() {
        let m = matcher("/api/users", "GET", &[]);
        let request = Request::new("http://localhost/api/users").with_method(Method::POST);
        assert!(!m.matches(&request));
    }

    #[test]
    fn test_headers_subset() {
        let m = matcher("/api/users", "GET", &[("X-Foo", "bar")]);

        let extra = Request::new("http://localhost/api/users")
            .with_header("x-foo", "bar")
            .unwrap()
            .with_header("x-extra", "1")
            .unwrap();
        assert!(m.matches(&extra));

        let wrong = Request::new("http://localhost/api/users")
            .with_header("x-foo", "baz")
            .unwrap();
        assert!(!m.matches(&wrong));

        let missing = Request::new("http://localhost/api/users");
        assert!(!m.matches(&missing));
    }

    #[test]
    fn test_no_required_headers_matches_any() {
        let m = matcher("/api/users", "GET", &[]);
        let request = Request::new("http://localhost/api/users")
            .with_header("x-foo-bar", "baz")
            .unwrap();
        assert!(m.matches(&request));
    }

    #[test]
    fn test_identity() {
        assert_eq!(
            matcher("/a", "get", &[("X-A", "1")]),
            matcher("/a", "GET", &[("x-a", "1")])
        );
        assert_ne!(matcher("/a", "GET", &[]), matcher("/a", "POST", &[]));
        assert_ne!(matcher("/a", "GET", &[]), matcher("/a", "GET", &[("x-a", "1")]));
        assert_ne!(matcher("/a", "GET", &[]), matcher("/b", "GET", &[]));
    }
}
