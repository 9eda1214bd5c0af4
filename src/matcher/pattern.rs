//! URL pattern compilation.

use crate::request::Request;
use crate::Result;
use regex::Regex;

/// Matches any run of characters, including none and including newlines.
const ANY_SEQUENCE: &str = r"[\s\S]*";

/// A compiled URL matcher.
///
/// Built from a literal URL, a wildcard string (`*` matches any run of
/// characters), or a caller-supplied [`Regex`]. Wildcard patterns are
/// anchored at the end only, so `"/api/users"` matches
/// `"https://example.com/api/users"`.
///
/// Two patterns are the same registration iff [`Pattern::as_str`] is equal.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a literal or wildcard string.
    ///
    /// Every regex metacharacter is taken literally except `*`.
    pub fn wildcard(input: &str) -> Result<Self> {
        let mut source = input
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(ANY_SEQUENCE);
        source.push('$');
        Ok(Pattern {
            regex: Regex::new(&source)?,
        })
    }

    /// Canonical form used for identity comparisons.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Check a URL against this pattern.
    ///
    /// A URL equal to the canonical form also matches, so a caller-supplied
    /// regex source can be used as a literal key.
    pub fn matches(&self, url: &str) -> bool {
        self.as_str() == url || self.regex.is_match(url)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Pattern { regex }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Anything that can be compiled into a [`Pattern`].
pub trait IntoPattern {
    fn into_pattern(self) -> Result<Pattern>;
}

impl IntoPattern for Pattern {
    fn into_pattern(self) -> Result<Pattern> {
        Ok(self)
    }
}

impl IntoPattern for Regex {
    fn into_pattern(self) -> Result<Pattern> {
        Ok(Pattern::from(self))
    }
}

impl IntoPattern for &str {
    fn into_pattern(self) -> Result<Pattern> {
        Pattern::wildcard(self)
    }
}

impl IntoPattern for String {
    fn into_pattern(self) -> Result<Pattern> {
        Pattern::wildcard(&self)
    }
}

impl IntoPattern for &String {
    fn into_pattern(self) -> Result<Pattern> {
        Pattern::wildcard(self)
    }
}

/// A request's URL, taken as a literal pattern.
impl IntoPattern for &Request {
    fn into_pattern(self) -> Result<Pattern> {
        Pattern::wildcard(self.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_source() {
        assert_eq!(Pattern::wildcard("/api/*").unwrap().as_str(), r"/api/[\s\S]*$");
        assert_eq!(
            Pattern::wildcard("/api/*/users").unwrap().as_str(),
            r"/api/[\s\S]*/users$"
        );
        assert_eq!(
            Pattern::wildcard("/api/**/users").unwrap().as_str(),
            r"/api/[\s\S]*[\s\S]*/users$"
        );
        assert_eq!(
            Pattern::wildcard("/api/v1/users/:id").unwrap().as_str(),
            r"/api/v1/users/:id$"
        );
    }

    #[test]
    fn test_trailing_wildcard() {
        let pattern = Pattern::wildcard("/api/*").unwrap();
        assert!(pattern.matches("/api/anything"));
        assert!(pattern.matches("/api/"));
        assert!(pattern.matches("https://example.com/api/a/b?c=d"));
        assert!(!pattern.matches("/ap/x"));
    }

    #[test]
    fn test_inner_wildcard() {
        let pattern = Pattern::wildcard("/api/*/users").unwrap();
        assert!(pattern.matches("/api/123/users"));
        assert!(pattern.matches("/api//users"));
        assert!(!pattern.matches("/api/123/users/1"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let pattern = Pattern::wildcard("https://x.test/search?q=(a+b)").unwrap();
        assert!(pattern.matches("https://x.test/search?q=(a+b)"));
        assert!(!pattern.matches("https://xxtest/search?q=(a+b)"));
        assert!(!pattern.matches("https://x.test/searchXq=(aab)"));
    }

    #[test]
    fn test_anchored_at_end_only() {
        let pattern = Pattern::wildcard("/api/users").unwrap();
        assert!(pattern.matches("https://example.com/api/users"));
        assert!(!pattern.matches("https://example.com/api/users/1"));
    }

    #[test]
    fn test_regex_passes_through() {
        let regex = Regex::new(r"/api/v1/users/\d+").unwrap();
        let pattern = regex.clone().into_pattern().unwrap();
        assert_eq!(pattern.as_str(), regex.as_str());
        assert!(pattern.matches("https://example.com/api/v1/users/1"));
        assert!(!pattern.matches("https://example.com/api/v1/users/me"));
    }

    #[test]
    fn test_canonical_form_matches_literally() {
        let pattern = Pattern::from(Regex::new(r"^exact$").unwrap());
        assert!(pattern.matches("^exact$"));
        assert!(pattern.matches("exact"));
    }

    #[test]
    fn test_equality_by_canonical_form() {
        assert_eq!(
            Pattern::wildcard("/a/*").unwrap(),
            Pattern::from(Regex::new(r"/a/[\s\S]*$").unwrap())
        );
        assert_ne!(Pattern::wildcard("/a/*").unwrap(), Pattern::wildcard("/a/b").unwrap());
    }
}
