//! Outgoing request description.

use crate::{Error, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;

/// An outgoing HTTP request, as handed to a [`Transport`](crate::Transport).
///
/// Defaults to `GET` with no headers and no body.
#[derive(Debug, Clone)]
pub struct Request {
    url: String,
    method: Method,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl Request {
    /// Create a `GET` request for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Request {
            url: url.into(),
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Set the request method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Append a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::InvalidHeader(name.to_string()))?;
        let value =
            HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader(value.to_string()))?;
        self.headers.append(name, value);
        Ok(self)
    }

    /// Replace all headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// The value of a header as a single string.
    ///
    /// Repeated headers are joined with `", "`. Returns `None` when the header
    /// is absent or not valid UTF-8.
    pub fn header(&self, name: &str) -> Option<String> {
        let values: Option<Vec<&str>> = self
            .headers
            .get_all(name)
            .iter()
            .map(|v| v.to_str().ok())
            .collect();
        values.filter(|v| !v.is_empty()).map(|v| v.join(", "))
    }

    pub(crate) fn into_parts(self) -> (String, Method, HeaderMap, Option<Bytes>) {
        (self.url, self.method, self.headers, self.body)
    }
}

impl From<&str> for Request {
    fn from(url: &str) -> Self {
        Request::new(url)
    }
}

impl From<String> for Request {
    fn from(url: String) -> Self {
        Request::new(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = Request::new("https://example.com/api");
        assert_eq!(*request.method(), Method::GET);
        assert!(request.headers().is_empty());
        assert!(request.body().is_none());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = Request::new("https://example.com/api")
            .with_header("X-Foo", "bar")
            .unwrap();
        assert_eq!(request.header("x-foo").as_deref(), Some("bar"));
        assert_eq!(request.header("x-missing"), None);
    }

    #[test]
    fn test_repeated_headers_are_joined() {
        let request = Request::new("https://example.com/api")
            .with_header("accept", "text/html")
            .unwrap()
            .with_header("accept", "application/json")
            .unwrap();
        assert_eq!(
            request.header("accept").as_deref(),
            Some("text/html, application/json")
        );
    }

    #[test]
    fn test_invalid_header_name() {
        let result = Request::new("https://example.com").with_header("bad header", "x");
        assert!(matches!(result, Err(Error::InvalidHeader(_))));
    }
}
