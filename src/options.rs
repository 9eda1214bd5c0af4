//! Mock options: what a mock matches and how it responds.

use crate::body::Body;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Options for a mocked request.
///
/// `method` and `headers` describe the requests the mock accepts; `response`
/// describes what it returns. `data` is kept as a legacy alias for
/// `response.data`.
#[derive(Debug, Clone)]
pub struct MockOptions {
    /// Request method, case-insensitive. Defaults to `GET`.
    pub method: String,
    /// Headers a request must carry, with exact values.
    pub headers: BTreeMap<String, String>,
    /// Legacy body, used when `response.data` is unset.
    pub data: Option<Body>,
    pub response: Option<ResponseOptions>,
    /// Error raised instead of responding.
    pub throw: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

/// The response part of [`MockOptions`].
#[derive(Debug, Clone, Default)]
pub struct ResponseOptions {
    pub data: Option<Body>,
    /// Defaults to 200.
    pub status: Option<u16>,
    pub headers: Option<BTreeMap<String, String>>,
}

impl Default for MockOptions {
    fn default() -> Self {
        MockOptions {
            method: "GET".to_string(),
            headers: BTreeMap::new(),
            data: None,
            response: None,
            throw: None,
        }
    }
}

impl MockOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request method to match.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Require a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the legacy `data` body.
    pub fn with_data(mut self, data: impl Into<Body>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the response body.
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.response_mut().data = Some(body.into());
        self
    }

    /// Set the response status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.response_mut().status = Some(status);
        self
    }

    /// Add a response header.
    pub fn with_response_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.response_mut()
            .headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Raise `error` instead of responding.
    pub fn with_throw<E>(mut self, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.throw = Some(Arc::new(error));
        self
    }

    /// Raise an already shared error instead of responding.
    pub fn with_throw_arc(mut self, error: Arc<dyn std::error::Error + Send + Sync>) -> Self {
        self.throw = Some(error);
        self
    }

    /// Response status, 200 unless set.
    pub fn status(&self) -> u16 {
        self.response
            .as_ref()
            .and_then(|r| r.status)
            .unwrap_or(200)
    }

    /// Response body: `response.data`, then `data`, then empty.
    pub fn body(&self) -> &Body {
        static EMPTY: Body = Body::Empty;
        self.response
            .as_ref()
            .and_then(|r| r.data.as_ref())
            .or(self.data.as_ref())
            .unwrap_or(&EMPTY)
    }

    /// Response headers: `response.headers`, then the request `headers`.
    pub fn response_headers(&self) -> &BTreeMap<String, String> {
        self.response
            .as_ref()
            .and_then(|r| r.headers.as_ref())
            .unwrap_or(&self.headers)
    }

    fn response_mut(&mut self) -> &mut ResponseOptions {
        self.response.get_or_insert_with(ResponseOptions::default)
    }
}

impl From<ResponseOptions> for MockOptions {
    fn from(response: ResponseOptions) -> Self {
        MockOptions {
            response: Some(response),
            ..Default::default()
        }
    }
}
