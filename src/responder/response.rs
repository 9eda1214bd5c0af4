//! Response values returned by transports.

use crate::{Error, Result};
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// An HTTP response, either synthesized from a mock or received from the
/// real transport.
pub struct Response {
    status: StatusCode,
    url: String,
    headers: HeaderMap,
    redirected: bool,
    payload: Payload,
}

enum Payload {
    Full(Bytes),
    Streaming(BoxStream<'static, Result<Bytes>>),
}

impl Response {
    /// A response with a fully buffered body.
    pub fn new(status: StatusCode, url: impl Into<String>, headers: HeaderMap, body: Bytes) -> Self {
        Response {
            status,
            url: url.into(),
            headers,
            redirected: false,
            payload: Payload::Full(body),
        }
    }

    /// A response whose body is produced by a stream of chunks.
    pub fn streaming(
        status: StatusCode,
        url: impl Into<String>,
        headers: HeaderMap,
        body: BoxStream<'static, Result<Bytes>>,
    ) -> Self {
        Response {
            status,
            url: url.into(),
            headers,
            redirected: false,
            payload: Payload::Streaming(body),
        }
    }

    /// Wrap a response from the real transport without buffering it.
    pub(crate) fn from_reqwest(response: reqwest::Response, redirected: bool) -> Self {
        let status = response.status();
        let url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.bytes_stream().map_err(Error::from).boxed();
        let mut response = Response::streaming(status, url, headers, body);
        response.redirected = redirected;
        response
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// True for statuses in `200..300`.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether the response is the result of following a redirect.
    pub fn redirected(&self) -> bool {
        self.redirected
    }

    /// Read the whole body.
    pub async fn bytes(self) -> Result<Bytes> {
        match self.payload {
            Payload::Full(bytes) => Ok(bytes),
            Payload::Streaming(stream) => {
                let buf = stream
                    .try_fold(BytesMut::new(), |mut buf, chunk| async move {
                        buf.extend_from_slice(&chunk);
                        Ok(buf)
                    })
                    .await?;
                Ok(buf.freeze())
            }
        }
    }

    /// Read the whole body as text, replacing invalid UTF-8.
    pub async fn text(self) -> Result<String> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read the whole body and parse it as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let bytes = self.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Consume the body chunk by chunk.
    pub fn bytes_stream(self) -> BoxStream<'static, Result<Bytes>> {
        match self.payload {
            Payload::Full(bytes) if bytes.is_empty() => stream::empty().boxed(),
            Payload::Full(bytes) => stream::once(async move { Ok(bytes) }).boxed(),
            Payload::Streaming(stream) => stream,
        }
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = match &self.payload {
            Payload::Full(bytes) => format!("{} bytes", bytes.len()),
            Payload::Streaming(_) => "stream".to_string(),
        };
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("redirected", &self.redirected)
            .field("body", &body)
            .finish()
    }
}
