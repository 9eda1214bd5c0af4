//! Response synthesis for matched mocks.

mod response;

pub use response::Response;

use crate::body::Body;
use crate::options::MockOptions;
use crate::{Error, Result};
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::{self, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use std::collections::BTreeMap;

const TEXT_CONTENT_TYPE: &str = "text/plain;charset=UTF-8";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";
const JSON_CONTENT_TYPE: &str = "application/json";
const MULTIPART_BOUNDARY: &str = "----mock-fetch-boundary";

/// Build the response a mock answers with.
///
/// Status and URL come from the caller; headers and body are resolved from
/// `options` (see [`MockOptions::response_headers`] and [`MockOptions::body`]).
/// A content type implied by the body is added only when none was declared.
/// File bodies are read here and nowhere else.
pub async fn synthesize(status: StatusCode, url: &str, options: &MockOptions) -> Result<Response> {
    let mut headers = header_map(options.response_headers())?;

    let body = match options.body() {
        Body::Empty => Bytes::new(),
        Body::Text(text) => {
            default_content_type(&mut headers, TEXT_CONTENT_TYPE);
            Bytes::from(text.clone())
        }
        Body::Binary(bytes) => bytes.clone(),
        Body::Form(params) => {
            default_content_type(&mut headers, FORM_CONTENT_TYPE);
            Bytes::from(serde_urlencoded::to_string(params)?)
        }
        Body::Multipart(fields) => {
            let boundary = multipart_boundary(fields);
            default_content_type(
                &mut headers,
                &format!("multipart/form-data; boundary={boundary}"),
            );
            encode_multipart(fields, &boundary)
        }
        Body::Stream(chunks) => {
            let chunks = chunks.clone();
            let body = stream::iter(chunks.into_iter().map(Ok)).boxed();
            return Ok(Response::streaming(status, url, headers, body));
        }
        Body::Json(value) => {
            default_content_type(&mut headers, JSON_CONTENT_TYPE);
            Bytes::from(serde_json::to_vec(value)?)
        }
        Body::File(path) => Bytes::from(tokio::fs::read(path).await?),
    };

    Ok(Response::new(status, url, headers, body))
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| Error::InvalidHeader(name.clone()))?;
        let value = HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader(value.clone()))?;
        map.append(name, value);
    }
    Ok(map)
}

fn default_content_type(headers: &mut HeaderMap, content_type: &str) {
    if headers.contains_key(CONTENT_TYPE) {
        return;
    }
    if let Ok(value) = HeaderValue::from_str(content_type) {
        headers.insert(CONTENT_TYPE, value);
    }
}

/// A multipart boundary that occurs in none of the field names or values.
fn multipart_boundary(fields: &[(String, String)]) -> String {
    let collides = |boundary: &str| {
        fields
            .iter()
            .any(|(name, value)| name.contains(boundary) || value.contains(boundary))
    };
    let mut boundary = MULTIPART_BOUNDARY.to_string();
    let mut attempt = 0u32;
    while collides(&boundary) {
        attempt += 1;
        boundary = format!("{MULTIPART_BOUNDARY}-{attempt:08x}");
    }
    boundary
}

fn encode_multipart(fields: &[(String, String)], boundary: &str) -> Bytes {
    let mut buf = BytesMut::new();
    for (name, value) in fields {
        buf.put_slice(format!("--{boundary}\r\n").as_bytes());
        buf.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                name.replace('"', "%22")
            )
            .as_bytes(),
        );
        buf.put_slice(value.as_bytes());
        buf.put_slice(b"\r\n");
    }
    buf.put_slice(format!("--{boundary}--\r\n").as_bytes());
    buf.freeze()
}
