//! Mock response bodies.

use crate::Result;
use bytes::Bytes;
use serde::Serialize;
use std::path::PathBuf;

/// The body a mock responds with.
///
/// Each variant maps to one way the response is encoded; see
/// [`synthesize`](crate::responder::synthesize).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// UTF-8 text. Defaults to `text/plain;charset=UTF-8`.
    Text(String),
    /// Raw bytes, sent without a default content type.
    Binary(Bytes),
    /// URL-encoded parameters.
    Form(Vec<(String, String)>),
    /// `multipart/form-data` text fields.
    Multipart(Vec<(String, String)>),
    /// Byte chunks, delivered as a streaming body.
    Stream(Vec<Bytes>),
    /// A structured value, encoded as JSON.
    Json(serde_json::Value),
    /// A file read when the mock is invoked.
    File(PathBuf),
}

impl Body {
    pub fn text(text: impl Into<String>) -> Self {
        Body::Text(text.into())
    }

    pub fn binary(bytes: impl Into<Bytes>) -> Self {
        Body::Binary(bytes.into())
    }

    pub fn form<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Body::Form(
            params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn multipart<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Body::Multipart(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn stream<C>(chunks: impl IntoIterator<Item = C>) -> Self
    where
        C: Into<Bytes>,
    {
        Body::Stream(chunks.into_iter().map(Into::into).collect())
    }

    /// Serialize any value into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Body::Json(serde_json::to_value(value)?))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Body::File(path.into())
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Binary(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Binary(bytes.into())
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Binary(Bytes::copy_from_slice(bytes))
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Body::Empty,
            value => Body::Json(value),
        }
    }
}
