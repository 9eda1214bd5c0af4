//! Real network transport.

use super::Transport;
use crate::request::Request;
use crate::responder::Response;
use crate::Result;
use async_trait::async_trait;

/// Sends requests over the network with `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        HttpTransport { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: Request) -> Result<Response> {
        let (url, method, headers, body) = request.into_parts();
        let mut builder = self.client.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;
        let redirected = reqwest::Url::parse(&url).map_or(true, |u| &u != response.url());
        Ok(Response::from_reqwest(response, redirected))
    }
}
