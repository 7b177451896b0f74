// Copyright 2025 Ticketpark GmbH
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The boundary contract with the underlying HTTP implementation.

use crate::errors::Error;
use crate::response::Response;
use crate::Result;
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method};
use std::time::Duration;

pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A single HTTP exchange, ready for dispatch.
#[derive(Clone, Debug)]
pub struct RequestParts {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

/// Performs a single HTTP request.
///
/// The client only depends on this contract. The default implementation is
/// [HttpTransport]; tests substitute their own.
///
/// Responses with an error status code are not transport failures: any
/// received status, including 4xx and 5xx, produces `Ok(Response)`. Only
/// timeouts and connection-level faults map to errors.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn execute(&self, request: RequestParts) -> Result<Response>;
}

/// The default [Transport], backed by `reqwest`.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: RequestParts) -> Result<Response> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .timeout(REQUEST_TIMEOUT);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await.map_err(classify)?;

        let status_code = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify)?;
        tracing::debug!(status_code, "received response");
        Ok(Response::new(status_code, body, headers))
    }
}

fn classify(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout(e)
    } else {
        Error::transport(e)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    // Used by tests in other modules.
    mockall::mock! {
        #[derive(Debug)]
        pub Transport { }

        #[async_trait]
        impl Transport for Transport {
            async fn execute(&self, request: RequestParts) -> Result<Response>;
        }
    }

    async fn start(status: http::StatusCode, body: &'static str) -> String {
        let handler = move || async move { (status, [("location", "/shows/some-uuid")], body) };
        let app = axum::Router::new().route("/shows", axum::routing::get(handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn request(url: String) -> RequestParts {
        RequestParts {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn success_response() {
        let endpoint = start(http::StatusCode::OK, r#"{"name": "some-show"}"#).await;
        let transport = HttpTransport::new();
        let response = transport
            .execute(request(format!("{endpoint}/shows")))
            .await
            .unwrap();
        assert!(response.is_successful());
        assert_eq!(response.content().unwrap()["name"], "some-show");
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/shows/some-uuid"
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn client_error_status_is_a_response() {
        let endpoint = start(http::StatusCode::NOT_FOUND, "").await;
        let transport = HttpTransport::new();
        let response = transport
            .execute(request(format!("{endpoint}/shows")))
            .await
            .unwrap();
        assert!(!response.is_successful());
        assert_eq!(response.status_code(), 404);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn connection_failure_is_a_transport_error() {
        // Nothing listens on this address.
        let transport = HttpTransport::new();
        let e = transport
            .execute(request("http://127.0.0.1:1/shows".to_string()))
            .await
            .unwrap_err();
        assert!(e.is_transport(), "{e:?}");
        assert!(!e.is_timeout(), "{e:?}");
    }
}
