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

//! The client facade: request building, token resolution, and dispatch.

use crate::credentials::Credentials;
use crate::errors::Error;
use crate::oauth;
use crate::query;
use crate::response::Response;
use crate::token::Token;
use crate::transport::{HttpTransport, RequestParts, Transport};
use crate::Result;
use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};
use serde::Serialize;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://api.ticketpark.ch";

/// A client for the Ticketpark REST API.
///
/// The client guarantees that every outbound request carries a non-expired
/// bearer token, refreshing it through the token endpoint when needed. See
/// the [crate documentation][crate] for an overview of the token lifecycle.
///
/// A `Client` represents one logical session: it holds the current token
/// pair and replaces it on refresh. The verb methods take `&mut self`, so
/// sharing one instance across tasks requires external synchronization;
/// use one client per logical session instead.
#[derive(Debug)]
pub struct Client {
    credentials: Credentials,
    base_url: String,
    transport: Box<dyn Transport>,
    access_token: Option<Token>,
    refresh_token: Option<Token>,
}

impl Client {
    /// Creates a builder with the required client identity.
    ///
    /// # Example
    /// ```
    /// use ticketpark_client::Client;
    /// let client = Client::builder("my-api-key", "my-api-secret")
    ///     .with_user_credentials("user@example.com", "secret")
    ///     .build();
    /// ```
    pub fn builder<K, S>(api_key: K, api_secret: S) -> Builder
    where
        K: Into<String>,
        S: Into<String>,
    {
        Builder::new(api_key, api_secret)
    }

    /// Sets the resource-owner credentials used by the `password` grant.
    pub fn set_user_credentials<U, P>(&mut self, username: U, password: P)
    where
        U: Into<String>,
        P: Into<String>,
    {
        self.credentials.set_user_credentials(username, password);
    }

    /// Replaces the current access token, e.g. with one loaded from
    /// persisted storage.
    pub fn set_access_token<T: Into<Token>>(&mut self, token: T) {
        self.access_token = Some(token.into());
    }

    /// Replaces the current refresh token.
    pub fn set_refresh_token<T: Into<Token>>(&mut self, token: T) {
        self.refresh_token = Some(token.into());
    }

    /// The current access token, if any. Useful to persist a session.
    pub fn access_token(&self) -> Option<&Token> {
        self.access_token.as_ref()
    }

    /// The current refresh token, if any.
    pub fn refresh_token(&self) -> Option<&Token> {
        self.refresh_token.as_ref()
    }

    /// Sends a GET request.
    ///
    /// Query parameters are encoded with bracket notation for nested
    /// structures: `{"filter": {"name": "x"}}` becomes `filter[name]=x`.
    ///
    /// # Example
    /// ```no_run
    /// # use ticketpark_client::Client;
    /// # async fn sample(client: &mut Client) -> ticketpark_client::Result<()> {
    /// let query = serde_json::json!({"maxResults": 10});
    /// let response = client.get("/shows", Some(&query), http::HeaderMap::new()).await?;
    /// let shows = response.content()?;
    /// # Ok(()) }
    /// ```
    pub async fn get(
        &mut self,
        path: &str,
        parameters: Option<&Value>,
        headers: HeaderMap,
    ) -> Result<Response> {
        let url = self.build_url(path, parameters)?;
        self.execute(Method::GET, url, None, headers).await
    }

    /// Sends a HEAD request.
    pub async fn head(
        &mut self,
        path: &str,
        parameters: Option<&Value>,
        headers: HeaderMap,
    ) -> Result<Response> {
        let url = self.build_url(path, parameters)?;
        self.execute(Method::HEAD, url, None, headers).await
    }

    /// Sends a POST request with `content` JSON-encoded as the body.
    pub async fn post<T>(&mut self, path: &str, content: &T, headers: HeaderMap) -> Result<Response>
    where
        T: Serialize + ?Sized,
    {
        let url = self.build_url(path, None)?;
        let body = serde_json::to_vec(content).map_err(Error::invalid_argument)?;
        self.execute(Method::POST, url, Some(body.into()), headers)
            .await
    }

    /// Sends a PATCH request with `content` JSON-encoded as the body.
    pub async fn patch<T>(
        &mut self,
        path: &str,
        content: &T,
        headers: HeaderMap,
    ) -> Result<Response>
    where
        T: Serialize + ?Sized,
    {
        let url = self.build_url(path, None)?;
        let body = serde_json::to_vec(content).map_err(Error::invalid_argument)?;
        self.execute(Method::PATCH, url, Some(body.into()), headers)
            .await
    }

    /// Sends a DELETE request.
    pub async fn delete(&mut self, path: &str, headers: HeaderMap) -> Result<Response> {
        let url = self.build_url(path, None)?;
        self.execute(Method::DELETE, url, None, headers).await
    }

    fn build_url(&self, path: &str, parameters: Option<&Value>) -> Result<String> {
        let mut url = format!("{}{}", self.base_url, path);
        if let Some(parameters) = parameters {
            let object = parameters.as_object().ok_or_else(|| {
                Error::invalid_argument("query parameters must be a JSON object")
            })?;
            if !object.is_empty() {
                url = format!("{url}?{}", query::encode(object));
            }
        }
        Ok(url)
    }

    async fn execute(
        &mut self,
        method: Method,
        url: String,
        body: Option<Bytes>,
        custom_headers: HeaderMap,
    ) -> Result<Response> {
        let token = self.resolve_access_token().await?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut bearer =
            HeaderValue::from_str(&format!("Bearer {token}")).map_err(Error::invalid_argument)?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        // Caller-supplied values win on collision. The default is removed
        // first so a multi-valued caller header keeps all of its values.
        for name in custom_headers.keys() {
            headers.remove(name);
        }
        for (name, value) in custom_headers.iter() {
            headers.append(name, value.clone());
        }

        tracing::debug!(%method, %url, "dispatching request");
        self.transport
            .execute(RequestParts {
                method,
                url,
                headers,
                body,
            })
            .await
    }

    // Returns a non-expired bearer string, refreshing the token pair at
    // most once. The request is never attempted without a valid token.
    async fn resolve_access_token(&mut self) -> Result<String> {
        if let Some(token) = self.access_token.as_ref().filter(|t| !t.has_expired()) {
            return Ok(token.value().to_string());
        }
        let pair = oauth::generate_tokens(
            self.transport.as_ref(),
            &self.base_url,
            &self.credentials,
            self.refresh_token.as_ref(),
        )
        .await?;
        let value = pair.access.value().to_string();
        self.access_token = Some(pair.access);
        self.refresh_token = Some(pair.refresh);
        Ok(value)
    }
}

/// A builder for [Client].
///
/// # Example
/// ```
/// use ticketpark_client::Client;
/// let client = Client::builder("my-api-key", "my-api-secret")
///     .with_base_url("https://api.sandbox.ticketpark.ch")
///     .with_refresh_token("persisted-refresh-token")
///     .build();
/// ```
pub struct Builder {
    credentials: Credentials,
    base_url: String,
    transport: Option<Box<dyn Transport>>,
    access_token: Option<Token>,
    refresh_token: Option<Token>,
}

impl Builder {
    pub(crate) fn new<K, S>(api_key: K, api_secret: S) -> Self
    where
        K: Into<String>,
        S: Into<String>,
    {
        Self {
            credentials: Credentials::new(api_key, api_secret),
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: None,
            access_token: None,
            refresh_token: None,
        }
    }

    /// Overrides the base URL, e.g. to target a sandbox environment.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Substitutes the transport. Mostly useful in tests.
    pub fn with_transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Sets the resource-owner credentials used by the `password` grant.
    pub fn with_user_credentials<U, P>(mut self, username: U, password: P) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        self.credentials.set_user_credentials(username, password);
        self
    }

    /// Resumes a session with a previously obtained access token.
    pub fn with_access_token<T: Into<Token>>(mut self, token: T) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Resumes a session with a previously obtained refresh token.
    pub fn with_refresh_token<T: Into<Token>>(mut self, token: T) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    pub fn build(self) -> Client {
        Client {
            credentials: self.credentials,
            base_url: self.base_url,
            transport: self
                .transport
                .unwrap_or_else(|| Box::new(HttpTransport::new())),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
        }
    }
}
