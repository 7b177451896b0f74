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

//! The token-endpoint exchange and its fallback policy.

use crate::credentials::Credentials;
use crate::errors::Error;
use crate::token::{Token, TokenPair};
use crate::transport::{RequestParts, Transport};
use crate::Result;
use chrono::{Duration, Utc};
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};
use url::form_urlencoded;

pub(crate) const TOKEN_ENDPOINT_PATH: &str = "/oauth/v2/token";

// The token endpoint does not return a refresh-token TTL. New refresh
// tokens are assigned this fixed lifetime.
const REFRESH_TOKEN_LIFETIME_SECS: i64 = 30 * 86_400;

/// Produces a new token pair, or fails.
///
/// Strategies are attempted in strict order: the `refresh_token` grant when
/// a non-expired refresh token is held, then the `password` grant when user
/// credentials are configured. A rejection (any status outside 200..=204)
/// falls through to the next strategy. A successful status with an
/// incomplete body aborts the whole call: the endpoint violated its
/// contract and another grant will not help.
pub(crate) async fn generate_tokens(
    transport: &dyn Transport,
    base_url: &str,
    credentials: &Credentials,
    refresh_token: Option<&Token>,
) -> Result<TokenPair> {
    if let Some(refresh) = refresh_token.filter(|t| !t.has_expired()) {
        tracing::debug!(grant_type = "refresh_token", "requesting tokens");
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh.value()),
        ];
        match exchange(transport, base_url, credentials, &form).await? {
            Some(pair) => return Ok(pair),
            None => tracing::debug!("refresh_token grant rejected, trying user credentials"),
        }
    }

    if let Some(user) = credentials.user() {
        tracing::debug!(grant_type = "password", "requesting tokens");
        let form = [
            ("grant_type", "password"),
            ("username", user.username.as_str()),
            ("password", user.password.as_str()),
        ];
        if let Some(pair) = exchange(transport, base_url, credentials, &form).await? {
            return Ok(pair);
        }
    }

    Err(Error::token_generation(
        "make sure to provide a valid refresh token or user credentials",
    ))
}

// One token-endpoint call. `Ok(None)` means the endpoint rejected this
// grant and the caller may fall through to the next strategy.
async fn exchange(
    transport: &dyn Transport,
    base_url: &str,
    credentials: &Credentials,
    form: &[(&str, &str)],
) -> Result<Option<TokenPair>> {
    let body: String = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form)
        .finish();

    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let mut authorization =
        HeaderValue::from_str(&credentials.basic_auth()).map_err(Error::invalid_argument)?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);

    let request = RequestParts {
        method: Method::POST,
        url: format!("{base_url}{TOKEN_ENDPOINT_PATH}"),
        headers,
        body: Some(body.into()),
    };
    let response = transport.execute(request).await?;

    if !response.is_successful() {
        tracing::debug!(
            status_code = response.status_code(),
            "token endpoint rejected the request"
        );
        return Ok(None);
    }

    let token_response: TokenResponse = serde_json::from_slice(response.body()).map_err(|e| {
        Error::unexpected_response(format!(
            "successful status but malformed or incomplete body: {e}"
        ))
    })?;

    let now = Utc::now();
    // `expires_in` is server-supplied and must not be able to panic the
    // expiry arithmetic.
    let access_expires_at = Duration::try_seconds(token_response.expires_in)
        .and_then(|d| now.checked_add_signed(d))
        .ok_or_else(|| {
            Error::unexpected_response(format!(
                "implausible expires_in value: {}",
                token_response.expires_in
            ))
        })?;
    Ok(Some(TokenPair {
        access: Token::new(token_response.access_token).expiring_at(access_expires_at),
        refresh: Token::new(token_response.refresh_token)
            .expiring_at(now + Duration::seconds(REFRESH_TOKEN_LIFETIME_SECS)),
    }))
}

/// The response body of a successful token-endpoint call.
#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
}
