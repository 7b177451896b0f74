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

//! Types and functions to work with OAuth2 tokens.

use chrono::{DateTime, Duration, Utc};

// A token is treated as expired slightly before its literal expiration, so
// it cannot expire while a request carrying it is in flight.
const EXPIRY_BUFFER_SECS: i64 = 10;

/// An access or refresh token, as returned by the token endpoint.
///
/// Tokens are immutable. The client replaces its token pair wholesale after
/// each successful refresh, it never mutates a token in place.
///
/// # Example
/// ```
/// use ticketpark_client::Token;
/// use chrono::{Duration, Utc};
///
/// let token = Token::new("persisted-access-token")
///     .expiring_at(Utc::now() + Duration::hours(1));
/// assert!(!token.has_expired());
/// ```
#[derive(Clone, PartialEq)]
pub struct Token {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Token {
    /// Creates a token without expiration metadata.
    ///
    /// Tokens without an expiration never expire. This is intended for
    /// caller-supplied token strings whose expiration is unknown.
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
            expires_at: None,
        }
    }

    /// Sets the instant at which the token expires.
    pub fn expiring_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// The opaque bearer string.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The instant at which the token expires, if known.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns true if the token is expired, or will expire within the next
    /// few seconds.
    ///
    /// Tokens without expiration metadata never expire.
    pub fn has_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|e| Utc::now() + Duration::seconds(EXPIRY_BUFFER_SECS) > e)
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token::new(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::new(value)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("value", &"[censored]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// The unit produced by one successful token-endpoint exchange.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TokenPair {
    pub access: Token,
    pub refresh: Token,
}
