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

//! The credentials used to authenticate against the token endpoint.

use base64::prelude::{Engine as _, BASE64_STANDARD};

/// The client identity and, optionally, resource-owner credentials.
///
/// The API key and secret identify the application and are fixed for the
/// lifetime of the client. User credentials are only needed for the
/// `password` grant and may be set at any time.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
    user: Option<UserCredentials>,
}

#[derive(Clone, PartialEq)]
pub(crate) struct UserCredentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new<K, S>(api_key: K, api_secret: S) -> Self
    where
        K: Into<String>,
        S: Into<String>,
    {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            user: None,
        }
    }

    /// Sets the resource-owner credentials used by the `password` grant.
    pub fn set_user_credentials<U, P>(&mut self, username: U, password: P)
    where
        U: Into<String>,
        P: Into<String>,
    {
        self.user = Some(UserCredentials {
            username: username.into(),
            password: password.into(),
        });
    }

    pub(crate) fn user(&self) -> Option<&UserCredentials> {
        self.user.as_ref()
    }

    /// The `Authorization` value for token-endpoint calls.
    pub(crate) fn basic_auth(&self) -> String {
        format!(
            "Basic {}",
            BASE64_STANDARD.encode(format!("{}:{}", self.api_key, self.api_secret))
        )
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[censored]")
            .field("username", &self.user.as_ref().map(|u| u.username.as_str()))
            .field("password", &self.user.as_ref().map(|_| "[censored]"))
            .finish()
    }
}
