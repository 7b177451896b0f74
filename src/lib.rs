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

//! A client for the Ticketpark REST API.
//!
//! This crate manages OAuth2-style bearer tokens and dispatches requests
//! that always carry a valid one. Tokens are acquired from the token
//! endpoint with the `refresh_token` grant when a usable refresh token is
//! held, falling back to the `password` grant when user credentials are
//! configured. The client refreshes transparently: a verb call on a client
//! with a missing or expired access token performs at most one token
//! round-trip before the request itself.
//!
//! # Example
//! ```no_run
//! use ticketpark_client::Client;
//!
//! # async fn sample() -> ticketpark_client::Result<()> {
//! let mut client = Client::builder("my-api-key", "my-api-secret")
//!     .with_user_credentials("user@example.com", "secret")
//!     .build();
//!
//! let response = client.get("/shows", None, http::HeaderMap::new()).await?;
//! if response.is_successful() {
//!     println!("{}", response.content()?);
//! }
//! # Ok(()) }
//! ```
//!
//! Sessions can be persisted and resumed without re-authenticating: read
//! the current pair with [Client::access_token] and
//! [Client::refresh_token], store the values and expirations, and restore
//! them with [Builder::with_access_token] and
//! [Builder::with_refresh_token].

/// The error type and its predicates.
pub mod errors;

/// The client facade and its builder.
pub mod client;

/// The credentials used against the token endpoint.
pub mod credentials;

/// The normalized result of one HTTP exchange.
pub mod response;

/// Types and functions to work with OAuth2 tokens.
pub mod token;

/// The boundary contract with the underlying HTTP implementation.
pub mod transport;

pub(crate) mod oauth;
pub(crate) mod query;

pub use client::{Builder, Client};
pub use response::Response;
pub use token::Token;

/// A `Result` alias where the `Err` case is `ticketpark_client::errors::Error`.
pub type Result<T> = std::result::Result<T, crate::errors::Error>;
