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

//! The normalized result of one HTTP exchange.

use crate::errors::Error;
use crate::Result;
use bytes::Bytes;
use http::header::LOCATION;
use http::HeaderMap;

/// The normalized result of one HTTP exchange.
///
/// Responses carry the raw body bytes. Use [content][Response::content] to
/// decode the body as JSON. Any HTTP status, including client and server
/// errors, produces a `Response`; inspect
/// [is_successful][Response::is_successful] to distinguish them.
#[derive(Clone, Debug)]
pub struct Response {
    status_code: u16,
    body: Bytes,
    headers: HeaderMap,
}

impl Response {
    pub fn new<B: Into<Bytes>>(status_code: u16, body: B, headers: HeaderMap) -> Self {
        Self {
            status_code,
            body: body.into(),
            headers,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The raw response body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns true if the status code is in the 200..=204 range.
    pub fn is_successful(&self) -> bool {
        (200..=204).contains(&self.status_code)
    }

    /// Decodes the body as JSON.
    ///
    /// # Example
    /// ```
    /// # use ticketpark_client::Response;
    /// let response = Response::new(200, r#"{"name": "some-show"}"#, http::HeaderMap::new());
    /// assert_eq!(response.content()?["name"], "some-show");
    /// # Ok::<(), ticketpark_client::errors::Error>(())
    /// ```
    pub fn content(&self) -> Result<serde_json::Value> {
        serde_json::from_slice(&self.body).map_err(Error::malformed_content)
    }

    /// The identifier of the record created by this request.
    ///
    /// After a creation call the API returns the new record's location in
    /// the `Location` header, with the identifier as the last path segment.
    /// Returns `None` if there is no `Location` header, or if the location
    /// points to a batch list instead of a single record (see
    /// [generated_list_link][Response::generated_list_link]).
    pub fn generated_pid(&self) -> Option<String> {
        let segment = self.location_last_segment()?;
        if segment.contains("batchId") {
            return None;
        }
        Some(segment.to_string())
    }

    /// The link to the list of records created by a batch request.
    ///
    /// Batch creation calls return a `Location` whose last segment is a
    /// filter on the batch identifier. This accessor strips the scheme and
    /// host and returns the remaining path. Returns `None` when the
    /// location points to a single record.
    pub fn generated_list_link(&self) -> Option<String> {
        let segment = self.location_last_segment()?;
        if !segment.contains("batchId") {
            return None;
        }
        let location = self.location()?;
        let rest = location
            .split_once("://")
            .map_or(location, |(_scheme, rest)| rest);
        rest.find('/').map(|i| rest[i..].to_string())
    }

    fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION)?.to_str().ok()
    }

    fn location_last_segment(&self) -> Option<&str> {
        self.location()?.rsplit('/').next()
    }
}
