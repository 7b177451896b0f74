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

//! The error type returned by the client and its collaborators.

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for all operations in this crate.
///
/// The client reports errors from multiple sources: the token endpoint may
/// reject every configured refresh strategy, the endpoint may violate its
/// response contract, the transport may fail before a response is received,
/// or a response body may not decode as JSON. Most applications just return
/// or log the error. Applications that need to react to a specific failure
/// can interrogate it through the `is_*` predicates, and query the error
/// [source][std::error::Error::source] for deeper information.
///
/// # Example
/// ```
/// use ticketpark_client::errors::Error;
/// fn handle(result: Result<(), Error>) {
///     match result {
///         Err(e) if e.is_token_generation() => println!("check the configured credentials: {e}"),
///         Err(e) if e.is_timeout() => println!("not enough time: {e}"),
///         Err(e) => println!("some other error: {e}"),
///         Ok(_) => {}
///     }
/// }
/// ```
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// No token refresh strategy succeeded.
    ///
    /// Either no usable refresh token and no user credentials were
    /// configured, or the token endpoint rejected every configured strategy.
    pub fn is_token_generation(&self) -> bool {
        matches!(self.0, ErrorKind::TokenGeneration(_))
    }

    /// The token endpoint returned a successful status with a malformed or
    /// incomplete body.
    ///
    /// This indicates the endpoint violated its contract, not that the
    /// configured credentials are invalid. Retrying with a different
    /// strategy will not help.
    pub fn is_unexpected_response(&self) -> bool {
        matches!(self.0, ErrorKind::UnexpectedResponse(_))
    }

    /// The request could not be completed before the transport deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self.0, ErrorKind::Timeout(_))
    }

    /// The transport failed before a response was received.
    ///
    /// DNS errors, connection failures, and TLS problems all map to this
    /// kind. Note that responses with an error status code are *not*
    /// transport failures: they surface as ordinary responses.
    pub fn is_transport(&self) -> bool {
        matches!(self.0, ErrorKind::Transport(_))
    }

    /// The response body could not be decoded as JSON.
    pub fn is_malformed_content(&self) -> bool {
        matches!(self.0, ErrorKind::MalformedContent(_))
    }

    /// A request could not be built from the caller-supplied inputs.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.0, ErrorKind::InvalidArgument(_))
    }

    pub(crate) fn token_generation<T: Into<String>>(message: T) -> Error {
        Error(ErrorKind::TokenGeneration(message.into()))
    }

    pub(crate) fn unexpected_response<T: Into<String>>(message: T) -> Error {
        Error(ErrorKind::UnexpectedResponse(message.into()))
    }

    pub(crate) fn timeout<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Timeout(source.into()))
    }

    pub(crate) fn transport<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Transport(source.into()))
    }

    pub(crate) fn malformed_content<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::MalformedContent(source.into()))
    }

    pub(crate) fn invalid_argument<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::InvalidArgument(source.into()))
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("failed to generate tokens, {0}")]
    TokenGeneration(String),
    #[error("the token endpoint violated its contract, {0}")]
    UnexpectedResponse(String),
    #[error("the request timed out")]
    Timeout(#[source] BoxError),
    #[error("the transport failed before a response was received")]
    Transport(#[source] BoxError),
    #[error("the response body is not valid JSON")]
    MalformedContent(#[source] BoxError),
    #[error("cannot build a request from the given arguments")]
    InvalidArgument(#[source] BoxError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn token_generation() {
        let e = Error::token_generation("no credentials configured");
        assert!(e.is_token_generation(), "{e:?}");
        assert!(!e.is_unexpected_response(), "{e:?}");
        let got = format!("{e}");
        assert!(got.contains("no credentials configured"), "{got}");
    }

    #[test]
    fn unexpected_response() {
        let e = Error::unexpected_response("missing `access_token` field");
        assert!(e.is_unexpected_response(), "{e:?}");
        assert!(!e.is_token_generation(), "{e:?}");
        let got = format!("{e}");
        assert!(got.contains("missing `access_token` field"), "{got}");
    }

    #[test]
    fn timeout() {
        let e = Error::timeout(wrapped());
        assert!(e.is_timeout(), "{e:?}");
        assert!(!e.is_transport(), "{e:?}");
        assert!(e.source().is_some(), "{e:?}");
    }

    #[test]
    fn transport() {
        let e = Error::transport(wrapped());
        assert!(e.is_transport(), "{e:?}");
        assert!(!e.is_timeout(), "{e:?}");
        assert!(e.source().is_some(), "{e:?}");
    }

    #[test]
    fn malformed_content() {
        let e = Error::malformed_content(wrapped());
        assert!(e.is_malformed_content(), "{e:?}");
        assert!(e.source().is_some(), "{e:?}");
    }

    #[test]
    fn invalid_argument() {
        let e = Error::invalid_argument(wrapped());
        assert!(e.is_invalid_argument(), "{e:?}");
        assert!(e.source().is_some(), "{e:?}");
    }

    fn wrapped() -> BoxError {
        Box::new(std::io::Error::other("test-only"))
    }
}
