// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A composite error type for errors that can occur while interacting with Twitter.
//!
//! Any action that crosses the network to call Twitter has many places where it can go wrong.
//! Whether it's a bad network connection, a revoked token, or a malformed reply from one of the
//! OAuth endpoints, all of these can be represented as an `Error`. Usage mistakes (like naming a
//! user by both ID and screen name) are caught before anything is sent, and also come back as an
//! `Error`.
//!
//! Note that an API call that completes with a non-success status code is *not* an error here:
//! the `Response` is handed back as-is so you can inspect its status and body. The only calls that
//! check the status themselves are the OAuth token calls, which report `AuthFlow`.

use std::time::Duration;

use hyper::StatusCode;

/// Convenient alias to a Result containing a local Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error that can occur during a call to Twitter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A call that requires one identifier (e.g. a user ID or a screen name) was given neither.
    /// The enclosed value names the identifiers that were expected.
    #[error("Missing identifier: expected one of {}", _0)]
    MissingIdentifier(&'static str),
    /// A call that accepts exactly one of two identifiers was given both. The enclosed values are
    /// the names of the conflicting parameters.
    #[error("Conflicting identifiers: {} and {} cannot both be given", _0, _1)]
    ConflictingIdentifiers(&'static str, &'static str),
    /// A parameter was given a value that can't be sent to Twitter.
    #[error("Invalid argument for {}: {}", _0, _1)]
    InvalidArgument(&'static str, String),
    /// The OAuth strategy was created with an empty consumer key or secret.
    #[error("OAuth consumer key and secret are required to sign a request")]
    MissingConsumer,
    /// A signed request or an access token was asked for before any token was obtained or set.
    #[error("No OAuth token is held; obtain a request token or call set_token first")]
    MissingToken,
    /// One of the OAuth token endpoints answered with something other than `200 OK`.
    #[error("Invalid response {} from OAuth endpoint", _0)]
    AuthFlow(StatusCode),
    /// The reply from an OAuth token endpoint didn't contain the given field.
    #[error("Value missing from response: {}", _0)]
    MissingValue(&'static str),
    /// The response body couldn't be interpreted the way the caller asked for. The enclosed
    /// string describes what was expected; the optional string is the raw body.
    #[error("Invalid response received: {} ({:?})", _0, _1)]
    InvalidResponse(&'static str, Option<String>),
    /// The request didn't complete within the configured timeout.
    #[error("Request timed out after {:?}", _0)]
    Timeout(Duration),
    /// The configured proxy couldn't be used.
    #[error("Proxy error: {}", _0)]
    Proxy(String),
    /// The given URL couldn't be parsed.
    #[error("Invalid URL: {}", _0)]
    BadUrl(#[from] url::ParseError),
    /// The given URL couldn't be turned into a request target.
    #[error("Invalid URI: {}", _0)]
    InvalidUri(#[from] hyper::http::uri::InvalidUri),
    /// A header value couldn't be assembled, e.g. a user agent with control characters in it.
    #[error("Invalid header value: {}", _0)]
    InvalidHeader(#[from] hyper::header::InvalidHeaderValue),
    /// An error was experienced while processing the network connection.
    #[error("Network error: {}", _0)]
    NetError(#[from] hyper::Error),
    /// An error occurred while loading the TLS connector.
    #[cfg(feature = "native_tls")]
    #[error("TLS error: {}", _0)]
    TlsError(#[from] native_tls::Error),
    /// An error occurred while setting up the transport's runtime or reading from a socket.
    #[error("IO error: {}", _0)]
    IOError(#[from] std::io::Error),
    /// A JSON payload couldn't be deserialized into the requested type.
    #[error("JSON deserialize error: {}", _0)]
    DeserializeError(#[from] serde_json::Error),
}
