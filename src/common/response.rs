// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Infrastructure types related to decoding responses and packaging rate-limit information
//! alongside them.

use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use hyper::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::transport::RawResponse;

use super::Headers;

const X_RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
const X_RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const X_RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// The body of a response, after an attempt to decode it as JSON.
///
/// Twitter answers API calls with JSON, but not always: some errors come back as plain text or
/// HTML. Rather than guessing which one the caller wanted, both outcomes are kept distinct.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The body parsed as JSON.
    Json(serde_json::Value),
    /// The body didn't parse as JSON; this is the text exactly as it was received.
    Text(String),
}

impl Payload {
    /// Attempts to decode the given body, keeping it as text when it isn't JSON.
    pub fn decode(body: String) -> Payload {
        match serde_json::from_str(&body) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(body),
        }
    }

    /// Returns the decoded JSON, if the body was JSON.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    /// Returns the raw text, if the body was not JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Json(_) => None,
            Payload::Text(text) => Some(text),
        }
    }
}

/// Rate-limit information sent back by Twitter alongside an API response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimit {
    ///The rate limit ceiling for the given request.
    pub limit: i32,
    ///The number of requests left for the current window.
    pub remaining: i32,
    ///The UTC time at which the rate window resets.
    pub reset: DateTime<Utc>,
}

/// The result of a call through the dispatcher.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status Twitter answered with.
    pub status: StatusCode,
    /// The headers Twitter sent back.
    pub headers: Headers,
    /// The response body.
    pub body: Payload,
}

impl Response {
    pub(crate) fn from_raw(raw: RawResponse) -> Response {
        Response {
            status: raw.status,
            headers: raw.headers,
            body: Payload::decode(raw.body),
        }
    }

    /// Returns whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parses the rate-limit headers of this response, if all three are present.
    pub fn rate_limit(&self) -> Option<RateLimit> {
        let limit = self.header_value(X_RATE_LIMIT_LIMIT)?;
        let remaining = self.header_value(X_RATE_LIMIT_REMAINING)?;
        let reset = Utc.timestamp_opt(self.header_value(X_RATE_LIMIT_RESET)?, 0).single()?;

        Some(RateLimit {
            limit,
            remaining,
            reset,
        })
    }

    fn header_value<T: FromStr>(&self, name: &str) -> Option<T> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }

    /// Deserializes the JSON payload of this response into the given type.
    ///
    /// Fails with `InvalidResponse` if the body wasn't JSON, carrying the raw text along.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.body {
            Payload::Json(value) => Ok(T::deserialize(value)?),
            Payload::Text(text) => Err(Error::InvalidResponse(
                "expected a JSON body",
                Some(text.clone()),
            )),
        }
    }
}
