// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A library for interacting with the Twitter REST API.
//!
//! Every call goes through a `Client`, which pairs one way of authenticating with a transport and
//! the base URLs to talk to. Pick the authentication that fits what you're doing:
//!
//! - `NoAuth` for search and the public trend lists.
//! - `BasicAuth` for a username and password.
//! - `OAuth` for everything an app does on a user's behalf. The [`auth`](auth/index.html) module
//!   walks through getting an access token.
//!
//! ```rust,no_run
//! use twitapi::{Client, KeyPair, OAuth};
//!
//! # fn main() -> twitapi::error::Result<()> {
//! let oauth = OAuth::new(KeyPair::new("consumer key", "consumer secret"))
//!     .with_token(KeyPair::new("access token", "access token secret"));
//! let client = Client::new(oauth)?;
//!
//! let resp = client.update_status("Hello from Rust!")?;
//! if !resp.is_success() {
//!     println!("Twitter said no: {} {:?}", resp.status, resp.body);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Responses
//!
//! Endpoint methods return a `Response` carrying the status, the headers, and the body. The body
//! is a `Payload`: decoded JSON when it parsed, or the raw text when it didn't. A non-success
//! status is not an `Err`; it comes back like any other response, so check `is_success` before
//! you trust the body. `Response::deserialize` turns a JSON body into a type of your own, and
//! `Response::rate_limit` reads the rate-limit headers Twitter sends with most replies.
//!
//! # Modules
//!
//! The endpoint methods are grouped by the part of the API they cover:
//!
//! - `tweet`: timelines, statuses and favorites
//! - `user`: user lookup, friendships and the social graph
//! - `list`: lists, their members and subscribers
//! - `direct`: direct messages
//! - `search`: tweet search
//! - `trend`: trending topics
//! - `account`: credential checks and rate-limit status
//!
//! All of them are methods on `Client`, so there's nothing to import besides the option types
//! some of them take.
//!
//! # Configuration
//!
//! `Client::builder` sets everything `Client::new` leaves at its default: the base URLs, the
//! user agent, a request timeout, an HTTP proxy, a response cache, or a transport of your own.
//! The bundled transport is blocking, and drives its requests on a private runtime. Don't call it
//! from inside an async runtime.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![warn(unused_qualifications)]

mod common;
pub mod account;
pub mod auth;
mod client;
pub mod direct;
pub mod error;
mod links;
pub mod list;
pub mod search;
pub mod transport;
pub mod trend;
pub mod tweet;
pub mod user;

pub use crate::auth::{Authenticator, BasicAuth, KeyPair, NoAuth, OAuth, OAuthEndpoints, TokenReply};
pub use crate::client::{Client, ClientBuilder, ClientConfig};
pub use crate::common::{collect_present, percent_encode, Headers, ParamList, Payload, RateLimit, Response};
pub use crate::transport::{Cache, MemoryCache, Proxy, Transport, TransportOptions};
