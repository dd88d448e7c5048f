// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Types and methods used to authenticate calls to Twitter.
//!
//! Every request the `Client` makes goes through an `Authenticator`, which applies credentials to
//! it and hands it to the transport. There are three of them:
//!
//! - `NoAuth` sends requests untouched. Search and the public trend endpoints need nothing more.
//! - `BasicAuth` sends a username and password with every request.
//! - `OAuth` signs every request with an application's consumer key and a user's access token.
//!
//! # Getting an access token
//!
//! Before `OAuth` can sign API calls on a user's behalf, the user has to authorize your app. The
//! usual "PIN-based" flow looks like this:
//!
//! ```rust,no_run
//! use twitapi::{Client, KeyPair, OAuth};
//!
//! # fn main() -> twitapi::error::Result<()> {
//! let oauth = OAuth::new(KeyPair::new("consumer key", "consumer secret")).with_callback("oob");
//! let mut client = Client::new(oauth)?;
//!
//! // 1. fetch a request token and send the user to authorize it
//! let url = client.authorization_url(None)?;
//! println!("Go to {} and enter the PIN you get back:", url);
//!
//! let mut pin = String::new();
//! std::io::stdin().read_line(&mut pin).unwrap();
//!
//! // 2. trade the request token and PIN for an access token
//! let reply = client.access_token(Some(pin.trim()))?;
//! println!("Welcome, {}!", reply.params.get("screen_name").map(String::as_str).unwrap_or("?"));
//!
//! // the access token is now held by the client; save `reply.token` to skip all this next time
//! # Ok(())
//! # }
//! ```
//!
//! If you already have an access token saved from an earlier session, hand it over with
//! `OAuth::with_token` (or `set_token`) and skip straight to making calls.

use std::borrow::Cow;
use std::collections::HashMap;

use hyper::header::{HeaderValue, AUTHORIZATION};
use hyper::Method;
use tracing::{debug, warn};

use crate::common::Headers;
use crate::error::{Error, Result};
use crate::links;
use crate::transport::{HttpRequest, RawResponse, Transport, TransportOptions};

pub(crate) mod raw;

use self::raw::OAuthAddOn;

/// A strategy for applying credentials to a request and sending it.
pub trait Authenticator: Send + Sync {
    /// Applies this strategy's credentials to the given request and sends it over the given
    /// transport.
    fn perform(
        &self,
        request: HttpRequest,
        transport: &dyn Transport,
        options: &TransportOptions,
    ) -> Result<RawResponse>;
}

/// Sends requests with no credentials at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl Authenticator for NoAuth {
    fn perform(
        &self,
        request: HttpRequest,
        transport: &dyn Transport,
        options: &TransportOptions,
    ) -> Result<RawResponse> {
        transport.send(request, options)
    }
}

/// Sends a username and password with every request, using HTTP Basic authentication.
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    /// Creates a new `BasicAuth` from the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> BasicAuth {
        BasicAuth {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The username requests are sent with.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .finish()
    }
}

impl Authenticator for BasicAuth {
    fn perform(
        &self,
        mut request: HttpRequest,
        transport: &dyn Transport,
        options: &TransportOptions,
    ) -> Result<RawResponse> {
        let header = raw::basic_authorization(&self.username, &self.password);
        request
            .headers
            .insert(AUTHORIZATION, HeaderValue::from_str(&header)?);
        transport.send(request, options)
    }
}

/// A key/secret pair representing an OAuth token.
///
/// This struct is used as part of the authentication process. You'll need to manually create at
/// least one of these, to hold onto your consumer token.
///
/// For more information, see the documentation for [OAuth](struct.OAuth.html).
///
/// # Example
///
/// ```rust
/// let con_token = twitapi::KeyPair::new("consumer key", "consumer secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    ///A key used to identify an application or user.
    pub key: Cow<'static, str>,
    ///A private key used to sign messages from an application or user.
    pub secret: Cow<'static, str>,
}

impl KeyPair {
    ///Creates a KeyPair with the given key and secret.
    ///
    ///This can be called with either `&'static str` (a string literal) or `String` for either
    ///parameter.
    pub fn new<K, S>(key: K, secret: S) -> KeyPair
    where
        K: Into<Cow<'static, str>>,
        S: Into<Cow<'static, str>>,
    {
        KeyPair {
            key: key.into(),
            secret: secret.into(),
        }
    }

    fn is_empty(&self) -> bool {
        self.key.is_empty() || self.secret.is_empty()
    }
}

/// The locations of the OAuth endpoints.
///
/// The defaults are the fixed Twitter endpoints in `links::auth`.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthEndpoints {
    /// Where request tokens are fetched from.
    pub request_token: String,
    /// Where request tokens are traded for access tokens.
    pub access_token: String,
    /// Where users go to authorize an app.
    pub authorize: String,
    /// Where users go to sign in to an app with their Twitter account.
    pub authenticate: String,
}

impl Default for OAuthEndpoints {
    fn default() -> OAuthEndpoints {
        OAuthEndpoints {
            request_token: links::auth::REQUEST_TOKEN.to_string(),
            access_token: links::auth::ACCESS_TOKEN.to_string(),
            authorize: links::auth::AUTHORIZE.to_string(),
            authenticate: links::auth::AUTHENTICATE.to_string(),
        }
    }
}

/// The decoded reply from one of the OAuth token endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenReply {
    /// The token and secret from the reply.
    pub token: KeyPair,
    /// Every key/value pair in the reply, including `oauth_token` and `oauth_token_secret`.
    ///
    /// Access token replies also carry `user_id` and `screen_name` here.
    pub params: HashMap<String, String>,
}

impl TokenReply {
    /// Parses a URL-encoded reply like `oauth_token=abc&oauth_token_secret=xyz`.
    pub fn parse(body: &str) -> Result<TokenReply> {
        let params = url::form_urlencoded::parse(body.trim().as_bytes())
            .into_owned()
            .collect::<HashMap<String, String>>();

        let key = params
            .get("oauth_token")
            .cloned()
            .ok_or(Error::MissingValue("oauth_token"))?;
        let secret = params
            .get("oauth_token_secret")
            .cloned()
            .ok_or(Error::MissingValue("oauth_token_secret"))?;

        Ok(TokenReply {
            token: KeyPair::new(key, secret),
            params,
        })
    }
}

/// Signs requests with OAuth 1.0a (HMAC-SHA1).
///
/// An `OAuth` always holds the consumer key of your application. It can also hold a token: a
/// request token while a user is in the middle of authorizing your app, or an access token
/// afterward. Signed API requests need a token; without one `perform` fails instead of sending
/// anything.
#[derive(Debug, Clone)]
pub struct OAuth {
    consumer: KeyPair,
    token: Option<KeyPair>,
    callback: Option<String>,
    endpoints: OAuthEndpoints,
}

impl OAuth {
    /// Creates a new `OAuth` with the given consumer key, holding no token yet.
    pub fn new(consumer: KeyPair) -> OAuth {
        OAuth {
            consumer,
            token: None,
            callback: None,
            endpoints: OAuthEndpoints::default(),
        }
    }

    /// Sets the token to sign requests with, e.g. an access token saved from an earlier session.
    pub fn with_token(self, token: KeyPair) -> OAuth {
        OAuth {
            token: Some(token),
            ..self
        }
    }

    /// Sets the `oauth_callback` to send when fetching a request token.
    ///
    /// To use PIN-based authorization, this must be set to `"oob"`.
    pub fn with_callback(self, callback: impl Into<String>) -> OAuth {
        OAuth {
            callback: Some(callback.into()),
            ..self
        }
    }

    /// Uses the given OAuth endpoints instead of Twitter's.
    pub fn with_endpoints(self, endpoints: OAuthEndpoints) -> OAuth {
        OAuth { endpoints, ..self }
    }

    /// The consumer key of the application.
    pub fn consumer(&self) -> &KeyPair {
        &self.consumer
    }

    /// The token currently held, if any.
    pub fn token(&self) -> Option<&KeyPair> {
        self.token.as_ref()
    }

    /// Replaces the held token.
    pub fn set_token(&mut self, token: KeyPair) {
        self.token = Some(token);
    }

    /// The OAuth endpoints in use.
    pub fn endpoints(&self) -> &OAuthEndpoints {
        &self.endpoints
    }

    fn consumer_checked(&self) -> Result<&KeyPair> {
        if self.consumer.is_empty() {
            Err(Error::MissingConsumer)
        } else {
            Ok(&self.consumer)
        }
    }

    /// Sends a signed request to one of the token endpoints and parses the reply.
    fn token_call(
        &self,
        method: Method,
        url: &str,
        token: Option<&KeyPair>,
        addon: OAuthAddOn,
        transport: &dyn Transport,
        options: &TransportOptions,
    ) -> Result<TokenReply> {
        let mut request = HttpRequest {
            method,
            url: url.to_string(),
            headers: Headers::new(),
            body: None,
        };
        raw::sign(&mut request, self.consumer_checked()?, token, addon)?;

        let resp = transport.send(request, options)?;
        if resp.status != hyper::StatusCode::OK {
            warn!(status = %resp.status, url, "OAuth token endpoint refused the request");
            return Err(Error::AuthFlow(resp.status));
        }

        TokenReply::parse(&resp.body)
    }

    /// Asks Twitter for a request token, which a user can then authorize.
    ///
    /// This can be considered Step 1 in obtaining access to a user's account. The request token is
    /// kept as this strategy's pending token, and also returned.
    pub fn request_token(
        &mut self,
        transport: &dyn Transport,
        options: &TransportOptions,
    ) -> Result<TokenReply> {
        let addon = match &self.callback {
            Some(callback) => OAuthAddOn::Callback(callback.clone()),
            None => OAuthAddOn::None,
        };

        debug!("fetching OAuth request token");
        let reply = self.token_call(
            Method::GET,
            &self.endpoints.request_token,
            None,
            addon,
            transport,
            options,
        )?;

        self.token = Some(reply.token.clone());
        Ok(reply)
    }

    /// Returns the URL a user can visit to accept or reject an authorization request for the
    /// given request token.
    pub fn authorize_url(&self, request_token: &KeyPair) -> String {
        token_url(&self.endpoints.authorize, request_token)
    }

    /// Returns the URL a user can visit to sign in to your app with their Twitter account, using
    /// the given request token.
    pub fn authenticate_url(&self, request_token: &KeyPair) -> String {
        token_url(&self.endpoints.authenticate, request_token)
    }

    /// Returns the authorization URL for the given request token.
    ///
    /// This can be considered Step 2 in obtaining access to a user's account. If no token is
    /// given, a new request token is fetched first (see `request_token`), which replaces the held
    /// token.
    pub fn authorization_url(
        &mut self,
        token: Option<&KeyPair>,
        transport: &dyn Transport,
        options: &TransportOptions,
    ) -> Result<String> {
        match token {
            Some(token) => Ok(self.authorize_url(token)),
            None => {
                let reply = self.request_token(transport, options)?;
                Ok(self.authorize_url(&reply.token))
            }
        }
    }

    /// Like `authorization_url`, but for the "Sign in with Twitter" endpoint.
    pub fn signin_url(
        &mut self,
        token: Option<&KeyPair>,
        transport: &dyn Transport,
        options: &TransportOptions,
    ) -> Result<String> {
        match token {
            Some(token) => Ok(self.authenticate_url(token)),
            None => {
                let reply = self.request_token(transport, options)?;
                Ok(self.authenticate_url(&reply.token))
            }
        }
    }

    /// Trades the held request token (and the verifier, if given) for an access token.
    ///
    /// This can be considered Step 3 in obtaining access to a user's account. The verifier is
    /// either the PIN the user was shown after authorizing your app, or the `oauth_verifier` sent
    /// to your callback. On success the access token replaces the held token, so the strategy is
    /// ready to sign API calls.
    pub fn access_token(
        &mut self,
        verifier: Option<&str>,
        transport: &dyn Transport,
        options: &TransportOptions,
    ) -> Result<TokenReply> {
        let request_token = self.token.clone().ok_or(Error::MissingToken)?;
        let addon = match verifier {
            Some(v) => OAuthAddOn::Verifier(v.to_string()),
            None => OAuthAddOn::None,
        };

        debug!("trading request token for an access token");
        let reply = self.token_call(
            Method::POST,
            &self.endpoints.access_token,
            Some(&request_token),
            addon,
            transport,
            options,
        )?;

        self.token = Some(reply.token.clone());
        Ok(reply)
    }
}

fn token_url(endpoint: &str, token: &KeyPair) -> String {
    format!(
        "{}?oauth_token={}",
        endpoint,
        crate::common::percent_encode(&token.key)
    )
}

impl Authenticator for OAuth {
    fn perform(
        &self,
        mut request: HttpRequest,
        transport: &dyn Transport,
        options: &TransportOptions,
    ) -> Result<RawResponse> {
        let token = self.token.as_ref().ok_or(Error::MissingToken)?;
        raw::sign(&mut request, self.consumer_checked()?, Some(token), OAuthAddOn::None)?;
        transport.send(request, options)
    }
}

impl<A: Authenticator + ?Sized> Authenticator for Box<A> {
    fn perform(
        &self,
        request: HttpRequest,
        transport: &dyn Transport,
        options: &TransportOptions,
    ) -> Result<RawResponse> {
        (**self).perform(request, transport, options)
    }
}
