// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The request dispatcher every API call goes through.
//!
//! A `Client` owns exactly one authentication strategy, a transport, and the configuration for
//! talking to Twitter. The endpoint methods in the other modules are all implemented on `Client`,
//! and all of them end up in `Client::request`.
//!
//! ```rust,no_run
//! use twitapi::{Client, NoAuth};
//!
//! # fn main() -> twitapi::error::Result<()> {
//! let client = Client::new(NoAuth)?;
//! let resp = client.search("rustlang")?;
//!
//! if let Some(json) = resp.body.as_json() {
//!     println!("{}", json);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use hyper::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use hyper::Method;
use tracing::debug;

use crate::auth::{Authenticator, KeyPair, NoAuth, OAuth, TokenReply};
use crate::common::{Headers, ParamList, Response};
use crate::error::Result;
use crate::links;
use crate::transport::{Cache, HttpRequest, HyperTransport, Proxy, Transport, TransportOptions};

const DEFAULT_USER_AGENT: &str = concat!("twitapi/", env!("CARGO_PKG_VERSION"));
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Everything a `Client` needs to know besides its credentials.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_base: String,
    /// Base URL of the search API, without a trailing slash.
    pub search_base: String,
    /// The `User-Agent` sent when the caller doesn't give its own headers.
    pub user_agent: HeaderValue,
    /// Settings forwarded untouched to the transport.
    pub options: TransportOptions,
}

impl Default for ClientConfig {
    fn default() -> ClientConfig {
        ClientConfig {
            api_base: links::API_BASE.to_string(),
            search_base: links::SEARCH_BASE.to_string(),
            user_agent: HeaderValue::from_static(DEFAULT_USER_AGENT),
            options: TransportOptions::default(),
        }
    }
}

/// A handle to the Twitter API, authenticating every call with the strategy `A`.
///
/// The strategy is fixed when the client is built. A `Client<OAuth>` can swap its token with
/// `set_token`, but the consumer key stays the one it was built with:
///
/// ```rust,compile_fail
/// use twitapi::{Client, KeyPair, OAuth};
///
/// # fn main() -> twitapi::error::Result<()> {
/// let mut client = Client::new(OAuth::new(KeyPair::new("key", "secret")))?;
/// *client.auth_mut() = OAuth::new(KeyPair::new("other", "app"));
/// # Ok(())
/// # }
/// ```
pub struct Client<A: Authenticator = NoAuth> {
    auth: A,
    transport: Box<dyn Transport>,
    config: ClientConfig,
}

impl<A: Authenticator + std::fmt::Debug> std::fmt::Debug for Client<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("auth", &self.auth)
            .field("config", &self.config)
            .finish()
    }
}

impl<A: Authenticator> Client<A> {
    /// Creates a client with the default configuration and the hyper transport.
    pub fn new(auth: A) -> Result<Client<A>> {
        Client::builder(auth).build()
    }

    /// Starts configuring a client that will authenticate with the given strategy.
    pub fn builder(auth: A) -> ClientBuilder<A> {
        ClientBuilder {
            auth,
            api_base: None,
            search_base: None,
            user_agent: None,
            options: TransportOptions::default(),
            transport: None,
        }
    }

    /// The authentication strategy of this client.
    pub fn auth(&self) -> &A {
        &self.auth
    }

    /// The configuration of this client.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a request through the authentication strategy and decodes the response.
    ///
    /// When `headers` is `None`, the default header set (just `User-Agent`) is sent. When a body
    /// is given and the headers carry no `Content-Type`, the body is sent as a form.
    ///
    /// Error statuses are not errors here: a `404` comes back as a `Response` like any other, so
    /// check `Response::status` (or `is_success`) before trusting the body. Only a failure to
    /// build, sign or send the request is an `Err`.
    pub fn request(
        &self,
        url: &str,
        method: Method,
        body: Option<String>,
        headers: Option<Headers>,
    ) -> Result<Response> {
        let mut headers = headers.unwrap_or_else(|| self.default_headers());
        if body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        }

        debug!(%method, url, "dispatching request");
        let request = HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        };

        let raw = self.auth.perform(request, &*self.transport, &self.config.options)?;
        let resp = Response::from_raw(raw);
        debug!(
            status = %resp.status,
            json = resp.body.as_json().is_some(),
            "received response"
        );

        Ok(resp)
    }

    fn default_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(USER_AGENT, self.config.user_agent.clone());
        headers
    }

    /// Sends a `GET` with the given parameters as its query string.
    pub(crate) fn get(&self, url: &str, params: &ParamList) -> Result<Response> {
        self.request(&with_query(url, params), Method::GET, None, None)
    }

    /// Sends a `POST` with the given parameters as a form body.
    pub(crate) fn post(&self, url: &str, params: &ParamList) -> Result<Response> {
        let body = if params.is_empty() {
            None
        } else {
            Some(params.to_urlencoded())
        };
        self.request(url, Method::POST, body, None)
    }

    /// Full URL of the given REST API path.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}.json", self.config.api_base.trim_end_matches('/'), path)
    }

    /// Full URL of the given REST API path, with an ID appended as its last segment.
    pub(crate) fn api_url_id(&self, stem: &str, id: impl Display) -> String {
        format!("{}/{}/{}.json", self.config.api_base.trim_end_matches('/'), stem, id)
    }

    /// Full URL of the given search API path.
    pub(crate) fn search_url(&self, path: &str) -> String {
        format!("{}/{}.json", self.config.search_base.trim_end_matches('/'), path)
    }
}

fn with_query(url: &str, params: &ParamList) -> String {
    if params.is_empty() {
        url.to_string()
    } else {
        let sep = if url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", url, sep, params.to_urlencoded())
    }
}

/// The OAuth authorization flow, run with this client's transport and settings.
///
/// See the [`auth`](auth/index.html) module for a walkthrough.
impl Client<OAuth> {
    /// Fetches a request token and holds it. See `OAuth::request_token`.
    pub fn request_token(&mut self) -> Result<TokenReply> {
        self.auth.request_token(&*self.transport, &self.config.options)
    }

    /// Returns the URL where a user can authorize a request token. See
    /// `OAuth::authorization_url`.
    pub fn authorization_url(&mut self, token: Option<&KeyPair>) -> Result<String> {
        self.auth
            .authorization_url(token, &*self.transport, &self.config.options)
    }

    /// Returns the URL where a user can sign in with a request token. See `OAuth::signin_url`.
    pub fn signin_url(&mut self, token: Option<&KeyPair>) -> Result<String> {
        self.auth
            .signin_url(token, &*self.transport, &self.config.options)
    }

    /// Trades the held request token for an access token. See `OAuth::access_token`.
    pub fn access_token(&mut self, verifier: Option<&str>) -> Result<TokenReply> {
        self.auth
            .access_token(verifier, &*self.transport, &self.config.options)
    }

    /// Replaces the token this client signs requests with.
    pub fn set_token(&mut self, token: KeyPair) {
        self.auth.set_token(token);
    }
}

/// Builder for a `Client`, started with `Client::builder`.
pub struct ClientBuilder<A: Authenticator> {
    auth: A,
    api_base: Option<String>,
    search_base: Option<String>,
    user_agent: Option<String>,
    options: TransportOptions,
    transport: Option<Box<dyn Transport>>,
}

impl<A: Authenticator> ClientBuilder<A> {
    /// Sends REST API calls to the given base URL instead of `https://api.twitter.com/1`.
    pub fn api_base(self, base: impl Into<String>) -> Self {
        ClientBuilder {
            api_base: Some(base.into()),
            ..self
        }
    }

    /// Sends search and search-host trend calls to the given base URL instead of
    /// `https://search.twitter.com`.
    pub fn search_base(self, base: impl Into<String>) -> Self {
        ClientBuilder {
            search_base: Some(base.into()),
            ..self
        }
    }

    /// Sets the `User-Agent` sent with requests that don't carry their own headers.
    pub fn user_agent(self, agent: impl Into<String>) -> Self {
        ClientBuilder {
            user_agent: Some(agent.into()),
            ..self
        }
    }

    /// Limits how long each request may take.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Sends requests through the given HTTP proxy.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.options.proxy = Some(proxy);
        self
    }

    /// Hands the given cache to the transport with every request.
    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.options.cache = Some(cache);
        self
    }

    /// Uses the given transport instead of the bundled hyper one.
    pub fn transport(self, transport: impl Transport + 'static) -> Self {
        ClientBuilder {
            transport: Some(Box::new(transport)),
            ..self
        }
    }

    /// Finishes the client.
    ///
    /// Fails if the user agent isn't a valid header value, or if the default transport can't be
    /// started.
    pub fn build(self) -> Result<Client<A>> {
        let defaults = ClientConfig::default();
        let user_agent = match self.user_agent {
            Some(agent) => HeaderValue::from_str(&agent)?,
            None => defaults.user_agent,
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => Box::new(HyperTransport::new()?),
        };

        Ok(Client {
            auth: self.auth,
            transport,
            config: ClientConfig {
                api_base: self.api_base.unwrap_or(defaults.api_base),
                search_base: self.search_base.unwrap_or(defaults.search_base),
                user_agent,
                options: self.options,
            },
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::auth::BasicAuth;
    use crate::common::Payload;
    use crate::error::Error;
    use crate::transport::mock::MockTransport;

    /// A `NoAuth` client answering from the given mock.
    pub(crate) fn client(transport: &Arc<MockTransport>) -> Client {
        Client::builder(NoAuth)
            .transport(transport.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn search_sends_query_string() {
        let transport = Arc::new(MockTransport::new().reply(200, r#"{"results": []}"#));
        let client = client(&transport);

        let resp = client.search("beer").unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::GET);
        assert!(sent.url.ends_with("?q=beer"), "{}", sent.url);
        assert_eq!(sent.url, "https://search.twitter.com/search.json?q=beer");
        assert!(sent.body.is_none());
        assert_eq!(resp.body.as_json().unwrap()["results"], serde_json::json!([]));
    }

    #[test]
    fn update_status_sends_form_body() {
        let transport = Arc::new(MockTransport::new());
        let client = Client::builder(BasicAuth::new("user", "pass"))
            .transport(transport.clone())
            .build()
            .unwrap();

        client.update_status("hello").unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url, "https://api.twitter.com/1/statuses/update.json");
        assert_eq!(sent.body.as_deref(), Some("status=hello"));
        assert_eq!(sent.headers.get(CONTENT_TYPE).unwrap(), FORM_CONTENT_TYPE);
    }

    #[test]
    fn non_json_body_is_text() {
        let transport = Arc::new(MockTransport::new().reply(200, "not json"));
        let client = client(&transport);

        let resp = client
            .request("https://api.twitter.com/1/help/test.json", Method::GET, None, None)
            .unwrap();
        assert_eq!(resp.body, Payload::Text("not json".to_string()));
    }

    #[test]
    fn error_status_is_returned() {
        let transport = Arc::new(MockTransport::new().reply(404, r#"{"error": "Not found"}"#));
        let client = client(&transport);

        let resp = client.show_status(1).unwrap();
        assert_eq!(resp.status.as_u16(), 404);
        assert!(!resp.is_success());
        assert_eq!(resp.body.as_json().unwrap()["error"], "Not found");
    }

    #[test]
    fn default_headers_applied() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);

        client
            .request("https://api.twitter.com/1/help/test.json", Method::GET, None, None)
            .unwrap();
        let sent = transport.last_request();
        assert_eq!(sent.headers.get(USER_AGENT).unwrap(), DEFAULT_USER_AGENT);
        assert!(sent.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn caller_headers_replace_defaults() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);

        let mut headers = Headers::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        client
            .request(
                "https://api.twitter.com/1/help/test.json",
                Method::POST,
                Some("{}".to_string()),
                Some(headers),
            )
            .unwrap();

        let sent = transport.last_request();
        assert!(sent.headers.get(USER_AGENT).is_none());
        assert_eq!(sent.headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn builder_overrides() {
        let transport = Arc::new(MockTransport::new());
        let client = Client::builder(NoAuth)
            .api_base("http://localhost:8080/1/")
            .search_base("http://localhost:8081")
            .user_agent("my-app/2.0")
            .timeout(Duration::from_secs(5))
            .transport(transport.clone())
            .build()
            .unwrap();

        assert_eq!(client.config().options.timeout, Some(Duration::from_secs(5)));

        client.verify_credentials().unwrap();
        let sent = transport.last_request();
        assert_eq!(sent.url, "http://localhost:8080/1/account/verify_credentials.json");
        assert_eq!(sent.headers.get(USER_AGENT).unwrap(), "my-app/2.0");

        client.search("beer").unwrap();
        assert_eq!(transport.last_request().url, "http://localhost:8081/search.json?q=beer");
    }

    #[test]
    fn builder_rejects_bad_user_agent() {
        let result = Client::builder(NoAuth)
            .user_agent("bad\nagent")
            .transport(MockTransport::new())
            .build();
        assert!(matches!(result, Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn oauth_client_flow() {
        let transport = Arc::new(
            MockTransport::new()
                .reply(200, "oauth_token=req&oauth_token_secret=req-secret")
                .reply(200, "oauth_token=acc&oauth_token_secret=acc-secret&screen_name=rustlang")
                .reply(200, r#"{"screen_name": "rustlang"}"#),
        );
        let mut client = Client::builder(OAuth::new(KeyPair::new("ck", "cs")).with_callback("oob"))
            .transport(transport.clone())
            .build()
            .unwrap();

        let url = client.authorization_url(None).unwrap();
        assert_eq!(url, "https://api.twitter.com/oauth/authorize?oauth_token=req");

        let reply = client.access_token(Some("0000")).unwrap();
        assert_eq!(reply.params.get("screen_name").map(String::as_str), Some("rustlang"));
        assert_eq!(client.auth().token(), Some(&KeyPair::new("acc", "acc-secret")));

        client.verify_credentials().unwrap();
        let sent = transport.last_request();
        let auth = sent
            .headers
            .get(hyper::header::AUTHORIZATION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(auth.contains("oauth_token=\"acc\""));
    }

    #[test]
    fn oauth_client_without_token_sends_nothing() {
        let transport = Arc::new(MockTransport::new());
        let client = Client::builder(OAuth::new(KeyPair::new("ck", "cs")))
            .transport(transport.clone())
            .build()
            .unwrap();

        assert!(matches!(client.home_timeline(&Default::default()), Err(Error::MissingToken)));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn set_token_replaces_held_token() {
        let mut client = Client::builder(OAuth::new(KeyPair::new("ck", "cs")))
            .transport(MockTransport::new())
            .build()
            .unwrap();

        client.set_token(KeyPair::new("a", "b"));
        assert_eq!(client.auth().token(), Some(&KeyPair::new("a", "b")));
        client.set_token(KeyPair::new("c", "d"));
        assert_eq!(client.auth().token(), Some(&KeyPair::new("c", "d")));
        assert_eq!(client.auth().consumer(), &KeyPair::new("ck", "cs"));
    }

    #[test]
    fn query_appends_to_existing() {
        let params = ParamList::new().add_param("page", "2");
        assert_eq!(with_query("https://x/a.json?q=1", &params), "https://x/a.json?q=1&page=2");
        assert_eq!(with_query("https://x/a.json", &ParamList::new()), "https://x/a.json");
    }
}
