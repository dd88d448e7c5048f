// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The layer that actually puts requests on the wire.
//!
//! Authentication strategies hand a finished `HttpRequest` to a `Transport`, along with the
//! `TransportOptions` the client was configured with. The client itself never looks inside those
//! options; they're only meaningful to the transport.
//!
//! `HyperTransport` is the default implementation. It's blocking: each call drives a hyper request
//! to completion on a private current-thread tokio runtime. Because of that, it must not be called
//! from inside another async runtime.

use std::sync::Arc;
use std::time::Duration;

use hyper::client::HttpConnector;
use hyper::header::{HeaderName, ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use hyper::{Body, Method, Request, StatusCode, Uri};
use tracing::{debug, trace};

use crate::common::Headers;
use crate::error::{Error, Result};

mod cache;
mod proxy;

pub use self::cache::{Cache, CachedResponse, MemoryCache};
pub use self::proxy::Proxy;

/// A request ready to be sent, with any credentials already applied.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method to use.
    pub method: Method,
    /// The full target URL, including any query string.
    pub url: String,
    /// The headers to send.
    pub headers: Headers,
    /// The pre-encoded request body, if any.
    pub body: Option<String>,
}

/// A response as it came off the wire.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// The HTTP status of the response.
    pub status: StatusCode,
    /// The response headers.
    pub headers: Headers,
    /// The response body, as text.
    pub body: String,
}

/// Settings forwarded to the transport with every request.
#[derive(Clone, Default)]
pub struct TransportOptions {
    /// A cache handle the transport may use to revalidate `GET` responses.
    pub cache: Option<Arc<dyn Cache>>,
    /// How long a request may take, from connecting to reading the last byte of the body.
    pub timeout: Option<Duration>,
    /// An HTTP proxy to send requests through.
    pub proxy: Option<Proxy>,
}

impl std::fmt::Debug for TransportOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("TransportOptions")
            .field("cache", &self.cache.is_some())
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .finish()
    }
}

/// Something that can perform an HTTP request.
pub trait Transport: Send + Sync {
    /// Sends the given request and waits for the full response.
    fn send(&self, request: HttpRequest, options: &TransportOptions) -> Result<RawResponse>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: HttpRequest, options: &TransportOptions) -> Result<RawResponse> {
        (**self).send(request, options)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: HttpRequest, options: &TransportOptions) -> Result<RawResponse> {
        (**self).send(request, options)
    }
}

#[cfg(feature = "native_tls")]
type Connector = hyper_tls::HttpsConnector<HttpConnector>;
#[cfg(not(feature = "native_tls"))]
type Connector = HttpConnector;

fn connector() -> Result<Connector> {
    #[cfg(feature = "native_tls")]
    {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        let tls = native_tls::TlsConnector::new()?;
        Ok(hyper_tls::HttpsConnector::from((http, tls.into())))
    }

    #[cfg(not(feature = "native_tls"))]
    {
        Ok(HttpConnector::new())
    }
}

/// The default `Transport`, built on hyper.
pub struct HyperTransport {
    runtime: tokio::runtime::Runtime,
}

impl HyperTransport {
    /// Creates a new `HyperTransport`, with its own single-threaded runtime.
    pub fn new() -> Result<HyperTransport> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(HyperTransport { runtime })
    }

    async fn execute(request: HttpRequest, options: &TransportOptions) -> Result<RawResponse> {
        let uri: Uri = request.url.parse()?;
        let cached = match (&request.method, &options.cache) {
            (&Method::GET, Some(cache)) => cache.get(&request.url),
            _ => None,
        };

        let mut req = Request::new(request.body.map(Body::from).unwrap_or_else(Body::empty));
        *req.method_mut() = request.method.clone();
        *req.headers_mut() = request.headers;

        if let Some(entry) = &cached {
            if let Some(etag) = &entry.etag {
                req.headers_mut().insert(IF_NONE_MATCH, etag.parse()?);
            }
            if let Some(modified) = &entry.last_modified {
                req.headers_mut().insert(IF_MODIFIED_SINCE, modified.parse()?);
            }
        }

        let pending = match &options.proxy {
            Some(proxy) => {
                let connector = proxy.connector()?;
                if let Some(headers) = connector.http_headers(&uri) {
                    req.headers_mut().extend(headers.clone());
                }
                *req.uri_mut() = uri;
                hyper::Client::builder().build::<_, Body>(connector).request(req)
            }
            None => {
                *req.uri_mut() = uri;
                hyper::Client::builder().build::<_, Body>(connector()?).request(req)
            }
        };

        let resp = pending.await?;
        let (parts, body) = resp.into_parts();
        let bytes = hyper::body::to_bytes(body).await?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        if let (Some(entry), StatusCode::NOT_MODIFIED) = (&cached, parts.status) {
            trace!(url = %request.url, "serving 304 response from cache");
            return Ok(RawResponse {
                status: StatusCode::OK,
                headers: parts.headers,
                body: entry.body.clone(),
            });
        }

        if let (Some(cache), &Method::GET, StatusCode::OK) =
            (&options.cache, &request.method, parts.status)
        {
            let header = |name: HeaderName| {
                parts
                    .headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            let etag = header(ETAG);
            let last_modified = header(LAST_MODIFIED);

            if etag.is_some() || last_modified.is_some() {
                trace!(url = %request.url, "storing response in cache");
                cache.set(
                    &request.url,
                    CachedResponse {
                        etag,
                        last_modified,
                        body: body.clone(),
                    },
                );
            }
        }

        Ok(RawResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}

impl Transport for HyperTransport {
    fn send(&self, request: HttpRequest, options: &TransportOptions) -> Result<RawResponse> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let exchange = HyperTransport::execute(request, options);
        self.runtime.block_on(async {
            match options.timeout {
                Some(limit) => tokio::time::timeout(limit, exchange)
                    .await
                    .map_err(|_| Error::Timeout(limit))?,
                None => exchange.await,
            }
        })
    }
}
