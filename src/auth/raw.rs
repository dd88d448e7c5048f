// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Internal mechanisms for the `auth` module: OAuth 1.0a request signing.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac, NewMac};
use hyper::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use hyper::Method;
use rand::{self, Rng};
use sha1::Sha1;
use url::Url;

use crate::common::*;
use crate::error::Result;
use crate::transport::HttpRequest;

use super::KeyPair;

/// OAuth header set used to create an OAuth signature.
#[derive(Clone, Debug)]
pub(crate) struct OAuthParams {
    /// The consumer key that represents the app making the API request.
    consumer_key: KeyPair,
    /// The token that represents the user authorizing the request (or the request token
    /// representing a user in the middle of authorizing the app).
    token: Option<KeyPair>,
    /// A random token representing the request itself. Used to de-duplicate requests on Twitter's
    /// end.
    nonce: String,
    /// A Unix timestamp for when the request was created.
    timestamp: u64,
    /// A callback or verifier parameter, if necessary.
    addon: OAuthAddOn,
}

impl OAuthParams {
    /// Creates a new `OAuthParams` header with the given keys, a new `timestamp` and `nonce`. The
    /// `token` is optional specifically for when you're generating a request token; otherwise it
    /// should be the request token (for when you're generating an access token) or an access token
    /// (for when you're requesting a regular API function).
    pub(crate) fn from_keys(consumer_key: KeyPair, token: Option<KeyPair>) -> OAuthParams {
        let timestamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(dur) => dur,
            Err(err) => err.duration(),
        }
        .as_secs();
        let nonce = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(32)
            .map(char::from)
            .collect::<String>();
        OAuthParams {
            consumer_key,
            token,
            nonce,
            timestamp,
            addon: OAuthAddOn::None,
        }
    }

    /// Adds the given callback or verifier to this `OAuthParams` header.
    pub(crate) fn with_addon(self, addon: OAuthAddOn) -> OAuthParams {
        OAuthParams { addon, ..self }
    }

    /// Uses the parameters in this `OAuthParams` instance to generate a signature for the given
    /// request, returning it as a `SignedHeader`.
    ///
    /// `uri` is the base URI of the request, without a query string; `params` are every query and
    /// form-body parameter that goes along with it.
    pub(crate) fn sign_request(self, method: &Method, uri: &str, params: &ParamList) -> SignedHeader {
        let query_string = {
            let sig_params = params
                .clone()
                .add_param("oauth_consumer_key", self.consumer_key.key.clone())
                .add_param("oauth_nonce", self.nonce.clone())
                .add_param("oauth_signature_method", "HMAC-SHA1")
                .add_param("oauth_timestamp", self.timestamp.to_string())
                .add_param("oauth_version", "1.0")
                .add_opt_param("oauth_token", self.token.clone().map(|k| k.key))
                .add_opt_param("oauth_callback", self.addon.as_callback().map(|s| s.to_string()))
                .add_opt_param("oauth_verifier", self.addon.as_verifier().map(|s| s.to_string()));

            let mut query = sig_params
                .iter()
                .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
                .collect::<Vec<_>>();
            query.sort();

            query.join("&")
        };

        let base_str = format!(
            "{}&{}&{}",
            percent_encode(method.as_str()),
            percent_encode(uri),
            percent_encode(&query_string)
        );
        let key = format!(
            "{}&{}",
            percent_encode(&self.consumer_key.secret),
            percent_encode(self.token.as_ref().map_or("", |t| t.secret.as_ref()))
        );

        // HMAC takes keys of any length
        let mut digest = Hmac::<Sha1>::new_from_slice(key.as_bytes()).expect("Wrong key length");
        digest.update(base_str.as_bytes());

        let mut params: BTreeMap<&'static str, CowStr> = BTreeMap::new();
        params.insert("oauth_signature_method", "HMAC-SHA1".into());
        params.insert("oauth_version", "1.0".into());

        params.insert("oauth_consumer_key", self.consumer_key.key);
        if let Some(token) = self.token {
            params.insert("oauth_token", token.key);
        }

        params.insert("oauth_nonce", self.nonce.into());
        params.insert("oauth_timestamp", self.timestamp.to_string().into());

        match self.addon {
            OAuthAddOn::Callback(c) => {
                params.insert("oauth_callback", c.into());
            }
            OAuthAddOn::Verifier(v) => {
                params.insert("oauth_verifier", v.into());
            }
            OAuthAddOn::None => (),
        }

        params.insert(
            "oauth_signature",
            base64::encode(&digest.finalize().into_bytes()).into(),
        );

        SignedHeader { params }
    }
}

/// Represents an "addon" to an OAuth header.
#[derive(Clone, Debug)]
pub(crate) enum OAuthAddOn {
    /// An `oauth_callback` parameter, used when generating a request token.
    Callback(String),
    /// An `oauth_verifier` parameter, used when generating an access token.
    Verifier(String),
    /// Neither an `oauth_callback` nor an `oauth_verifier` parameter are present in this header.
    /// This is the default used when signing a regular API request.
    None,
}

impl OAuthAddOn {
    /// Returns the `oauth_callback` parameter, if present.
    fn as_callback(&self) -> Option<&str> {
        match self {
            OAuthAddOn::Callback(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the `oauth_verifier` parameter, if present.
    fn as_verifier(&self) -> Option<&str> {
        match self {
            OAuthAddOn::Verifier(v) => Some(v),
            _ => None,
        }
    }
}

/// A set of `OAuthParams` parameters combined with a request signature, ready to be attached to a
/// request.
pub(crate) struct SignedHeader {
    /// The OAuth parameters used to create the signature.
    params: BTreeMap<&'static str, Cow<'static, str>>,
}

/// The `Display` impl for `SignedHeader` formats it as an `Authorization` header for an HTTP
/// request.
impl fmt::Display for SignedHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // authorization scheme
        write!(f, "OAuth ")?;

        // authorization data

        let mut first = true;
        for (k, v) in &self.params {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }

            write!(f, "{}=\"{}\"", k, percent_encode(v))?;
        }

        Ok(())
    }
}

/// Splits a request URL into the base URI used in the signature and its query parameters.
///
/// The base URI has its scheme and host lowercased and any default port dropped, which `Url`
/// already does when it parses.
fn split_url(url: &str) -> Result<(String, ParamList)> {
    let parsed = Url::parse(url)?;

    let mut base = parsed.clone();
    base.set_query(None);
    base.set_fragment(None);

    let mut params = ParamList::new();
    for (k, v) in parsed.query_pairs() {
        params.add_param_ref(k.into_owned(), v.into_owned());
    }

    Ok((base.to_string(), params))
}

/// Returns whether the request body is form data, whose parameters take part in the signature.
fn has_form_body(request: &HttpRequest) -> bool {
    request
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok())
        .map_or(false, |m| m.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str())
}

/// Signs the given request with the consumer key, the optional token and the addon, and attaches
/// the result as its `Authorization` header.
pub(crate) fn sign(
    request: &mut HttpRequest,
    consumer: &KeyPair,
    token: Option<&KeyPair>,
    addon: OAuthAddOn,
) -> Result<()> {
    let (base_uri, mut params) = split_url(&request.url)?;

    if has_form_body(request) {
        if let Some(body) = &request.body {
            let mut form = ParamList::new();
            for (k, v) in url::form_urlencoded::parse(body.as_bytes()) {
                form.add_param_ref(k.into_owned(), v.into_owned());
            }
            params.combine(form);
        }
    }

    let header = OAuthParams::from_keys(consumer.clone(), token.cloned())
        .with_addon(addon)
        .sign_request(&request.method, &base_uri, &params);

    request
        .headers
        .insert(AUTHORIZATION, HeaderValue::from_str(&header.to_string())?);

    Ok(())
}

/// Creates a basic `Authorization` header value from the given credentials.
pub(crate) fn basic_authorization(username: &str, password: &str) -> String {
    let text = format!("{}:{}", username, password);
    format!("Basic {}", base64::encode(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Headers;

    #[test]
    fn basic_header() {
        let output = basic_authorization("Aladdin", "open sesame");
        assert_eq!(output, "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
    }

    // the worked example from Twitter's "Creating a signature" documentation
    #[test]
    fn signature_matches_published_example() {
        let params = ParamList::new()
            .add_param("include_entities", "true")
            .add_param("status", "Hello Ladies + Gentlemen, a signed OAuth request!");

        let oauth = OAuthParams {
            consumer_key: KeyPair::new(
                "xvz1evFS4wEEPTGEFPHBog",
                "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
            ),
            token: Some(KeyPair::new(
                "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
                "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
            )),
            nonce: "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg".to_string(),
            timestamp: 1318622958,
            addon: OAuthAddOn::None,
        };

        let header = oauth.sign_request(
            &Method::POST,
            "https://api.twitter.com/1.1/statuses/update.json",
            &params,
        );

        assert_eq!(header.params["oauth_signature"], "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");

        let rendered = header.to_string();
        assert!(rendered.starts_with("OAuth "));
        assert!(rendered.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        assert!(rendered.contains("oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
    }

    #[test]
    fn split_url_separates_query() {
        let (base, params) =
            split_url("HTTPS://API.Twitter.com:443/1/search.json?q=beer%20me&rpp=5").unwrap();
        assert_eq!(base, "https://api.twitter.com/1/search.json");
        assert_eq!(params.to_urlencoded(), "q=beer%20me&rpp=5");
    }

    #[test]
    fn sign_attaches_header_with_body_params() {
        let mut headers = Headers::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        let mut request = HttpRequest {
            method: Method::POST,
            url: "https://api.twitter.com/1/statuses/update.json".to_string(),
            headers,
            body: Some("status=hello".to_string()),
        };

        sign(
            &mut request,
            &KeyPair::new("key", "secret"),
            Some(&KeyPair::new("token", "token-secret")),
            OAuthAddOn::None,
        )
        .unwrap();

        let auth = request.headers.get(AUTHORIZATION).unwrap().to_str().unwrap();
        assert!(auth.starts_with("OAuth "));
        assert!(auth.contains("oauth_token=\"token\""));
        assert!(auth.contains("oauth_signature=\""));
        // the body itself is left alone
        assert_eq!(request.body.as_deref(), Some("status=hello"));
    }

    #[test]
    fn verifier_and_callback_are_sent() {
        let header = OAuthParams::from_keys(KeyPair::new("key", "secret"), None)
            .with_addon(OAuthAddOn::Callback("oob".to_string()))
            .sign_request(&Method::GET, "https://api.twitter.com/oauth/request_token", &ParamList::new());
        assert_eq!(header.params["oauth_callback"], "oob");
        assert!(!header.params.contains_key("oauth_token"));

        let header = OAuthParams::from_keys(KeyPair::new("key", "secret"), Some(KeyPair::new("t", "s")))
            .with_addon(OAuthAddOn::Verifier("1234567".to_string()))
            .sign_request(&Method::POST, "https://api.twitter.com/oauth/access_token", &ParamList::new());
        assert_eq!(header.params["oauth_verifier"], "1234567");
        assert_eq!(header.params["oauth_token"], "t");
    }
}
