// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Set of structs and methods that act as a sort of internal prelude.
//!
//! The elements available in this module and its children are fairly basic building blocks that
//! the other modules all glob-import to make available as a common language.
//!
//! # Module contents
//!
//! ## Type Aliases
//!
//! * `hyper::header::HeaderMap<hyper::header::HeaderValue>` (re-exported as the alias `Headers`)
//! * `Cow<'static, str>` (as `CowStr`)
//!
//! ## `ParamList`
//!
//! `ParamList` is the collection of parameters to a given web call. Every endpoint method builds
//! one, and the dispatcher turns it into either a query string or a form body. `add_opt_param`
//! and `collect_present` are where absent optional arguments get dropped, so that nothing ever
//! gets serialized as an empty or `null` value.
//!
//! `add_user_param` and `add_list_param` put a `UserID` or `ListID` into the list using the
//! parameter names Twitter expects for them.
//!
//! `exactly_one` is the validation shared by every call that takes "an ID or a name, but not
//! both". It runs before anything touches the network.
//!
//! ## `Response`
//!
//! In its own module, `Response` is the decoded result of every call through the dispatcher: the
//! status, the headers (with the rate-limit info parsed out on request), and a `Payload` that is
//! either decoded JSON or the raw text when the body wasn't JSON.

use std::borrow::Cow;
use std::collections::BTreeMap;

use hyper::header::{HeaderMap, HeaderValue};
use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode};

mod response;

pub use crate::common::response::*;
use crate::error::{Error, Result};
use crate::{list, user};

// n.b. this type alias is re-exported at the crate root - these docs are public!
/// A set of headers sent with a request or returned with a response.
pub type Headers = HeaderMap<HeaderValue>;
pub type CowStr = Cow<'static, str>;

// n.b. this type is re-exported at the crate root - these docs are public!
/// Represents a list of parameters to a Twitter API call.
///
/// This type is a wrapper around a `BTreeMap<Cow<'static, str>, Cow<'static, str>>` to collect a
/// set of parameter key/value pairs. These are then used to assemble (and, with OAuth, sign) a
/// Twitter API request. The `Cow` type is used to avoid having to allocate a `String` if a string
/// literal is used for a parameter. Keys are kept sorted, so the encoded form of a `ParamList` is
/// the same every time.
///
/// Most of the functions to add parameters follow a builder pattern, so that you can assemble a
/// `ParamList` in a single statement:
///
/// ```
/// use twitapi::ParamList;
///
/// let params = ParamList::new()
///     .add_param("q", "beer")
///     .add_opt_param("lang", None::<&str>);
///
/// assert_eq!(params.to_urlencoded(), "q=beer");
/// ```
#[derive(Debug, Clone, Default, PartialEq, derive_more::Deref, derive_more::DerefMut, derive_more::From)]
pub struct ParamList(BTreeMap<CowStr, CowStr>);

impl ParamList {
    /// Creates a new, empty `ParamList`.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds the given key/value parameter to this `ParamList`.
    pub fn add_param(mut self, key: impl Into<CowStr>, value: impl Into<CowStr>) -> Self {
        self.insert(key.into(), value.into());
        self
    }

    /// Adds the given key/value parameter to this `ParamList` only if the given value is `Some`.
    ///
    /// If the given value is `None`, then the `ParamList` is returned unmodified.
    pub fn add_opt_param(self, key: impl Into<CowStr>, value: Option<impl Into<CowStr>>) -> Self {
        match value {
            Some(val) => self.add_param(key.into(), val.into()),
            None => self,
        }
    }

    /// Adds the given key/value to this `ParamList` by mutating it in place, rather than consuming
    /// it as in `add_param`.
    pub fn add_param_ref(&mut self, key: impl Into<CowStr>, value: impl Into<CowStr>) {
        self.0.insert(key.into(), value.into());
    }

    /// Adds the given `UserID` as a parameter to this `ParamList` by adding either a `user_id` or
    /// `screen_name` parameter as appropriate.
    pub fn add_user_param(self, id: user::UserID) -> Self {
        match id {
            user::UserID::ID(id) => self.add_param("user_id", id.to_string()),
            user::UserID::ScreenName(name) => self.add_param("screen_name", name),
        }
    }

    /// Adds the given `ListID` as a parameter to this `ParamList` by adding either an
    /// `owner_id`/`owner_screen_name` and `slug` pair, or a `list_id`, as appropriate.
    pub fn add_list_param(mut self, list: list::ListID) -> Self {
        match list {
            list::ListID::Slug(owner, slug) => {
                match owner {
                    user::UserID::ID(id) => {
                        self.add_param_ref("owner_id", id.to_string());
                    }
                    user::UserID::ScreenName(name) => {
                        self.add_param_ref("owner_screen_name", name);
                    }
                }
                self.add_param("slug", slug)
            }
            list::ListID::ID(id) => self.add_param("list_id", id.to_string()),
        }
    }

    /// Merge the parameters from the given `ParamList` into this one.
    pub(crate) fn combine(&mut self, other: ParamList) {
        self.0.extend(other.0);
    }

    /// Renders this `ParamList` as an `application/x-www-form-urlencoded` string.
    ///
    /// The key/value pairs are printed as `key1=value1&key2=value2`, with all keys and values
    /// being percent-encoded according to Twitter's requirements.
    pub fn to_urlencoded(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Collects the given parameters into a `ParamList`, leaving out every pair whose value is `None`.
///
/// Keys and values of the remaining pairs are kept as given. This is how optional arguments to
/// an API call are kept out of the query string entirely instead of being sent empty.
///
/// ```
/// use twitapi::collect_present;
///
/// let params = collect_present(vec![
///     ("count", Some("20".to_string())),
///     ("page", None),
/// ]);
///
/// assert_eq!(params.len(), 1);
/// assert_eq!(params.to_urlencoded(), "count=20");
/// ```
pub fn collect_present<I, K, V>(pairs: I) -> ParamList
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<CowStr>,
    V: Into<CowStr>,
{
    pairs
        .into_iter()
        .fold(ParamList::new(), |params, (key, value)| params.add_opt_param(key, value))
}

/// Picks the one identifier out of a pair that must not both be set, or both be empty.
///
/// `names` gives the parameter names of `first` and `second`, for error reporting.
pub(crate) fn exactly_one<A, B>(
    first: Option<A>,
    second: Option<B>,
    names: (&'static str, &'static str),
    expected: &'static str,
) -> Result<Either<A, B>> {
    match (first, second) {
        (Some(a), None) => Ok(Either::First(a)),
        (None, Some(b)) => Ok(Either::Second(b)),
        (Some(_), Some(_)) => Err(Error::ConflictingIdentifiers(names.0, names.1)),
        (None, None) => Err(Error::MissingIdentifier(expected)),
    }
}

/// The identifier `exactly_one` settled on.
pub(crate) enum Either<A, B> {
    First(A),
    Second(B),
}

// Helper trait to stringify the contents of an Option
pub(crate) trait MapString {
    fn map_string(&self) -> Option<String>;
}

impl<T: std::fmt::Display> MapString for Option<T> {
    fn map_string(&self) -> Option<String> {
        self.as_ref().map(|v| v.to_string())
    }
}

/// Joins the given IDs into the comma-separated form Twitter takes for bulk lookups.
pub(crate) fn join_ids<I: IntoIterator<Item = u64>>(ids: I) -> String {
    ids.into_iter().fold(String::new(), |mut acc, x| {
        if !acc.is_empty() {
            acc.push(',');
        }
        acc.push_str(&x.to_string());
        acc
    })
}

/// Percent-encodes the given string based on the Twitter API specification.
///
/// Twitter bases its encoding scheme on RFC 3986, Section 2.1: every *byte* that is not an ASCII
/// number or letter, or the ASCII characters `-`, `.`, `_`, or `~` must be replaced with a percent
/// sign (`%`) and the byte value in hexadecimal.
pub fn percent_encode(src: &str) -> PercentEncode<'_> {
    lazy_static::lazy_static! {
        static ref ENCODER: AsciiSet = percent_encoding::NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');
    }
    utf8_percent_encode(src, &*ENCODER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListID;
    use crate::user::UserID;

    #[test]
    fn collect_present_drops_absent() {
        let params = collect_present(vec![
            ("count", Some("20")),
            ("since_id", None),
            ("page", Some("2")),
            ("max_id", None),
        ]);

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("count").map(|v| v.as_ref()), Some("20"));
        assert_eq!(params.get("page").map(|v| v.as_ref()), Some("2"));
        assert!(!params.contains_key("since_id"));
        assert!(!params.contains_key("max_id"));
    }

    #[test]
    fn collect_present_all_absent_is_empty() {
        let params = collect_present(vec![("count", None::<String>), ("page", None)]);
        assert!(params.is_empty());
        assert_eq!(params.to_urlencoded(), "");
    }

    #[test]
    fn collect_present_keeps_values_verbatim() {
        let params = collect_present(vec![("status", Some("hello world & more"))]);
        assert_eq!(params.get("status").map(|v| v.as_ref()), Some("hello world & more"));
        assert_eq!(params.to_urlencoded(), "status=hello%20world%20%26%20more");
    }

    #[test]
    fn urlencoded_is_sorted() {
        let params = ParamList::new()
            .add_param("rpp", "10")
            .add_param("q", "beer")
            .add_param("lang", "en");
        assert_eq!(params.to_urlencoded(), "lang=en&q=beer&rpp=10");
    }

    #[test]
    fn percent_encoding_matches_twitter() {
        assert_eq!(
            percent_encode("Ladies + Gentlemen").to_string(),
            "Ladies%20%2B%20Gentlemen"
        );
        assert_eq!(percent_encode("An encoded string!").to_string(), "An%20encoded%20string%21");
        assert_eq!(percent_encode("Dogs, Cats & Mice").to_string(), "Dogs%2C%20Cats%20%26%20Mice");
        assert_eq!(percent_encode("☃").to_string(), "%E2%98%83");
        assert_eq!(percent_encode("a-b.c_d~e").to_string(), "a-b.c_d~e");
    }

    #[test]
    fn user_and_list_params() {
        let params = ParamList::new().add_user_param(UserID::ID(1234));
        assert_eq!(params.to_urlencoded(), "user_id=1234");

        let params = ParamList::new().add_user_param("rustlang".into());
        assert_eq!(params.to_urlencoded(), "screen_name=rustlang");

        let params = ParamList::new().add_list_param(ListID::from_slug("rustlang", "fun-folks"));
        assert_eq!(params.to_urlencoded(), "owner_screen_name=rustlang&slug=fun-folks");

        let params = ParamList::new().add_list_param(ListID::from_id(42));
        assert_eq!(params.to_urlencoded(), "list_id=42");
    }

    #[test]
    fn exactly_one_rejects_both_and_neither() {
        let both = exactly_one(Some(1u64), Some("x"), ("user_id", "screen_name"), "user_id or screen_name");
        assert!(matches!(both, Err(Error::ConflictingIdentifiers("user_id", "screen_name"))));

        let neither = exactly_one(None::<u64>, None::<&str>, ("user_id", "screen_name"), "user_id or screen_name");
        assert!(matches!(neither, Err(Error::MissingIdentifier(_))));

        assert!(matches!(
            exactly_one(Some(1u64), None::<&str>, ("a", "b"), "a or b"),
            Ok(Either::First(1))
        ));
        assert!(matches!(
            exactly_one(None::<u64>, Some("x"), ("a", "b"), "a or b"),
            Ok(Either::Second("x"))
        ));
    }

    #[test]
    fn join_ids_commas() {
        assert_eq!(join_ids(vec![1, 2, 3]), "1,2,3");
        assert_eq!(join_ids(Vec::new()), "");
    }
}
