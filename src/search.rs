// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and methods for searching for tweets.
//!
//! Since there are several optional parameters for searches, they're set with a builder. To
//! begin, call `search` with your requested search term. Additional parameters can be added onto
//! the `SearchBuilder` that is returned. When you're ready to load a page of results, hand your
//! client to `call`.
//!
//! ```rust,no_run
//! use twitapi::{Client, NoAuth};
//! use twitapi::search::{self, ResultType};
//!
//! # fn main() -> twitapi::error::Result<()> {
//! let client = Client::new(NoAuth)?;
//! let resp = search::search("rustlang")
//!                   .result_type(ResultType::Recent)
//!                   .per_page(50)
//!                   .call(&client)?;
//!
//! if let Some(results) = resp.body.as_json().and_then(|j| j["results"].as_array()) {
//!     for tweet in results {
//!         println!("(@{}) {}", tweet["from_user"], tweet["text"]);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Search runs on its own host (`https://search.twitter.com` unless the client was configured
//! otherwise) and needs no authentication. For a plain query with no options,
//! `Client::search` does the same in one step.

use std::fmt;

use crate::auth::Authenticator;
use crate::client::Client;
use crate::common::*;
use crate::error::{Error, Result};
use crate::links;

///Begin setting up a tweet search with the given query.
pub fn search(query: impl Into<CowStr>) -> SearchBuilder {
    SearchBuilder {
        query: query.into(),
        lang: None,
        locale: None,
        result_type: None,
        per_page: None,
        page: None,
        until: None,
        geocode: None,
        since_id: None,
        max_id: None,
    }
}

///Represents what kind of tweets should be included in search results.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResultType {
    ///Return only the most recent tweets in the response.
    Recent,
    ///Return only the most popular tweets in the response.
    Popular,
    ///Include both popular and real-time results in the response.
    Mixed,
}

///Display impl that turns the variants into strings that can be used as search parameters.
impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ResultType::Recent => write!(f, "recent"),
            ResultType::Popular => write!(f, "popular"),
            ResultType::Mixed => write!(f, "mixed"),
        }
    }
}

///Represents a radius around a given location to return search results for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Distance {
    ///A radius given in miles.
    Miles(f32),
    ///A radius given in kilometers.
    Kilometers(f32),
}

///Represents a tweet search query before being sent.
#[derive(Debug, Clone)]
#[must_use = "SearchBuilder is lazy and won't do anything unless `call`ed"]
pub struct SearchBuilder {
    ///The text to search for.
    query: CowStr,
    lang: Option<CowStr>,
    locale: Option<CowStr>,
    result_type: Option<ResultType>,
    per_page: Option<u32>,
    page: Option<u32>,
    until: Option<(u32, u32, u32)>,
    geocode: Option<(f32, f32, Distance)>,
    since_id: Option<u64>,
    max_id: Option<u64>,
}

impl SearchBuilder {
    ///Restrict search results to those that have been machine-parsed as the given two-letter
    ///language code.
    pub fn lang(self, lang: impl Into<CowStr>) -> Self {
        SearchBuilder {
            lang: Some(lang.into()),
            ..self
        }
    }

    ///Specify the language of the query. Only `ja` is effective.
    pub fn locale(self, locale: impl Into<CowStr>) -> Self {
        SearchBuilder {
            locale: Some(locale.into()),
            ..self
        }
    }

    ///Specify the type of search results to include. The default is `Mixed`.
    pub fn result_type(self, result_type: ResultType) -> Self {
        SearchBuilder {
            result_type: Some(result_type),
            ..self
        }
    }

    ///Set the number of tweets to return per page, up to a maximum of 100. The default is 15.
    pub fn per_page(self, per_page: u32) -> Self {
        SearchBuilder {
            per_page: Some(per_page),
            ..self
        }
    }

    ///Set the page number to return, starting at 1. Around 1500 results can be reached in total.
    pub fn page(self, page: u32) -> Self {
        SearchBuilder {
            page: Some(page),
            ..self
        }
    }

    ///Returns tweets created before the given date. Keep in mind that search is limited to the
    ///last several days of results, so an older date here will return no results.
    pub fn until(self, year: u32, month: u32, day: u32) -> Self {
        SearchBuilder {
            until: Some((year, month, day)),
            ..self
        }
    }

    ///Restricts results to users located within the given radius of the given coordinate.
    pub fn geocode(self, latitude: f32, longitude: f32, radius: Distance) -> Self {
        SearchBuilder {
            geocode: Some((latitude, longitude, radius)),
            ..self
        }
    }

    ///Restricts results to those with higher IDs than (i.e. that were posted after) the given
    ///tweet ID.
    pub fn since_tweet(self, since_id: u64) -> Self {
        SearchBuilder {
            since_id: Some(since_id),
            ..self
        }
    }

    ///Restricts results to those with IDs no higher than (i.e. were posted earlier than) the given
    ///tweet ID. Will include the given tweet in search results.
    pub fn max_tweet(self, max_id: u64) -> Self {
        SearchBuilder {
            max_id: Some(max_id),
            ..self
        }
    }

    fn params(&self) -> ParamList {
        let until = self
            .until
            .map(|(year, month, day)| format!("{}-{:02}-{:02}", year, month, day));
        let geocode = self.geocode.map(|(lat, long, radius)| match radius {
            Distance::Miles(r) => format!("{},{},{}mi", lat, long, r),
            Distance::Kilometers(r) => format!("{},{},{}km", lat, long, r),
        });

        collect_present(vec![
            ("lang", self.lang.as_ref().map(|l| l.to_string())),
            ("locale", self.locale.as_ref().map(|l| l.to_string())),
            ("result_type", self.result_type.map_string()),
            ("rpp", self.per_page.map_string()),
            ("page", self.page.map_string()),
            ("until", until),
            ("geocode", geocode),
            ("since_id", self.since_id.map_string()),
            ("max_id", self.max_id.map_string()),
        ])
        .add_param("q", self.query.clone())
    }

    ///Finalize the search terms and return a page of results.
    ///
    ///Fails with `InvalidArgument` without sending anything if the query is blank.
    pub fn call<A: Authenticator>(&self, client: &Client<A>) -> Result<Response> {
        if self.query.trim().is_empty() {
            return Err(Error::InvalidArgument("q", "search query is empty".to_string()));
        }
        client.get(&client.search_url(links::search::SEARCH), &self.params())
    }
}

impl<A: Authenticator> Client<A> {
    /// Searches for tweets matching the given query, with no further options.
    ///
    /// This is the same as `search::search(query).call(&client)`.
    pub fn search(&self, query: impl Into<CowStr>) -> Result<Response> {
        search(query).call(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::tests::client;
    use crate::transport::mock::MockTransport;

    #[test]
    fn bare_query() {
        let transport = Arc::new(MockTransport::new());
        search("beer").call(&client(&transport)).unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://search.twitter.com/search.json?q=beer"
        );
    }

    #[test]
    fn all_options() {
        let transport = Arc::new(MockTransport::new());
        search("#rustlang")
            .lang("en")
            .result_type(ResultType::Popular)
            .per_page(100)
            .page(2)
            .until(2010, 6, 1)
            .geocode(37.78, -122.4, Distance::Miles(5.0))
            .since_tweet(1000)
            .call(&client(&transport))
            .unwrap();

        assert_eq!(
            transport.last_request().url,
            "https://search.twitter.com/search.json?\
             geocode=37.78%2C-122.4%2C5mi&lang=en&page=2&q=%23rustlang&result_type=popular&\
             rpp=100&since_id=1000&until=2010-06-01"
        );
    }

    #[test]
    fn blank_query_is_rejected() {
        let transport = Arc::new(MockTransport::new());
        let result = search("  ").call(&client(&transport));
        assert!(matches!(result, Err(Error::InvalidArgument("q", _))));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn builder_is_reusable() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);
        let query = search("beer").lang("de");

        query.call(&client).unwrap();
        query.clone().page(2).call(&client).unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].url, "https://search.twitter.com/search.json?lang=de&q=beer");
        assert_eq!(sent[1].url, "https://search.twitter.com/search.json?lang=de&page=2&q=beer");
    }
}
