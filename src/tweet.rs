// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Timelines, statuses, and favorites.
//!
//! ## Timelines
//!
//! Every timeline call takes a `TimelineOptions` to page through it. Leave a field as `None` and
//! it isn't sent at all:
//!
//! ```rust,no_run
//! use twitapi::{Client, NoAuth, tweet::TimelineOptions};
//!
//! # fn main() -> twitapi::error::Result<()> {
//! # let client = Client::new(NoAuth)?;
//! let first = client.user_timeline(Some("rustlang".into()), &TimelineOptions::default())?;
//!
//! // and the next page, older than the last status we saw
//! let older = TimelineOptions {
//!     max_id: Some(1234),
//!     count: Some(50),
//!     ..TimelineOptions::default()
//! };
//! let second = client.user_timeline(Some("rustlang".into()), &older)?;
//! # Ok(())
//! # }
//! ```
//!
//! - `public_timeline`
//! - `home_timeline`/`friends_timeline`
//! - `user_timeline`
//! - `mentions`
//! - `retweeted_by_me`/`retweeted_to_me`/`retweets_of_me`
//!
//! ## Statuses
//!
//! - `show_status`
//! - `update_status`/`update_status_with`
//! - `destroy_status`
//! - `retweet`/`retweets`
//!
//! ## Favorites
//!
//! - `favorites`
//! - `create_favorite`/`destroy_favorite`

use crate::auth::Authenticator;
use crate::client::Client;
use crate::common::*;
use crate::error::Result;
use crate::links;
use crate::user::UserID;

/// Paging parameters shared by the timeline calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineOptions {
    /// Only return statuses newer than this ID.
    pub since_id: Option<u64>,
    /// Only return statuses with an ID less than or equal to this one.
    pub max_id: Option<u64>,
    /// How many statuses to return per page.
    pub count: Option<u32>,
    /// Which page to return, starting at 1.
    pub page: Option<u32>,
}

impl TimelineOptions {
    pub(crate) fn params(&self) -> ParamList {
        collect_present(vec![
            ("since_id", self.since_id.map_string()),
            ("max_id", self.max_id.map_string()),
            ("count", self.count.map_string()),
            ("page", self.page.map_string()),
        ])
    }
}

/// Optional settings for a new status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusOptions {
    /// The status this one replies to. Ignored by Twitter unless the text mentions its author.
    pub in_reply_to_status_id: Option<u64>,
    /// Latitude of the location this status refers to.
    pub lat: Option<f64>,
    /// Longitude of the location this status refers to.
    pub long: Option<f64>,
    /// A place ID from the geo API.
    pub place_id: Option<String>,
    /// Whether to show the exact coordinates on the status.
    pub display_coordinates: Option<bool>,
}

impl StatusOptions {
    fn params(&self) -> ParamList {
        collect_present(vec![
            ("in_reply_to_status_id", self.in_reply_to_status_id.map_string()),
            ("lat", self.lat.map_string()),
            ("long", self.long.map_string()),
            ("place_id", self.place_id.clone()),
            ("display_coordinates", self.display_coordinates.map_string()),
        ])
    }
}

impl<A: Authenticator> Client<A> {
    fn timeline(&self, path: &str, opts: &TimelineOptions) -> Result<Response> {
        self.get(&self.api_url(path), &opts.params())
    }

    //---Timelines---

    /// The 20 most recent statuses from public accounts. Cached by Twitter for a minute.
    pub fn public_timeline(&self) -> Result<Response> {
        self.get(&self.api_url(links::statuses::PUBLIC_TIMELINE), &ParamList::new())
    }

    /// Statuses from the authenticated user and the accounts they follow, including retweets.
    pub fn home_timeline(&self, opts: &TimelineOptions) -> Result<Response> {
        self.timeline(links::statuses::HOME_TIMELINE, opts)
    }

    /// Statuses from the authenticated user and the accounts they follow.
    pub fn friends_timeline(&self, opts: &TimelineOptions) -> Result<Response> {
        self.timeline(links::statuses::FRIENDS_TIMELINE, opts)
    }

    /// Statuses posted by the given user, or the authenticated user if `None`.
    pub fn user_timeline(&self, user: Option<UserID>, opts: &TimelineOptions) -> Result<Response> {
        let mut params = opts.params();
        if let Some(user) = user {
            params.combine(ParamList::new().add_user_param(user));
        }
        self.get(&self.api_url(links::statuses::USER_TIMELINE), &params)
    }

    /// Statuses mentioning the authenticated user.
    pub fn mentions(&self, opts: &TimelineOptions) -> Result<Response> {
        self.timeline(links::statuses::MENTIONS, opts)
    }

    /// Retweets posted by the authenticated user.
    pub fn retweeted_by_me(&self, opts: &TimelineOptions) -> Result<Response> {
        self.timeline(links::statuses::RETWEETED_BY_ME, opts)
    }

    /// Retweets posted by the accounts the authenticated user follows.
    pub fn retweeted_to_me(&self, opts: &TimelineOptions) -> Result<Response> {
        self.timeline(links::statuses::RETWEETED_TO_ME, opts)
    }

    /// Statuses by the authenticated user that others have retweeted.
    pub fn retweets_of_me(&self, opts: &TimelineOptions) -> Result<Response> {
        self.timeline(links::statuses::RETWEETS_OF_ME, opts)
    }

    //---Statuses---

    /// Looks up a single status by ID.
    pub fn show_status(&self, id: u64) -> Result<Response> {
        self.get(&self.api_url_id(links::statuses::SHOW_STEM, id), &ParamList::new())
    }

    /// Posts a new status for the authenticated user.
    pub fn update_status(&self, status: impl Into<CowStr>) -> Result<Response> {
        self.update_status_with(status, &StatusOptions::default())
    }

    /// Posts a new status for the authenticated user, with the given reply and location settings.
    pub fn update_status_with(
        &self,
        status: impl Into<CowStr>,
        opts: &StatusOptions,
    ) -> Result<Response> {
        let mut params = ParamList::new().add_param("status", status);
        params.combine(opts.params());
        self.post(&self.api_url(links::statuses::UPDATE), &params)
    }

    /// Deletes one of the authenticated user's statuses.
    pub fn destroy_status(&self, id: u64) -> Result<Response> {
        self.post(&self.api_url_id(links::statuses::DESTROY_STEM, id), &ParamList::new())
    }

    /// Retweets the given status as the authenticated user.
    pub fn retweet(&self, id: u64) -> Result<Response> {
        self.post(&self.api_url_id(links::statuses::RETWEET_STEM, id), &ParamList::new())
    }

    /// Lists up to `count` (at most 100) retweets of the given status.
    pub fn retweets(&self, id: u64, count: Option<u32>) -> Result<Response> {
        let params = collect_present(vec![("count", count.map_string())]);
        self.get(&self.api_url_id(links::statuses::RETWEETS_STEM, id), &params)
    }

    //---Favorites---

    /// Lists the statuses the given user (or the authenticated user, if `None`) has favorited.
    pub fn favorites(&self, user: Option<UserID>, page: Option<u32>) -> Result<Response> {
        let params = collect_present(vec![("page", page.map_string())]);
        let url = match user {
            Some(UserID::ID(id)) => self.api_url_id(links::favorites::LIST, id),
            Some(UserID::ScreenName(name)) => {
                self.api_url_id(links::favorites::LIST, percent_encode(&name))
            }
            None => self.api_url(links::favorites::LIST),
        };
        self.get(&url, &params)
    }

    /// Favorites the given status as the authenticated user.
    pub fn create_favorite(&self, id: u64) -> Result<Response> {
        self.post(&self.api_url_id(links::favorites::CREATE_STEM, id), &ParamList::new())
    }

    /// Removes the given status from the authenticated user's favorites.
    pub fn destroy_favorite(&self, id: u64) -> Result<Response> {
        self.post(&self.api_url_id(links::favorites::DESTROY_STEM, id), &ParamList::new())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hyper::Method;

    use super::*;
    use crate::client::tests::client;
    use crate::transport::mock::MockTransport;

    #[test]
    fn timeline_drops_absent_paging() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);

        client.home_timeline(&TimelineOptions::default()).unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://api.twitter.com/1/statuses/home_timeline.json"
        );

        let opts = TimelineOptions {
            since_id: Some(10),
            count: Some(5),
            ..TimelineOptions::default()
        };
        client.mentions(&opts).unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://api.twitter.com/1/statuses/mentions.json?count=5&since_id=10"
        );
    }

    #[test]
    fn user_timeline_with_user() {
        let transport = Arc::new(MockTransport::new());
        client(&transport)
            .user_timeline(Some("rustlang".into()), &TimelineOptions { page: Some(2), ..Default::default() })
            .unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://api.twitter.com/1/statuses/user_timeline.json?page=2&screen_name=rustlang"
        );
    }

    #[test]
    fn status_paths_carry_id() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);

        client.show_status(123).unwrap();
        let sent = transport.last_request();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(sent.url, "https://api.twitter.com/1/statuses/show/123.json");

        client.destroy_status(123).unwrap();
        let sent = transport.last_request();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url, "https://api.twitter.com/1/statuses/destroy/123.json");
        assert!(sent.body.is_none());

        client.retweet(456).unwrap();
        assert_eq!(transport.last_request().url, "https://api.twitter.com/1/statuses/retweet/456.json");

        client.retweets(456, Some(10)).unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://api.twitter.com/1/statuses/retweets/456.json?count=10"
        );
    }

    #[test]
    fn update_status_with_reply() {
        let transport = Arc::new(MockTransport::new());
        let opts = StatusOptions {
            in_reply_to_status_id: Some(99),
            ..StatusOptions::default()
        };
        client(&transport).update_status_with("@rustlang hi!", &opts).unwrap();
        assert_eq!(
            transport.last_request().body.as_deref(),
            Some("in_reply_to_status_id=99&status=%40rustlang%20hi%21")
        );
    }

    #[test]
    fn favorites_paths() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);

        client.favorites(None, None).unwrap();
        assert_eq!(transport.last_request().url, "https://api.twitter.com/1/favorites.json");

        client.favorites(Some("rustlang".into()), Some(3)).unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://api.twitter.com/1/favorites/rustlang.json?page=3"
        );

        client.create_favorite(7).unwrap();
        assert_eq!(transport.last_request().url, "https://api.twitter.com/1/favorites/create/7.json");

        client.destroy_favorite(7).unwrap();
        assert_eq!(transport.last_request().url, "https://api.twitter.com/1/favorites/destroy/7.json");
    }
}
