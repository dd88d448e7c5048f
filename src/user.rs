// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Lookups and actions on Twitter users, their friendships, and their social graph.
//!
//! ## Types
//!
//! - `UserID`: used as a generic input to most functions here, this enum allows you to refer to a
//!   user by a numeric ID or by their screen name.
//!
//! ## Functions
//!
//! All of these are methods on `Client`.
//!
//! ### Direct lookup
//!
//! - `show_user`
//! - `lookup_users`
//! - `search_users`
//!
//! ### Friendships
//!
//! These perform actions on the authenticated user's account, and need write access.
//!
//! - `follow`/`unfollow`
//!
//! These tell how accounts relate to each other:
//!
//! - `friendship_exists`/`show_friendship`
//! - `incoming_friendships`/`outgoing_friendships`
//!
//! ### Social graph
//!
//! - `friends`/`followers` (full profiles, with their latest status)
//! - `friend_ids`/`follower_ids` (bare IDs)
//!
//! The paged calls here take an optional cursor. Pass `None` (or `-1`) to start at the beginning,
//! then the `next_cursor` of each reply to get the next page.

use crate::auth::Authenticator;
use crate::client::Client;
use crate::common::*;
use crate::error::{Error, Result};
use crate::links;

/// Convenience enum to generalize between referring to an account by numeric ID or by screen
/// name.
///
/// Many API calls ask for a user either by either screen name or ID. This enum provides a single
/// type that can hold either one, and conversions from the types you're likely to have on hand:
///
/// * `u64`/`&u64` (converted to `UserID::ID`)
/// * `&'static str`/`String` (converted to `UserID::ScreenName`)
///
/// When you have both pieces as options (say, from command-line arguments), `from_options` makes
/// sure exactly one of them was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserID {
    /// Referring via the account's numeric ID.
    ID(u64),
    /// Referring via the account's screen name.
    ScreenName(CowStr),
}

impl UserID {
    /// Builds a `UserID` from a pair of optional identifiers, exactly one of which must be given.
    ///
    /// ```rust
    /// use twitapi::user::UserID;
    ///
    /// assert_eq!(UserID::from_options(Some(1234), None::<&str>).unwrap(), UserID::ID(1234));
    /// assert!(UserID::from_options(Some(1234), Some("rustlang")).is_err());
    /// assert!(UserID::from_options(None, None::<&str>).is_err());
    /// ```
    pub fn from_options<S>(user_id: Option<u64>, screen_name: Option<S>) -> Result<UserID>
    where
        S: Into<CowStr>,
    {
        UserID::pick(
            user_id,
            screen_name,
            ("user_id", "screen_name"),
            "user_id or screen_name",
        )
    }

    pub(crate) fn pick<S: Into<CowStr>>(
        id: Option<u64>,
        name: Option<S>,
        names: (&'static str, &'static str),
        expected: &'static str,
    ) -> Result<UserID> {
        Ok(match exactly_one(id, name, names, expected)? {
            Either::First(id) => UserID::ID(id),
            Either::Second(name) => UserID::ScreenName(name.into()),
        })
    }

    /// Adds this user to the given params under a prefix, as `<prefix>_id` or
    /// `<prefix>_screen_name`.
    fn add_prefixed(&self, params: ParamList, prefix: &str) -> ParamList {
        match self {
            UserID::ID(id) => params.add_param(format!("{}_id", prefix), id.to_string()),
            UserID::ScreenName(name) => {
                params.add_param(format!("{}_screen_name", prefix), name.clone())
            }
        }
    }

    /// The bare ID or screen name, for the parameters that take either one.
    fn bare(&self) -> CowStr {
        match self {
            UserID::ID(id) => id.to_string().into(),
            UserID::ScreenName(name) => name.clone(),
        }
    }
}

impl From<u64> for UserID {
    fn from(id: u64) -> UserID {
        UserID::ID(id)
    }
}

impl From<&u64> for UserID {
    fn from(id: &u64) -> UserID {
        UserID::ID(*id)
    }
}

impl From<&'static str> for UserID {
    fn from(name: &'static str) -> UserID {
        UserID::ScreenName(name.into())
    }
}

impl From<String> for UserID {
    fn from(name: String) -> UserID {
        UserID::ScreenName(name.into())
    }
}

fn cursor_param(cursor: Option<i64>) -> ParamList {
    collect_present(vec![("cursor", cursor.map_string())])
}

fn opt_user_param(params: ParamList, user: Option<UserID>) -> ParamList {
    match user {
        Some(user) => params.add_user_param(user),
        None => params,
    }
}

impl<A: Authenticator> Client<A> {
    //---Direct lookup---

    /// Looks up profile information for a single user.
    pub fn show_user(&self, user: impl Into<UserID>) -> Result<Response> {
        let params = ParamList::new()
            .add_param("include_entities", "true")
            .add_user_param(user.into());
        self.get(&self.api_url(links::users::SHOW), &params)
    }

    /// Looks up profile information for several users at once.
    ///
    /// Fails with `MissingIdentifier`, without sending anything, if no users are given.
    ///
    /// IDs and screen names can be mixed by passing `UserID`s directly:
    ///
    /// ```rust,no_run
    /// # use twitapi::{Client, NoAuth, user::UserID};
    /// # fn main() -> twitapi::error::Result<()> {
    /// # let client = Client::new(NoAuth)?;
    /// let users: Vec<UserID> = vec![1234u64.into(), "rustlang".into()];
    /// let resp = client.lookup_users(users)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn lookup_users<T, I>(&self, users: I) -> Result<Response>
    where
        T: Into<UserID>,
        I: IntoIterator<Item = T>,
    {
        let (ids, names): (Vec<UserID>, Vec<UserID>) = users
            .into_iter()
            .map(Into::into)
            .partition(|u| matches!(u, UserID::ID(_)));

        let ids = ids.into_iter().filter_map(|u| match u {
            UserID::ID(id) => Some(id),
            UserID::ScreenName(_) => None,
        });
        let names = names
            .iter()
            .map(|u| u.bare())
            .collect::<Vec<_>>()
            .join(",");

        let ids = join_ids(ids);
        let params = collect_present(vec![
            ("user_id", Some(ids).filter(|s| !s.is_empty())),
            ("screen_name", Some(names).filter(|s| !s.is_empty())),
        ]);
        if params.is_empty() {
            return Err(Error::MissingIdentifier("user_id or screen_name"));
        }
        self.post(&self.api_url(links::users::LOOKUP), &params)
    }

    /// Searches for users matching the given query.
    ///
    /// `per_page` is capped at 20 by Twitter, and only the first 1000 results can be reached.
    pub fn search_users(
        &self,
        query: impl Into<CowStr>,
        per_page: Option<u32>,
        page: Option<u32>,
    ) -> Result<Response> {
        let params = ParamList::new()
            .add_param("q", query)
            .add_opt_param("per_page", per_page.map_string())
            .add_opt_param("page", page.map_string());
        self.get(&self.api_url(links::users::SEARCH), &params)
    }

    //---Social graph---

    /// Lists the accounts the given user follows (or the authenticated user, if `None`), with
    /// their latest status.
    pub fn friends(&self, user: Option<UserID>, cursor: Option<i64>) -> Result<Response> {
        let params = opt_user_param(cursor_param(cursor), user);
        self.get(&self.api_url(links::statuses::FRIENDS), &params)
    }

    /// Lists the accounts following the given user (or the authenticated user, if `None`), with
    /// their latest status.
    pub fn followers(&self, user: Option<UserID>, cursor: Option<i64>) -> Result<Response> {
        let params = opt_user_param(cursor_param(cursor), user);
        self.get(&self.api_url(links::statuses::FOLLOWERS), &params)
    }

    /// Lists the IDs of the accounts the given user follows.
    pub fn friend_ids(&self, user: Option<UserID>, cursor: Option<i64>) -> Result<Response> {
        let params = opt_user_param(cursor_param(cursor), user);
        self.get(&self.api_url(links::users::FRIENDS_IDS), &params)
    }

    /// Lists the IDs of the accounts following the given user.
    pub fn follower_ids(&self, user: Option<UserID>, cursor: Option<i64>) -> Result<Response> {
        let params = opt_user_param(cursor_param(cursor), user);
        self.get(&self.api_url(links::users::FOLLOWERS_IDS), &params)
    }

    //---Friendships---

    /// Follows the given account with the authenticated user.
    ///
    /// If `notifications` is `true`, the authenticated user also gets device notifications for
    /// the followed account's updates.
    pub fn follow(&self, user: impl Into<UserID>, notifications: bool) -> Result<Response> {
        let params = ParamList::new()
            .add_user_param(user.into())
            .add_param("follow", notifications.to_string());
        self.post(&self.api_url(links::users::FOLLOW), &params)
    }

    /// Unfollows the given account with the authenticated user.
    pub fn unfollow(&self, user: impl Into<UserID>) -> Result<Response> {
        let params = ParamList::new().add_user_param(user.into());
        self.post(&self.api_url(links::users::UNFOLLOW), &params)
    }

    /// Tests whether `user_a` follows `user_b`. The body is a bare JSON `true` or `false`.
    pub fn friendship_exists(
        &self,
        user_a: impl Into<UserID>,
        user_b: impl Into<UserID>,
    ) -> Result<Response> {
        let params = ParamList::new()
            .add_param("user_a", user_a.into().bare())
            .add_param("user_b", user_b.into().bare());
        self.get(&self.api_url(links::users::FRIENDSHIP_EXISTS), &params)
    }

    /// Shows how two accounts relate to each other.
    ///
    /// When `source` is `None`, the authenticated user is the source.
    pub fn show_friendship(
        &self,
        source: Option<UserID>,
        target: impl Into<UserID>,
    ) -> Result<Response> {
        let mut params = target.into().add_prefixed(ParamList::new(), "target");
        if let Some(source) = source {
            params = source.add_prefixed(params, "source");
        }
        self.get(&self.api_url(links::users::FRIENDSHIP_SHOW), &params)
    }

    /// Lists the IDs of accounts with a pending request to follow the authenticated user.
    pub fn incoming_friendships(&self, cursor: Option<i64>) -> Result<Response> {
        self.get(
            &self.api_url(links::users::FRIENDSHIPS_INCOMING),
            &cursor_param(cursor),
        )
    }

    /// Lists the IDs of protected accounts the authenticated user has asked to follow.
    pub fn outgoing_friendships(&self, cursor: Option<i64>) -> Result<Response> {
        self.get(
            &self.api_url(links::users::FRIENDSHIPS_OUTGOING),
            &cursor_param(cursor),
        )
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
    fn from_options_exactly_one() {
        assert_eq!(UserID::from_options(Some(12), None::<&str>).unwrap(), UserID::ID(12));
        assert_eq!(
            UserID::from_options(None, Some("rustlang")).unwrap(),
            UserID::ScreenName("rustlang".into())
        );
        assert!(matches!(
            UserID::from_options(Some(12), Some("rustlang")),
            Err(Error::ConflictingIdentifiers("user_id", "screen_name"))
        ));
        assert!(matches!(
            UserID::from_options(None, None::<String>),
            Err(Error::MissingIdentifier("user_id or screen_name"))
        ));
    }

    #[test]
    fn show_user_by_name() {
        let transport = Arc::new(MockTransport::new());
        client(&transport).show_user("rustlang").unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(
            sent.url,
            "https://api.twitter.com/1/users/show.json?include_entities=true&screen_name=rustlang"
        );
    }

    #[test]
    fn lookup_mixes_ids_and_names() {
        let transport = Arc::new(MockTransport::new());
        let users: Vec<UserID> = vec![1234u64.into(), "rustlang".into(), 5678u64.into()];
        client(&transport).lookup_users(users).unwrap();

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(
            sent.body.as_deref(),
            Some("screen_name=rustlang&user_id=1234%2C5678")
        );
    }

    #[test]
    fn lookup_only_ids() {
        let transport = Arc::new(MockTransport::new());
        client(&transport).lookup_users(vec![1u64, 2]).unwrap();
        assert_eq!(transport.last_request().body.as_deref(), Some("user_id=1%2C2"));
    }

    #[test]
    fn lookup_nobody_is_rejected() {
        let transport = Arc::new(MockTransport::new());
        let result = client(&transport).lookup_users(Vec::<u64>::new());
        assert!(matches!(
            result,
            Err(Error::MissingIdentifier("user_id or screen_name"))
        ));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn cursor_omitted_when_absent() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);

        client.friend_ids(None, None).unwrap();
        assert_eq!(transport.last_request().url, "https://api.twitter.com/1/friends/ids.json");

        client.follower_ids(Some(UserID::ID(7)), Some(-1)).unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://api.twitter.com/1/followers/ids.json?cursor=-1&user_id=7"
        );
    }

    #[test]
    fn follow_and_unfollow() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);

        client.follow("rustlang", true).unwrap();
        let sent = transport.last_request();
        assert_eq!(sent.url, "https://api.twitter.com/1/friendships/create.json");
        assert_eq!(sent.body.as_deref(), Some("follow=true&screen_name=rustlang"));

        client.unfollow(1234u64).unwrap();
        let sent = transport.last_request();
        assert_eq!(sent.url, "https://api.twitter.com/1/friendships/destroy.json");
        assert_eq!(sent.body.as_deref(), Some("user_id=1234"));
    }

    #[test]
    fn friendship_queries() {
        let transport = Arc::new(MockTransport::new().reply(200, "true"));
        let client = client(&transport);

        let resp = client.friendship_exists("alice", 42u64).unwrap();
        assert_eq!(resp.body.as_json(), Some(&serde_json::Value::Bool(true)));
        assert_eq!(
            transport.last_request().url,
            "https://api.twitter.com/1/friendships/exists.json?user_a=alice&user_b=42"
        );

        client.show_friendship(Some(UserID::ID(1)), "bob").unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://api.twitter.com/1/friendships/show.json?source_id=1&target_screen_name=bob"
        );
    }
}
