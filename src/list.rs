// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and methods for working with lists.
//!
//! A list is referred to either by its numeric ID, or by its owner and "slug" (the name as it
//! appears in the list's URL). `ListID` holds either one.
//!
//! ## Functions
//!
//! ### Managing lists
//!
//! - `create_list`/`update_list`/`destroy_list`
//! - `add_list_member`/`remove_list_member`
//! - `subscribe_list`/`unsubscribe_list`
//!
//! ### Reading lists
//!
//! - `lists`/`show_list`
//! - `list_statuses`
//! - `list_members`/`is_list_member`
//! - `list_subscribers`/`is_list_subscriber`
//! - `list_memberships`/`list_subscriptions`

use std::fmt;

use crate::auth::Authenticator;
use crate::client::Client;
use crate::common::*;
use crate::error::{Error, Result};
use crate::links;
use crate::tweet::TimelineOptions;
use crate::user::UserID;

/// Convenience enum to refer to a list via its owner and name or via numeric ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListID {
    /// Referring to a list via its owner's user ID or screen name, and the list's slug.
    Slug(UserID, CowStr),
    /// Referring to a list via its numeric ID.
    ID(u64),
}

impl ListID {
    /// Make a new `ListID` by supplying its owner and slug.
    pub fn from_slug(owner: impl Into<UserID>, list_name: impl Into<CowStr>) -> ListID {
        ListID::Slug(owner.into(), list_name.into())
    }

    /// Make a new `ListID` by supplying its numeric ID.
    pub fn from_id(list_id: u64) -> ListID {
        ListID::ID(list_id)
    }

    /// Builds a `ListID` from the loose set of identifiers Twitter accepts.
    ///
    /// Exactly one of `list_id` and `slug` must be given. A slug also needs exactly one of
    /// `owner_id` and `owner_screen_name`; a list ID must come without an owner.
    ///
    /// ```rust
    /// use twitapi::list::ListID;
    ///
    /// let list = ListID::from_options(None, Some("fun-folks"), None, Some("rustlang")).unwrap();
    /// assert_eq!(list, ListID::from_slug("rustlang", "fun-folks"));
    ///
    /// assert!(ListID::from_options(Some(42), Some("fun-folks"), None, None::<&str>).is_err());
    /// ```
    pub fn from_options<S, O>(
        list_id: Option<u64>,
        slug: Option<S>,
        owner_id: Option<u64>,
        owner_screen_name: Option<O>,
    ) -> Result<ListID>
    where
        S: Into<CowStr>,
        O: Into<CowStr>,
    {
        match exactly_one(list_id, slug, ("list_id", "slug"), "list_id or slug")? {
            Either::First(id) => {
                if owner_id.is_some() {
                    return Err(Error::ConflictingIdentifiers("list_id", "owner_id"));
                }
                if owner_screen_name.is_some() {
                    return Err(Error::ConflictingIdentifiers("list_id", "owner_screen_name"));
                }
                Ok(ListID::ID(id))
            }
            Either::Second(slug) => {
                let owner = UserID::pick(
                    owner_id,
                    owner_screen_name,
                    ("owner_id", "owner_screen_name"),
                    "owner_id or owner_screen_name",
                )?;
                Ok(ListID::Slug(owner, slug.into()))
            }
        }
    }
}

/// Whether a list is visible to everyone or just its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Anyone can see the list.
    Public,
    /// Only the owner can see the list.
    Private,
}

impl fmt::Display for ListMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ListMode::Public => write!(f, "public"),
            ListMode::Private => write!(f, "private"),
        }
    }
}

/// Changes to apply to a list with `update_list`. Fields left `None` are kept as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListUpdate {
    /// The new name of the list.
    pub name: Option<String>,
    /// The new visibility of the list.
    pub mode: Option<ListMode>,
    /// The new description of the list.
    pub description: Option<String>,
}

fn cursor_param(cursor: Option<i64>) -> ParamList {
    collect_present(vec![("cursor", cursor.map_string())])
}

impl<A: Authenticator> Client<A> {
    //---Managing lists---

    /// Creates a new list owned by the authenticated user.
    pub fn create_list(
        &self,
        name: impl Into<CowStr>,
        mode: Option<ListMode>,
        description: Option<&str>,
    ) -> Result<Response> {
        let params = ParamList::new()
            .add_param("name", name)
            .add_opt_param("mode", mode.map_string())
            .add_opt_param("description", description.map(str::to_string));
        self.post(&self.api_url(links::lists::CREATE), &params)
    }

    /// Updates the name, visibility or description of a list.
    pub fn update_list(&self, list: ListID, update: &ListUpdate) -> Result<Response> {
        let params = collect_present(vec![
            ("name", update.name.clone()),
            ("mode", update.mode.map_string()),
            ("description", update.description.clone()),
        ])
        .add_list_param(list);
        self.post(&self.api_url(links::lists::UPDATE), &params)
    }

    /// Deletes a list owned by the authenticated user.
    pub fn destroy_list(&self, list: ListID) -> Result<Response> {
        let params = ParamList::new().add_list_param(list);
        self.post(&self.api_url(links::lists::DESTROY), &params)
    }

    /// Adds the given user to a list.
    pub fn add_list_member(&self, list: ListID, user: impl Into<UserID>) -> Result<Response> {
        let params = ParamList::new().add_list_param(list).add_user_param(user.into());
        self.post(&self.api_url(links::lists::ADD_MEMBER), &params)
    }

    /// Removes the given user from a list.
    pub fn remove_list_member(&self, list: ListID, user: impl Into<UserID>) -> Result<Response> {
        let params = ParamList::new().add_list_param(list).add_user_param(user.into());
        self.post(&self.api_url(links::lists::REMOVE_MEMBER), &params)
    }

    /// Subscribes the authenticated user to a list.
    pub fn subscribe_list(&self, list: ListID) -> Result<Response> {
        let params = ParamList::new().add_list_param(list);
        self.post(&self.api_url(links::lists::SUBSCRIBE), &params)
    }

    /// Unsubscribes the authenticated user from a list.
    pub fn unsubscribe_list(&self, list: ListID) -> Result<Response> {
        let params = ParamList::new().add_list_param(list);
        self.post(&self.api_url(links::lists::UNSUBSCRIBE), &params)
    }

    //---Reading lists---

    /// Lists the lists owned by the given user, or the authenticated user if `None`.
    pub fn lists(&self, user: Option<UserID>, cursor: Option<i64>) -> Result<Response> {
        let mut params = cursor_param(cursor);
        if let Some(user) = user {
            params = params.add_user_param(user);
        }
        self.get(&self.api_url(links::lists::LIST), &params)
    }

    /// Looks up a single list.
    pub fn show_list(&self, list: ListID) -> Result<Response> {
        let params = ParamList::new().add_list_param(list);
        self.get(&self.api_url(links::lists::SHOW), &params)
    }

    /// Statuses posted by the members of a list.
    pub fn list_statuses(&self, list: ListID, opts: &TimelineOptions) -> Result<Response> {
        let params = opts.params().add_list_param(list);
        self.get(&self.api_url(links::lists::STATUSES), &params)
    }

    /// Lists the members of a list.
    pub fn list_members(&self, list: ListID, cursor: Option<i64>) -> Result<Response> {
        let params = cursor_param(cursor).add_list_param(list);
        self.get(&self.api_url(links::lists::MEMBERS), &params)
    }

    /// Checks whether the given user is a member of a list.
    ///
    /// Twitter answers with the user's profile if they are, and a 404 if they aren't.
    pub fn is_list_member(&self, list: ListID, user: impl Into<UserID>) -> Result<Response> {
        let params = ParamList::new().add_list_param(list).add_user_param(user.into());
        self.get(&self.api_url(links::lists::IS_MEMBER), &params)
    }

    /// Lists the subscribers of a list.
    pub fn list_subscribers(&self, list: ListID, cursor: Option<i64>) -> Result<Response> {
        let params = cursor_param(cursor).add_list_param(list);
        self.get(&self.api_url(links::lists::SUBSCRIBERS), &params)
    }

    /// Checks whether the given user subscribes to a list.
    ///
    /// Like `is_list_member`, a 404 means "no".
    pub fn is_list_subscriber(&self, list: ListID, user: impl Into<UserID>) -> Result<Response> {
        let params = ParamList::new().add_list_param(list).add_user_param(user.into());
        self.get(&self.api_url(links::lists::IS_SUBSCRIBER), &params)
    }

    /// Lists the lists the given user has been added to.
    pub fn list_memberships(&self, user: Option<UserID>, cursor: Option<i64>) -> Result<Response> {
        let mut params = cursor_param(cursor);
        if let Some(user) = user {
            params = params.add_user_param(user);
        }
        self.get(&self.api_url(links::lists::MEMBERSHIPS), &params)
    }

    /// Lists the lists the given user subscribes to.
    pub fn list_subscriptions(
        &self,
        user: Option<UserID>,
        cursor: Option<i64>,
    ) -> Result<Response> {
        let mut params = cursor_param(cursor);
        if let Some(user) = user {
            params = params.add_user_param(user);
        }
        self.get(&self.api_url(links::lists::SUBSCRIPTIONS), &params)
    }
}
