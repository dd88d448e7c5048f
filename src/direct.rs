// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Direct messages to and from the authenticated user.
//!
//! These calls need an app with direct message access. `direct_messages` and
//! `sent_direct_messages` page through their results with the same `TimelineOptions` the status
//! timelines use.

use crate::auth::Authenticator;
use crate::client::Client;
use crate::common::*;
use crate::error::Result;
use crate::links;
use crate::tweet::TimelineOptions;
use crate::user::UserID;

impl<A: Authenticator> Client<A> {
    /// Direct messages sent to the authenticated user.
    pub fn direct_messages(&self, opts: &TimelineOptions) -> Result<Response> {
        self.get(&self.api_url(links::direct::RECEIVED), &opts.params())
    }

    /// Direct messages sent by the authenticated user.
    pub fn sent_direct_messages(&self, opts: &TimelineOptions) -> Result<Response> {
        self.get(&self.api_url(links::direct::SENT), &opts.params())
    }

    /// Sends a direct message to the given user, who must follow the authenticated user.
    pub fn send_direct_message(
        &self,
        to: impl Into<UserID>,
        text: impl Into<CowStr>,
    ) -> Result<Response> {
        let params = ParamList::new()
            .add_user_param(to.into())
            .add_param("text", text);
        self.post(&self.api_url(links::direct::SEND), &params)
    }

    /// Deletes a direct message the authenticated user sent or received.
    pub fn destroy_direct_message(&self, id: u64) -> Result<Response> {
        self.post(&self.api_url_id(links::direct::DESTROY_STEM, id), &ParamList::new())
    }
}
