// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fixed endpoint locations. Everything here can be overridden through `ClientBuilder` or
//! `OAuthEndpoints`; nothing here is ever reassigned.

pub const API_BASE: &str = "https://api.twitter.com/1";
pub const SEARCH_BASE: &str = "https://search.twitter.com";

pub mod auth {
    pub const REQUEST_TOKEN: &str = "https://api.twitter.com/oauth/request_token";
    pub const ACCESS_TOKEN: &str = "https://api.twitter.com/oauth/access_token";
    pub const AUTHORIZE: &str = "https://api.twitter.com/oauth/authorize";
    pub const AUTHENTICATE: &str = "https://api.twitter.com/oauth/authenticate";
}

pub mod account {
    pub const VERIFY_CREDENTIALS: &str = "account/verify_credentials";
    pub const RATE_LIMIT_STATUS: &str = "account/rate_limit_status";
}

pub mod statuses {
    pub const PUBLIC_TIMELINE: &str = "statuses/public_timeline";
    pub const HOME_TIMELINE: &str = "statuses/home_timeline";
    pub const FRIENDS_TIMELINE: &str = "statuses/friends_timeline";
    pub const USER_TIMELINE: &str = "statuses/user_timeline";
    pub const MENTIONS: &str = "statuses/mentions";
    pub const RETWEETED_BY_ME: &str = "statuses/retweeted_by_me";
    pub const RETWEETED_TO_ME: &str = "statuses/retweeted_to_me";
    pub const RETWEETS_OF_ME: &str = "statuses/retweets_of_me";
    pub const SHOW_STEM: &str = "statuses/show";
    pub const UPDATE: &str = "statuses/update";
    pub const DESTROY_STEM: &str = "statuses/destroy";
    pub const RETWEET_STEM: &str = "statuses/retweet";
    pub const RETWEETS_STEM: &str = "statuses/retweets";
    pub const FRIENDS: &str = "statuses/friends";
    pub const FOLLOWERS: &str = "statuses/followers";
}

pub mod favorites {
    pub const LIST: &str = "favorites";
    pub const CREATE_STEM: &str = "favorites/create";
    pub const DESTROY_STEM: &str = "favorites/destroy";
}

pub mod users {
    pub const SHOW: &str = "users/show";
    pub const LOOKUP: &str = "users/lookup";
    pub const SEARCH: &str = "users/search";
    pub const FOLLOW: &str = "friendships/create";
    pub const UNFOLLOW: &str = "friendships/destroy";
    pub const FRIENDSHIP_EXISTS: &str = "friendships/exists";
    pub const FRIENDSHIP_SHOW: &str = "friendships/show";
    pub const FRIENDSHIPS_INCOMING: &str = "friendships/incoming";
    pub const FRIENDSHIPS_OUTGOING: &str = "friendships/outgoing";
    pub const FRIENDS_IDS: &str = "friends/ids";
    pub const FOLLOWERS_IDS: &str = "followers/ids";
}

pub mod direct {
    pub const RECEIVED: &str = "direct_messages";
    pub const SENT: &str = "direct_messages/sent";
    pub const SEND: &str = "direct_messages/new";
    pub const DESTROY_STEM: &str = "direct_messages/destroy";
}

pub mod lists {
    pub const CREATE: &str = "lists/create";
    pub const UPDATE: &str = "lists/update";
    pub const LIST: &str = "lists";
    pub const SHOW: &str = "lists/show";
    pub const DESTROY: &str = "lists/destroy";
    pub const STATUSES: &str = "lists/statuses";
    pub const MEMBERSHIPS: &str = "lists/memberships";
    pub const SUBSCRIPTIONS: &str = "lists/subscriptions";
    pub const MEMBERS: &str = "lists/members";
    pub const ADD_MEMBER: &str = "lists/members/create";
    pub const REMOVE_MEMBER: &str = "lists/members/destroy";
    pub const IS_MEMBER: &str = "lists/members/show";
    pub const SUBSCRIBERS: &str = "lists/subscribers";
    pub const SUBSCRIBE: &str = "lists/subscribers/create";
    pub const UNSUBSCRIBE: &str = "lists/subscribers/destroy";
    pub const IS_SUBSCRIBER: &str = "lists/subscribers/show";
}

pub mod search {
    pub const SEARCH: &str = "search";
}

pub mod trend {
    // these four live on the search host
    pub const TRENDS: &str = "trends";
    pub const CURRENT: &str = "trends/current";
    pub const DAILY: &str = "trends/daily";
    pub const WEEKLY: &str = "trends/weekly";

    pub const AVAILABLE: &str = "trends/available";
    pub const LOCATION_STEM: &str = "trends";
}
