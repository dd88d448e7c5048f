// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Functions for working with trending topics on Twitter.
//!
//! The global trend lists (`trends`, `current_trends`, `daily_trends`, `weekly_trends`) are
//! served from the search host. The location-based ones (`available_trends`, `location_trends`)
//! are part of the REST API and take a "where on earth identifier" (WOEID).

use chrono::NaiveDate;

use crate::auth::Authenticator;
use crate::client::Client;
use crate::common::*;
use crate::error::Result;
use crate::links;

fn exclude_param(exclude_hashtags: bool) -> ParamList {
    collect_present(vec![("exclude", Some("hashtags").filter(|_| exclude_hashtags))])
}

fn dated_params(date: Option<NaiveDate>, exclude_hashtags: bool) -> ParamList {
    let mut params = exclude_param(exclude_hashtags);
    params.combine(collect_present(vec![(
        "date",
        date.map(|d| d.format("%Y-%m-%d").to_string()),
    )]));
    params
}

impl<A: Authenticator> Client<A> {
    ///The top ten topics currently trending.
    pub fn trends(&self) -> Result<Response> {
        self.get(&self.search_url(links::trend::TRENDS), &ParamList::new())
    }

    ///The current top ten trending topics. Pass `true` to leave hashtags out.
    pub fn current_trends(&self, exclude_hashtags: bool) -> Result<Response> {
        self.get(
            &self.search_url(links::trend::CURRENT),
            &exclude_param(exclude_hashtags),
        )
    }

    ///The top 20 trending topics for each hour of the given day, or of today if `None`.
    pub fn daily_trends(&self, date: Option<NaiveDate>, exclude_hashtags: bool) -> Result<Response> {
        self.get(
            &self.search_url(links::trend::DAILY),
            &dated_params(date, exclude_hashtags),
        )
    }

    ///The top 30 trending topics for each day of the week starting on the given date.
    pub fn weekly_trends(
        &self,
        date: Option<NaiveDate>,
        exclude_hashtags: bool,
    ) -> Result<Response> {
        self.get(
            &self.search_url(links::trend::WEEKLY),
            &dated_params(date, exclude_hashtags),
        )
    }

    ///The locations Twitter has trend information for, sorted by distance to the given coordinate
    ///when one is given.
    pub fn available_trends(&self, lat: Option<f64>, long: Option<f64>) -> Result<Response> {
        let params = collect_present(vec![("lat", lat.map_string()), ("long", long.map_string())]);
        self.get(&self.api_url(links::trend::AVAILABLE), &params)
    }

    ///The top ten trending topics for the given location.
    pub fn location_trends(&self, woeid: u32) -> Result<Response> {
        self.get(
            &self.api_url_id(links::trend::LOCATION_STEM, woeid),
            &ParamList::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::tests::client;
    use crate::transport::mock::MockTransport;

    #[test]
    fn search_host_trends() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);

        client.trends().unwrap();
        assert_eq!(transport.last_request().url, "https://search.twitter.com/trends.json");

        client.current_trends(true).unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://search.twitter.com/trends/current.json?exclude=hashtags"
        );

        client.current_trends(false).unwrap();
        assert_eq!(transport.last_request().url, "https://search.twitter.com/trends/current.json");

        client
            .daily_trends(NaiveDate::from_ymd_opt(2010, 3, 7), false)
            .unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://search.twitter.com/trends/daily.json?date=2010-03-07"
        );

        client.weekly_trends(None, true).unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://search.twitter.com/trends/weekly.json?exclude=hashtags"
        );
    }

    #[test]
    fn api_host_trends() {
        let transport = Arc::new(MockTransport::new());
        let client = client(&transport);

        client.available_trends(None, None).unwrap();
        assert_eq!(transport.last_request().url, "https://api.twitter.com/1/trends/available.json");

        client.location_trends(2487956).unwrap();
        assert_eq!(transport.last_request().url, "https://api.twitter.com/1/trends/2487956.json");
    }
}
