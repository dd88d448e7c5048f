// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calls about the authenticated account itself.

use crate::auth::Authenticator;
use crate::client::Client;
use crate::common::*;
use crate::error::Result;
use crate::links;

impl<A: Authenticator> Client<A> {
    /// Returns the authenticated user's profile if the credentials are valid, or a `401` if they
    /// aren't.
    pub fn verify_credentials(&self) -> Result<Response> {
        self.get(&self.api_url(links::account::VERIFY_CREDENTIALS), &ParamList::new())
    }

    /// Returns how many calls are left in the current rate-limit window.
    ///
    /// Without credentials this reports the limit for the calling IP address. Calling this doesn't
    /// count against the limit.
    pub fn rate_limit_status(&self) -> Result<Response> {
        self.get(&self.api_url(links::account::RATE_LIMIT_STATUS), &ParamList::new())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::client::tests::client;
    use crate::transport::mock::MockTransport;

    #[test]
    fn account_calls() {
        let transport = Arc::new(MockTransport::new().reply(
            200,
            r#"{"remaining_hits": 149, "hourly_limit": 150, "reset_time_in_seconds": 1277485629}"#,
        ));
        let client = client(&transport);

        let resp = client.rate_limit_status().unwrap();
        assert_eq!(resp.body.as_json().unwrap()["remaining_hits"], 149);
        assert_eq!(
            transport.last_request().url,
            "https://api.twitter.com/1/account/rate_limit_status.json"
        );

        client.verify_credentials().unwrap();
        assert_eq!(
            transport.last_request().url,
            "https://api.twitter.com/1/account/verify_credentials.json"
        );
    }
}
