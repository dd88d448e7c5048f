// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::{stdin, BufRead};

use structopt::StructOpt;
use yansi::Paint;

use twitapi::search::{self, ResultType};
use twitapi::{Client, KeyPair, NoAuth, OAuth};

#[derive(StructOpt)]
struct Args {
    /// Log every request and response
    #[structopt(short, long)]
    verbose: bool,
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(StructOpt)]
enum Command {
    /// Search recent tweets
    Search {
        /// What to search for
        query: String,
        /// How many tweets to show
        #[structopt(long, default_value = "10")]
        count: u32,
    },
    /// Authorize this app with a Twitter account, using a PIN
    Authorize {
        #[structopt(long)]
        consumer_key: String,
        #[structopt(long)]
        consumer_secret: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    match args.cmd {
        Command::Search { query, count } => {
            let client = Client::new(NoAuth)?;
            let resp = search::search(query)
                .result_type(ResultType::Recent)
                .per_page(count)
                .call(&client)?;

            if !resp.is_success() {
                println!("{} {}", Paint::red("Search failed:"), resp.status);
                return Ok(());
            }

            let results = resp
                .body
                .as_json()
                .and_then(|json| json["results"].as_array())
                .cloned()
                .unwrap_or_default();

            for tweet in &results {
                println!(
                    "{} {}",
                    Paint::green(format!("@{}", tweet["from_user"].as_str().unwrap_or("?"))),
                    Paint::default(tweet["created_at"].as_str().unwrap_or("")).dimmed()
                );
                println!("{}", tweet["text"].as_str().unwrap_or(""));
                println!();
            }

            if let Some(limit) = resp.rate_limit() {
                println!(
                    "{}",
                    Paint::blue(format!(
                        "{}/{} calls left until {}",
                        limit.remaining, limit.limit, limit.reset
                    ))
                );
            }
        }
        Command::Authorize {
            consumer_key,
            consumer_secret,
        } => {
            let oauth = OAuth::new(KeyPair::new(consumer_key, consumer_secret)).with_callback("oob");
            let mut client = Client::new(oauth)?;

            let url = client.authorization_url(None)?;
            println!("Go to the following URL, sign in, and give me the PIN that comes back:");
            println!("{}", Paint::cyan(url).underline());

            let pin = stdin().lock().lines().next().ok_or("no PIN given")??;
            let reply = client.access_token(Some(pin.trim()))?;

            let name = reply.params.get("screen_name").map(String::as_str).unwrap_or("?");
            println!("Welcome, {}!", Paint::green(name).bold());
            println!("Access token:  {}", reply.token.key);
            println!("Access secret: {}", reply.token.secret);

            let me = client.verify_credentials()?;
            if me.is_success() {
                println!("{}", Paint::green("Credentials verified."));
            } else {
                println!("{} {}", Paint::red("Couldn't verify credentials:"), me.status);
            }
        }
    }

    Ok(())
}
