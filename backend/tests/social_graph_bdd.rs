//! Behavioural tests for feeds, follows and account deletion.
//!
//! Every step drives the real route table over the in-memory store. The world
//! owns an Actix system runner so synchronous steps can await requests.

use std::collections::HashMap;
use std::sync::Arc;

use actix_rt::SystemRunner;
use actix_web::http::Method;
use actix_web::test as actix_test;
use actix_web::{App, web};
use chirp::Trace;
use chirp::inbound::http::routes;
use chirp::inbound::http::state::{DrivenAdapters, HttpState};
use chirp::outbound::memory::InMemorySocialStore;
use chirp::outbound::security::{BcryptPasswordHasher, JwtTokenService};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

const HANDLES: [&str; 3] = ["ada", "grace", "linus"];
const PASSWORD: &str = "correct horse";

struct Account {
    id: i64,
    bearer: String,
    tweet: Option<i64>,
}

struct SocialWorld {
    runner: SystemRunner,
    state: web::Data<HttpState>,
    accounts: HashMap<&'static str, Account>,
    follow_id: Option<i64>,
    last_status: Option<u16>,
    last_body: Option<Value>,
}

impl SocialWorld {
    fn request(
        &mut self,
        method: Method,
        path: &str,
        caller: Option<&str>,
        payload: Option<Value>,
    ) -> Value {
        let mut request = actix_test::TestRequest::default()
            .method(method)
            .uri(&format!("/api/v1{path}"));
        if let Some(handle) = caller {
            let bearer = self.account(handle).bearer.clone();
            request = request.insert_header(("Authorization", bearer));
        }
        if let Some(payload) = payload {
            request = request.set_json(payload);
        }

        let state = self.state.clone();
        let (status, body) = self.runner.block_on(async move {
            let app = actix_test::init_service(
                App::new()
                    .app_data(state)
                    .wrap(Trace)
                    .service(web::scope("/api/v1").configure(routes::configure)),
            )
            .await;
            let response = actix_test::call_service(&app, request.to_request()).await;
            let status = response.status().as_u16();
            let body: Value = actix_test::read_body_json(response).await;
            (status, body)
        });
        self.last_status = Some(status);
        self.last_body = Some(body.clone());
        body
    }

    fn account(&self, handle: &str) -> &Account {
        self.accounts.get(handle).expect("registered account")
    }

    fn tweet_of(&self, handle: &str) -> i64 {
        self.account(handle).tweet.expect("posted tweet")
    }

    fn listed_ids(&self) -> Vec<i64> {
        self.last_body
            .as_ref()
            .and_then(|body| body["data"].as_array())
            .expect("listed data")
            .iter()
            .filter_map(|item| item["id"].as_i64())
            .collect()
    }

    fn assert_status(&self, expected: u16) {
        assert_eq!(
            self.last_status,
            Some(expected),
            "unexpected response: {:?}",
            self.last_body
        );
    }
}

#[fixture]
fn world() -> SocialWorld {
    let store = Arc::new(InMemorySocialStore::new());
    let state = HttpState::from_adapters(DrivenAdapters {
        users: store.clone(),
        tweets: store.clone(),
        likes: store.clone(),
        follows: store,
        hasher: Arc::new(BcryptPasswordHasher::new(4)),
        tokens: Arc::new(JwtTokenService::new(b"social-graph-secret", None)),
    });
    SocialWorld {
        runner: actix_rt::System::new(),
        state: web::Data::new(state),
        accounts: HashMap::new(),
        follow_id: None,
        last_status: None,
        last_body: None,
    }
}

#[given("three registered users")]
fn three_registered_users(world: &mut SocialWorld) {
    for handle in HANDLES {
        let body = world.request(
            Method::POST,
            "/sign-up",
            None,
            Some(json!({
                "name": handle,
                "email": format!("{handle}@example.com"),
                "username": handle,
                "password": PASSWORD,
            })),
        );
        world.assert_status(201);
        let id = body["data"]["id"].as_i64().expect("user id");

        let body = world.request(
            Method::POST,
            "/login",
            None,
            Some(json!({"identifier": handle, "password": PASSWORD})),
        );
        world.assert_status(200);
        let token = body["data"]["token"].as_str().expect("token");
        world.accounts.insert(
            handle,
            Account {
                id,
                bearer: format!("Bearer {token}"),
                tweet: None,
            },
        );
    }
}

#[given("ada follows grace")]
fn ada_follows_grace(world: &mut SocialWorld) {
    let grace = world.account("grace").id;
    let body = world.request(
        Method::POST,
        "/follows",
        Some("ada"),
        Some(json!({ "followeeId": grace })),
    );
    world.assert_status(201);
    world.follow_id = body["data"]["id"].as_i64();
}

#[given("every user posts a tweet")]
fn every_user_posts_a_tweet(world: &mut SocialWorld) {
    for handle in HANDLES {
        let body = world.request(
            Method::POST,
            "/tweets",
            Some(handle),
            Some(json!({ "content": format!("hello from {handle}") })),
        );
        world.assert_status(201);
        let tweet = body["data"]["id"].as_i64();
        if let Some(account) = world.accounts.get_mut(handle) {
            account.tweet = tweet;
        }
    }
}

#[given("ada likes grace's tweet")]
fn ada_likes_graces_tweet(world: &mut SocialWorld) {
    let tweet = world.tweet_of("grace");
    world.request(
        Method::POST,
        "/likes",
        Some("ada"),
        Some(json!({ "tweetId": tweet })),
    );
    world.assert_status(201);
}

#[when("ada reads the feed")]
fn ada_reads_the_feed(world: &mut SocialWorld) {
    world.request(Method::GET, "/feed", Some("ada"), None);
    world.assert_status(200);
}

#[when("ada unfollows grace")]
fn ada_unfollows_grace(world: &mut SocialWorld) {
    let follow = world.follow_id.expect("recorded follow");
    world.request(Method::DELETE, &format!("/follows/{follow}"), Some("ada"), None);
    world.assert_status(201);
}

#[when("grace deletes their account")]
fn grace_deletes_their_account(world: &mut SocialWorld) {
    let grace = world.account("grace").id;
    world.request(Method::DELETE, &format!("/users/{grace}"), Some("grace"), None);
    world.assert_status(201);
}

#[when("ada lists every tweet")]
fn ada_lists_every_tweet(world: &mut SocialWorld) {
    world.request(Method::GET, "/tweets", Some("ada"), None);
    world.assert_status(200);
}

#[then("the feed lists grace's tweet before ada's")]
fn the_feed_lists_graces_tweet_before_adas(world: &mut SocialWorld) {
    let expected = vec![world.tweet_of("grace"), world.tweet_of("ada")];
    assert_eq!(world.listed_ids(), expected);
}

#[then("linus's tweet is not in the feed")]
fn linuss_tweet_is_not_in_the_feed(world: &mut SocialWorld) {
    let tweet = world.tweet_of("linus");
    assert!(!world.listed_ids().contains(&tweet));
}

#[then("the feed holds only ada's tweet")]
fn the_feed_holds_only_adas_tweet(world: &mut SocialWorld) {
    assert_eq!(world.listed_ids(), vec![world.tweet_of("ada")]);
}

#[then("no listed tweet is by grace")]
fn no_listed_tweet_is_by_grace(world: &mut SocialWorld) {
    let grace = world.account("grace").id;
    let body = world.last_body.as_ref().expect("response body");
    let authors: Vec<i64> = body["data"]
        .as_array()
        .expect("tweets")
        .iter()
        .filter_map(|tweet| tweet["authorId"].as_i64())
        .collect();
    assert_eq!(authors.len(), 2);
    assert!(!authors.contains(&grace));
}

#[then("no like remains")]
fn no_like_remains(world: &mut SocialWorld) {
    let body = world.request(Method::GET, "/likes", Some("ada"), None);
    world.assert_status(200);
    assert_eq!(body["data"], json!([]));
}

#[scenario(
    path = "tests/features/social_graph.feature",
    name = "The feed holds own and followed tweets"
)]
fn the_feed_holds_own_and_followed_tweets(world: SocialWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/social_graph.feature",
    name = "Unfollowing removes tweets from the feed"
)]
fn unfollowing_removes_tweets_from_the_feed(world: SocialWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/social_graph.feature",
    name = "Deleting an account removes its tweets and likes"
)]
fn deleting_an_account_removes_its_tweets_and_likes(world: SocialWorld) {
    drop(world);
}
