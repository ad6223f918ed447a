//! Tests for the tweet handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::{Error, TweetKind, TweetThread};
use crate::inbound::http::test_utils::{
    MockPorts, bearer, like, summary, test_app, tid, tweet, uid,
};

const CALLER: i64 = 4;

async fn call(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

fn thread(raw_id: i64, author: i64) -> TweetThread {
    TweetThread {
        tweet: tweet(raw_id, author, None),
        author: summary(author, "author"),
        reply_count: 0,
        like_count: 1,
        replies: Vec::new(),
        likes: vec![like(1, CALLER, raw_id)],
    }
}

#[rstest]
#[case(actix_test::TestRequest::get().uri("/api/v1/tweets"))]
#[case(actix_test::TestRequest::get().uri("/api/v1/feed"))]
#[case(actix_test::TestRequest::get().uri("/api/v1/users/1/tweets"))]
#[case(actix_test::TestRequest::post().uri("/api/v1/tweets").set_json(json!({"content": "hi"})))]
#[case(actix_test::TestRequest::delete().uri("/api/v1/tweets/1"))]
#[case(actix_test::TestRequest::post().uri("/api/v1/tweets/1/reply").set_json(json!({"content": "hi"})))]
#[actix_web::test]
async fn tweet_routes_require_a_token(#[case] request: actix_test::TestRequest) {
    let (status, body) = call(MockPorts::default(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn create_tweet_is_authored_by_the_caller() {
    let mut ports = MockPorts::default().authenticating_as(CALLER);
    ports
        .tweets
        .expect_create()
        .withf(|author, content| *author == uid(CALLER) && content.as_str() == "hello")
        .times(1)
        .returning(|_, _| Ok(tweet(10, CALLER, None)));

    let (status, body) = call(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/tweets")
            .insert_header(bearer())
            .set_json(json!({"content": "  hello  "})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["authorId"], CALLER);
    assert_eq!(body["data"]["kind"], "original");
}

#[rstest]
#[case("/api/v1/tweets")]
#[case("/api/v1/tweets/1/reply")]
#[actix_web::test]
async fn blank_content_is_rejected(#[case] uri: &str) {
    let (status, body) = call(
        MockPorts::default().authenticating_as(CALLER),
        actix_test::TestRequest::post()
            .uri(uri)
            .insert_header(bearer())
            .set_json(json!({"content": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "content must not be empty");
}

#[actix_web::test]
async fn reply_links_to_the_parent() {
    let mut ports = MockPorts::default().authenticating_as(CALLER);
    ports
        .tweets
        .expect_reply()
        .withf(|parent, author, _| *parent == tid(7) && *author == uid(CALLER))
        .times(1)
        .returning(|_, _, _| Ok(tweet(11, CALLER, Some(7))));

    let (status, body) = call(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/tweets/7/reply")
            .insert_header(bearer())
            .set_json(json!({"content": "agreed"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["kind"], "reply");
    assert_eq!(body["data"]["replyToId"], 7);
}

#[actix_web::test]
async fn reply_to_missing_parent_is_not_found() {
    let mut ports = MockPorts::default().authenticating_as(CALLER);
    ports
        .tweets
        .expect_reply()
        .returning(|_, _, _| Err(Error::not_found("tweet 99 not found")));

    let (status, _) = call(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/tweets/99/reply")
            .insert_header(bearer())
            .set_json(json!({"content": "hello?"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case("tweet", TweetKind::Original)]
#[case("original", TweetKind::Original)]
#[case("reply", TweetKind::Reply)]
#[actix_web::test]
async fn update_accepts_known_kinds(#[case] raw: &str, #[case] expected: TweetKind) {
    let mut ports = MockPorts::default().authenticating_as(CALLER);
    ports
        .tweets
        .expect_update()
        .withf(move |id, changes| *id == tid(3) && changes.kind == expected)
        .times(1)
        .returning(|_, _| Ok(tweet(3, CALLER, None)));

    let (status, _) = call(
        ports,
        actix_test::TestRequest::put()
            .uri("/api/v1/tweets/3")
            .insert_header(bearer())
            .set_json(json!({"content": "edited", "kind": raw})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[actix_web::test]
async fn update_rejects_unknown_kinds() {
    let (status, body) = call(
        MockPorts::default().authenticating_as(CALLER),
        actix_test::TestRequest::put()
            .uri("/api/v1/tweets/3")
            .insert_header(bearer())
            .set_json(json!({"content": "edited", "kind": "retweet"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "unknown tweet kind `retweet`");
}

#[rstest]
#[case("0")]
#[case("x")]
#[actix_web::test]
async fn delete_rejects_unusable_ids(#[case] raw: &str) {
    let (status, _) = call(
        MockPorts::default().authenticating_as(CALLER),
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/tweets/{raw}"))
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn feed_is_built_for_the_caller() {
    let mut ports = MockPorts::default().authenticating_as(CALLER);
    ports
        .tweets_query
        .expect_feed()
        .withf(|user| *user == uid(CALLER))
        .times(1)
        .returning(|_| Ok(vec![thread(2, 5), thread(1, CALLER)]));

    let (status, body) = call(
        ports,
        actix_test::TestRequest::get()
            .uri("/api/v1/feed")
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], 2);
    assert_eq!(body["data"][0]["likeCount"], 1);
    assert_eq!(body["data"][1]["authorId"], CALLER);
}

#[rstest]
#[case("-3", -3)]
#[case("0", 0)]
#[case("12", 12)]
#[actix_web::test]
async fn user_tweets_forward_raw_ids(#[case] raw: &str, #[case] expected: i64) {
    let mut ports = MockPorts::default().authenticating_as(CALLER);
    ports
        .tweets_query
        .expect_list_by_user()
        .withf(move |id| *id == expected)
        .times(1)
        .returning(|id| Err(Error::not_found(format!("user id {id} is not valid"))));

    let (status, _) = call(
        ports,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/users/{raw}/tweets"))
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn user_tweets_reject_non_numeric_ids() {
    let (status, body) = call(
        MockPorts::default().authenticating_as(CALLER),
        actix_test::TestRequest::get()
            .uri("/api/v1/users/abc/tweets")
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid id");
}
