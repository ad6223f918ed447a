//! Tests for the account handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::{Error, LoginOutcome, SessionToken, UserProfile};
use crate::inbound::http::test_utils::{MockPorts, bearer, test_app, uid, user};

async fn call(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

#[actix_web::test]
async fn sign_up_returns_created_envelope_without_password() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_register()
        .withf(|registration| registration.username.as_str() == "ada")
        .times(1)
        .returning(|_| Ok(user(1, "ada")));

    let (status, body) = call(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/sign-up")
            .set_json(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "username": "ada",
                "password": "secret"
            })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "ada");
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("passwordHash").is_none());
}

#[rstest]
#[case(json!({"name": "Ada", "email": "not-an-email", "username": "ada", "password": "pw"}))]
#[case(json!({"name": " ", "email": "ada@example.com", "username": "ada", "password": "pw"}))]
#[case(json!({"name": "Ada", "email": "ada@example.com", "username": "ada", "password": ""}))]
#[actix_web::test]
async fn sign_up_rejects_invalid_fields_before_the_service(#[case] payload: Value) {
    let (status, body) = call(
        MockPorts::default(),
        actix_test::TestRequest::post()
            .uri("/api/v1/sign-up")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn sign_up_rejects_malformed_json() {
    let (status, body) = call(
        MockPorts::default(),
        actix_test::TestRequest::post()
            .uri("/api/v1/sign-up")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\":"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[case(Error::unauthorized("user not found"), StatusCode::UNAUTHORIZED)]
#[case(Error::invalid_credentials("invalid password"), StatusCode::PAYMENT_REQUIRED)]
#[actix_web::test]
async fn login_failures_keep_distinct_statuses(#[case] error: Error, #[case] expected: StatusCode) {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_login()
        .times(1)
        .returning(move |_| Err(error.clone()));

    let (status, body) = call(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"identifier": "ada", "password": "pw"})),
    )
    .await;

    assert_eq!(status, expected);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn login_returns_token_and_user() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_login()
        .withf(|credentials| credentials.identifier() == "ada@example.com")
        .returning(|_| {
            Ok(LoginOutcome {
                token: SessionToken::new("signed"),
                user: user(1, "ada"),
            })
        });

    let (status, body) = call(
        ports,
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"identifier": "ada@example.com", "password": "pw"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token"], "signed");
    assert_eq!(body["data"]["user"]["id"], 1);
}

#[actix_web::test]
async fn login_rejects_blank_identifier() {
    let (status, _) = call(
        MockPorts::default(),
        actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"identifier": "  ", "password": "pw"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[case("/api/v1/users", false)]
#[case("/api/v1/users?includeRelations=true", true)]
#[actix_web::test]
async fn list_users_forwards_the_relations_flag(#[case] uri: &str, #[case] expected: bool) {
    let mut ports = MockPorts::default();
    ports
        .users_query
        .expect_list()
        .withf(move |include| *include == expected)
        .times(1)
        .returning(|_| Ok(vec![UserProfile::from(user(1, "ada"))]));

    let (status, body) = call(ports, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["username"], "ada");
}

#[rstest]
#[case("0")]
#[case("-5")]
#[case("abc")]
#[actix_web::test]
async fn get_user_rejects_unusable_ids(#[case] raw: &str) {
    let (status, body) = call(
        MockPorts::default(),
        actix_test::TestRequest::get().uri(&format!("/api/v1/users/{raw}")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid id");
}

#[actix_web::test]
async fn get_user_reports_missing_users() {
    let mut ports = MockPorts::default();
    ports
        .users_query
        .expect_get()
        .withf(|id| *id == uid(9))
        .returning(|_| Err(Error::not_found("user 9 not found")));

    let (status, _) = call(ports, actix_test::TestRequest::get().uri("/api/v1/users/9")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_user_requires_a_token() {
    let (status, body) = call(
        MockPorts::default(),
        actix_test::TestRequest::put()
            .uri("/api/v1/users/1")
            .set_json(json!({"name": "Grace"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn update_user_rejects_forged_tokens() {
    let (status, _) = call(
        MockPorts::default().authenticating_as(1),
        actix_test::TestRequest::put()
            .uri("/api/v1/users/1")
            .insert_header(("Authorization", "Bearer forged"))
            .set_json(json!({"name": "Grace"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn empty_update_is_passed_to_the_service() {
    let mut ports = MockPorts::default().authenticating_as(1);
    ports
        .users
        .expect_update()
        .withf(|_, update| update.is_empty())
        .times(1)
        .returning(|_, _| Err(Error::invalid_request("no field supplied")));

    let (status, body) = call(
        ports,
        actix_test::TestRequest::put()
            .uri("/api/v1/users/3")
            .insert_header(bearer())
            .set_json(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "no field supplied");
}

#[actix_web::test]
async fn delete_user_returns_the_removed_account() {
    let mut ports = MockPorts::default().authenticating_as(1);
    ports
        .users
        .expect_delete()
        .withf(|id| *id == uid(2))
        .times(1)
        .returning(|_| Ok(user(2, "grace")));

    let (status, body) = call(
        ports,
        actix_test::TestRequest::delete()
            .uri("/api/v1/users/2")
            .insert_header(bearer()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["username"], "grace");
}
