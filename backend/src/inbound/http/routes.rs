//! Route table for the `/api/v1` scope.
//!
//! Extractor failures (bad JSON, bad query strings, bad path segments) are
//! rewritten into the failure envelope so clients see one error shape.

use actix_web::web;

use super::error::malformed_input;
use super::{follows, likes, tweets, users};

/// Register extractor configuration and every REST handler on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use chirp::inbound::http::routes;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(routes::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req| malformed_input("JSON body", err)),
    )
    .app_data(
        web::QueryConfig::default().error_handler(|err, _req| malformed_input("query string", err)),
    )
    .app_data(
        web::PathConfig::default().error_handler(|err, _req| malformed_input("path", err)),
    )
    .service(users::sign_up)
    .service(users::login)
    .service(users::list_users)
    .service(tweets::list_user_tweets)
    .service(users::get_user)
    .service(users::update_user)
    .service(users::delete_user)
    .service(tweets::list_tweets)
    .service(tweets::create_tweet)
    .service(tweets::update_tweet)
    .service(tweets::delete_tweet)
    .service(tweets::reply_to_tweet)
    .service(tweets::feed)
    .service(likes::list_likes)
    .service(likes::create_like)
    .service(likes::get_like)
    .service(likes::update_like)
    .service(likes::delete_like)
    .service(follows::list_follows)
    .service(follows::create_follow)
    .service(follows::get_follow)
    .service(follows::update_follow)
    .service(follows::delete_follow);
}
