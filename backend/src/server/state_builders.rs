//! Builders wiring driven adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use chirp::domain::ports::{FollowRepository, LikeRepository, TweetRepository, UserRepository};
use chirp::inbound::http::state::{DrivenAdapters, HttpState};
use chirp::outbound::memory::InMemorySocialStore;
use chirp::outbound::persistence::{
    DbPool, DieselFollowRepository, DieselLikeRepository, DieselTweetRepository,
    DieselUserRepository,
};
use chirp::outbound::security::{BcryptPasswordHasher, JwtTokenService};

use super::ServerConfig;

/// Repository ports backing the domain services.
struct Repositories {
    users: Arc<dyn UserRepository>,
    tweets: Arc<dyn TweetRepository>,
    likes: Arc<dyn LikeRepository>,
    follows: Arc<dyn FollowRepository>,
}

fn diesel_repositories(pool: &DbPool) -> Repositories {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        tweets: Arc::new(DieselTweetRepository::new(pool.clone())),
        likes: Arc::new(DieselLikeRepository::new(pool.clone())),
        follows: Arc::new(DieselFollowRepository::new(pool.clone())),
    }
}

fn memory_repositories() -> Repositories {
    let store = Arc::new(InMemorySocialStore::new());
    Repositories {
        users: store.clone(),
        tweets: store.clone(),
        likes: store.clone(),
        follows: store,
    }
}

/// Build the HTTP state, using PostgreSQL when a pool is configured and the
/// in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repositories = match &config.db_pool {
        Some(pool) => diesel_repositories(pool),
        None => {
            info!("no database configured; using the in-memory store");
            memory_repositories()
        }
    };
    let Repositories {
        users,
        tweets,
        likes,
        follows,
    } = repositories;

    web::Data::new(HttpState::from_adapters(DrivenAdapters {
        users,
        tweets,
        likes,
        follows,
        hasher: Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost)),
        tokens: Arc::new(JwtTokenService::new(
            config.jwt_secret.as_slice(),
            config.token_ttl,
        )),
    }))
}
