//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FollowRepository, FollowsCommand, FollowsQuery, LikeRepository, LikesCommand, LikesQuery,
    LoginService, PasswordHasher, TokenService, TweetRepository, TweetsCommand, TweetsQuery,
    UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{FollowService, LikeService, TweetService, UserService};

/// Parameter object bundling all driving ports for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub login: Arc<dyn LoginService>,
    pub tweets: Arc<dyn TweetsCommand>,
    pub tweets_query: Arc<dyn TweetsQuery>,
    pub likes: Arc<dyn LikesCommand>,
    pub likes_query: Arc<dyn LikesQuery>,
    pub follows: Arc<dyn FollowsCommand>,
    pub follows_query: Arc<dyn FollowsQuery>,
    /// Verifies bearer tokens on authenticated routes.
    pub tokens: Arc<dyn TokenService>,
}

/// Driven adapters from which the domain services are assembled.
#[derive(Clone)]
pub struct DrivenAdapters {
    pub users: Arc<dyn UserRepository>,
    pub tweets: Arc<dyn TweetRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub login: Arc<dyn LoginService>,
    pub tweets: Arc<dyn TweetsCommand>,
    pub tweets_query: Arc<dyn TweetsQuery>,
    pub likes: Arc<dyn LikesCommand>,
    pub likes_query: Arc<dyn LikesQuery>,
    pub follows: Arc<dyn FollowsCommand>,
    pub follows_query: Arc<dyn FollowsQuery>,
    pub tokens: Arc<dyn TokenService>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            users_query,
            login,
            tweets,
            tweets_query,
            likes,
            likes_query,
            follows,
            follows_query,
            tokens,
        } = ports;
        Self {
            users,
            users_query,
            login,
            tweets,
            tweets_query,
            likes,
            likes_query,
            follows,
            follows_query,
            tokens,
        }
    }

    /// Build the domain services over `adapters` and expose them as ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use chirp::inbound::http::state::{DrivenAdapters, HttpState};
    /// use chirp::outbound::memory::InMemorySocialStore;
    /// use chirp::outbound::security::{BcryptPasswordHasher, JwtTokenService};
    ///
    /// let store = Arc::new(InMemorySocialStore::new());
    /// let state = HttpState::from_adapters(DrivenAdapters {
    ///     users: store.clone(),
    ///     tweets: store.clone(),
    ///     likes: store.clone(),
    ///     follows: store,
    ///     hasher: Arc::new(BcryptPasswordHasher::default()),
    ///     tokens: Arc::new(JwtTokenService::new(b"secret", None)),
    /// });
    /// let _feed = state.tweets_query.clone();
    /// ```
    pub fn from_adapters(adapters: DrivenAdapters) -> Self {
        let DrivenAdapters {
            users,
            tweets,
            likes,
            follows,
            hasher,
            tokens,
        } = adapters;

        let user_service = Arc::new(UserService::new(users, hasher, tokens.clone()));
        let tweet_service = Arc::new(TweetService::new(tweets, follows.clone()));
        let like_service = Arc::new(LikeService::new(likes));
        let follow_service = Arc::new(FollowService::new(follows));

        Self::new(HttpStatePorts {
            users: user_service.clone(),
            users_query: user_service.clone(),
            login: user_service,
            tweets: tweet_service.clone(),
            tweets_query: tweet_service,
            likes: like_service.clone(),
            likes_query: like_service,
            follows: follow_service.clone(),
            follows_query: follow_service,
            tokens,
        })
    }
}
