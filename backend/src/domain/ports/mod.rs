//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`TokenService`]) are
//! implemented by outbound adapters and return typed port errors. Driving
//! ports (`*Command`, `*Query`, [`LoginService`]) are implemented by the
//! domain services and consumed by inbound adapters; they return the domain
//! [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod follow_repository;
mod follows_command;
mod follows_query;
mod like_repository;
mod likes_command;
mod likes_query;
mod login_service;
mod password_hasher;
mod repository_error;
mod token_service;
mod tweet_repository;
mod tweets_command;
mod tweets_query;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use follow_repository::MockFollowRepository;
pub use follow_repository::FollowRepository;
#[cfg(test)]
pub use follows_command::MockFollowsCommand;
pub use follows_command::FollowsCommand;
#[cfg(test)]
pub use follows_query::MockFollowsQuery;
pub use follows_query::FollowsQuery;
#[cfg(test)]
pub use like_repository::MockLikeRepository;
pub use like_repository::LikeRepository;
#[cfg(test)]
pub use likes_command::MockLikesCommand;
pub use likes_command::LikesCommand;
#[cfg(test)]
pub use likes_query::MockLikesQuery;
pub use likes_query::LikesQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub(crate) use repository_error::{account_gone, map_repository_error};
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use tweet_repository::MockTweetRepository;
pub use tweet_repository::TweetRepository;
#[cfg(test)]
pub use tweets_command::MockTweetsCommand;
pub use tweets_command::TweetsCommand;
#[cfg(test)]
pub use tweets_query::MockTweetsQuery;
pub use tweets_query::TweetsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
