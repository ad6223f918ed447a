//! Domain primitives, services and ports.
//!
//! Purpose: define the social graph (users, tweets, likes, follows) and the
//! rules around it independent of HTTP and SQL. Inbound adapters talk to the
//! services through driving ports; services talk to storage, hashing and
//! token signing through driven ports.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: failure payload raised by every layer.
//! - Entities and read models: [`User`], [`Tweet`], [`Like`], [`Follow`] and
//!   their enriched views.
//! - Services: [`UserService`], [`TweetService`], [`LikeService`],
//!   [`FollowService`].

pub mod auth;
pub mod error;
pub mod follow;
pub mod follow_service;
pub mod ids;
pub mod like;
pub mod like_service;
pub mod ports;
pub mod trace_id;
pub mod tweet;
pub mod tweet_service;
pub mod user;
pub mod user_service;

pub use self::auth::{
    LoginCredentials, LoginOutcome, LoginValidationError, Password, PasswordHash, SessionToken,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::follow::{Follow, FollowChanges, FollowView, NewFollow, SelfFollow};
pub use self::follow_service::FollowService;
pub use self::ids::{FollowId, IdValidationError, LikeId, TweetId, UserId};
pub use self::like::{Like, LikeChanges, LikeView, LikedTweet, NewLike};
pub use self::like_service::LikeService;
pub use self::trace_id::TraceId;
pub use self::tweet::{
    EmptyContent, NewTweet, ThreadReply, Tweet, TweetChanges, TweetContent, TweetFilter,
    TweetKind, TweetThread, UnknownTweetKind,
};
pub use self::tweet_service::TweetService;
pub use self::user::{
    AuthoredTweet, Email, GivenLike, NewUser, PersonName, Registration, StoredUser, User,
    UserChanges, UserProfile, UserRelations, UserSummary, UserUpdate, UserValidationError,
    Username,
};
pub use self::user_service::UserService;
