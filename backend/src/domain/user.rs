//! User accounts and their read models.
//!
//! Input values (`PersonName`, `Email`, `Username`) validate on construction.
//! Read models carry plain strings because they come back from the store
//! already validated. No read model has a password field: the stored hash is
//! reachable only through [`StoredUser`], which never leaves the domain.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::auth::{Password, PasswordHash};
use super::{LikeId, TweetId, UserId};

/// Validation failures for user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// `name` was blank.
    #[error("name must not be empty")]
    EmptyName,
    /// `email` is not a plausible address.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// `username` has the wrong length or characters.
    #[error(
        "username must be {min} to {max} characters of letters, digits or underscores"
    )]
    InvalidUsername {
        /// Minimum length.
        min: usize,
        /// Maximum length.
        max: usize,
    },
}

/// Minimum username length.
pub const USERNAME_MIN: usize = 3;
/// Maximum username length.
pub const USERNAME_MAX: usize = 32;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is checked separately.
        Regex::new("^[A-Za-z0-9_]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Display name of a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Trim and validate a display name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address, unique across accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Trim and validate an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Handle, unique across accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Validate a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let candidate = raw.as_ref();
        let length = candidate.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) || !username_regex().is_match(candidate)
        {
            return Err(UserValidationError::InvalidUsername {
                min: USERNAME_MIN,
                max: USERNAME_MAX,
            });
        }
        Ok(Self(candidate.to_owned()))
    }

    /// Borrow the username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Outward-facing account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Handle.
    pub username: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Identity fields shown next to tweets, likes and follows.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
        }
    }
}

/// Account record together with its password hash.
#[derive(Debug, Clone)]
pub struct StoredUser {
    /// Public part of the record.
    pub user: User,
    /// Hash of the account password.
    pub password_hash: PasswordHash,
}

/// Compact identity of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Handle.
    pub username: String,
}

/// A tweet as listed under its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoredTweet {
    /// Tweet identifier.
    pub id: TweetId,
    /// Tweet text.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A like as listed under the user who gave it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GivenLike {
    /// Like identifier.
    pub id: LikeId,
    /// Liked tweet.
    pub tweet_id: TweetId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Relations attached to a user in expanded listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRelations {
    /// Tweets the user authored, newest first.
    pub tweets: Vec<AuthoredTweet>,
    /// Likes the user gave, newest first.
    pub likes: Vec<GivenLike>,
    /// Users this user follows.
    pub following: Vec<UserSummary>,
    /// Users following this user.
    pub followers: Vec<UserSummary>,
}

/// Listing entry: a user, optionally with relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The account.
    #[serde(flatten)]
    pub user: User,
    /// Present when relations were requested.
    #[serde(flatten)]
    pub relations: Option<UserRelations>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            user,
            relations: None,
        }
    }
}

/// Validated sign-up request.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Display name.
    pub name: PersonName,
    /// Email address.
    pub email: Email,
    /// Handle.
    pub username: Username,
    /// Clear-text password, hashed before storage.
    pub password: Password,
}

/// Validated partial update of an account.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New display name.
    pub name: Option<PersonName>,
    /// New email address.
    pub email: Option<Email>,
    /// New handle.
    pub username: Option<Username>,
    /// New clear-text password.
    pub password: Option<Password>,
}

impl UserUpdate {
    /// Whether no field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.username.is_none()
            && self.password.is_none()
    }
}

/// Insert payload for the user repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Handle.
    pub username: String,
    /// Password hash.
    pub password_hash: PasswordHash,
}

/// Partial update payload for the user repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New handle.
    pub username: Option<String>,
    /// New password hash.
    pub password_hash: Option<PasswordHash>,
}
