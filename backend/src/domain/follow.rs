//! Follow edges between users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FollowId, UserId, UserSummary};

/// Rejected follow pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a user cannot follow themselves")]
pub struct SelfFollow;

/// Stored follow edge. `follower_id` follows `followee_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    /// Identifier.
    pub id: FollowId,
    /// The follower.
    pub follower_id: UserId,
    /// The followed user.
    pub followee_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Ordered pair of distinct users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewFollow {
    follower_id: UserId,
    followee_id: UserId,
}

impl NewFollow {
    /// Pair `follower` with `followee`, refusing self-follows.
    ///
    /// # Examples
    /// ```
    /// use chirp::domain::{NewFollow, UserId};
    ///
    /// let ada = UserId::new(1).unwrap();
    /// assert!(NewFollow::try_new(ada, ada).is_err());
    /// ```
    pub fn try_new(follower_id: UserId, followee_id: UserId) -> Result<Self, SelfFollow> {
        if follower_id == followee_id {
            return Err(SelfFollow);
        }
        Ok(Self {
            follower_id,
            followee_id,
        })
    }

    /// The follower.
    #[must_use]
    pub const fn follower_id(&self) -> UserId {
        self.follower_id
    }

    /// The followed user.
    #[must_use]
    pub const fn followee_id(&self) -> UserId {
        self.followee_id
    }
}

/// Partial reassignment of a follow edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowChanges {
    /// New follower.
    pub follower_id: Option<UserId>,
    /// New followed user.
    pub followee_id: Option<UserId>,
}

impl FollowChanges {
    /// Whether no field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.follower_id.is_none() && self.followee_id.is_none()
    }

    /// Overlay the supplied fields on an existing edge.
    pub fn apply_to(self, follow: &Follow) -> Result<NewFollow, SelfFollow> {
        NewFollow::try_new(
            self.follower_id.unwrap_or(follow.follower_id),
            self.followee_id.unwrap_or(follow.followee_id),
        )
    }
}

/// A follow edge with both users' identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowView {
    /// The edge.
    #[serde(flatten)]
    pub follow: Follow,
    /// The follower.
    pub follower: UserSummary,
    /// The followed user.
    pub followee: UserSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn user(raw: i64) -> UserId {
        UserId::new(raw).expect("valid id")
    }

    #[rstest]
    fn distinct_pair_is_accepted() {
        let pair = NewFollow::try_new(user(1), user(2)).expect("distinct users");
        assert_eq!(pair.follower_id(), user(1));
        assert_eq!(pair.followee_id(), user(2));
    }

    #[rstest]
    fn changes_that_collapse_the_pair_are_rejected() {
        let now = Utc::now();
        let follow = Follow {
            id: FollowId::new(1).expect("id"),
            follower_id: user(1),
            followee_id: user(2),
            created_at: now,
            updated_at: now,
        };
        let changes = FollowChanges {
            follower_id: None,
            followee_id: Some(user(1)),
        };
        assert_eq!(changes.apply_to(&follow), Err(SelfFollow));
    }
}
