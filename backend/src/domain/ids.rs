//! Store-assigned entity identifiers.
//!
//! Every identifier is a positive 32-bit integer. Construction from an
//! arbitrary integer validates both the sign and the range so that path
//! segments and JSON bodies can be checked before reaching a service.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reasons an integer cannot be used as an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// Zero or negative.
    #[error("identifier must be a positive integer")]
    NotPositive,
    /// Larger than the storage type allows.
    #[error("identifier is out of range")]
    OutOfRange,
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Validate and wrap a raw integer.
            pub fn new(raw: i64) -> Result<Self, IdValidationError> {
                if raw <= 0 {
                    return Err(IdValidationError::NotPositive);
                }
                i32::try_from(raw)
                    .map(Self)
                    .map_err(|_| IdValidationError::OutOfRange)
            }

            /// The raw store value.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }

            /// Wrap a value read back from the store.
            ///
            /// Store identifiers come from a serial column and are positive by
            /// construction.
            #[must_use]
            pub(crate) const fn from_store(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdValidationError;

            fn try_from(raw: i64) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`crate::domain::User`].
    UserId
);
entity_id!(
    /// Identifier of a [`crate::domain::Tweet`].
    TweetId
);
entity_id!(
    /// Identifier of a [`crate::domain::Like`].
    LikeId
);
entity_id!(
    /// Identifier of a [`crate::domain::Follow`].
    FollowId
);
