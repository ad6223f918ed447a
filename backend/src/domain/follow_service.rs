//! Follow services.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    FollowRepository, FollowsCommand, FollowsQuery, RepositoryError, account_gone,
    map_repository_error,
};
use crate::domain::{
    Error, Follow, FollowChanges, FollowId, FollowView, NewFollow, SelfFollow, UserId,
};

const ALREADY_FOLLOWING: &str = "this user already follows that user";
const FOLLOWER_REFERENCE: &str = "follows_follower_id_fkey";

fn follow_not_found(id: FollowId) -> Error {
    Error::not_found(format!("follow {id} not found"))
}

fn self_follow(error: SelfFollow) -> Error {
    Error::invalid_request(error.to_string())
}

fn map_write_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Duplicate { .. } => Error::conflict(ALREADY_FOLLOWING),
        RepositoryError::Reference { .. } => Error::not_found("user not found"),
        RepositoryError::Constraint { .. } => self_follow(SelfFollow),
        other => map_repository_error(other),
    }
}

/// Follow service implementing the follow driving ports.
pub struct FollowService<F: ?Sized> {
    follows: Arc<F>,
}

impl<F: ?Sized> FollowService<F> {
    /// Create the service with the follow repository.
    pub const fn new(follows: Arc<F>) -> Self {
        Self { follows }
    }
}

impl<F> FollowService<F>
where
    F: FollowRepository + ?Sized,
{
    async fn ensure_pair_free(
        &self,
        pair: NewFollow,
        owner: Option<FollowId>,
    ) -> Result<(), Error> {
        let existing = self
            .follows
            .find_by_pair(pair)
            .await
            .map_err(map_repository_error)?;
        match existing {
            Some(follow) if Some(follow.id) != owner => Err(Error::conflict(ALREADY_FOLLOWING)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<F> FollowsCommand for FollowService<F>
where
    F: FollowRepository + ?Sized,
{
    async fn create(&self, follower: UserId, followee: UserId) -> Result<Follow, Error> {
        let pair = NewFollow::try_new(follower, followee).map_err(self_follow)?;
        self.ensure_pair_free(pair, None).await?;
        let follow = self
            .follows
            .insert(pair)
            .await
            .map_err(|error| match error {
                RepositoryError::Reference { constraint } if constraint == FOLLOWER_REFERENCE => {
                    account_gone()
                }
                other => map_write_error(other),
            })?;
        info!(follower = %follower, followee = %followee, "follow created");
        Ok(follow)
    }

    async fn update(&self, id: FollowId, changes: FollowChanges) -> Result<Follow, Error> {
        if changes.is_empty() {
            return Err(Error::invalid_request("no field supplied for update"));
        }
        let current = self
            .follows
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| follow_not_found(id))?;

        let pair = changes.apply_to(&current).map_err(self_follow)?;
        self.ensure_pair_free(pair, Some(id)).await?;
        self.follows
            .update(id, pair)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| follow_not_found(id))
    }

    async fn delete(&self, id: FollowId) -> Result<Follow, Error> {
        self.follows
            .delete(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| follow_not_found(id))
    }
}

#[async_trait]
impl<F> FollowsQuery for FollowService<F>
where
    F: FollowRepository + ?Sized,
{
    async fn list(&self) -> Result<Vec<FollowView>, Error> {
        self.follows.list().await.map_err(map_repository_error)
    }

    async fn get(&self, raw_id: i64) -> Result<Follow, Error> {
        let id = FollowId::new(raw_id).map_err(|_| Error::invalid_request("invalid id"))?;
        self.follows
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| follow_not_found(id))
    }
}

#[cfg(test)]
#[path = "follow_service_tests.rs"]
mod tests;
