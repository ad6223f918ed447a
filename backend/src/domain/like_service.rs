//! Like services.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    LikeRepository, LikesCommand, LikesQuery, RepositoryError, account_gone,
    map_repository_error,
};
use crate::domain::{Error, Like, LikeChanges, LikeId, LikeView, NewLike};

const ALREADY_LIKED: &str = "like already exists for this user and tweet";
const USER_REFERENCE: &str = "likes_user_id_fkey";

fn like_not_found(id: LikeId) -> Error {
    Error::not_found(format!("like {id} not found"))
}

fn map_write_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Duplicate { .. } => Error::conflict(ALREADY_LIKED),
        RepositoryError::Reference { .. } => Error::not_found("user or tweet not found"),
        other => map_repository_error(other),
    }
}

/// Like service implementing the like driving ports.
pub struct LikeService<L: ?Sized> {
    likes: Arc<L>,
}

impl<L: ?Sized> LikeService<L> {
    /// Create the service with the like repository.
    pub const fn new(likes: Arc<L>) -> Self {
        Self { likes }
    }
}

impl<L> LikeService<L>
where
    L: LikeRepository + ?Sized,
{
    async fn ensure_pair_free(&self, pair: NewLike, owner: Option<LikeId>) -> Result<(), Error> {
        let existing = self
            .likes
            .find_by_pair(pair)
            .await
            .map_err(map_repository_error)?;
        match existing {
            Some(like) if Some(like.id) != owner => Err(Error::conflict(ALREADY_LIKED)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<L> LikesCommand for LikeService<L>
where
    L: LikeRepository + ?Sized,
{
    async fn create(&self, like: NewLike) -> Result<Like, Error> {
        self.ensure_pair_free(like, None).await?;
        self.likes.insert(like).await.map_err(|error| match error {
            RepositoryError::Reference { constraint } if constraint == USER_REFERENCE => {
                account_gone()
            }
            other => map_write_error(other),
        })
    }

    async fn update(&self, id: LikeId, changes: LikeChanges) -> Result<Like, Error> {
        if changes.is_empty() {
            return Err(Error::invalid_request("no field supplied for update"));
        }
        let current = self
            .likes
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| like_not_found(id))?;

        let pair = changes.apply_to(&current);
        self.ensure_pair_free(pair, Some(id)).await?;
        self.likes
            .update(id, pair)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| like_not_found(id))
    }

    async fn delete(&self, id: LikeId) -> Result<Like, Error> {
        self.likes
            .delete(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| like_not_found(id))
    }
}

#[async_trait]
impl<L> LikesQuery for LikeService<L>
where
    L: LikeRepository + ?Sized,
{
    async fn list(&self) -> Result<Vec<LikeView>, Error> {
        self.likes.list().await.map_err(map_repository_error)
    }

    async fn get(&self, raw_id: i64) -> Result<Like, Error> {
        let id = LikeId::new(raw_id).map_err(|_| Error::invalid_request("invalid id"))?;
        self.likes
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| like_not_found(id))
    }
}
