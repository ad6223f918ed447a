//! PostgreSQL-backed `FollowRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;

use crate::domain::ports::{FollowRepository, RepositoryError};
use crate::domain::{Follow, FollowId, FollowView, NewFollow, UserId, UserSummary};
use crate::outbound::assembly::{assemble_follow_views, index_summaries};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FollowRow, NewFollowRow, UserSummaryRow};
use super::pool::DbPool;
use super::schema::{follows, users};

/// Diesel-backed implementation of [`FollowRepository`].
#[derive(Clone)]
pub struct DieselFollowRepository {
    pool: DbPool,
}

impl DieselFollowRepository {
    /// Create a repository over `pool`.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for DieselFollowRepository {
    async fn insert(&self, pair: NewFollow) -> Result<Follow, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewFollowRow {
            follower_id: pair.follower_id().get(),
            followee_id: pair.followee_id().get(),
        };

        diesel::insert_into(follows::table)
            .values(&row)
            .returning(FollowRow::as_returning())
            .get_result::<FollowRow>(&mut conn)
            .await
            .map(Follow::from)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: FollowId) -> Result<Option<Follow>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        follows::table
            .find(id.get())
            .select(FollowRow::as_select())
            .first::<FollowRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Follow::from))
            .map_err(map_diesel_error)
    }

    async fn find_by_pair(&self, pair: NewFollow) -> Result<Option<Follow>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        follows::table
            .filter(follows::follower_id.eq(pair.follower_id().get()))
            .filter(follows::followee_id.eq(pair.followee_id().get()))
            .select(FollowRow::as_select())
            .first::<FollowRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Follow::from))
            .map_err(map_diesel_error)
    }

    async fn followee_ids(&self, follower: UserId) -> Result<Vec<UserId>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        follows::table
            .filter(follows::follower_id.eq(follower.get()))
            .select(follows::followee_id)
            .load::<i32>(&mut conn)
            .await
            .map(|ids| ids.into_iter().map(UserId::from_store).collect())
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<FollowView>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (follow_rows, user_rows) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let follow_rows = follows::table
                        .select(FollowRow::as_select())
                        .order((follows::created_at.desc(), follows::id.desc()))
                        .load::<FollowRow>(conn)
                        .await?;
                    let user_ids: Vec<i32> = follow_rows
                        .iter()
                        .flat_map(|row| [row.follower_id, row.followee_id])
                        .collect();
                    let user_rows = users::table
                        .filter(users::id.eq_any(&user_ids))
                        .select(UserSummaryRow::as_select())
                        .load::<UserSummaryRow>(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((follow_rows, user_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let users = index_summaries(user_rows.into_iter().map(UserSummary::from));
        assemble_follow_views(follow_rows.into_iter().map(Follow::from).collect(), &users)
    }

    async fn update(
        &self,
        id: FollowId,
        pair: NewFollow,
    ) -> Result<Option<Follow>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(follows::table.find(id.get()))
            .set((
                follows::follower_id.eq(pair.follower_id().get()),
                follows::followee_id.eq(pair.followee_id().get()),
                follows::updated_at.eq(Utc::now()),
            ))
            .returning(FollowRow::as_returning())
            .get_result::<FollowRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Follow::from))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: FollowId) -> Result<Option<Follow>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(follows::table.find(id.get()))
            .returning(FollowRow::as_returning())
            .get_result::<FollowRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Follow::from))
            .map_err(map_diesel_error)
    }
}
