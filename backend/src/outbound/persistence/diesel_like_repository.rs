//! PostgreSQL-backed `LikeRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;

use crate::domain::ports::{LikeRepository, RepositoryError};
use crate::domain::{Like, LikeId, LikeView, LikedTweet, NewLike, UserSummary};
use crate::outbound::assembly::{assemble_like_views, index_summaries};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{LikeRow, LikedTweetRow, NewLikeRow, UserSummaryRow};
use super::pool::DbPool;
use super::schema::{likes, tweets, users};

/// Diesel-backed implementation of [`LikeRepository`].
#[derive(Clone)]
pub struct DieselLikeRepository {
    pool: DbPool,
}

impl DieselLikeRepository {
    /// Create a repository over `pool`.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for DieselLikeRepository {
    async fn insert(&self, like: NewLike) -> Result<Like, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewLikeRow {
            user_id: like.user_id.get(),
            tweet_id: like.tweet_id.get(),
        };

        diesel::insert_into(likes::table)
            .values(&row)
            .returning(LikeRow::as_returning())
            .get_result::<LikeRow>(&mut conn)
            .await
            .map(Like::from)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: LikeId) -> Result<Option<Like>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        likes::table
            .find(id.get())
            .select(LikeRow::as_select())
            .first::<LikeRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Like::from))
            .map_err(map_diesel_error)
    }

    async fn find_by_pair(&self, pair: NewLike) -> Result<Option<Like>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        likes::table
            .filter(likes::user_id.eq(pair.user_id.get()))
            .filter(likes::tweet_id.eq(pair.tweet_id.get()))
            .select(LikeRow::as_select())
            .first::<LikeRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Like::from))
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<LikeView>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (like_rows, user_rows, tweet_rows) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let like_rows = likes::table
                        .select(LikeRow::as_select())
                        .order((likes::created_at.desc(), likes::id.desc()))
                        .load::<LikeRow>(conn)
                        .await?;
                    let user_ids: Vec<i32> = like_rows.iter().map(|row| row.user_id).collect();
                    let tweet_ids: Vec<i32> = like_rows.iter().map(|row| row.tweet_id).collect();
                    let user_rows = users::table
                        .filter(users::id.eq_any(&user_ids))
                        .select(UserSummaryRow::as_select())
                        .load::<UserSummaryRow>(conn)
                        .await?;
                    let tweet_rows = tweets::table
                        .filter(tweets::id.eq_any(&tweet_ids))
                        .select(LikedTweetRow::as_select())
                        .load::<LikedTweetRow>(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((like_rows, user_rows, tweet_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let users = index_summaries(user_rows.into_iter().map(UserSummary::from));
        let tweets = tweet_rows
            .into_iter()
            .map(LikedTweet::from)
            .map(|tweet| (tweet.id, tweet))
            .collect();
        assemble_like_views(
            like_rows.into_iter().map(Like::from).collect(),
            &users,
            &tweets,
        )
    }

    async fn update(&self, id: LikeId, pair: NewLike) -> Result<Option<Like>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(likes::table.find(id.get()))
            .set((
                likes::user_id.eq(pair.user_id.get()),
                likes::tweet_id.eq(pair.tweet_id.get()),
                likes::updated_at.eq(Utc::now()),
            ))
            .returning(LikeRow::as_returning())
            .get_result::<LikeRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Like::from))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: LikeId) -> Result<Option<Like>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(likes::table.find(id.get()))
            .returning(LikeRow::as_returning())
            .get_result::<LikeRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Like::from))
            .map_err(map_diesel_error)
    }
}
