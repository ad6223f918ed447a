//! PostgreSQL-backed `TweetRepository` implementation using Diesel ORM.
//!
//! Thread listings run four batched queries (roots, replies, likes, authors)
//! inside one read-only repeatable-read transaction so the parts agree.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;

use crate::domain::ports::{RepositoryError, TweetRepository};
use crate::domain::{
    Like, NewTweet, Tweet, TweetChanges, TweetFilter, TweetId, TweetThread, UserSummary,
};
use crate::outbound::assembly::{assemble_threads, index_summaries};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    LikeRow, NewTweetRow, TweetChangeset, TweetRow, UserSummaryRow, tweets_from_rows,
};
use super::pool::DbPool;
use super::schema::{likes, tweets, users};

/// Diesel-backed implementation of [`TweetRepository`].
#[derive(Clone)]
pub struct DieselTweetRepository {
    pool: DbPool,
}

impl DieselTweetRepository {
    /// Create a repository over `pool`.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TweetRepository for DieselTweetRepository {
    async fn insert(&self, tweet: &NewTweet) -> Result<Tweet, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(tweets::table)
            .values(&NewTweetRow::from(tweet))
            .returning(TweetRow::as_returning())
            .get_result::<TweetRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Tweet::try_from(row)
    }

    async fn find_by_id(&self, id: TweetId) -> Result<Option<Tweet>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        tweets::table
            .find(id.get())
            .select(TweetRow::as_select())
            .first::<TweetRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Tweet::try_from)
            .transpose()
    }

    async fn list_threads(
        &self,
        filter: &TweetFilter,
    ) -> Result<Vec<TweetThread>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let kind = filter.kind.map(|kind| kind.as_str());
        let author_ids: Option<Vec<i32>> = filter
            .authors
            .as_ref()
            .map(|ids| ids.iter().map(|id| id.get()).collect());

        let (root_rows, reply_rows, like_rows, author_rows) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let mut roots_query = tweets::table
                        .select(TweetRow::as_select())
                        .order((tweets::created_at.desc(), tweets::id.desc()))
                        .into_boxed();
                    if let Some(kind) = kind {
                        roots_query = roots_query.filter(tweets::kind.eq(kind));
                    }
                    if let Some(ids) = author_ids {
                        roots_query = roots_query.filter(tweets::author_id.eq_any(ids));
                    }
                    let root_rows = roots_query.load::<TweetRow>(conn).await?;
                    let root_ids: Vec<i32> = root_rows.iter().map(|row| row.id).collect();

                    let reply_rows = tweets::table
                        .filter(tweets::reply_to_id.eq_any(&root_ids))
                        .select(TweetRow::as_select())
                        .order((tweets::created_at.asc(), tweets::id.asc()))
                        .load::<TweetRow>(conn)
                        .await?;
                    let like_rows = likes::table
                        .filter(likes::tweet_id.eq_any(&root_ids))
                        .select(LikeRow::as_select())
                        .order((likes::created_at.desc(), likes::id.desc()))
                        .load::<LikeRow>(conn)
                        .await?;

                    let mut user_ids: Vec<i32> = root_rows
                        .iter()
                        .chain(reply_rows.iter())
                        .map(|row| row.author_id)
                        .collect();
                    user_ids.sort_unstable();
                    user_ids.dedup();
                    let author_rows = users::table
                        .filter(users::id.eq_any(&user_ids))
                        .select(UserSummaryRow::as_select())
                        .load::<UserSummaryRow>(conn)
                        .await?;

                    Ok::<_, diesel::result::Error>((root_rows, reply_rows, like_rows, author_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let authors = index_summaries(author_rows.into_iter().map(UserSummary::from));
        assemble_threads(
            tweets_from_rows(root_rows)?,
            tweets_from_rows(reply_rows)?,
            like_rows.into_iter().map(Like::from).collect(),
            &authors,
        )
    }

    async fn update(
        &self,
        id: TweetId,
        changes: &TweetChanges,
    ) -> Result<Option<Tweet>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(tweets::table.find(id.get()))
            .set(&TweetChangeset::from(changes))
            .returning(TweetRow::as_returning())
            .get_result::<TweetRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Tweet::try_from)
            .transpose()
    }

    async fn delete(&self, id: TweetId) -> Result<Option<Tweet>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(tweets::table.find(id.get()))
            .returning(TweetRow::as_returning())
            .get_result::<TweetRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(Tweet::try_from)
            .transpose()
    }
}
