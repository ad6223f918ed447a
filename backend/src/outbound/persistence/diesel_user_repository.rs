//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;

use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::{
    Follow, Like, NewUser, StoredUser, Tweet, User, UserChanges, UserId, UserProfile,
};
use crate::outbound::assembly::assemble_profiles;

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    FollowRow, LikeRow, NewUserRow, TweetRow, UserChangeset, UserRow, tweets_from_rows,
};
use super::pool::DbPool;
use super::schema::{follows, likes, tweets, users};

/// Diesel-backed implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            name: &user.name,
            email: &user.email,
            username: &user.username,
            password_hash: user.password_hash.as_str(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map(User::from)
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(User::from))
            .map_err(map_diesel_error)
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .filter(users::email.eq(email).or(users::username.eq(username)))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(User::from))
            .map_err(map_diesel_error)
    }

    async fn find_credentials(
        &self,
        identifier: &str,
    ) -> Result<Option<StoredUser>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .filter(users::email.eq(identifier).or(users::username.eq(identifier)))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(UserRow::into_stored))
            .map_err(map_diesel_error)
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .select(UserRow::as_select())
            .order((users::created_at.desc(), users::id.desc()))
            .load::<UserRow>(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(User::from).collect())
            .map_err(map_diesel_error)
    }

    async fn list_with_relations(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (user_rows, tweet_rows, like_rows, follow_rows) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let user_rows = users::table
                        .select(UserRow::as_select())
                        .order((users::created_at.desc(), users::id.desc()))
                        .load::<UserRow>(conn)
                        .await?;
                    let tweet_rows = tweets::table
                        .select(TweetRow::as_select())
                        .order((tweets::created_at.desc(), tweets::id.desc()))
                        .load::<TweetRow>(conn)
                        .await?;
                    let like_rows = likes::table
                        .select(LikeRow::as_select())
                        .order((likes::created_at.desc(), likes::id.desc()))
                        .load::<LikeRow>(conn)
                        .await?;
                    let follow_rows = follows::table
                        .select(FollowRow::as_select())
                        .order((follows::created_at.desc(), follows::id.desc()))
                        .load::<FollowRow>(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((user_rows, tweet_rows, like_rows, follow_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let tweets: Vec<Tweet> = tweets_from_rows(tweet_rows)?;
        Ok(assemble_profiles(
            user_rows.into_iter().map(User::from).collect(),
            tweets,
            like_rows.into_iter().map(Like::from).collect(),
            follow_rows.into_iter().map(Follow::from).collect(),
        ))
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = UserChangeset {
            name: changes.name.as_deref(),
            email: changes.email.as_deref(),
            username: changes.username.as_deref(),
            password_hash: changes.password_hash.as_ref().map(|hash| hash.as_str()),
            updated_at: Utc::now(),
        };

        diesel::update(users::table.find(id.get()))
            .set(&changeset)
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(User::from))
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(users::table.find(id.get()))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(User::from))
            .map_err(map_diesel_error)
    }
}
