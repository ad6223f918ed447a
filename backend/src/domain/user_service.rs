//! Account services: sign-up, login, listing and profile mutation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, RepositoryError, TokenError, TokenService,
    UserRepository, UsersCommand, UsersQuery, map_repository_error,
};
use crate::domain::{
    Error, LoginCredentials, LoginOutcome, NewUser, Registration, User, UserChanges, UserId,
    UserProfile, UserUpdate,
};

const IDENTITY_TAKEN: &str = "email or username already in use";
const NO_FIELD_SUPPLIED: &str = "no field supplied for update";

fn map_write_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Duplicate { .. } => Error::conflict(IDENTITY_TAKEN),
        other => map_repository_error(other),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    match error {
        PasswordHashError::Hashing { message } => {
            Error::internal("password hashing failed").with_detail(message)
        }
    }
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal("session token could not be issued").with_detail(error.to_string())
}

fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

/// User service implementing the account driving ports.
pub struct UserService<R: ?Sized, H: ?Sized, T: ?Sized> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R: ?Sized, H: ?Sized, T: ?Sized> UserService<R, H, T> {
    /// Create the service from its collaborators.
    pub const fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<R, H, T> UsersCommand for UserService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let Registration {
            name,
            email,
            username,
            password,
        } = registration;

        let existing = self
            .users
            .find_by_email_or_username(email.as_str(), username.as_str())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict(IDENTITY_TAKEN));
        }

        let password_hash = self.hasher.hash(&password).await.map_err(map_hash_error)?;
        let new_user = NewUser {
            name: name.as_str().to_owned(),
            email: email.as_str().to_owned(),
            username: username.as_str().to_owned(),
            password_hash,
        };
        let user = self.users.insert(&new_user).await.map_err(map_write_error)?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    async fn update(&self, id: UserId, update: UserUpdate) -> Result<User, Error> {
        if update.is_empty() {
            return Err(Error::invalid_request(NO_FIELD_SUPPLIED));
        }

        let password_hash = match &update.password {
            Some(password) => Some(self.hasher.hash(password).await.map_err(map_hash_error)?),
            None => None,
        };
        let changes = UserChanges {
            name: update.name.map(|name| name.as_str().to_owned()),
            email: update.email.map(|email| email.as_str().to_owned()),
            username: update.username.map(|username| username.as_str().to_owned()),
            password_hash,
        };

        self.users
            .update(id, &changes)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn delete(&self, id: UserId) -> Result<User, Error> {
        let user = self
            .users
            .delete(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| user_not_found(id))?;
        info!(user_id = %user.id, "user deleted");
        Ok(user)
    }
}

#[async_trait]
impl<R, H, T> UsersQuery for UserService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    async fn list(&self, include_relations: bool) -> Result<Vec<UserProfile>, Error> {
        if include_relations {
            return self
                .users
                .list_with_relations()
                .await
                .map_err(map_repository_error);
        }
        let users = self.users.list().await.map_err(map_repository_error)?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    async fn get(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| user_not_found(id))
    }
}

#[async_trait]
impl<R, H, T> LoginService for UserService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, Error> {
        let Some(stored) = self
            .users
            .find_credentials(credentials.identifier())
            .await
            .map_err(map_repository_error)?
        else {
            debug!("login for unknown account");
            return Err(Error::unauthorized("user not found"));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(map_hash_error)?;
        if !matches {
            debug!(user_id = %stored.user.id, "login with wrong password");
            return Err(Error::invalid_credentials("invalid password"));
        }

        let token = self.tokens.issue(stored.user.id).map_err(map_token_error)?;
        Ok(LoginOutcome {
            token,
            user: stored.user,
        })
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
