//! `PasswordHasher` backed by bcrypt.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash};

/// Work factor used when configuration does not override it.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// bcrypt hasher running on the blocking thread pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given work factor.
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

fn join_error(error: tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::hashing(error.to_string())
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let clear = Zeroizing::new(password.expose().to_owned());
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(clear.as_bytes(), cost))
            .await
            .map_err(join_error)?
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    async fn verify(
        &self,
        password: &Password,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let clear = Zeroizing::new(password.expose().to_owned());
        let encoded = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(clear.as_bytes(), &encoded))
            .await
            .map_err(join_error)?
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        // Minimum bcrypt cost keeps the tests fast.
        BcryptPasswordHasher::new(4)
    }

    fn password(raw: &str) -> Password {
        Password::new(raw).expect("non-empty password")
    }

    #[rstest]
    #[tokio::test]
    async fn hash_verifies_only_the_original_password(hasher: BcryptPasswordHasher) {
        let hash = hasher.hash(&password("hunter2")).await.expect("hash");

        assert_ne!(hash.as_str(), "hunter2");
        assert!(hasher.verify(&password("hunter2"), &hash).await.expect("verify"));
        assert!(!hasher.verify(&password("hunter3"), &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_is_an_error(hasher: BcryptPasswordHasher) {
        let err = hasher
            .verify(&password("hunter2"), &PasswordHash::new("not-a-hash"))
            .await
            .expect_err("malformed hash");

        assert!(matches!(err, PasswordHashError::Hashing { .. }));
    }

    #[rstest]
    fn default_cost_matches_the_constant() {
        assert_eq!(BcryptPasswordHasher::default().cost, DEFAULT_BCRYPT_COST);
    }
}
