//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CHIRP_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

use crate::outbound::security::DEFAULT_BCRYPT_COST;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const EPHEMERAL_SECRET_LEN: usize = 32;
/// Lowest work factor bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const MAX_BCRYPT_COST: u32 = 31;

/// Errors raised while turning settings into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address `{value}`: {message}")]
    InvalidBindAddr { value: String, message: String },
    /// No signing secret was configured and ephemeral secrets are disallowed.
    #[error(
        "no JWT secret configured; set CHIRP_JWT_SECRET or CHIRP_ALLOW_EPHEMERAL_SECRET=true"
    )]
    MissingJwtSecret,
    /// `bcrypt_cost` lies outside the range bcrypt accepts.
    #[error("bcrypt cost {value} is outside 4..=31")]
    InvalidBcryptCost { value: u32 },
}

/// Configuration values for the chirp server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CHIRP")]
pub struct ChirpSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Absent means the in-memory store.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded schema migrations at startup.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// HMAC secret used to sign session tokens.
    pub jwt_secret: Option<String>,
    /// Token lifetime in seconds. Absent means tokens never expire.
    pub token_ttl_seconds: Option<u64>,
    /// bcrypt work factor.
    pub bcrypt_cost: Option<u32>,
    /// Generate a random signing secret when none is configured.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Comma-separated browser origins admitted by CORS. Absent admits any.
    pub cors_allowed_origins: Option<String>,
}

impl ChirpSettings {
    /// Parsed listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            }
        })
    }

    /// Configured pool size, falling back to 10.
    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Configured bcrypt cost, falling back to the hasher default.
    pub fn bcrypt_cost(&self) -> Result<u32, SettingsError> {
        match self.bcrypt_cost {
            None => Ok(DEFAULT_BCRYPT_COST),
            Some(value) if (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&value) => Ok(value),
            Some(value) => Err(SettingsError::InvalidBcryptCost { value }),
        }
    }

    /// Origins admitted by CORS; empty means any origin.
    #[must_use]
    pub fn cors_allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Token lifetime, if tokens expire at all.
    #[must_use]
    pub fn token_ttl(&self) -> Option<Duration> {
        self.token_ttl_seconds.map(Duration::from_secs)
    }

    /// Signing secret for session tokens.
    ///
    /// Debug builds, or `allow_ephemeral_secret`, fall back to a random
    /// secret; tokens then stop verifying after a restart.
    pub fn jwt_secret(&self) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        self.resolve_jwt_secret(cfg!(debug_assertions))
    }

    fn resolve_jwt_secret(&self, debug_build: bool) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        match self.jwt_secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => Ok(Zeroizing::new(secret.as_bytes().to_vec())),
            _ if debug_build || self.allow_ephemeral_secret => {
                warn!("using an ephemeral JWT secret (dev only)");
                let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
                rand::thread_rng().fill_bytes(secret.as_mut_slice());
                Ok(secret)
            }
            _ => Err(SettingsError::MissingJwtSecret),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and secret resolution.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 9] = [
        "CHIRP_BIND_ADDR",
        "CHIRP_DATABASE_URL",
        "CHIRP_DB_MAX_CONNECTIONS",
        "CHIRP_RUN_MIGRATIONS",
        "CHIRP_JWT_SECRET",
        "CHIRP_TOKEN_TTL_SECONDS",
        "CHIRP_BCRYPT_COST",
        "CHIRP_ALLOW_EPHEMERAL_SECRET",
        "CHIRP_CORS_ALLOWED_ORIGINS",
    ];

    fn load_from_empty_args() -> ChirpSettings {
        ChirpSettings::load_from_iter([OsString::from("chirp")]).expect("config should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    fn with_vars(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        let mut vars = cleared();
        for (name, value) in overrides {
            if let Some(slot) = vars.iter_mut().find(|(key, _)| key == name) {
                slot.1 = Some((*value).to_owned());
            }
        }
        vars
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("socket address")
        );
        assert!(settings.database_url.is_none());
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
        assert!(settings.run_migrations);
        assert_eq!(settings.bcrypt_cost().expect("default cost"), DEFAULT_BCRYPT_COST);
        assert!(settings.token_ttl().is_none());
        assert!(!settings.allow_ephemeral_secret);
        assert!(settings.cors_allowed_origins().is_empty());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(with_vars(&[
            ("CHIRP_BIND_ADDR", "127.0.0.1:9000"),
            ("CHIRP_DATABASE_URL", "postgres://localhost/chirp"),
            ("CHIRP_DB_MAX_CONNECTIONS", "4"),
            ("CHIRP_RUN_MIGRATIONS", "false"),
            ("CHIRP_TOKEN_TTL_SECONDS", "3600"),
            ("CHIRP_BCRYPT_COST", "12"),
            (
                "CHIRP_CORS_ALLOWED_ORIGINS",
                "http://localhost:3000, https://chirp.example ,",
            ),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address").to_string(),
            "127.0.0.1:9000"
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/chirp")
        );
        assert_eq!(settings.db_max_connections(), 4);
        assert!(!settings.run_migrations);
        assert_eq!(settings.token_ttl(), Some(Duration::from_secs(3600)));
        assert_eq!(settings.bcrypt_cost().expect("configured cost"), 12);
        assert_eq!(
            settings.cors_allowed_origins(),
            vec!["http://localhost:3000", "https://chirp.example"]
        );
    }

    #[rstest]
    #[case("3")]
    #[case("32")]
    fn out_of_range_bcrypt_cost_is_reported(#[case] cost: &str) {
        let _guard = lock_env(with_vars(&[("CHIRP_BCRYPT_COST", cost)]));

        let settings = load_from_empty_args();
        let expected: u32 = cost.parse().expect("numeric cost");
        assert!(matches!(
            settings.bcrypt_cost(),
            Err(SettingsError::InvalidBcryptCost { value }) if value == expected
        ));
    }

    #[rstest]
    #[case("4")]
    #[case("31")]
    fn bcrypt_cost_bounds_are_accepted(#[case] cost: &str) {
        let _guard = lock_env(with_vars(&[("CHIRP_BCRYPT_COST", cost)]));

        let settings = load_from_empty_args();
        let expected: u32 = cost.parse().expect("numeric cost");
        assert_eq!(settings.bcrypt_cost().expect("cost in range"), expected);
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let _guard = lock_env(with_vars(&[("CHIRP_BIND_ADDR", "localhost")]));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }

    #[rstest]
    fn configured_secret_is_used_verbatim() {
        let _guard = lock_env(with_vars(&[("CHIRP_JWT_SECRET", "s3cret")]));

        let settings = load_from_empty_args();
        let secret = settings.resolve_jwt_secret(false).expect("configured secret");
        assert_eq!(secret.as_slice(), b"s3cret");
    }

    #[rstest]
    #[case(true, &[])]
    #[case(false, &[("CHIRP_ALLOW_EPHEMERAL_SECRET", "true")])]
    fn missing_secret_falls_back_when_allowed(
        #[case] debug_build: bool,
        #[case] overrides: &[(&'static str, &str)],
    ) {
        let _guard = lock_env(with_vars(overrides));

        let settings = load_from_empty_args();
        let secret = settings.resolve_jwt_secret(debug_build).expect("ephemeral secret");
        assert_eq!(secret.len(), EPHEMERAL_SECRET_LEN);
    }

    #[rstest]
    fn missing_secret_fails_in_release_builds() {
        let _guard = lock_env(with_vars(&[("CHIRP_JWT_SECRET", "   ")]));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.resolve_jwt_secret(false),
            Err(SettingsError::MissingJwtSecret)
        ));
    }
}
