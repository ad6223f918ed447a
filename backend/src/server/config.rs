//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use chirp::outbound::persistence::DbPool;
use chirp::outbound::security::DEFAULT_BCRYPT_COST;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt_secret: Zeroizing<Vec<u8>>,
    pub(crate) token_ttl: Option<Duration>,
    pub(crate) bcrypt_cost: u32,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Construct a server configuration with the in-memory store.
    #[must_use]
    pub const fn new(bind_addr: SocketAddr, jwt_secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            jwt_secret,
            token_ttl: None,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            db_pool: None,
            cors_allowed_origins: Vec::new(),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, every repository port is served by PostgreSQL instead
    /// of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Expire issued tokens after `ttl`.
    #[must_use]
    pub fn with_token_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Override the bcrypt work factor.
    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Restrict CORS to `origins`. Empty admits any origin.
    #[must_use]
    pub fn with_cors_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_allowed_origins = origins;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
