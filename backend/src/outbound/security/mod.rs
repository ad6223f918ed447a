//! Credential adapters: bcrypt password hashing and HS256 session tokens.

mod bcrypt_hasher;
mod jwt_tokens;

pub use bcrypt_hasher::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
pub use jwt_tokens::JwtTokenService;
