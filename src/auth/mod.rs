mod password;
pub use password::{hash_password, verify_password};
mod jwt;
pub use jwt::{SESSION_TTL_HOURS, SessionClaims, decode_session, encode_session};
mod error;
pub use error::{CryptError, CryptResult};
