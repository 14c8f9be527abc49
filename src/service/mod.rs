pub mod basic_auth;
pub mod password;

pub use basic_auth::{BasicAuthError, Credentials, decode_basic_auth, encode_basic_auth};
pub use password::hash_password;
