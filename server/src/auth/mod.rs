mod crypto;
mod db;
mod extractor;

pub use crypto::{hash_password, verify_password, CryptoError};
pub use db::{create_session, find_user_by_token, SessionError, TOKEN_TTL_DAYS};
pub use extractor::{parse_authorization, AuthUser};
