use pwhash::bcrypt;

use crate::database::{Database, StoreError};

/// Salted bcrypt hash at the default cost.
pub fn hash_password(plain: &str) -> Result<String, pwhash::error::Error> {
    bcrypt::hash(plain)
}

pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash)
}

/// Stateless credential check. An unknown username and a wrong password are
/// indistinguishable to the caller; only genuine store failures propagate.
pub async fn validate_login(
    db: &Database,
    username: &str,
    password: &str,
) -> Result<bool, StoreError> {
    match db.user_select_username(username).await {
        Ok(user) => Ok(verify_password(password, &user.password_hash)),
        Err(StoreError::NotFound) => Ok(false),
        Err(err) => Err(err),
    }
}
