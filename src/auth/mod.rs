pub mod password;

use serde::Deserialize;
use validator::Validate;

pub use password::{hash_password, hash_password_with_cost, verify_password, DEFAULT_HASH_COST};

use crate::error::AppError;
use crate::models::User;
use crate::store::DirectoryStore;

/// Represents the payload for a login request. `login` accepts a username or
/// an email address.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 254))]
    pub login: String,

    #[validate(length(min = 6))]
    pub password: String,
}

/// Verifies a login/password pair against the directory.
///
/// Unknown login and wrong password produce the same `Unauthorized` message
/// so the response does not reveal whether the account exists. Deactivated
/// accounts are rejected after the lookup, before the expensive hash check.
/// Token issuance is the request layer's concern; on success the caller gets
/// the `User` back and derives a `Principal` from it.
pub async fn verify_credentials(
    directory: &dyn DirectoryStore,
    request: &LoginRequest,
) -> Result<User, AppError> {
    request.validate()?;

    let user = directory
        .find_user_by_login(&request.login)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;

    if !user.active {
        return Err(AppError::Unauthorized("Account is deactivated".into()));
    }

    if !verify_password(&request.password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    Ok(user)
}
