//! Ownership checks over (caller, resource). Each returns `Unauthorized` on failure.

use crate::domain::auth::Identity;
use crate::domain::message::MessageDetail;
use crate::error::{AppError, Result};

/// Unwraps the identity the guard attached, if any.
///
/// # Errors
/// Returns `AppError::Unauthorized` when the request carried no valid token.
pub fn require_identity(identity: Option<Identity>) -> Result<Identity> {
    identity.ok_or(AppError::Unauthorized)
}

/// The caller may only act on their own user resource.
///
/// # Errors
/// Returns `AppError::Unauthorized` if `username` is not the caller.
pub fn ensure_self(identity: &Identity, username: &str) -> Result<()> {
    if identity.username() == username { Ok(()) } else { Err(AppError::Unauthorized) }
}

/// # Errors
/// Returns `AppError::Unauthorized` unless the caller sent or received the message.
pub fn ensure_participant(identity: &Identity, message: &MessageDetail) -> Result<()> {
    let caller = identity.username();
    if message.from_user.username == caller || message.to_user.username == caller {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// # Errors
/// Returns `AppError::Unauthorized` unless the caller is the message's recipient.
pub fn ensure_recipient(identity: &Identity, message: &MessageDetail) -> Result<()> {
    if message.to_user.username == identity.username() { Ok(()) } else { Err(AppError::Unauthorized) }
}
