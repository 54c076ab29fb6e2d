//! Request handlers module

pub mod auth;
pub mod complaint;
pub mod config;
pub mod department;
pub mod notification;
pub mod registration;

use crate::entity::{LoggedInUser, Role};
use crate::error::{AppError, AppResult};
use crate::middleware::SessionState;

/// Signed-in user holding one of `roles`
pub(crate) fn require_role<'a>(session: &'a SessionState, roles: &[Role]) -> AppResult<&'a LoggedInUser> {
    let user = session.require_user()?;
    if !roles.contains(&user.role) {
        return Err(AppError::Forbidden);
    }
    Ok(user)
}
