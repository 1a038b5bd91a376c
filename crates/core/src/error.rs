//! Error types shared across the ward core.

use crate::access::{Action, Role};

/// Errors returned by core operations.
///
/// Every variant is a recoverable outcome reported back to the shell; none
/// is fatal to the process, and the core never retries internally.
///
/// Non-positive billing amounts are deliberately not represented here:
/// [`Bill::add_charge`](crate::billing::Bill::add_charge) and
/// [`Bill::add_payment`](crate::billing::Bill::add_payment) ignore them
/// without reporting.
#[derive(Debug, thiserror::Error)]
pub enum WardError {
    #[error("invalid username or password")]
    AuthFailed,
    #[error("not logged in")]
    NotLoggedIn,
    #[error("{role} accounts are not permitted to {action}")]
    PermissionDenied { role: Role, action: Action },
    #[error("username already exists: {0}")]
    DuplicateUsername(String),
    #[error("no such account: {0}")]
    AccountNotFound(String),
    #[error("cannot delete the last Admin account")]
    LastAdminProtected,
    #[error("you cannot delete your own account")]
    SelfDeletionForbidden,
    #[error("no patient with id {0}")]
    PatientNotFound(u64),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type WardResult<T> = std::result::Result<T, WardError>;
