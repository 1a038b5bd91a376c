//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into
//! construction, so the core never reads process-wide environment variables
//! while handling operations.

use ward_types::NonEmptyText;

/// Startup configuration for the core.
///
/// Holds the credentials of the seeded administrator account. Seeding is an
/// explicit construction step of
/// [`AccountDirectory`](crate::directory::AccountDirectory); there is no
/// implicit global bootstrap.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    admin_username: NonEmptyText,
    admin_credential: NonEmptyText,
}

impl CoreConfig {
    pub fn new(admin_username: NonEmptyText, admin_credential: NonEmptyText) -> Self {
        Self {
            admin_username,
            admin_credential,
        }
    }

    pub fn admin_username(&self) -> &NonEmptyText {
        &self.admin_username
    }

    pub fn admin_credential(&self) -> &NonEmptyText {
        &self.admin_credential
    }
}
