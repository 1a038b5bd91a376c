//! Account directory: credential storage, username uniqueness, and admin
//! protection.

use serde::Serialize;
use uuid::Uuid;
use ward_types::NonEmptyText;

use crate::access::Role;
use crate::config::CoreConfig;
use crate::error::{WardError, WardResult};

/// Opaque handle for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(Uuid);

impl AccountId {
    fn new() -> Self {
        AccountId(Uuid::new_v4())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user account.
///
/// The credential is held verbatim; hashing and secure storage are out of
/// scope for this tool.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    username: String,
    credential: String,
    role: Role,
}

impl Account {
    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    fn credential_matches(&self, credential: &str) -> bool {
        self.credential == credential
    }
}

/// Username and role listing entry, in storage order.
#[derive(Debug, Clone, Serialize)]
pub struct AccountBrief {
    pub username: String,
    pub role: Role,
}

/// Owns every account.
///
/// Accounts are kept in creation order and referenced by username; no other
/// component holds long-lived handles into the directory.
#[derive(Debug)]
pub struct AccountDirectory {
    accounts: Vec<Account>,
}

impl AccountDirectory {
    /// Creates the directory, seeding exactly one Admin account from the
    /// startup configuration. From this point onward the directory is never
    /// without an Admin.
    pub fn new(cfg: &CoreConfig) -> Self {
        let admin = Account {
            id: AccountId::new(),
            username: cfg.admin_username().as_str().to_owned(),
            credential: cfg.admin_credential().as_str().to_owned(),
            role: Role::Admin,
        };
        Self {
            accounts: vec![admin],
        }
    }

    /// Whether a username is taken. Matching is case-sensitive and exact.
    pub fn exists(&self, username: &str) -> bool {
        self.accounts.iter().any(|a| a.username == username)
    }

    /// Stores a new account.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUsername` if the username is already taken.
    pub fn create(
        &mut self,
        username: NonEmptyText,
        credential: NonEmptyText,
        role: Role,
    ) -> WardResult<AccountId> {
        if self.exists(username.as_str()) {
            return Err(WardError::DuplicateUsername(username.into_inner()));
        }
        let account = Account {
            id: AccountId::new(),
            username: username.into_inner(),
            credential: credential.into_inner(),
            role,
        };
        let id = account.id;
        tracing::info!(username = %account.username, %role, "account created");
        self.accounts.push(account);
        Ok(id)
    }

    /// Removes an account by username.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no such account exists, or
    /// `LastAdminProtected` if the target is the sole remaining Admin; the
    /// directory is left unchanged in both cases.
    pub fn delete(&mut self, username: &str) -> WardResult<()> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.username == username)
            .ok_or_else(|| WardError::AccountNotFound(username.to_owned()))?;
        if self.accounts[index].role == Role::Admin && self.admin_count() <= 1 {
            return Err(WardError::LastAdminProtected);
        }
        let removed = self.accounts.remove(index);
        tracing::info!(username = %removed.username, "account deleted");
        Ok(())
    }

    /// Exact-match authentication of both username and credential.
    ///
    /// Unknown usernames and wrong credentials fail identically, so the
    /// result does not reveal which part was wrong.
    pub fn authenticate(&self, username: &str, credential: &str) -> WardResult<&Account> {
        self.accounts
            .iter()
            .find(|a| a.username == username && a.credential_matches(credential))
            .ok_or(WardError::AuthFailed)
    }

    /// Replaces an account's credential.
    pub fn set_credential(&mut self, username: &str, credential: NonEmptyText) -> WardResult<()> {
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.username == username)
            .ok_or_else(|| WardError::AccountNotFound(username.to_owned()))?;
        account.credential = credential.into_inner();
        Ok(())
    }

    /// Username and role of every account, in storage order.
    pub fn list(&self) -> Vec<AccountBrief> {
        self.accounts
            .iter()
            .map(|a| AccountBrief {
                username: a.username.clone(),
                role: a.role,
            })
            .collect()
    }

    fn admin_count(&self) -> usize {
        self.accounts.iter().filter(|a| a.role == Role::Admin).count()
    }
}
