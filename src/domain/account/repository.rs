//! Account repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Account, AccountId};
use crate::domain::error::StorageError;

/// Repository trait for account storage
///
/// `insert` and `update` report affected-row counts instead of entities:
/// storage owns id assignment and the service decides what a count other
/// than one means. Uniqueness of email and handle is enforced here, so a
/// lost check-then-insert race surfaces as a constraint error rather than a
/// duplicate row.
#[async_trait]
pub trait AccountRepository: Send + Sync + Debug {
    /// Get an account by its storage-assigned id
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError>;

    /// Get an account by its unique login email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StorageError>;

    /// Get an account by its unique public handle
    async fn find_by_handle(&self, handle: &str) -> Result<Option<Account>, StorageError>;

    /// Insert one account row, returning the number of rows created
    async fn insert(&self, account: &Account) -> Result<u64, StorageError>;

    /// Update one account's profile fields, returning the number of rows touched
    async fn update(&self, account: &Account) -> Result<u64, StorageError>;
}
