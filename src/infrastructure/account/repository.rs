//! In-memory account repository implementation

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{Account, AccountId, AccountRepository};
use crate::domain::error::StorageError;

/// In-memory implementation of AccountRepository
///
/// Behaves like a SQL backend with unique indexes on email and handle: a
/// duplicate insert fails with a constraint error no matter what the caller
/// checked beforehand. Ids are assigned here, auto-increment style, and any
/// caller-supplied id on insert is ignored. Locks are always taken accounts
/// first, then indexes.
#[derive(Debug)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<i64, Account>>>,
    /// Index for email -> account id lookup
    email_index: Arc<RwLock<HashMap<String, i64>>>,
    /// Index for handle -> account id lookup
    handle_index: Arc<RwLock<HashMap<String, i64>>>,
    next_id: AtomicI64,
}

impl InMemoryAccountRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            email_index: Arc::new(RwLock::new(HashMap::new())),
            handle_index: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StorageError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id.value()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StorageError> {
        let accounts = self.accounts.read().await;
        let email_index = self.email_index.read().await;

        if let Some(id) = email_index.get(email) {
            return Ok(accounts.get(id).cloned());
        }

        Ok(None)
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Account>, StorageError> {
        let accounts = self.accounts.read().await;
        let handle_index = self.handle_index.read().await;

        if let Some(id) = handle_index.get(handle) {
            return Ok(accounts.get(id).cloned());
        }

        Ok(None)
    }

    async fn insert(&self, account: &Account) -> Result<u64, StorageError> {
        let mut accounts = self.accounts.write().await;
        let mut email_index = self.email_index.write().await;
        let mut handle_index = self.handle_index.write().await;

        let Some(email) = account.email().map(str::to_string) else {
            return Err(StorageError::constraint("account email must not be null"));
        };

        if email_index.contains_key(&email) {
            return Err(StorageError::constraint(format!(
                "email '{}' already exists",
                email
            )));
        }

        if let Some(handle) = account.handle() {
            if handle_index.contains_key(handle) {
                return Err(StorageError::constraint(format!(
                    "handle '{}' already exists",
                    handle
                )));
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let mut stored = account.clone();
        stored.set_id(AccountId::new(id));
        stored.set_created_at(Utc::now());

        email_index.insert(email, id);
        if let Some(handle) = stored.handle() {
            handle_index.insert(handle.to_string(), id);
        }
        accounts.insert(id, stored);

        Ok(1)
    }

    async fn update(&self, account: &Account) -> Result<u64, StorageError> {
        let mut accounts = self.accounts.write().await;

        let Some(id) = account.id() else {
            return Ok(0);
        };

        let Some(stored) = accounts.get_mut(&id.value()) else {
            return Ok(0);
        };

        // Fixed column set, matching an UPDATE statement that names profile
        // fields only: credentials, email and handle are not writable here.
        if let Some(display_name) = account.display_name() {
            stored.set_display_name(display_name);
        }
        if let Some(signature) = account.signature() {
            stored.set_signature(signature);
        }
        if let Some(avatar_url) = account.avatar_url() {
            stored.set_avatar_url(avatar_url);
        }
        if let Some(phone) = account.phone() {
            stored.set_phone(phone);
        }

        Ok(1)
    }
}
