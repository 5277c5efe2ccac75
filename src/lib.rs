//! Banter Accounts
//!
//! The account core of the Banter messaging platform:
//! - Registration pre-checks and account creation
//! - Credential verification for login
//! - Public handle availability checks
//! - Profile retrieval and update
//!
//! Every operation resolves to a [`ServiceOutcome`] carrying a closed
//! [`OutcomeCode`], so expected business conditions (taken email, wrong
//! password, unknown account) are data rather than errors. Storage lives
//! behind the [`AccountRepository`] trait; an in-memory implementation is
//! bundled for tests and embedding.

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

pub use crate::domain::{
    account::{
        is_valid_display_name, is_valid_email, is_valid_handle, is_valid_id_number,
        is_valid_password, is_valid_phone_number, Account, AccountId, AccountRepository,
        OutcomeCode, OutcomeStatus, ServiceOutcome,
    },
    error::StorageError,
};
pub use crate::infrastructure::{
    account::{AccountService, CredentialDigester, InMemoryAccountRepository, Sha256Digester},
    logging::init_logging,
};
