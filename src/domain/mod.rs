//! Domain layer - Core business logic and entities

pub mod account;
pub mod error;

pub use account::{
    is_valid_display_name, is_valid_email, is_valid_handle, is_valid_id_number, is_valid_password,
    is_valid_phone_number, Account, AccountId, AccountRepository, OutcomeCode, OutcomeStatus,
    ServiceOutcome,
};
pub use error::StorageError;
