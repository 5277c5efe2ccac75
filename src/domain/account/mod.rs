//! Account domain
//!
//! This module provides domain types for platform accounts, including the
//! account entity, input format validation, the outcome taxonomy returned
//! by account operations, and the storage repository trait.

mod entity;
mod outcome;
mod repository;
mod validation;

pub use entity::{Account, AccountId};
pub use outcome::{OutcomeCode, OutcomeStatus, ServiceOutcome};
pub use repository::AccountRepository;
pub use validation::{
    is_valid_display_name, is_valid_email, is_valid_handle, is_valid_id_number, is_valid_password,
    is_valid_phone_number, MAX_DISPLAY_NAME_LENGTH,
};

#[cfg(test)]
pub use repository::mock::MockAccountRepository;
