//! Account infrastructure module
//!
//! This module provides the concrete pieces behind the account domain:
//! credential digesting with SHA-256, an in-memory repository, and the
//! account service itself.

mod digest;
mod repository;
mod service;

pub use digest::{CredentialDigester, Sha256Digester};
pub use repository::InMemoryAccountRepository;
pub use service::AccountService;
