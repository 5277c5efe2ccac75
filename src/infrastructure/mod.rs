//! Infrastructure layer - Implementations behind the domain traits

pub mod account;
pub mod logging;

pub use account::{AccountService, CredentialDigester, InMemoryAccountRepository, Sha256Digester};
