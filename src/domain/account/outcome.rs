//! Outcome taxonomy for account operations
//!
//! Every account operation resolves to a [`ServiceOutcome`]: a coarse
//! status, a closed [`OutcomeCode`] naming the reason, and the payload the
//! caller handed in or asked for. Expected business conditions (taken email,
//! wrong password, unknown account) are outcomes, not errors; only storage
//! failures escalate, and even those arrive collapsed to a single code.

use serde::{Deserialize, Serialize};

/// Whether the operation accomplished what the caller asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// Closed set of reasons an account operation can resolve with
///
/// Exhaustive by design: callers match on these instead of parsing message
/// strings, and adding a code is a compile-visible event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCode {
    /// The supplied email does not look like an email address
    EmailFormatIncorrect,
    /// Another account already uses the supplied email
    EmailAlreadyUsed,
    /// The supplied password fails the format rules
    InvalidPassword,
    /// Registration input passed every check
    RegisterInfoValid,
    /// The account row was created
    RegisterSuccess,
    /// No account exists for the supplied email
    AccountNotFound,
    /// The supplied password does not match the stored credential
    PasswordIncorrect,
    /// Credentials check out; the id on the payload is authoritative
    LoginSuccess,
    /// The handle fails the format rules
    HandleInvalid,
    /// Another account already owns the handle
    HandleUsed,
    /// The handle is well-formed and unclaimed
    HandleValid,
    /// No profile exists for the supplied id
    NoUserInfo,
    /// Profile retrieved
    GetInfoSuccess,
    /// The profile update touched no row
    UpdateUserFailed,
    /// Profile updated
    UpdateInfoSuccess,
    /// A storage failure was logged and collapsed; details are in the log
    SystemException,
}

impl OutcomeCode {
    /// Human-readable message for displaying the outcome to an end user
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmailFormatIncorrect => "email format is incorrect",
            Self::EmailAlreadyUsed => "email is already registered",
            Self::InvalidPassword => "password is invalid",
            Self::RegisterInfoValid => "registration info is valid",
            Self::RegisterSuccess => "registration succeeded",
            Self::AccountNotFound => "account does not exist",
            Self::PasswordIncorrect => "password is incorrect",
            Self::LoginSuccess => "login succeeded",
            Self::HandleInvalid => "handle is invalid",
            Self::HandleUsed => "handle is already taken",
            Self::HandleValid => "handle is available",
            Self::NoUserInfo => "no profile for that account",
            Self::GetInfoSuccess => "profile retrieved",
            Self::UpdateUserFailed => "profile update failed",
            Self::UpdateInfoSuccess => "profile updated",
            Self::SystemException => "internal system error",
        }
    }
}

impl std::fmt::Display for OutcomeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Uniform envelope returned by every account operation
///
/// The payload type varies per operation: the echoed [`Account`] for the
/// registration and login flows, the checked handle for availability checks,
/// an optional profile for retrieval.
///
/// [`Account`]: super::Account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOutcome<T> {
    status: OutcomeStatus,
    code: OutcomeCode,
    payload: T,
}

impl<T> ServiceOutcome<T> {
    /// Build a success outcome
    pub fn success(code: OutcomeCode, payload: T) -> Self {
        Self {
            status: OutcomeStatus::Success,
            code,
            payload,
        }
    }

    /// Build an error outcome
    pub fn error(code: OutcomeCode, payload: T) -> Self {
        Self {
            status: OutcomeStatus::Error,
            code,
            payload,
        }
    }

    pub fn status(&self) -> OutcomeStatus {
        self.status
    }

    pub fn code(&self) -> OutcomeCode {
        self.code
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Consume the outcome and keep only the payload
    pub fn into_payload(self) -> T {
        self.payload
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == OutcomeStatus::Error
    }
}
