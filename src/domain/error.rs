use thiserror::Error;

/// Failures raised by account storage backends.
///
/// These never cross the service boundary: the account service logs them and
/// collapses every variant into the generic system-exception outcome, so the
/// taxonomy here only has to serve operators reading logs and repository
/// implementers picking a variant.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Constraint violated: {message}")]
    Constraint { message: String },

    #[error("Storage timeout: {message}")]
    Timeout { message: String },
}

impl StorageError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }
}
