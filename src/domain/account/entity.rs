//! Account entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account identifier assigned by the storage layer
///
/// Ids are opaque to callers: the only way to obtain one is from an account
/// that storage has already persisted, so holding an id is proof the account
/// existed at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner numeric value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AccountId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account entity carried through every account operation
///
/// Doubles as the input object and the echoed payload, so every field is
/// optional: a registration check arrives with only email and password set,
/// a profile update with only the id and the fields to change. The plaintext
/// password lives in `password` until the service digests it; the field is
/// never serialized in either form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Storage-assigned identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<AccountId>,
    /// Login email, unique per account
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    /// Credential - plaintext on input, digest in storage, never serialized
    #[serde(skip_serializing, default)]
    password: Option<String>,
    /// Public handle other users search for, unique per account
    #[serde(skip_serializing_if = "Option::is_none")]
    handle: Option<String>,
    /// Name shown in conversations
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    /// Short status line shown on the profile
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<String>,
    /// Location of the avatar image
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
    /// Contact phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    /// Set by storage when the row is created
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Create a registration or login input carrying credentials only
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    // Builders

    pub fn with_id(mut self, id: AccountId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    // Getters

    pub fn id(&self) -> Option<AccountId> {
        self.id
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    // Mutators

    pub fn set_id(&mut self, id: AccountId) {
        self.id = Some(id);
    }

    /// Drop any client-supplied id so storage stays the only id authority
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Some(password.into());
    }

    /// Drop the credential before the object travels back to the caller
    pub fn clear_password(&mut self) {
        self.password = None;
    }

    /// Drop the email so an update cannot reassign the login identity
    pub fn clear_email(&mut self) {
        self.email = None;
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = Some(display_name.into());
    }

    pub fn set_signature(&mut self, signature: impl Into<String>) {
        self.signature = Some(signature.into());
    }

    pub fn set_avatar_url(&mut self, avatar_url: impl Into<String>) {
        self.avatar_url = Some(avatar_url.into());
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = Some(phone.into());
    }

    pub fn set_created_at(&mut self, created_at: DateTime<Utc>) {
        self.created_at = Some(created_at);
    }
}
