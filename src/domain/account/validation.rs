//! Account input validation
//!
//! Pure format predicates over caller-supplied strings. Stateless by
//! construction: uniqueness and existence questions belong to the service,
//! these only answer whether a string could ever be accepted.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for display names, counted in characters
pub const MAX_DISPLAY_NAME_LENGTH: usize = 20;

/// Regex pattern for login emails (word-ish local part, dotted domain labels
/// of two or more characters, final label of 2-14 letters)
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_][a-zA-Z0-9_.+-]*@([a-zA-Z0-9][a-zA-Z0-9-]+\.)+[a-zA-Z]{2,14}$")
        .unwrap()
});

/// Regex pattern shared by handles and passwords (6-20 word characters)
static HANDLE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]{6,20}$").unwrap());

/// Regex pattern for mobile numbers (optional leading zero, recognized
/// carrier prefix, nine further digits)
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0?(13|14|15|17|18|19)[0-9]{9}$").unwrap());

/// Regex pattern for national id numbers (18-character form ending in a digit
/// or `x`, or the 15-digit legacy form)
static ID_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{17}[0-9x]$|^[0-9]{15}$").unwrap());

/// Check whether a string is usable as a login email
pub fn is_valid_email(email: &str) -> bool {
    if email.trim().is_empty() {
        return false;
    }

    EMAIL_PATTERN.is_match(email)
}

/// Check whether a string is usable as a public handle
pub fn is_valid_handle(handle: &str) -> bool {
    if handle.trim().is_empty() {
        return false;
    }

    HANDLE_PATTERN.is_match(handle)
}

/// Check whether a string is usable as a password
///
/// Same shape as handles: 6-20 word characters.
pub fn is_valid_password(password: &str) -> bool {
    if password.trim().is_empty() {
        return false;
    }

    HANDLE_PATTERN.is_match(password)
}

/// Check whether a string is usable as a contact phone number
pub fn is_valid_phone_number(phone: &str) -> bool {
    if phone.trim().is_empty() {
        return false;
    }

    PHONE_PATTERN.is_match(phone)
}

/// Check whether a string is usable as a national id number
pub fn is_valid_id_number(id_number: &str) -> bool {
    if id_number.trim().is_empty() {
        return false;
    }

    ID_NUMBER_PATTERN.is_match(id_number)
}

/// Check whether a string is usable as a display name
///
/// Display names are free-form: anything non-blank up to 20 characters.
pub fn is_valid_display_name(display_name: &str) -> bool {
    !display_name.trim().is_empty() && display_name.chars().count() <= MAX_DISPLAY_NAME_LENGTH
}
