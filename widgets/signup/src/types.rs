//! Domain types for the signup widget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters counted as "special" by the password rules.
pub const SPECIAL_CHARS: &str = "!@#$%^&*";

/// Validation state for one form field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldValidation {
    /// The field currently passes validation.
    pub valid: bool,
    /// Verdict for the field's message slot; empty when there is
    /// nothing to say (e.g. the field is still blank).
    pub message: String,
}

/// Username field state: validity plus whether the duplicate check ran.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsernameValidation {
    /// The username is well-formed and free.
    pub valid: bool,
    /// The duplicate check ran since the last edit.
    pub checked: bool,
    /// Verdict for the field's message slot.
    pub message: String,
}

/// Per-field validation state for the whole form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationState {
    /// Username field (format + duplicate check).
    pub username: UsernameValidation,
    /// Password field (requirement set).
    pub password: FieldValidation,
    /// Password confirmation field (equality).
    pub password_confirm: FieldValidation,
    /// Email field (format).
    pub email: FieldValidation,
}

impl ValidationState {
    /// All four fields pass.
    #[must_use]
    pub const fn form_valid(&self) -> bool {
        self.username.valid
            && self.password.valid
            && self.password_confirm.valid
            && self.email.valid
    }
}

/// Which password requirements the current input meets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasswordRequirements {
    /// At least 8 characters.
    pub length: bool,
    /// Contains an uppercase letter.
    pub upper: bool,
    /// Contains a lowercase letter.
    pub lower: bool,
    /// Contains a digit.
    pub number: bool,
    /// Contains one of [`SPECIAL_CHARS`].
    pub special: bool,
}

impl PasswordRequirements {
    /// Evaluates `password` against every requirement.
    #[must_use]
    pub fn check(password: &str) -> Self {
        Self {
            length: password.chars().count() >= 8,
            upper: password.chars().any(|c| c.is_ascii_uppercase()),
            lower: password.chars().any(|c| c.is_ascii_lowercase()),
            number: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
        }
    }

    /// True when every requirement is met.
    #[must_use]
    pub const fn all_met(self) -> bool {
        self.length && self.upper && self.lower && self.number && self.special
    }
}

/// A stored user record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Trimmed username, unique in the registry.
    pub username: String,
    /// Stored verbatim, like the original form.
    pub password: String,
    /// Trimmed email address.
    pub email: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Errors raised by the signup flow.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupError {
    /// The username was empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username is not 4–20 letters or digits.
    #[error("username must be 4-20 letters or digits")]
    InvalidUsername,

    /// The duplicate check did not run since the last username edit.
    #[error("run the username duplicate check first")]
    UsernameNotChecked,

    /// At least one field is still invalid.
    #[error("fix the invalid fields before signing up")]
    IncompleteForm,
}
