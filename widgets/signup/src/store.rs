//! The signup form store.
//!
//! Holds the per-field validation state and the persisted user
//! registry. Hosts call a validation method whenever a field changes;
//! the store updates its state and notifies subscribers, which re-render
//! that field's message slot. `signup` commits the record once every
//! field passed and the duplicate check ran.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use headless_widgets_core::environment::{Clock, SystemClock};
use headless_widgets_core::observe::Observers;
use headless_widgets_core::storage::KeyValueStore;
use regex::Regex;

use crate::types::{
    FieldValidation, PasswordRequirements, SignupError, UserRecord, UsernameValidation,
    ValidationState,
};

/// Storage key the user registry persists under.
pub const STORAGE_KEY: &str = "users";

#[allow(clippy::expect_used)] // pattern is a compile-time constant
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z0-9]{4,20}$").expect("valid username pattern"));

#[allow(clippy::expect_used)] // pattern is a compile-time constant
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Injected dependencies for [`SignupStore`].
#[derive(Clone)]
pub struct SignupEnvironment {
    /// Source of account-creation timestamps.
    pub clock: Arc<dyn Clock>,
    /// Persistence collaborator for the user registry.
    pub storage: Arc<dyn KeyValueStore>,
}

impl SignupEnvironment {
    /// Creates a new `SignupEnvironment`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, storage: Arc<dyn KeyValueStore>) -> Self {
        Self { clock, storage }
    }

    /// Production environment: system clock.
    #[must_use]
    pub fn production(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::new(Arc::new(SystemClock), storage)
    }
}

/// What changed in the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignupEvent {
    /// First notification, emitted once the host finished subscribing.
    Init,

    /// The username verdict changed.
    UsernameValidationChanged {
        /// The (trimmed) username that was checked.
        username: String,
    },

    /// The password verdict changed.
    PasswordValidationChanged {
        /// Which requirements the current input meets, for the
        /// per-requirement checklist display.
        requirements: PasswordRequirements,
    },

    /// The password confirmation verdict changed.
    PasswordConfirmValidationChanged,

    /// The email verdict changed.
    EmailValidationChanged,

    /// A user record was stored.
    SignupSucceeded {
        /// The new account's username.
        username: String,
    },
}

impl SignupEvent {
    /// Stable event name for logs and ordering assertions.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::UsernameValidationChanged { .. } => "usernameValidationChanged",
            Self::PasswordValidationChanged { .. } => "passwordValidationChanged",
            Self::PasswordConfirmValidationChanged => "passwordConfirmValidationChanged",
            Self::EmailValidationChanged => "emailValidationChanged",
            Self::SignupSucceeded { .. } => "signupSuccess",
        }
    }
}

/// Owned copy of form state, delivered with every event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupSnapshot {
    /// Per-field validation verdicts.
    pub validation: ValidationState,
    /// Number of stored accounts.
    pub user_count: usize,
}

/// The signup form store.
pub struct SignupStore {
    users: BTreeMap<String, UserRecord>,
    validation: ValidationState,
    observers: Observers<SignupEvent, SignupSnapshot>,
    environment: SignupEnvironment,
    storage_key: String,
}

impl SignupStore {
    /// Creates a store, loading the user registry from [`STORAGE_KEY`].
    ///
    /// Construction never fails: an absent, unreadable, or malformed
    /// persisted registry loads as empty.
    #[must_use]
    pub fn new(environment: SignupEnvironment) -> Self {
        Self::with_storage_key(environment, STORAGE_KEY)
    }

    /// Creates a store persisting under a custom storage key.
    #[must_use]
    pub fn with_storage_key(environment: SignupEnvironment, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let users = load_users(environment.storage.as_ref(), &storage_key);

        Self {
            users,
            validation: ValidationState::default(),
            observers: Observers::new(),
            environment,
            storage_key,
        }
    }

    /// Emits [`SignupEvent::Init`] so freshly attached subscribers can
    /// render the blank form. Call after subscribing.
    pub fn init(&mut self) {
        self.emit(SignupEvent::Init);
    }

    /// Registers a callback invoked synchronously, in subscription
    /// order, on every event.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&SignupEvent, &SignupSnapshot) + 'static,
    {
        self.observers.subscribe(callback);
    }

    /// Defensive copy of the current validation state.
    #[must_use]
    pub fn validation(&self) -> ValidationState {
        self.validation.clone()
    }

    /// Whether `username` already has an account.
    #[must_use]
    pub fn has_user(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Runs the username duplicate check.
    ///
    /// Returns whether the name is free. The field is marked `checked`
    /// on any verdict except an empty input.
    ///
    /// # Errors
    ///
    /// [`SignupError::EmptyUsername`] when the trimmed input is empty;
    /// [`SignupError::InvalidUsername`] when it is not 4–20 letters or
    /// digits.
    #[tracing::instrument(skip(self, username))]
    pub fn check_username(&mut self, username: &str) -> Result<bool, SignupError> {
        let trimmed = username.trim();

        if trimmed.is_empty() {
            self.validation.username = UsernameValidation {
                valid: false,
                checked: false,
                message: "Enter a username.".to_owned(),
            };
            self.emit(SignupEvent::UsernameValidationChanged {
                username: trimmed.to_owned(),
            });
            return Err(SignupError::EmptyUsername);
        }

        if !USERNAME_RE.is_match(trimmed) {
            self.validation.username = UsernameValidation {
                valid: false,
                checked: true,
                message: "Usernames are 4-20 letters or digits.".to_owned(),
            };
            self.emit(SignupEvent::UsernameValidationChanged {
                username: trimmed.to_owned(),
            });
            return Err(SignupError::InvalidUsername);
        }

        let duplicate = self.users.contains_key(trimmed);
        self.validation.username = UsernameValidation {
            valid: !duplicate,
            checked: true,
            message: if duplicate {
                "That username is already taken.".to_owned()
            } else {
                "That username is available.".to_owned()
            },
        };
        self.emit(SignupEvent::UsernameValidationChanged {
            username: trimmed.to_owned(),
        });
        Ok(!duplicate)
    }

    /// Forgets the duplicate-check verdict. Hosts call this when the
    /// username input changes, forcing a fresh check before signup.
    pub fn reset_username_check(&mut self) {
        if !self.validation.username.checked {
            return;
        }
        self.validation.username = UsernameValidation::default();
        self.emit(SignupEvent::UsernameValidationChanged {
            username: String::new(),
        });
    }

    /// Re-validates the password field. Returns the verdict.
    ///
    /// An empty input is invalid but carries no message (nothing typed
    /// yet is not worth a complaint).
    pub fn validate_password(&mut self, password: &str) -> bool {
        let requirements = PasswordRequirements::check(password);
        let valid = !password.is_empty() && requirements.all_met();

        self.validation.password = FieldValidation {
            valid,
            message: if valid || password.is_empty() {
                String::new()
            } else {
                "Password does not meet the requirements.".to_owned()
            },
        };
        self.emit(SignupEvent::PasswordValidationChanged { requirements });
        valid
    }

    /// Re-validates the confirmation field. Returns the verdict.
    pub fn validate_password_confirm(&mut self, password: &str, confirm: &str) -> bool {
        let valid = !confirm.is_empty() && password == confirm;

        self.validation.password_confirm = FieldValidation {
            valid,
            message: if valid || confirm.is_empty() {
                String::new()
            } else {
                "Passwords do not match.".to_owned()
            },
        };
        self.emit(SignupEvent::PasswordConfirmValidationChanged);
        valid
    }

    /// Re-validates the email field. Returns the verdict.
    pub fn validate_email(&mut self, email: &str) -> bool {
        let valid = EMAIL_RE.is_match(email.trim());

        self.validation.email = FieldValidation {
            valid,
            message: if valid || email.is_empty() {
                String::new()
            } else {
                "Not a valid email address.".to_owned()
            },
        };
        self.emit(SignupEvent::EmailValidationChanged);
        valid
    }

    /// All four fields pass.
    #[must_use]
    pub const fn is_form_valid(&self) -> bool {
        self.validation.form_valid()
    }

    /// Commits the account.
    ///
    /// # Errors
    ///
    /// [`SignupError::UsernameNotChecked`] unless the duplicate check
    /// ran since the last username edit;
    /// [`SignupError::IncompleteForm`] unless every field passes.
    #[tracing::instrument(skip_all)]
    pub fn signup(
        &mut self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<(), SignupError> {
        if !self.validation.username.checked {
            return Err(SignupError::UsernameNotChecked);
        }
        if !self.is_form_valid() {
            return Err(SignupError::IncompleteForm);
        }

        let username = username.trim().to_owned();
        let record = UserRecord {
            username: username.clone(),
            password: password.to_owned(),
            email: email.trim().to_owned(),
            created_at: self.environment.clock.now(),
        };
        self.users.insert(username.clone(), record);

        self.persist();
        tracing::info!(%username, "account created");
        self.emit(SignupEvent::SignupSucceeded { username });
        Ok(())
    }

    /// Serializes the registry to the storage collaborator.
    ///
    /// Fire-and-forget: failures are logged and dropped.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.users) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize users; skipping persist");
                return;
            }
        };

        if let Err(error) = self.environment.storage.set(&self.storage_key, &json) {
            tracing::warn!(key = %self.storage_key, %error, "failed to persist users");
        }
    }

    fn snapshot(&self) -> SignupSnapshot {
        SignupSnapshot {
            validation: self.validation.clone(),
            user_count: self.users.len(),
        }
    }

    fn emit(&mut self, event: SignupEvent) {
        let snapshot = self.snapshot();
        tracing::debug!(event = event.name(), "notifying observers");
        self.observers.notify(&event, &snapshot);
    }
}

fn load_users(storage: &dyn KeyValueStore, key: &str) -> BTreeMap<String, UserRecord> {
    let content = match storage.get(key) {
        Ok(Some(content)) => content,
        Ok(None) => return BTreeMap::new(),
        Err(error) => {
            tracing::warn!(key, %error, "failed to read persisted users; starting empty");
            return BTreeMap::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(users) => users,
        Err(error) => {
            tracing::warn!(key, %error, "persisted users are malformed; starting empty");
            BTreeMap::new()
        }
    }
}
