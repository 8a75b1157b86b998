//! Signup form widget core.
//!
//! A field-by-field validation state machine with a persisted user
//! registry. Hosts re-validate a field on every input event and render
//! the per-field verdicts from the snapshot; `signup` commits the
//! account once every field passes and the username duplicate check has
//! run.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use headless_widgets_core::storage::MemoryStore;
//! use signup_widget::{SignupEnvironment, SignupError, SignupStore};
//!
//! # fn main() -> Result<(), SignupError> {
//! let mut store = SignupStore::new(SignupEnvironment::production(Arc::new(MemoryStore::new())));
//!
//! store.subscribe(|event, snapshot| {
//!     println!("{}: form valid = {}", event.name(), snapshot.validation.form_valid());
//! });
//! store.init();
//!
//! store.check_username("newuser")?;
//! store.validate_password("Passw0rd!");
//! store.validate_password_confirm("Passw0rd!", "Passw0rd!");
//! store.validate_email("new@example.com");
//! store.signup("newuser", "Passw0rd!", "new@example.com")?;
//! # Ok(())
//! # }
//! ```

pub mod store;
pub mod types;

// Re-export commonly used types
pub use store::{STORAGE_KEY, SignupEnvironment, SignupEvent, SignupSnapshot, SignupStore};
pub use types::{
    FieldValidation, PasswordRequirements, SignupError, UserRecord, UsernameValidation,
    ValidationState,
};
