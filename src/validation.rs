//! The shared validation contract.
//!
//! Every validator in this crate, built-in or caller supplied, implements
//! [`Validator`] and answers with a [`ValidationResult`]. A result is built
//! fresh for every call and never carries a message when it passes.

use std::sync::Arc;

use serde_json::Value;

use crate::error::FieldError;

/// Outcome of validating a single value.
///
/// # Example
///
/// ```rust
/// use formrules::ValidationResult;
///
/// let ok = ValidationResult::pass();
/// assert!(ok.valid);
/// assert!(ok.message.is_none());
///
/// let failed = ValidationResult::fail(Some("too short".to_string()));
/// assert!(!failed.valid);
/// assert_eq!(failed.message.as_deref(), Some("too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the value satisfied every check.
    pub valid: bool,
    /// Failure message; always `None` when `valid` is true.
    pub message: Option<String>,
}

impl ValidationResult {
    /// A passing result.
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing result carrying the resolved message, if one was configured.
    pub fn fail(message: Option<String>) -> Self {
        Self {
            valid: false,
            message,
        }
    }

    /// Returns true if the value passed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Converts the result into the error channel used by form hosts.
    ///
    /// A failure without a message yields a [`FieldError`] with an empty message.
    pub fn into_result(self) -> Result<(), FieldError> {
        if self.valid {
            Ok(())
        } else {
            Err(FieldError::new(self.message.unwrap_or_default()))
        }
    }
}

/// A single-method validation capability.
///
/// Implementations are configured once and must be pure: the same value
/// always yields the same result. The `Send + Sync` bounds let validators be
/// shared behind `Arc` by rules that outlive the builder that made them.
///
/// # Example
///
/// ```rust
/// use formrules::{ValidationResult, Validator};
/// use serde_json::{json, Value};
///
/// struct NotZero;
///
/// impl Validator for NotZero {
///     fn validate(&self, value: &Value) -> ValidationResult {
///         if value == &json!(0) {
///             ValidationResult::fail(Some("must not be zero".into()))
///         } else {
///             ValidationResult::pass()
///         }
///     }
/// }
///
/// assert!(NotZero.validate(&json!(3)).valid);
/// ```
pub trait Validator: Send + Sync {
    /// Validates a value against this validator's fixed configuration.
    fn validate(&self, value: &Value) -> ValidationResult;
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, value: &Value) -> ValidationResult {
        (**self).validate(value)
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, value: &Value) -> ValidationResult {
        (**self).validate(value)
    }
}
