//! The failure handed to form hosts when a rule rejects a value.

/// A rejected field value, as reported to the form host.
///
/// Its `Display` output is exactly the failure message, which is empty when
/// the failing check had no message configured.
///
/// # Example
///
/// ```rust
/// use formrules::FieldError;
///
/// let error = FieldError::new("Field is required!");
/// assert_eq!(error.to_string(), "Field is required!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    /// The failure message.
    pub message: String,
}

impl FieldError {
    /// Creates a field error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
