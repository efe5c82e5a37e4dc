//! Boolean validation.

use serde_json::Value;

use crate::message::{resolve, Message};
use crate::validation::{ValidationResult, Validator};

use super::traits::{or_default, ValidatorFactory};

/// Failure messages for [`BooleanValidator`].
#[derive(Debug, Clone, Default)]
pub struct BooleanMessages {
    /// Value is not a boolean.
    pub invalid_format: Option<Message<()>>,
}

/// Configuration for [`BooleanValidator`].
#[derive(Debug, Clone, Default)]
pub struct BooleanConfig {
    /// Also accept the exact strings `"true"` and `"false"`.
    pub allow_string: bool,
    /// Messages for this validator; unset ones fall back to the factory defaults.
    pub messages: BooleanMessages,
}

impl BooleanConfig {
    /// Creates a configuration accepting only real booleans.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `"true"` and `"false"` strings as well.
    pub fn allow_string(mut self, allow: bool) -> Self {
        self.allow_string = allow;
        self
    }

    /// Overrides failure messages.
    pub fn messages(mut self, messages: BooleanMessages) -> Self {
        self.messages = messages;
        self
    }
}

/// Validates booleans.
///
/// # Example
///
/// ```rust
/// use formrules::{BooleanConfig, BooleanValidator};
/// use serde_json::json;
///
/// let strict = BooleanValidator::new(BooleanConfig::new());
/// assert!(strict.validate(&json!(false)).valid);
/// assert!(!strict.validate(&json!("true")).valid);
///
/// let lenient = BooleanValidator::new(BooleanConfig::new().allow_string(true));
/// assert!(lenient.validate(&json!("true")).valid);
/// assert!(!lenient.validate(&json!("TRUE")).valid);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BooleanValidator {
    config: BooleanConfig,
}

impl BooleanValidator {
    /// Creates a validator from its configuration.
    pub fn new(config: BooleanConfig) -> Self {
        Self { config }
    }

    /// Validates a value against this validator's constraints.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        let accepted = match value {
            Value::Bool(_) => true,
            Value::String(s) if self.config.allow_string => s == "true" || s == "false",
            _ => false,
        };

        if accepted {
            ValidationResult::pass()
        } else {
            ValidationResult::fail(resolve(
                self.config.messages.invalid_format.as_ref(),
                &(),
                value,
            ))
        }
    }
}

impl Validator for BooleanValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        BooleanValidator::validate(self, value)
    }
}

/// Two-stage constructor for [`BooleanValidator`].
#[derive(Debug, Clone, Default)]
pub struct BooleanValidatorFactory {
    defaults: BooleanMessages,
}

impl BooleanValidatorFactory {
    /// Creates a factory with the given default messages.
    pub fn new(defaults: BooleanMessages) -> Self {
        Self { defaults }
    }
}

impl ValidatorFactory for BooleanValidatorFactory {
    type Config = BooleanConfig;
    type Output = BooleanValidator;

    fn create(&self, mut config: BooleanConfig) -> BooleanValidator {
        config.messages.invalid_format =
            or_default(config.messages.invalid_format, &self.defaults.invalid_format);
        BooleanValidator::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strict_booleans() {
        let validator = BooleanValidatorFactory::new(BooleanMessages {
            invalid_format: Some("bad".into()),
        })
        .create_default();

        assert!(validator.validate(&json!(true)).valid);
        assert!(validator.validate(&json!(false)).valid);
        for value in [json!(0), json!(12), json!("abc"), json!("false"), json!(null), json!([])] {
            let result = validator.validate(&value);
            assert!(!result.valid, "{value} should be rejected");
            assert_eq!(result.message.as_deref(), Some("bad"));
        }
    }

    #[test]
    fn test_string_booleans() {
        let validator = BooleanValidator::new(BooleanConfig::new().allow_string(true));

        assert!(validator.validate(&json!("true")).valid);
        assert!(validator.validate(&json!("false")).valid);
        assert!(validator.validate(&json!(true)).valid);
        assert!(!validator.validate(&json!("true true")).valid);
        assert!(!validator.validate(&json!("False")).valid);
        assert!(!validator.validate(&json!(1)).valid);
    }
}
