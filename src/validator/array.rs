//! Array validation.
//!
//! This module provides [`ArrayValidator`] for validating arrays with length
//! bounds and an optional validator applied to every item.

use std::sync::Arc;

use serde_json::Value;

use crate::message::{resolve, Message};
use crate::validation::{ValidationResult, Validator};

use super::traits::{or_default, ValidatorFactory};

/// Failure messages for [`ArrayValidator`].
///
/// Item failures are reported with the item validator's own message, so
/// there is no array-level message for them.
#[derive(Debug, Clone, Default)]
pub struct ArrayMessages {
    /// Value is not an array.
    pub invalid_format: Option<Message<()>>,
    /// Length outside `min_length..=max_length` when both are set.
    pub invalid_range: Option<Message<(usize, usize)>>,
    /// Fewer items than `min_length`.
    pub invalid_min_length: Option<Message<usize>>,
    /// More items than `max_length`.
    pub invalid_max_length: Option<Message<usize>>,
}

impl ArrayMessages {
    fn or_defaults(self, defaults: &ArrayMessages) -> ArrayMessages {
        ArrayMessages {
            invalid_format: or_default(self.invalid_format, &defaults.invalid_format),
            invalid_range: or_default(self.invalid_range, &defaults.invalid_range),
            invalid_min_length: or_default(self.invalid_min_length, &defaults.invalid_min_length),
            invalid_max_length: or_default(self.invalid_max_length, &defaults.invalid_max_length),
        }
    }
}

/// Configuration for [`ArrayValidator`].
#[derive(Clone, Default)]
pub struct ArrayConfig {
    /// Minimum number of items.
    pub min_length: Option<usize>,
    /// Maximum number of items.
    pub max_length: Option<usize>,
    /// Validator applied to every item; the first failing item's message is reported.
    pub item_validator: Option<Arc<dyn Validator>>,
    /// Messages for this validator; unset ones fall back to the factory defaults.
    pub messages: ArrayMessages,
}

impl ArrayConfig {
    /// Creates a configuration with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum number of items.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Sets the maximum number of items.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Validates every item, in order, with the given validator.
    pub fn item_validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.item_validator = Some(Arc::new(validator));
        self
    }

    /// Overrides failure messages.
    pub fn messages(mut self, messages: ArrayMessages) -> Self {
        self.messages = messages;
        self
    }
}

/// Validates arrays.
///
/// Check order: type, combined length range, minimum length, maximum length,
/// then items. Item validation stops at the first failing item and surfaces
/// that item's message.
///
/// # Example
///
/// ```rust
/// use formrules::{ArrayConfig, ArrayValidator, Message, NumberConfig, NumberMessages, NumberValidator};
/// use serde_json::json;
///
/// let item = NumberValidator::new(NumberConfig::new().min(10.0).messages(NumberMessages {
///     invalid_min: Some(Message::computed(|min, v| format!("{} is below {}", v, min))),
///     ..Default::default()
/// }));
/// let validator = ArrayValidator::new(ArrayConfig::new().item_validator(item));
///
/// let result = validator.validate(&json!([100, 55, -20, 3]));
/// assert_eq!(result.message.as_deref(), Some("-20 is below 10"));
/// ```
#[derive(Clone, Default)]
pub struct ArrayValidator {
    config: ArrayConfig,
}

impl ArrayValidator {
    /// Creates a validator from its configuration.
    pub fn new(config: ArrayConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this validator was built with.
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    /// Validates a value against this validator's constraints.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        let config = &self.config;
        let messages = &config.messages;

        let Some(items) = value.as_array() else {
            return ValidationResult::fail(resolve(messages.invalid_format.as_ref(), &(), value));
        };
        let len = items.len();

        if let (Some(min), Some(max)) = (config.min_length, config.max_length) {
            if len < min || len > max {
                return ValidationResult::fail(resolve(
                    messages.invalid_range.as_ref(),
                    &(min, max),
                    value,
                ));
            }
        }

        if let Some(min) = config.min_length {
            if len < min {
                return ValidationResult::fail(resolve(
                    messages.invalid_min_length.as_ref(),
                    &min,
                    value,
                ));
            }
        }

        if let Some(max) = config.max_length {
            if len > max {
                return ValidationResult::fail(resolve(
                    messages.invalid_max_length.as_ref(),
                    &max,
                    value,
                ));
            }
        }

        if let Some(item_validator) = &config.item_validator {
            if let Some(failed) = items
                .iter()
                .map(|item| item_validator.validate(item))
                .find(|result| !result.valid)
            {
                return ValidationResult::fail(failed.message);
            }
        }

        ValidationResult::pass()
    }
}

impl Validator for ArrayValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        ArrayValidator::validate(self, value)
    }
}

/// Two-stage constructor for [`ArrayValidator`].
#[derive(Debug, Clone, Default)]
pub struct ArrayValidatorFactory {
    defaults: ArrayMessages,
}

impl ArrayValidatorFactory {
    /// Creates a factory with the given default messages.
    pub fn new(defaults: ArrayMessages) -> Self {
        Self { defaults }
    }
}

impl ValidatorFactory for ArrayValidatorFactory {
    type Config = ArrayConfig;
    type Output = ArrayValidator;

    fn create(&self, mut config: ArrayConfig) -> ArrayValidator {
        config.messages = config.messages.or_defaults(&self.defaults);
        ArrayValidator::new(config)
    }
}
