//! String validation.
//!
//! This module provides [`StringValidator`] for validating string values with
//! disallowed symbols, length bounds and letter case requirements.

use serde_json::Value;

use crate::message::{resolve, Message};
use crate::validation::{ValidationResult, Validator};

use super::traits::{or_default, ValidatorFactory};

/// Failure messages for [`StringValidator`].
#[derive(Debug, Clone, Default)]
pub struct StringMessages {
    /// Value is not a string.
    pub invalid_format: Option<Message<()>>,
    /// Value contains a disallowed symbol. Receives the symbol list.
    pub has_disallowed_symbols: Option<Message<Vec<String>>>,
    /// Length outside `min_length..=max_length` when both are set.
    pub invalid_range: Option<Message<(usize, usize)>>,
    /// Shorter than `min_length`.
    pub invalid_min_length: Option<Message<usize>>,
    /// Longer than `max_length`.
    pub invalid_max_length: Option<Message<usize>>,
    /// Value has lowercase letters while `only_uppercase` is set.
    pub invalid_uppercase: Option<Message<()>>,
    /// Value has uppercase letters while `only_lowercase` is set.
    pub invalid_lowercase: Option<Message<()>>,
}

impl StringMessages {
    fn or_defaults(self, defaults: &StringMessages) -> StringMessages {
        StringMessages {
            invalid_format: or_default(self.invalid_format, &defaults.invalid_format),
            has_disallowed_symbols: or_default(
                self.has_disallowed_symbols,
                &defaults.has_disallowed_symbols,
            ),
            invalid_range: or_default(self.invalid_range, &defaults.invalid_range),
            invalid_min_length: or_default(self.invalid_min_length, &defaults.invalid_min_length),
            invalid_max_length: or_default(self.invalid_max_length, &defaults.invalid_max_length),
            invalid_uppercase: or_default(self.invalid_uppercase, &defaults.invalid_uppercase),
            invalid_lowercase: or_default(self.invalid_lowercase, &defaults.invalid_lowercase),
        }
    }
}

/// Configuration for [`StringValidator`].
///
/// Lengths count Unicode scalar values, not bytes.
#[derive(Debug, Clone, Default)]
pub struct StringConfig {
    /// Minimum length in UTF-16 code units.
    pub min_length: Option<usize>,
    /// Maximum length in UTF-16 code units.
    pub max_length: Option<usize>,
    /// Reject values that change when uppercased.
    pub only_uppercase: bool,
    /// Reject values that change when lowercased.
    pub only_lowercase: bool,
    /// Substrings the value must not contain.
    pub disallowed_symbols: Vec<String>,
    /// Messages for this validator; unset ones fall back to the factory defaults.
    pub messages: StringMessages,
}

impl StringConfig {
    /// Creates a configuration with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum length, in UTF-16 code units.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Sets the maximum length, in UTF-16 code units.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Requires the string to have no lowercase letters.
    pub fn only_uppercase(mut self, only: bool) -> Self {
        self.only_uppercase = only;
        self
    }

    /// Requires the string to have no uppercase letters.
    pub fn only_lowercase(mut self, only: bool) -> Self {
        self.only_lowercase = only;
        self
    }

    /// Rejects strings containing any of the given substrings.
    pub fn disallowed_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disallowed_symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides failure messages.
    pub fn messages(mut self, messages: StringMessages) -> Self {
        self.messages = messages;
        self
    }
}

/// Validates strings.
///
/// Check order: type, disallowed symbols, combined length range, minimum
/// length, maximum length, uppercase, lowercase.
///
/// # Example
///
/// ```rust
/// use formrules::{Message, StringConfig, StringMessages, StringValidator};
/// use serde_json::json;
///
/// let validator = StringValidator::new(
///     StringConfig::new().min_length(2).max_length(5).messages(StringMessages {
///         invalid_range: Some(Message::computed(|(min, max), _| {
///             format!("length must be between {} and {}", min, max)
///         })),
///         ..Default::default()
///     }),
/// );
///
/// assert!(validator.validate(&json!("test")).valid);
/// assert_eq!(
///     validator.validate(&json!("test-test")).message.as_deref(),
///     Some("length must be between 2 and 5")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringValidator {
    config: StringConfig,
}

impl StringValidator {
    /// Creates a validator from its configuration.
    pub fn new(config: StringConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this validator was built with.
    pub fn config(&self) -> &StringConfig {
        &self.config
    }

    /// Validates a value against this validator's constraints.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        let config = &self.config;
        let messages = &config.messages;

        let Some(s) = value.as_str() else {
            return ValidationResult::fail(resolve(messages.invalid_format.as_ref(), &(), value));
        };

        if config
            .disallowed_symbols
            .iter()
            .any(|symbol| s.contains(symbol.as_str()))
        {
            return ValidationResult::fail(resolve(
                messages.has_disallowed_symbols.as_ref(),
                &config.disallowed_symbols,
                value,
            ));
        }

        // Length in UTF-16 code units, as form hosts measure strings
        let len = s.encode_utf16().count();

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

        if config.only_uppercase && s != s.to_uppercase() {
            return ValidationResult::fail(resolve(messages.invalid_uppercase.as_ref(), &(), value));
        }

        if config.only_lowercase && s != s.to_lowercase() {
            return ValidationResult::fail(resolve(messages.invalid_lowercase.as_ref(), &(), value));
        }

        ValidationResult::pass()
    }
}

impl Validator for StringValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        StringValidator::validate(self, value)
    }
}

/// Two-stage constructor for [`StringValidator`].
#[derive(Debug, Clone, Default)]
pub struct StringValidatorFactory {
    defaults: StringMessages,
}

impl StringValidatorFactory {
    /// Creates a factory with the given default messages.
    pub fn new(defaults: StringMessages) -> Self {
        Self { defaults }
    }
}

impl ValidatorFactory for StringValidatorFactory {
    type Config = StringConfig;
    type Output = StringValidator;

    fn create(&self, mut config: StringConfig) -> StringValidator {
        config.messages = config.messages.or_defaults(&self.defaults);
        StringValidator::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labelled() -> StringMessages {
        StringMessages {
            invalid_format: Some("format".into()),
            has_disallowed_symbols: Some(Message::computed(|symbols: &Vec<String>, _: &Value| {
                format!("symbols {}", symbols.join(" "))
            })),
            invalid_range: Some("range".into()),
            invalid_min_length: Some("min".into()),
            invalid_max_length: Some("max".into()),
            invalid_uppercase: Some("upper".into()),
            invalid_lowercase: Some("lower".into()),
        }
    }

    fn message(config: StringConfig, value: Value) -> Option<String> {
        StringValidator::new(config.messages(labelled()))
            .validate(&value)
            .message
    }

    #[test]
    fn test_rejects_non_strings() {
        assert_eq!(message(StringConfig::new(), json!(12)), Some("format".into()));
        assert_eq!(message(StringConfig::new(), json!(null)), Some("format".into()));
        assert_eq!(message(StringConfig::new(), json!("")), None);
    }

    #[test]
    fn test_range_before_single_bounds() {
        let config = StringConfig::new().min_length(2).max_length(5);
        assert_eq!(message(config.clone(), json!("test")), None);
        assert_eq!(message(config.clone(), json!("a")), Some("range".into()));
        assert_eq!(message(config, json!("test-test")), Some("range".into()));
    }

    #[test]
    fn test_single_bounds() {
        assert_eq!(message(StringConfig::new().min_length(3), json!("ab")), Some("min".into()));
        assert_eq!(message(StringConfig::new().max_length(3), json!("abcd")), Some("max".into()));
        assert_eq!(message(StringConfig::new().max_length(3), json!("日本語")), None);
    }

    #[test]
    fn test_disallowed_symbols_checked_before_length() {
        let config = StringConfig::new()
            .disallowed_symbols(["$", "#"])
            .min_length(10);
        assert_eq!(message(config.clone(), json!("a$b")), Some("symbols $ #".into()));
        assert_eq!(message(config, json!("ab")), Some("min".into()));
    }

    #[test]
    fn test_case_requirements() {
        let upper = StringConfig::new().only_uppercase(true);
        assert_eq!(message(upper.clone(), json!("ABC-1")), None);
        assert_eq!(message(upper, json!("AbC")), Some("upper".into()));

        let lower = StringConfig::new().only_lowercase(true);
        assert_eq!(message(lower.clone(), json!("abc")), None);
        assert_eq!(message(lower, json!("aBc")), Some("lower".into()));
    }
}
