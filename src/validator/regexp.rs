//! Regular expression validation.

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::error::PatternError;
use crate::message::{resolve, Message};
use crate::validation::{ValidationResult, Validator};
use crate::value::display_text;

use super::traits::{or_default, ValidatorFactory};

/// Failure messages for [`RegexpValidator`].
#[derive(Debug, Clone, Default)]
pub struct RegexpMessages {
    /// Value does not match the pattern.
    pub invalid_value: Option<Message<()>>,
}

/// Configuration for [`RegexpValidator`].
///
/// Without a pattern every value passes.
#[derive(Debug, Clone, Default)]
pub struct RegexpConfig {
    /// Pattern the value's string form must match. `None` accepts everything.
    pub regexp: Option<Regex>,
    /// Messages for this validator; unset ones fall back to the factory defaults.
    pub messages: RegexpMessages,
}

impl RegexpConfig {
    /// Creates a configuration without a pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pattern the value must match.
    ///
    /// Returns an error if the pattern is invalid.
    pub fn pattern(self, pattern: &str) -> Result<Self, PatternError> {
        self.pattern_with_flags(pattern, "")
    }

    /// Sets the pattern with flags.
    ///
    /// `i` (case-insensitive), `m` (multi-line) and `s` (dot matches newline)
    /// change matching; `g`, `u` and `y` are accepted and have no effect on a
    /// single match test. Any other flag is rejected.
    ///
    /// # Example
    ///
    /// ```rust
    /// use formrules::{RegexpConfig, RegexpValidator};
    /// use serde_json::json;
    ///
    /// let validator = RegexpValidator::new(
    ///     RegexpConfig::new().pattern_with_flags("^abc$", "i").unwrap(),
    /// );
    /// assert!(validator.validate(&json!("ABC")).valid);
    ///
    /// assert!(RegexpConfig::new().pattern_with_flags("abc", "x").is_err());
    /// ```
    pub fn pattern_with_flags(mut self, pattern: &str, flags: &str) -> Result<Self, PatternError> {
        let mut builder = RegexBuilder::new(pattern);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'g' | 'u' | 'y' => &mut builder,
                other => return Err(PatternError::UnknownFlag(other)),
            };
        }
        self.regexp = Some(builder.build()?);
        Ok(self)
    }

    /// Uses an already compiled regex.
    pub fn regex(mut self, regex: Regex) -> Self {
        self.regexp = Some(regex);
        self
    }

    /// Overrides failure messages.
    pub fn messages(mut self, messages: RegexpMessages) -> Self {
        self.messages = messages;
        self
    }
}

/// Validates the default string form of a value against a pattern.
///
/// Non-string values are rendered first, so `123456789` is tested as
/// `"123456789"`.
///
/// # Example
///
/// ```rust
/// use formrules::{RegexpConfig, RegexpValidator};
/// use serde_json::json;
///
/// let validator = RegexpValidator::new(
///     RegexpConfig::new().pattern(r"^\d{3}-\d{2}-\d{4}$").unwrap(),
/// );
/// assert!(validator.validate(&json!("123-45-6789")).valid);
/// assert!(!validator.validate(&json!("abc")).valid);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegexpValidator {
    config: RegexpConfig,
}

impl RegexpValidator {
    /// Creates a validator from its configuration.
    pub fn new(config: RegexpConfig) -> Self {
        Self { config }
    }

    /// Validates a value against this validator's pattern.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        match &self.config.regexp {
            Some(regexp) if !regexp.is_match(&display_text(value)) => ValidationResult::fail(
                resolve(self.config.messages.invalid_value.as_ref(), &(), value),
            ),
            _ => ValidationResult::pass(),
        }
    }
}

impl Validator for RegexpValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        RegexpValidator::validate(self, value)
    }
}

/// Two-stage constructor for [`RegexpValidator`].
#[derive(Debug, Clone, Default)]
pub struct RegexpValidatorFactory {
    defaults: RegexpMessages,
}

impl RegexpValidatorFactory {
    /// Creates a factory with the given default messages.
    pub fn new(defaults: RegexpMessages) -> Self {
        Self { defaults }
    }
}

impl ValidatorFactory for RegexpValidatorFactory {
    type Config = RegexpConfig;
    type Output = RegexpValidator;

    fn create(&self, mut config: RegexpConfig) -> RegexpValidator {
        config.messages.invalid_value =
            or_default(config.messages.invalid_value, &self.defaults.invalid_value);
        RegexpValidator::new(config)
    }
}
