//! Number validation.
//!
//! This module provides [`NumberValidator`] for checking numeric values
//! against a kind (integer or float), a maximum number of decimal places and
//! inclusive or exclusive bounds.

use std::fmt::{self, Display};

use serde_json::Value;

use crate::message::{resolve, Message};
use crate::validation::{ValidationResult, Validator};
use crate::value::{decimal_places, is_integer, number_value, parse_float_prefix};

use super::traits::{or_default, ValidatorFactory};

/// The numeric kind a value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    /// No fractional part.
    Integer,
    /// A non-zero fractional part.
    Float,
}

impl NumberKind {
    fn matches(self, n: f64) -> bool {
        match self {
            NumberKind::Integer => is_integer(n),
            NumberKind::Float => !is_integer(n),
        }
    }
}

impl Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberKind::Integer => f.write_str("integer"),
            NumberKind::Float => f.write_str("float"),
        }
    }
}

/// Failure messages for [`NumberValidator`].
///
/// Range messages receive `(lower, upper)`; single-bound messages receive the
/// bound. Every message also receives the value after string coercion.
#[derive(Debug, Clone, Default)]
pub struct NumberMessages {
    /// Value is not a number, or not a numeric string when strings are allowed.
    pub invalid_format: Option<Message<()>>,
    /// Value does not match the required [`NumberKind`].
    pub invalid_type: Option<Message<NumberKind>>,
    /// Value has more decimal places than allowed.
    pub invalid_decimal_places: Option<Message<u32>>,
    /// Value below `min`.
    pub invalid_min: Option<Message<f64>>,
    /// Value not above `min_strict`.
    pub invalid_min_strict: Option<Message<f64>>,
    /// Value above `max`.
    pub invalid_max: Option<Message<f64>>,
    /// Value not below `max_strict`.
    pub invalid_max_strict: Option<Message<f64>>,
    /// Value outside `[min, max]`.
    pub invalid_min_max: Option<Message<(f64, f64)>>,
    /// Value outside `[min, max_strict)`.
    pub invalid_min_max_strict: Option<Message<(f64, f64)>>,
    /// Value outside `(min_strict, max]`.
    pub invalid_min_strict_max: Option<Message<(f64, f64)>>,
    /// Value outside `(min_strict, max_strict)`.
    pub invalid_min_strict_max_strict: Option<Message<(f64, f64)>>,
}

impl NumberMessages {
    fn or_defaults(self, defaults: &NumberMessages) -> NumberMessages {
        NumberMessages {
            invalid_format: or_default(self.invalid_format, &defaults.invalid_format),
            invalid_type: or_default(self.invalid_type, &defaults.invalid_type),
            invalid_decimal_places: or_default(
                self.invalid_decimal_places,
                &defaults.invalid_decimal_places,
            ),
            invalid_min: or_default(self.invalid_min, &defaults.invalid_min),
            invalid_min_strict: or_default(self.invalid_min_strict, &defaults.invalid_min_strict),
            invalid_max: or_default(self.invalid_max, &defaults.invalid_max),
            invalid_max_strict: or_default(self.invalid_max_strict, &defaults.invalid_max_strict),
            invalid_min_max: or_default(self.invalid_min_max, &defaults.invalid_min_max),
            invalid_min_max_strict: or_default(
                self.invalid_min_max_strict,
                &defaults.invalid_min_max_strict,
            ),
            invalid_min_strict_max: or_default(
                self.invalid_min_strict_max,
                &defaults.invalid_min_strict_max,
            ),
            invalid_min_strict_max_strict: or_default(
                self.invalid_min_strict_max_strict,
                &defaults.invalid_min_strict_max_strict,
            ),
        }
    }
}

/// Configuration for [`NumberValidator`].
///
/// `min`/`max` are inclusive, `min_strict`/`max_strict` exclusive. NaN bounds
/// are ignored.
#[derive(Debug, Clone, Default)]
pub struct NumberConfig {
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
    /// Exclusive lower bound.
    pub min_strict: Option<f64>,
    /// Exclusive upper bound.
    pub max_strict: Option<f64>,
    /// Also accept strings, coerced by their leading float literal.
    pub allow_string: bool,
    /// Require a whole or a fractional number.
    pub kind: Option<NumberKind>,
    /// Maximum number of decimal places.
    pub decimal_places: Option<u32>,
    /// Messages for this validator; unset ones fall back to the factory defaults.
    pub messages: NumberMessages,
}

impl NumberConfig {
    /// Creates a configuration with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an inclusive lower bound.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets an inclusive upper bound.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets an exclusive lower bound.
    pub fn min_strict(mut self, min: f64) -> Self {
        self.min_strict = Some(min);
        self
    }

    /// Sets an exclusive upper bound.
    pub fn max_strict(mut self, max: f64) -> Self {
        self.max_strict = Some(max);
        self
    }

    /// Accepts strings with a leading float literal, coerced before checking.
    pub fn allow_string(mut self, allow: bool) -> Self {
        self.allow_string = allow;
        self
    }

    /// Requires the value to be of the given kind.
    pub fn kind(mut self, kind: NumberKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Limits the number of digits after the decimal point.
    pub fn decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = Some(places);
        self
    }

    /// Overrides failure messages.
    pub fn messages(mut self, messages: NumberMessages) -> Self {
        self.messages = messages;
        self
    }
}

/// Validates numbers.
///
/// Checks run in a fixed order and the first failure wins: format, kind,
/// decimal places, then bounds. Among bounds, a combined pair is checked
/// before single bounds so that a value outside `[min, max]` reports the
/// range message rather than the single-bound one.
///
/// # Example
///
/// ```rust
/// use formrules::{Message, NumberConfig, NumberMessages, NumberValidator, Validator};
/// use serde_json::json;
///
/// let validator = NumberValidator::new(
///     NumberConfig::new().min(5.0).max(10.0).messages(NumberMessages {
///         invalid_min_max: Some(Message::literal("out of range")),
///         invalid_min: Some(Message::literal("too small")),
///         ..Default::default()
///     }),
/// );
///
/// assert!(validator.validate(&json!(5)).valid);
/// assert_eq!(validator.validate(&json!(4)).message.as_deref(), Some("out of range"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NumberValidator {
    config: NumberConfig,
}

impl NumberValidator {
    /// Creates a validator from its configuration.
    pub fn new(config: NumberConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this validator was built with.
    pub fn config(&self) -> &NumberConfig {
        &self.config
    }

    /// Validates a value against this validator's constraints.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        let messages = &self.config.messages;

        let Some(n) = self.coerce(value) else {
            return ValidationResult::fail(resolve(messages.invalid_format.as_ref(), &(), value));
        };
        let shown = number_value(n);

        if let Some(kind) = self.config.kind {
            if !kind.matches(n) {
                return ValidationResult::fail(resolve(
                    messages.invalid_type.as_ref(),
                    &kind,
                    &shown,
                ));
            }
        }

        if let Some(places) = self.config.decimal_places {
            if decimal_places(n) > places as usize {
                return ValidationResult::fail(resolve(
                    messages.invalid_decimal_places.as_ref(),
                    &places,
                    &shown,
                ));
            }
        }

        self.check_bounds(n, &shown)
            .unwrap_or_else(ValidationResult::pass)
    }

    fn coerce(&self, value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if self.config.allow_string => parse_float_prefix(s),
            _ => None,
        }
    }

    fn check_bounds(&self, n: f64, shown: &Value) -> Option<ValidationResult> {
        let messages = &self.config.messages;
        let min = usable(self.config.min);
        let max = usable(self.config.max);
        let min_strict = usable(self.config.min_strict);
        let max_strict = usable(self.config.max_strict);

        let range = |message: &Option<Message<(f64, f64)>>, lo: f64, hi: f64| {
            ValidationResult::fail(resolve(message.as_ref(), &(lo, hi), shown))
        };
        let single = |message: &Option<Message<f64>>, bound: f64| {
            ValidationResult::fail(resolve(message.as_ref(), &bound, shown))
        };

        if let (Some(lo), Some(hi)) = (min, max) {
            if n < lo || n > hi {
                return Some(range(&messages.invalid_min_max, lo, hi));
            }
        }
        if let (Some(lo), Some(hi)) = (min, max_strict) {
            if n < lo || n >= hi {
                return Some(range(&messages.invalid_min_max_strict, lo, hi));
            }
        }
        if let (Some(lo), Some(hi)) = (min_strict, max) {
            if n <= lo || n > hi {
                return Some(range(&messages.invalid_min_strict_max, lo, hi));
            }
        }
        if let (Some(lo), Some(hi)) = (min_strict, max_strict) {
            if n <= lo || n >= hi {
                return Some(range(&messages.invalid_min_strict_max_strict, lo, hi));
            }
        }

        match (min, max, min_strict, max_strict) {
            (Some(lo), _, _, _) if n < lo => Some(single(&messages.invalid_min, lo)),
            (_, Some(hi), _, _) if n > hi => Some(single(&messages.invalid_max, hi)),
            (_, _, Some(lo), _) if n <= lo => Some(single(&messages.invalid_min_strict, lo)),
            (_, _, _, Some(hi)) if n >= hi => Some(single(&messages.invalid_max_strict, hi)),
            _ => None,
        }
    }
}

impl Validator for NumberValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        NumberValidator::validate(self, value)
    }
}

fn usable(bound: Option<f64>) -> Option<f64> {
    bound.filter(|b| !b.is_nan())
}

/// Two-stage constructor for [`NumberValidator`].
///
/// The factory fixes default messages once; each call to
/// [`create`](ValidatorFactory::create) fills in any message the per-call
/// configuration leaves unset.
#[derive(Debug, Clone, Default)]
pub struct NumberValidatorFactory {
    defaults: NumberMessages,
}

impl NumberValidatorFactory {
    /// Creates a factory with the given default messages.
    pub fn new(defaults: NumberMessages) -> Self {
        Self { defaults }
    }
}

impl ValidatorFactory for NumberValidatorFactory {
    type Config = NumberConfig;
    type Output = NumberValidator;

    fn create(&self, mut config: NumberConfig) -> NumberValidator {
        config.messages = config.messages.or_defaults(&self.defaults);
        NumberValidator::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::display_text;
    use serde_json::json;

    fn labelled() -> NumberMessages {
        NumberMessages {
            invalid_format: Some(Message::computed(|_, v| format!("format {}", display_text(v)))),
            invalid_type: Some(Message::computed(|k, v| format!("type {} {}", k, v))),
            invalid_decimal_places: Some(Message::computed(|p, v| format!("places {} {}", p, v))),
            invalid_min: Some(Message::literal("min")),
            invalid_min_strict: Some(Message::literal("min_strict")),
            invalid_max: Some(Message::literal("max")),
            invalid_max_strict: Some(Message::literal("max_strict")),
            invalid_min_max: Some(Message::literal("min_max")),
            invalid_min_max_strict: Some(Message::literal("min_max_strict")),
            invalid_min_strict_max: Some(Message::literal("min_strict_max")),
            invalid_min_strict_max_strict: Some(Message::literal("min_strict_max_strict")),
        }
    }

    fn message(config: NumberConfig, value: Value) -> Option<String> {
        NumberValidator::new(config.messages(labelled()))
            .validate(&value)
            .message
    }

    #[test]
    fn test_rejects_non_numbers() {
        let validator = NumberValidator::new(NumberConfig::new().messages(labelled()));
        assert!(validator.validate(&json!(0)).valid);
        assert!(validator.validate(&json!(-50)).valid);

        let result = validator.validate(&json!("5"));
        assert!(!result.valid);
        assert_eq!(result.message.as_deref(), Some("format 5"));

        assert!(!validator.validate(&json!(null)).valid);
        assert!(!validator.validate(&json!(true)).valid);
        assert!(!validator.validate(&json!([1, 2])).valid);
    }

    #[test]
    fn test_allow_string_coerces() {
        let config = NumberConfig::new().allow_string(true).kind(NumberKind::Integer);
        assert_eq!(message(config.clone(), json!("-5")), None);
        assert_eq!(message(config.clone(), json!("abc")), Some("format abc".into()));
        assert_eq!(message(config, json!("1.5")), Some("type integer 1.5".into()));
    }

    #[test]
    fn test_kind() {
        let integer = NumberConfig::new().kind(NumberKind::Integer);
        assert_eq!(message(integer.clone(), json!(100)), None);
        assert_eq!(message(integer, json!(1.5)), Some("type integer 1.5".into()));

        let float = NumberConfig::new().kind(NumberKind::Float);
        assert_eq!(message(float.clone(), json!(0.153)), None);
        assert_eq!(message(float, json!(100)), Some("type float 100".into()));
    }

    #[test]
    fn test_decimal_places() {
        let config = NumberConfig::new().decimal_places(2);
        assert_eq!(message(config.clone(), json!(5.12)), None);
        assert_eq!(message(config.clone(), json!(-10)), None);
        assert_eq!(message(config, json!(333.333)), Some("places 2 333.333".into()));

        let none = NumberConfig::new().decimal_places(0);
        assert_eq!(message(none, json!(5.11)), Some("places 0 5.11".into()));
    }

    #[test]
    fn test_bound_priority() {
        let both = NumberConfig::new().min(5.0).max(10.0);
        assert_eq!(message(both.clone(), json!(5)), None);
        assert_eq!(message(both.clone(), json!(10)), None);
        assert_eq!(message(both.clone(), json!(4)), Some("min_max".into()));
        assert_eq!(message(both, json!(11)), Some("min_max".into()));

        let min_max_strict = NumberConfig::new().min(5.0).max_strict(10.0);
        assert_eq!(message(min_max_strict, json!(10)), Some("min_max_strict".into()));

        let min_strict_max = NumberConfig::new().min_strict(5.0).max(10.0);
        assert_eq!(message(min_strict_max, json!(5)), Some("min_strict_max".into()));

        let strict = NumberConfig::new().min_strict(5.0).max_strict(10.0);
        assert_eq!(message(strict.clone(), json!(5)), Some("min_strict_max_strict".into()));
        assert_eq!(message(strict, json!(7)), None);
    }

    #[test]
    fn test_single_bounds() {
        assert_eq!(message(NumberConfig::new().min(10.0), json!(5)), Some("min".into()));
        assert_eq!(message(NumberConfig::new().min(5.0), json!(5)), None);
        assert_eq!(message(NumberConfig::new().max(5.0), json!(6)), Some("max".into()));
        assert_eq!(
            message(NumberConfig::new().min_strict(5.0), json!(5)),
            Some("min_strict".into())
        );
        assert_eq!(
            message(NumberConfig::new().max_strict(5.0), json!(5)),
            Some("max_strict".into())
        );
    }

    #[test]
    fn test_nan_bounds_are_ignored() {
        assert_eq!(message(NumberConfig::new().min(f64::NAN), json!(-1000)), None);
    }

    #[test]
    fn test_factory_defaults_and_overrides() {
        let factory = NumberValidatorFactory::new(NumberMessages {
            invalid_min: Some(Message::literal("default min")),
            invalid_max: Some(Message::literal("default max")),
            ..Default::default()
        });

        let validator = factory.create(NumberConfig::new().min(1.0).max(2.0));
        // The combined message was never configured, so the failure has none.
        assert_eq!(validator.validate(&json!(0)).message, None);

        let validator = factory.create(NumberConfig::new().min(1.0).messages(NumberMessages {
            invalid_min: Some(Message::literal("custom min")),
            ..Default::default()
        }));
        assert_eq!(
            validator.validate(&json!(0)).message.as_deref(),
            Some("custom min")
        );

        let validator = factory.create(NumberConfig::new().max(1.0));
        assert_eq!(
            validator.validate(&json!(3)).message.as_deref(),
            Some("default max")
        );
    }
}
