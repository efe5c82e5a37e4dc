//! Rule descriptors handed to the form host.
//!
//! A [`Rule`] bundles the field's [`Trigger`], its required flag and a
//! composite validator assembled by a [`RuleBuilder`](crate::RuleBuilder).
//! The composite runs the implicit required check first and then each
//! activated validator in order, stopping at the first failure.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::FieldError;
use crate::validation::{ValidationResult, Validator};
use crate::value::is_empty_value;

/// When the host should run a rule.
///
/// Any label is accepted; labels other than `blur` and `change` are kept
/// verbatim in [`Trigger::Custom`].
///
/// # Example
///
/// ```rust
/// use formrules::Trigger;
///
/// assert_eq!(Trigger::from("change"), Trigger::Change);
/// assert_eq!(Trigger::from("submit").as_str(), "submit");
/// assert_eq!(Trigger::default(), Trigger::Blur);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Trigger {
    #[default]
    Blur,
    Change,
    Custom(String),
}

impl Trigger {
    /// Returns the label as the host expects it.
    pub fn as_str(&self) -> &str {
        match self {
            Trigger::Blur => "blur",
            Trigger::Change => "change",
            Trigger::Custom(label) => label,
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Trigger {
    fn from(label: &str) -> Self {
        match label {
            "blur" => Trigger::Blur,
            "change" => Trigger::Change,
            other => Trigger::Custom(other.to_string()),
        }
    }
}

impl From<String> for Trigger {
    fn from(label: String) -> Self {
        match label.as_str() {
            "blur" => Trigger::Blur,
            "change" => Trigger::Change,
            _ => Trigger::Custom(label),
        }
    }
}

/// Required check followed by the activated validators.
#[derive(Clone)]
pub(crate) struct CompositeValidator {
    required: bool,
    required_check: Arc<dyn Validator>,
    validators: Arc<[Arc<dyn Validator>]>,
}

impl CompositeValidator {
    pub(crate) fn new(
        required: bool,
        required_check: Arc<dyn Validator>,
        validators: Vec<Arc<dyn Validator>>,
    ) -> Self {
        Self {
            required,
            required_check,
            validators: validators.into(),
        }
    }
}

impl Validator for CompositeValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        let _span = tracing::debug_span!(
            "composite_validate",
            required = self.required,
            validators = self.validators.len()
        )
        .entered();

        if !self.required && is_empty_value(value) {
            tracing::trace!("optional field is empty, skipping checks");
            return ValidationResult::pass();
        }

        let failure = std::iter::once(&self.required_check)
            .chain(self.validators.iter())
            .map(|validator| validator.validate(value))
            .find(|result| !result.valid);

        match failure {
            Some(result) => {
                tracing::trace!(reason = ?result.message, "field rejected");
                result
            }
            None => {
                tracing::trace!("field accepted");
                ValidationResult::pass()
            }
        }
    }
}

/// A validation rule in the shape form hosts consume:
/// `{ trigger, required, validator }`.
///
/// Rules are snapshots. Changing the builder after
/// [`get_rule`](crate::RuleBuilder::get_rule) does not affect rules it
/// already returned.
///
/// # Example
///
/// ```rust
/// use formrules::{NumberConfig, RuleBuilderFactory, RuleBuilderMessages, ValidatorsContext};
/// use serde_json::{json, Value};
///
/// let factory = RuleBuilderFactory::new(
///     ValidatorsContext::builtin(),
///     RuleBuilderMessages::default(),
/// )
/// .unwrap();
///
/// let rule = factory
///     .builder()
///     .use_validator("number", NumberConfig::new().min(1.0))
///     .unwrap()
///     .get_rule();
///
/// let mut seen = None;
/// rule.validator(&Value::Null, &json!(0), |error| seen = error);
/// assert!(seen.is_some());
/// ```
#[derive(Clone)]
pub struct Rule {
    /// When the host should run this rule.
    pub trigger: Trigger,
    /// Whether the host should mark the field as required.
    pub required: bool,
    composite: CompositeValidator,
}

impl Rule {
    pub(crate) fn new(trigger: Trigger, required: bool, composite: CompositeValidator) -> Self {
        Self {
            trigger,
            required,
            composite,
        }
    }

    /// Host-facing validation entry point.
    ///
    /// `meta` is the host's rule metadata and is ignored. The callback is
    /// invoked exactly once: with `None` when the value passes, or with the
    /// failure wrapped in a [`FieldError`].
    pub fn validator<F>(&self, _meta: &Value, value: &Value, callback: F)
    where
        F: FnOnce(Option<FieldError>),
    {
        callback(self.check(value).err());
    }

    /// Runs the composite validation and returns its raw result.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        self.composite.validate(value)
    }

    /// Runs the composite validation as a `Result`.
    pub fn check(&self, value: &Value) -> Result<(), FieldError> {
        self.validate(value).into_result()
    }
}

impl Validator for Rule {
    fn validate(&self, value: &Value) -> ValidationResult {
        Rule::validate(self, value)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("trigger", &self.trigger)
            .field("required", &self.required)
            .field("validators", &self.composite.validators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: Arc<AtomicUsize>,
        valid: bool,
        message: &'static str,
    }

    impl Validator for Counting {
        fn validate(&self, _value: &Value) -> ValidationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.valid {
                ValidationResult::pass()
            } else {
                ValidationResult::fail(Some(self.message.to_string()))
            }
        }
    }

    struct NotEmpty;

    impl Validator for NotEmpty {
        fn validate(&self, value: &Value) -> ValidationResult {
            if is_empty_value(value) {
                ValidationResult::fail(Some("required".into()))
            } else {
                ValidationResult::pass()
            }
        }
    }

    fn counting(calls: &Arc<AtomicUsize>, valid: bool, message: &'static str) -> Arc<dyn Validator> {
        Arc::new(Counting {
            calls: Arc::clone(calls),
            valid,
            message,
        })
    }

    fn rule(required: bool, validators: Vec<Arc<dyn Validator>>) -> Rule {
        Rule::new(
            Trigger::Blur,
            required,
            CompositeValidator::new(required, Arc::new(NotEmpty), validators),
        )
    }

    #[test]
    fn test_trigger_labels() {
        assert_eq!(Trigger::from("blur"), Trigger::Blur);
        assert_eq!(Trigger::from(String::from("change")), Trigger::Change);
        assert_eq!(
            Trigger::from("input"),
            Trigger::Custom("input".to_string())
        );
        assert_eq!(Trigger::Change.to_string(), "change");
    }

    #[test]
    fn test_optional_empty_value_skips_everything() {
        let calls = Arc::new(AtomicUsize::new(0));
        let rule = rule(false, vec![counting(&calls, false, "never")]);

        assert!(rule.validate(&json!("")).valid);
        assert!(rule.validate(&Value::Null).valid);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_zero_and_false_are_not_empty() {
        let calls = Arc::new(AtomicUsize::new(0));
        let rule = rule(false, vec![counting(&calls, false, "checked")]);

        assert_eq!(rule.validate(&json!(0)).message.as_deref(), Some("checked"));
        assert_eq!(
            rule.validate(&json!(false)).message.as_deref(),
            Some("checked")
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_required_check_runs_first() {
        let calls = Arc::new(AtomicUsize::new(0));
        let rule = rule(true, vec![counting(&calls, true, "")]);

        assert_eq!(rule.validate(&json!("")).message.as_deref(), Some("required"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_first_failure_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let rule = rule(
            false,
            vec![
                counting(&calls, true, ""),
                counting(&calls, false, "second"),
                counting(&calls, false, "third"),
            ],
        );

        assert_eq!(rule.validate(&json!("x")).message.as_deref(), Some("second"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_callback_adapter() {
        let calls = Arc::new(AtomicUsize::new(0));
        let rule = rule(false, vec![counting(&calls, false, "bad")]);

        let mut outcome = Some(FieldError::new("unset"));
        rule.validator(&Value::Null, &json!(""), |error| outcome = error);
        assert_eq!(outcome, None);

        rule.validator(&Value::Null, &json!("x"), |error| outcome = error);
        assert_eq!(outcome, Some(FieldError::new("bad")));
    }

    #[test]
    fn test_check() {
        let calls = Arc::new(AtomicUsize::new(0));
        let rule = rule(true, vec![counting(&calls, true, "")]);

        assert!(rule.check(&json!("x")).is_ok());
        assert_eq!(rule.check(&Value::Null).unwrap_err().message, "required");
    }
}
