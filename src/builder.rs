//! Rule builder.
//!
//! A [`RuleBuilderFactory`] is created once per application with the
//! validator registry and the default required-field message. Each call to
//! [`RuleBuilderFactory::builder`] hands out an independent [`RuleBuilder`]
//! that accumulates validators, a required flag and a trigger, and compiles
//! them into a [`Rule`] on demand.
//!
//! # Example
//!
//! ```rust
//! use formrules::{
//!     NumberConfig, RuleBuilderFactory, RuleBuilderMessages, StringConfig, Trigger,
//!     ValidatorsContext,
//! };
//! use serde_json::json;
//!
//! let factory = RuleBuilderFactory::new(
//!     ValidatorsContext::builtin(),
//!     RuleBuilderMessages::new().is_required_value("Please fill in"),
//! )
//! .unwrap();
//!
//! let rule = factory
//!     .builder()
//!     .use_validator("string", StringConfig::new().max_length(5))
//!     .unwrap()
//!     .set_required(true)
//!     .set_trigger("change")
//!     .get_rule();
//!
//! assert_eq!(rule.trigger, Trigger::Change);
//! assert!(rule.required);
//! assert_eq!(rule.check(&json!("")).unwrap_err().message, "Please fill in");
//! assert!(rule.check(&json!("abc")).is_ok());
//! ```

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;

use crate::error::BuilderError;
use crate::registry::ValidatorsContext;
use crate::rule::{CompositeValidator, Rule, Trigger};
use crate::validation::{ValidationResult, Validator};
use crate::value::is_empty_value;

/// Message used when a required field is empty and no message is configured.
pub const DEFAULT_REQUIRED_MESSAGE: &str = "Field is required!";

/// Messages used by the builder itself.
#[derive(Debug, Clone, Default)]
pub struct RuleBuilderMessages {
    /// Message for an empty required field.
    pub is_required_value: Option<String>,
}

impl RuleBuilderMessages {
    /// Creates messages with nothing overridden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message for an empty required field.
    pub fn is_required_value(mut self, message: impl Into<String>) -> Self {
        self.is_required_value = Some(message.into());
        self
    }

    fn or(self, defaults: &RuleBuilderMessages) -> Self {
        Self {
            is_required_value: self
                .is_required_value
                .or_else(|| defaults.is_required_value.clone()),
        }
    }
}

/// Per-builder configuration; overrides the factory defaults.
#[derive(Debug, Clone, Default)]
pub struct RuleBuilderConfig {
    /// Overrides for the factory's messages.
    pub messages: RuleBuilderMessages,
}

impl RuleBuilderConfig {
    /// Creates a config that keeps every factory default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the messages.
    pub fn messages(mut self, messages: RuleBuilderMessages) -> Self {
        self.messages = messages;
        self
    }
}

/// Fails on empty values.
///
/// Zero and `false` are values, not emptiness.
#[derive(Debug, Clone)]
struct RequiredValidator {
    message: Option<String>,
}

impl Validator for RequiredValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        if !is_empty_value(value) {
            return ValidationResult::pass();
        }
        let message = self
            .message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_REQUIRED_MESSAGE);
        ValidationResult::fail(Some(message.to_string()))
    }
}

/// Hands out rule builders that share one validator registry.
#[derive(Debug, Clone)]
pub struct RuleBuilderFactory {
    validators: Arc<ValidatorsContext>,
    messages: RuleBuilderMessages,
}

impl RuleBuilderFactory {
    /// Creates a factory over the given registry.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::NoValidators` if the registry is empty.
    pub fn new(
        validators: ValidatorsContext,
        messages: RuleBuilderMessages,
    ) -> Result<Self, BuilderError> {
        if validators.is_empty() {
            return Err(BuilderError::NoValidators);
        }
        tracing::debug!(
            validators = ?validators.names().collect::<Vec<_>>(),
            "rule builder factory created"
        );
        Ok(Self {
            validators: Arc::new(validators),
            messages,
        })
    }

    /// Returns a builder using the factory's default messages.
    pub fn builder(&self) -> RuleBuilder {
        self.builder_with(RuleBuilderConfig::default())
    }

    /// Returns a builder whose messages override the factory's, field by field.
    pub fn builder_with(&self, config: RuleBuilderConfig) -> RuleBuilder {
        RuleBuilder {
            validators: Arc::clone(&self.validators),
            messages: config.messages.or(&self.messages),
            active: Vec::new(),
            required: false,
            trigger: Trigger::default(),
        }
    }

    /// Returns the registry this factory resolves names against.
    pub fn validators(&self) -> &ValidatorsContext {
        &self.validators
    }
}

/// Accumulates validators, a required flag and a trigger for one field.
///
/// Chaining methods take `&mut self` and return it, so a builder can be
/// configured in a single expression or step by step.
pub struct RuleBuilder {
    validators: Arc<ValidatorsContext>,
    messages: RuleBuilderMessages,
    active: Vec<Arc<dyn Validator>>,
    required: bool,
    trigger: Trigger,
}

impl RuleBuilder {
    /// Activates the named validator built from `config`.
    ///
    /// The same name may be used any number of times; each call adds an
    /// independent validator, run in call order.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::ValidatorNotFound` if the name is not
    /// registered and `BuilderError::ConfigMismatch` if `config` is not the
    /// named factory's config type. The builder is left unchanged.
    pub fn use_validator<C: Any + Send>(
        &mut self,
        name: &str,
        config: C,
    ) -> Result<&mut Self, BuilderError> {
        let validator = self.validators.create(name, config)?;
        self.activate(name, validator);
        Ok(self)
    }

    /// Activates the named validator with its default config.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::ValidatorNotFound` if the name is not registered.
    pub fn use_default(&mut self, name: &str) -> Result<&mut Self, BuilderError> {
        let validator = self.validators.create_default(name)?;
        self.activate(name, validator);
        Ok(self)
    }

    fn activate(&mut self, name: &str, validator: Arc<dyn Validator>) {
        self.active.push(validator);
        tracing::debug!(name, position = self.active.len(), "validator activated");
    }

    /// Marks the field as required, or optional.
    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Sets when the host should run the rule.
    pub fn set_trigger(&mut self, trigger: impl Into<Trigger>) -> &mut Self {
        self.trigger = trigger.into();
        self
    }

    /// Compiles the current state into a rule.
    ///
    /// The builder is not consumed; later changes do not affect rules
    /// already returned.
    pub fn get_rule(&self) -> Rule {
        let required_check = Arc::new(RequiredValidator {
            message: self.messages.is_required_value.clone(),
        });
        Rule::new(
            self.trigger.clone(),
            self.required,
            CompositeValidator::new(self.required, required_check, self.active.clone()),
        )
    }

    /// Returns whether the field is marked required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the current trigger.
    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    /// Returns the number of activated validators.
    pub fn validator_count(&self) -> usize {
        self.active.len()
    }
}

impl std::fmt::Debug for RuleBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleBuilder")
            .field("messages", &self.messages)
            .field("validators", &self.active.len())
            .field("required", &self.required)
            .field("trigger", &self.trigger)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::validator::{NumberConfig, NumberMessages, StringConfig};
    use serde_json::json;

    fn factory() -> RuleBuilderFactory {
        RuleBuilderFactory::new(ValidatorsContext::builtin(), RuleBuilderMessages::new()).unwrap()
    }

    #[test]
    fn test_empty_registry_is_rejected() {
        let err = RuleBuilderFactory::new(ValidatorsContext::new(), RuleBuilderMessages::new())
            .unwrap_err();
        assert!(matches!(err, BuilderError::NoValidators));
    }

    #[test]
    fn test_defaults() {
        let builder = factory().builder();
        assert!(!builder.is_required());
        assert_eq!(builder.trigger(), &Trigger::Blur);
        assert_eq!(builder.validator_count(), 0);

        let rule = builder.get_rule();
        assert_eq!(rule.trigger.as_str(), "blur");
        assert!(!rule.required);
    }

    #[test]
    fn test_unknown_validator_leaves_builder_unchanged() {
        let mut builder = factory().builder();
        let err = builder.use_default("phone").unwrap_err();

        assert_eq!(err.to_string(), "rule builder: validator \"phone\" not found");
        assert_eq!(builder.validator_count(), 0);
    }

    #[test]
    fn test_required_default_message() {
        let rule = factory().builder().set_required(true).get_rule();

        assert_eq!(
            rule.validate(&json!("")).message.as_deref(),
            Some(DEFAULT_REQUIRED_MESSAGE)
        );
        assert!(rule.validate(&json!(0)).valid);
        assert!(rule.validate(&json!(false)).valid);
    }

    #[test]
    fn test_required_message_precedence() {
        let factory = RuleBuilderFactory::new(
            ValidatorsContext::builtin(),
            RuleBuilderMessages::new().is_required_value("factory"),
        )
        .unwrap();

        let from_factory = factory.builder().set_required(true).get_rule();
        assert_eq!(
            from_factory.validate(&Value::Null).message.as_deref(),
            Some("factory")
        );

        let overridden = factory
            .builder_with(
                RuleBuilderConfig::new()
                    .messages(RuleBuilderMessages::new().is_required_value("builder")),
            )
            .set_required(true)
            .get_rule();
        assert_eq!(
            overridden.validate(&Value::Null).message.as_deref(),
            Some("builder")
        );
    }

    #[test]
    fn test_empty_required_message_falls_back() {
        let rule = factory()
            .builder_with(
                RuleBuilderConfig::new().messages(RuleBuilderMessages::new().is_required_value("")),
            )
            .set_required(true)
            .get_rule();

        assert_eq!(
            rule.validate(&json!("")).message.as_deref(),
            Some(DEFAULT_REQUIRED_MESSAGE)
        );
    }

    #[test]
    fn test_same_validator_twice() {
        let rule = factory()
            .builder()
            .use_validator(
                "number",
                NumberConfig::new()
                    .min(1.0)
                    .messages(NumberMessages {
                        invalid_min: Some(Message::literal("first")),
                        ..Default::default()
                    }),
            )
            .unwrap()
            .use_validator(
                "number",
                NumberConfig::new()
                    .max(5.0)
                    .messages(NumberMessages {
                        invalid_max: Some(Message::literal("second")),
                        ..Default::default()
                    }),
            )
            .unwrap()
            .get_rule();

        assert_eq!(rule.validate(&json!(0)).message.as_deref(), Some("first"));
        assert_eq!(rule.validate(&json!(6)).message.as_deref(), Some("second"));
        assert!(rule.validate(&json!(3)).valid);
    }

    #[test]
    fn test_get_rule_is_a_snapshot() {
        let mut builder = factory().builder();
        builder
            .use_validator("string", StringConfig::new().max_length(3))
            .unwrap();
        let before = builder.get_rule();

        builder.set_required(true).set_trigger("change");
        let after = builder.get_rule();

        assert!(!before.required);
        assert!(before.validate(&json!("")).valid);
        assert!(after.required);
        assert_eq!(after.trigger, Trigger::Change);
        assert!(!after.validate(&json!("")).valid);
    }

    #[test]
    fn test_custom_trigger_is_kept() {
        let rule = factory().builder().set_trigger("submit").get_rule();
        assert_eq!(rule.trigger, Trigger::Custom("submit".into()));
    }
}
