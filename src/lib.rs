//! # Formrules
//!
//! Declarative field validators compiled into the validation rules form UI
//! frameworks consume.
//!
//! ## Overview
//!
//! Application code declares, per form field, a set of reusable checks
//! (type, range, format, required-ness). A [`RuleBuilder`] resolves them by
//! name from a [`ValidatorsContext`] and compiles them into one [`Rule`]:
//! a `{ trigger, required, validator }` descriptor whose validator runs the
//! required check and then each configured check in order, stopping at the
//! first failure.
//!
//! ## Core Types
//!
//! - [`Validator`]: the single-method validation capability, answering with a [`ValidationResult`]
//! - [`Validators`]: the seven built-in kinds (array, boolean, date, email, number, regexp, string)
//! - [`ValidatorFactory`]: two-stage constructors fixing default messages once
//! - [`Message`]: literal or computed failure messages
//! - [`RuleBuilderFactory`] / [`RuleBuilder`]: rule assembly
//!
//! ## Example
//!
//! ```rust
//! use formrules::{
//!     Message, NumberConfig, NumberMessages, RuleBuilderFactory, RuleBuilderMessages,
//!     ValidatorsContext,
//! };
//! use serde_json::{json, Value};
//!
//! let factory = RuleBuilderFactory::new(
//!     ValidatorsContext::builtin(),
//!     RuleBuilderMessages::new().is_required_value("Age is required"),
//! )
//! .unwrap();
//!
//! let rule = factory
//!     .builder()
//!     .use_validator(
//!         "number",
//!         NumberConfig::new().min(18.0).messages(NumberMessages {
//!             invalid_min: Some(Message::computed(|min, _| format!("Must be at least {}", min))),
//!             ..Default::default()
//!         }),
//!     )
//!     .unwrap()
//!     .set_required(true)
//!     .get_rule();
//!
//! // The host calls the validator with its rule metadata, the value and a callback
//! rule.validator(&Value::Null, &json!(16), |error| {
//!     assert_eq!(error.unwrap().message, "Must be at least 18");
//! });
//! rule.validator(&Value::Null, &json!(""), |error| {
//!     assert_eq!(error.unwrap().message, "Age is required");
//! });
//! rule.validator(&Value::Null, &json!(21), |error| assert!(error.is_none()));
//! ```

pub mod builder;
pub mod error;
pub mod message;
pub mod registry;
pub mod rule;
pub mod validation;
pub mod validator;
pub mod value;

pub use builder::{
    RuleBuilder, RuleBuilderConfig, RuleBuilderFactory, RuleBuilderMessages,
    DEFAULT_REQUIRED_MESSAGE,
};
pub use error::{BuilderError, FieldError, PatternError};
pub use message::{resolve, Message};
pub use registry::{RegistryError, ValidatorsContext};
pub use rule::{Rule, Trigger};
pub use validation::{ValidationResult, Validator};
pub use validator::{
    factory_fn, parse_instant, ArrayConfig, ArrayMessages, ArrayValidator, ArrayValidatorFactory,
    BooleanConfig, BooleanMessages, BooleanValidator, BooleanValidatorFactory, DateConfig,
    DateMessages, DateValidator, DateValidatorFactory, EmailConfig, EmailMessages, EmailValidator,
    EmailValidatorFactory, FnFactory, NumberConfig, NumberKind, NumberMessages, NumberValidator,
    NumberValidatorFactory, RegexpConfig, RegexpMessages, RegexpValidator, RegexpValidatorFactory,
    StringConfig, StringMessages, StringValidator, StringValidatorFactory, ValidatorFactory,
    Validators,
};
