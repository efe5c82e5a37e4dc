//! Primitive validators and their factories.
//!
//! Each validator kind comes as three pieces: a `*Config` holding its
//! constraints and `*Messages`, the validator itself, and a two-stage
//! `*ValidatorFactory` that fixes default messages once and builds
//! validators from per-call configuration.
//!
//! Checks inside a validator short-circuit: the first failing check decides
//! the message the caller sees.
//!
//! # Example
//!
//! ```rust
//! use formrules::{NumberConfig, Validators};
//! use serde_json::json;
//!
//! let validator = Validators::number(NumberConfig::new().min(5.0).max(10.0));
//!
//! assert!(validator.validate(&json!(7)).valid);
//! assert!(!validator.validate(&json!(11)).valid);
//! ```

mod array;
mod boolean;
mod date;
mod email;
mod number;
mod regexp;
mod string;
mod traits;

pub use array::{ArrayConfig, ArrayMessages, ArrayValidator, ArrayValidatorFactory};
pub use boolean::{BooleanConfig, BooleanMessages, BooleanValidator, BooleanValidatorFactory};
pub use date::{parse_instant, DateConfig, DateMessages, DateValidator, DateValidatorFactory};
pub use email::{EmailConfig, EmailMessages, EmailValidator, EmailValidatorFactory};
pub use number::{NumberConfig, NumberKind, NumberMessages, NumberValidator, NumberValidatorFactory};
pub use regexp::{RegexpConfig, RegexpMessages, RegexpValidator, RegexpValidatorFactory};
pub use string::{StringConfig, StringMessages, StringValidator, StringValidatorFactory};
pub use traits::{factory_fn, FnFactory, ValidatorFactory};

/// Entry point for building validators directly from a configuration.
///
/// Use the `*ValidatorFactory` types instead when several validators should
/// share default messages.
pub struct Validators;

impl Validators {
    /// Creates an array validator.
    pub fn array(config: ArrayConfig) -> ArrayValidator {
        ArrayValidator::new(config)
    }

    /// Creates a boolean validator.
    pub fn boolean(config: BooleanConfig) -> BooleanValidator {
        BooleanValidator::new(config)
    }

    /// Creates a date validator.
    pub fn date(config: DateConfig) -> DateValidator {
        DateValidator::new(config)
    }

    /// Creates an email validator.
    pub fn email(config: EmailConfig) -> EmailValidator {
        EmailValidator::new(config)
    }

    /// Creates a number validator.
    pub fn number(config: NumberConfig) -> NumberValidator {
        NumberValidator::new(config)
    }

    /// Creates a regular expression validator.
    pub fn regexp(config: RegexpConfig) -> RegexpValidator {
        RegexpValidator::new(config)
    }

    /// Creates a string validator.
    pub fn string(config: StringConfig) -> StringValidator {
        StringValidator::new(config)
    }
}
