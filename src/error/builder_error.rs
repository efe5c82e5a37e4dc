//! Configuration and usage errors.

/// Errors raised while assembling rules.
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// `use_validator` named a validator the registry does not hold.
    #[error("rule builder: validator \"{0}\" not found")]
    ValidatorNotFound(String),

    /// The builder factory was given a registry without any validators.
    #[error("rule builder: no validator found")]
    NoValidators,

    /// `use_validator` was given a config of the wrong type for the named validator.
    #[error("rule builder: validator \"{name}\" expects a config of type {expected}")]
    ConfigMismatch {
        name: String,
        expected: &'static str,
    },
}

/// Errors raised while configuring a regular expression validator.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// The pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A flag outside `i`, `m`, `s`, `g`, `u`, `y` was given.
    #[error("unknown regexp flag '{0}'")]
    UnknownFlag(char),
}
