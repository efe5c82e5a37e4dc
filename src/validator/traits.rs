//! Traits for validator construction.
//!
//! This module provides the [`ValidatorFactory`] trait that every registered
//! validator kind implements, and [`factory_fn`] for turning a plain closure
//! into a factory.

use std::marker::PhantomData;

use crate::validation::Validator;

/// The inner stage of a two-stage validator constructor.
///
/// A factory is created once with its default messages, then called any
/// number of times with a per-call [`Config`](ValidatorFactory::Config) to
/// produce independent validator instances. `Config::default()` stands in
/// for a call without arguments.
///
/// # Example
///
/// ```rust
/// use formrules::{NumberConfig, NumberValidatorFactory, Validator, ValidatorFactory};
/// use serde_json::json;
///
/// let factory = NumberValidatorFactory::default();
/// let validator = factory.create(NumberConfig::new().min(5.0).max(10.0));
///
/// assert!(validator.validate(&json!(5)).valid);
/// assert!(!validator.validate(&json!(4)).valid);
/// ```
pub trait ValidatorFactory: Send + Sync + 'static {
    /// Per-call configuration accepted by this factory.
    type Config: Default + Send + 'static;

    /// The validator produced by this factory.
    type Output: Validator + 'static;

    /// Builds a validator from the given configuration.
    fn create(&self, config: Self::Config) -> Self::Output;

    /// Builds a validator with the default configuration.
    fn create_default(&self) -> Self::Output {
        self.create(Self::Config::default())
    }
}

/// A [`ValidatorFactory`] backed by a closure.
///
/// Created by [`factory_fn`].
pub struct FnFactory<C, V, F> {
    f: F,
    _marker: PhantomData<fn(C) -> V>,
}

/// Wraps a closure as a validator factory.
///
/// Use `()` as the config type for validators that take no configuration.
///
/// # Example
///
/// ```rust
/// use formrules::{factory_fn, ValidationResult, Validator, ValidatorFactory};
/// use serde_json::{json, Value};
///
/// struct Website;
///
/// impl Validator for Website {
///     fn validate(&self, value: &Value) -> ValidationResult {
///         match value.as_str() {
///             Some(s) if s.starts_with("https://") => ValidationResult::pass(),
///             _ => ValidationResult::fail(Some("not a website".into())),
///         }
///     }
/// }
///
/// let factory = factory_fn(|_: ()| Website);
/// assert!(factory.create_default().validate(&json!("https://example.com")).valid);
/// ```
pub fn factory_fn<C, V, F>(f: F) -> FnFactory<C, V, F>
where
    C: Default + Send + 'static,
    V: Validator + 'static,
    F: Fn(C) -> V + Send + Sync + 'static,
{
    FnFactory {
        f,
        _marker: PhantomData,
    }
}

impl<C, V, F> ValidatorFactory for FnFactory<C, V, F>
where
    C: Default + Send + 'static,
    V: Validator + 'static,
    F: Fn(C) -> V + Send + Sync + 'static,
{
    type Config = C;
    type Output = V;

    fn create(&self, config: C) -> V {
        (self.f)(config)
    }
}

/// Picks the per-call message if set, otherwise the factory default.
pub(crate) fn or_default<M: Clone>(message: Option<M>, default: &Option<M>) -> Option<M> {
    message.or_else(|| default.clone())
}
