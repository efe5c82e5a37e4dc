//! Named validator registry.
//!
//! This module provides [`ValidatorsContext`], the lookup table a rule
//! builder resolves validator names against. Every entry is a
//! [`ValidatorFactory`], so anything registered is guaranteed to produce a
//! [`Validator`]; the only thing checked at lookup time is that the caller
//! passed the config type the named factory expects.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::BuilderError;
use crate::validation::Validator;
use crate::validator::{
    ArrayValidatorFactory, BooleanValidatorFactory, DateValidatorFactory, EmailValidatorFactory,
    NumberValidatorFactory, RegexpValidatorFactory, StringValidatorFactory, ValidatorFactory,
};

type BoxedConfig = Box<dyn Any + Send>;

/// Object-safe view of a [`ValidatorFactory`].
trait ErasedFactory: Send + Sync {
    fn build(&self, config: BoxedConfig) -> Result<Arc<dyn Validator>, BoxedConfig>;
    fn build_default(&self) -> Arc<dyn Validator>;
    fn config_type(&self) -> &'static str;
}

impl<F: ValidatorFactory> ErasedFactory for F {
    fn build(&self, config: BoxedConfig) -> Result<Arc<dyn Validator>, BoxedConfig> {
        let config = config.downcast::<F::Config>()?;
        Ok(Arc::new(self.create(*config)))
    }

    fn build_default(&self) -> Arc<dyn Validator> {
        Arc::new(self.create(F::Config::default()))
    }

    fn config_type(&self) -> &'static str {
        type_name::<F::Config>()
    }
}

/// An ordered table of named validator factories.
///
/// The context is filled once and then shared, read-only, by every builder
/// a [`RuleBuilderFactory`](crate::RuleBuilderFactory) hands out. Cloning is
/// cheap; factories are reference counted.
///
/// # Example
///
/// ```rust
/// use formrules::{NumberConfig, NumberValidatorFactory, ValidatorsContext};
/// use serde_json::json;
///
/// let mut validators = ValidatorsContext::new();
/// validators.register("number", NumberValidatorFactory::default()).unwrap();
///
/// // Duplicate registration fails
/// assert!(validators.register("number", NumberValidatorFactory::default()).is_err());
///
/// let validator = validators.create("number", NumberConfig::new().min(1.0)).unwrap();
/// assert!(!validator.validate(&json!(0)).valid);
/// ```
#[derive(Clone, Default)]
pub struct ValidatorsContext {
    factories: IndexMap<String, Arc<dyn ErasedFactory>>,
}

impl ValidatorsContext {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the seven built-in validator kinds.
    ///
    /// They are registered under `array`, `boolean`, `date`, `email`,
    /// `number`, `regexp` and `string`, with no default messages.
    pub fn builtin() -> Self {
        let mut context = Self::new();
        context.insert("array", ArrayValidatorFactory::default());
        context.insert("boolean", BooleanValidatorFactory::default());
        context.insert("date", DateValidatorFactory::default());
        context.insert("email", EmailValidatorFactory::default());
        context.insert("number", NumberValidatorFactory::default());
        context.insert("regexp", RegexpValidatorFactory::default());
        context.insert("string", StringValidatorFactory::default());
        context
    }

    /// Registers a factory under the given name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    pub fn register<F: ValidatorFactory>(
        &mut self,
        name: impl Into<String>,
        factory: F,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        self.insert(name, factory);
        Ok(())
    }

    /// Registers a factory and returns the registry, for chaining.
    ///
    /// # Example
    ///
    /// ```rust
    /// use formrules::{StringValidatorFactory, NumberValidatorFactory, ValidatorsContext};
    ///
    /// let validators = ValidatorsContext::new()
    ///     .with("string", StringValidatorFactory::default())
    ///     .and_then(|v| v.with("number", NumberValidatorFactory::default()))
    ///     .unwrap();
    ///
    /// assert_eq!(validators.names().collect::<Vec<_>>(), vec!["string", "number"]);
    /// ```
    pub fn with<F: ValidatorFactory>(
        mut self,
        name: impl Into<String>,
        factory: F,
    ) -> Result<Self, RegistryError> {
        self.register(name, factory)?;
        Ok(self)
    }

    fn insert<F: ValidatorFactory>(&mut self, name: impl Into<String>, factory: F) {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Returns true if a factory is registered under the name.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns the registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Returns the number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Builds the named validator from a config.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::ValidatorNotFound` for an unknown name and
    /// `BuilderError::ConfigMismatch` if `config` is not the type the named
    /// factory accepts.
    pub fn create<C: Any + Send>(
        &self,
        name: &str,
        config: C,
    ) -> Result<Arc<dyn Validator>, BuilderError> {
        let factory = self.factory(name)?;
        factory
            .build(Box::new(config))
            .map_err(|_| BuilderError::ConfigMismatch {
                name: name.to_string(),
                expected: factory.config_type(),
            })
    }

    /// Builds the named validator with its default config.
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::ValidatorNotFound` for an unknown name.
    pub fn create_default(&self, name: &str) -> Result<Arc<dyn Validator>, BuilderError> {
        Ok(self.factory(name)?.build_default())
    }

    fn factory(&self, name: &str) -> Result<&Arc<dyn ErasedFactory>, BuilderError> {
        self.factories
            .get(name)
            .ok_or_else(|| BuilderError::ValidatorNotFound(name.to_string()))
    }
}

impl fmt::Debug for ValidatorsContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorsContext")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a factory with a name that already exists.
    #[error("validator '{0}' already registered")]
    DuplicateName(String),
}
