//! Email validation.
//!
//! This module provides [`EmailValidator`] for checking the address format
//! and restricting the domain to an allow-list or away from a blacklist.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::message::{resolve, Message};
use crate::validation::{ValidationResult, Validator};

use super::traits::{or_default, ValidatorFactory};

static EMAIL_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,4}$")
        .expect("email pattern is valid")
});

/// Failure messages for [`EmailValidator`].
///
/// Domain messages receive the configured list.
#[derive(Debug, Clone, Default)]
pub struct EmailMessages {
    /// Value is not a string in email address shape.
    pub invalid_format: Option<Message<()>>,
    /// Domain is missing from `allowed_domain_list`. Receives the list.
    pub not_allowed_domain: Option<Message<Vec<String>>>,
    /// Domain is on `black_list_domain`. Receives the list.
    pub domain_from_black_list: Option<Message<Vec<String>>>,
}

impl EmailMessages {
    fn or_defaults(self, defaults: &EmailMessages) -> EmailMessages {
        EmailMessages {
            invalid_format: or_default(self.invalid_format, &defaults.invalid_format),
            not_allowed_domain: or_default(self.not_allowed_domain, &defaults.not_allowed_domain),
            domain_from_black_list: or_default(
                self.domain_from_black_list,
                &defaults.domain_from_black_list,
            ),
        }
    }
}

/// Configuration for [`EmailValidator`].
///
/// Domain lists are compared case-insensitively. An empty list imposes no
/// restriction.
#[derive(Debug, Clone, Default)]
pub struct EmailConfig {
    /// If set, only these domains are accepted.
    pub allowed_domain_list: Option<Vec<String>>,
    /// Domains that are always rejected.
    pub black_list_domain: Option<Vec<String>>,
    /// Messages for this validator; unset ones fall back to the factory defaults.
    pub messages: EmailMessages,
}

impl EmailConfig {
    /// Creates a configuration with no domain restrictions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accepts addresses whose domain is in the list.
    pub fn allowed_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_domain_list = Some(domains.into_iter().map(Into::into).collect());
        self
    }

    /// Rejects addresses whose domain is in the list.
    pub fn black_list<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.black_list_domain = Some(domains.into_iter().map(Into::into).collect());
        self
    }

    /// Overrides failure messages.
    pub fn messages(mut self, messages: EmailMessages) -> Self {
        self.messages = messages;
        self
    }
}

/// Validates email addresses.
///
/// Check order: format, allow-list, blacklist.
///
/// # Example
///
/// ```rust
/// use formrules::{EmailConfig, EmailValidator};
/// use serde_json::json;
///
/// let validator = EmailValidator::new(EmailConfig::new());
/// assert!(validator.validate(&json!("test@example.com")).valid);
/// assert!(!validator.validate(&json!("test@example.comer")).valid);
///
/// let restricted = EmailValidator::new(EmailConfig::new().allowed_domains(["test.com"]));
/// assert!(!restricted.validate(&json!("test@example.com")).valid);
/// assert!(restricted.validate(&json!("test@TEST.com")).valid);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmailValidator {
    config: EmailConfig,
}

impl EmailValidator {
    /// Creates a validator from its configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this validator was built with.
    pub fn config(&self) -> &EmailConfig {
        &self.config
    }

    /// Validates a value against this validator's constraints.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        let config = &self.config;
        let messages = &config.messages;

        let address = match value.as_str() {
            Some(s) if EMAIL_FORMAT.is_match(s) => s,
            _ => {
                return ValidationResult::fail(resolve(
                    messages.invalid_format.as_ref(),
                    &(),
                    value,
                ))
            }
        };

        let domain = address
            .split_once('@')
            .map(|(_, domain)| domain.to_lowercase())
            .unwrap_or_default();

        if let Some(allowed) = non_empty(&config.allowed_domain_list) {
            if !contains_domain(allowed, &domain) {
                return ValidationResult::fail(resolve(
                    messages.not_allowed_domain.as_ref(),
                    allowed,
                    value,
                ));
            }
        }

        if let Some(blocked) = non_empty(&config.black_list_domain) {
            if contains_domain(blocked, &domain) {
                return ValidationResult::fail(resolve(
                    messages.domain_from_black_list.as_ref(),
                    blocked,
                    value,
                ));
            }
        }

        ValidationResult::pass()
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        EmailValidator::validate(self, value)
    }
}

fn non_empty(list: &Option<Vec<String>>) -> Option<&Vec<String>> {
    list.as_ref().filter(|list| !list.is_empty())
}

fn contains_domain(list: &[String], domain: &str) -> bool {
    list.iter().any(|entry| entry.to_lowercase() == domain)
}

/// Two-stage constructor for [`EmailValidator`].
///
/// Besides messages, the factory fixes default domain lists; a per-call list
/// replaces the default one entirely.
#[derive(Debug, Clone, Default)]
pub struct EmailValidatorFactory {
    defaults: EmailConfig,
}

impl EmailValidatorFactory {
    /// Creates a factory with the given default lists and messages.
    pub fn new(defaults: EmailConfig) -> Self {
        Self { defaults }
    }
}

impl ValidatorFactory for EmailValidatorFactory {
    type Config = EmailConfig;
    type Output = EmailValidator;

    fn create(&self, config: EmailConfig) -> EmailValidator {
        EmailValidator::new(EmailConfig {
            allowed_domain_list: or_default(
                config.allowed_domain_list,
                &self.defaults.allowed_domain_list,
            ),
            black_list_domain: or_default(
                config.black_list_domain,
                &self.defaults.black_list_domain,
            ),
            messages: config.messages.or_defaults(&self.defaults.messages),
        })
    }
}
