//! Date validation.
//!
//! This module provides [`DateValidator`] for checking that a value denotes a
//! point in time and, optionally, that it lies within bounds. Values may be
//! millisecond timestamps or date strings; see [`parse_instant`] for the
//! accepted forms.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::message::{resolve, Message};
use crate::validation::{ValidationResult, Validator};

use super::traits::{or_default, ValidatorFactory};

/// Largest timestamp, in milliseconds, a date may carry.
const MAX_TIMESTAMP_MS: f64 = 8.64e15;

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m.%d.%Y %H:%M:%S",
    "%m.%d.%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d", "%m.%d.%Y", "%m/%d/%Y", "%m-%d-%Y",
];

// ISO date-times with an offset but without the seconds RFC 3339 demands.
const OFFSET_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Parses a value into an instant.
///
/// Accepts millisecond timestamps, RFC 3339, RFC 2822, the
/// `Tue Dec 12 2023 14:33:12 GMT+0200 (zone name)` form, and date or
/// date-time strings ordered year-month-day or month-day-year with `-`, `.`
/// or `/` separators. The reduced ISO forms `YYYY`, `YYYY-MM` and
/// `YYYY-MM-DDTHH:mm` followed by `Z` or an offset are accepted too.
/// Strings without an offset are read as UTC.
///
/// # Example
///
/// ```rust
/// use formrules::parse_instant;
/// use serde_json::json;
///
/// assert!(parse_instant(&json!(1702384392000_i64)).is_some());
/// assert!(parse_instant(&json!("2023.08.19 14:00")).is_some());
/// assert!(parse_instant(&json!("12.12.2023 14:33:12")).is_some());
/// assert!(parse_instant(&json!("2023-08-19T14:00Z")).is_some());
/// assert!(parse_instant(&json!("2023-08")).is_some());
/// assert!(parse_instant(&json!("19/12/2023")).is_none());
/// assert!(parse_instant(&json!(true)).is_none());
/// ```
pub fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let ms = n.as_f64()?;
            if ms.abs() > MAX_TIMESTAMP_MS {
                return None;
            }
            Utc.timestamp_millis_opt(ms.trunc() as i64).single()
        }
        Value::String(s) => parse_date_str(s),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let without_zone_name = s.split_once(" (").map_or(s, |(head, _)| head);
    if let Ok(dt) = DateTime::parse_from_str(without_zone_name, "%a %b %d %Y %H:%M:%S GMT%z") {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = OFFSET_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(s, format).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    // A trailing `Z` on an ISO date-time means UTC, which naive forms already assume
    let naive = match s.strip_suffix(['Z', 'z']) {
        Some(head) if head.contains('T') => head,
        _ => s,
    };

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(naive, format).ok())
                .or_else(|| parse_year_month(naive))
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parses the reduced ISO forms `YYYY` and `YYYY-MM` to the first day they
/// cover.
fn parse_year_month(s: &str) -> Option<NaiveDate> {
    let (year, month) = s.split_once('-').unwrap_or((s, "01"));
    let is_digits = |part: &str, len: usize| {
        part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
    };
    if !is_digits(year, 4) || !is_digits(month, 2) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Failure messages for [`DateValidator`].
///
/// Bound messages receive the parsed bounds.
#[derive(Debug, Clone, Default)]
pub struct DateMessages {
    /// Value is not a parseable date.
    pub invalid_format: Option<Message<()>>,
    /// Date outside `min_date..=max_date` when both are set.
    pub invalid_range: Option<Message<(DateTime<Utc>, DateTime<Utc>)>>,
    /// Date before `min_date`.
    pub invalid_min_date: Option<Message<DateTime<Utc>>>,
    /// Date after `max_date`.
    pub invalid_max_date: Option<Message<DateTime<Utc>>>,
}

impl DateMessages {
    fn or_defaults(self, defaults: &DateMessages) -> DateMessages {
        DateMessages {
            invalid_format: or_default(self.invalid_format, &defaults.invalid_format),
            invalid_range: or_default(self.invalid_range, &defaults.invalid_range),
            invalid_min_date: or_default(self.invalid_min_date, &defaults.invalid_min_date),
            invalid_max_date: or_default(self.invalid_max_date, &defaults.invalid_max_date),
        }
    }
}

/// Configuration for [`DateValidator`]. Both bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct DateConfig {
    /// Earliest accepted instant, inclusive.
    pub min_date: Option<DateTime<Utc>>,
    /// Latest accepted instant, inclusive.
    pub max_date: Option<DateTime<Utc>>,
    /// Messages for this validator; unset ones fall back to the factory defaults.
    pub messages: DateMessages,
}

impl DateConfig {
    /// Creates a configuration without bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the earliest accepted instant.
    pub fn min_date(mut self, min: DateTime<Utc>) -> Self {
        self.min_date = Some(min);
        self
    }

    /// Sets the latest accepted instant.
    pub fn max_date(mut self, max: DateTime<Utc>) -> Self {
        self.max_date = Some(max);
        self
    }

    /// Sets the earliest accepted instant from a raw value.
    ///
    /// A value that does not parse leaves the bound unset.
    pub fn min_date_from(mut self, min: &Value) -> Self {
        self.min_date = parse_instant(min);
        self
    }

    /// Sets the latest accepted instant from a raw value.
    ///
    /// A value that does not parse leaves the bound unset.
    pub fn max_date_from(mut self, max: &Value) -> Self {
        self.max_date = parse_instant(max);
        self
    }

    /// Overrides failure messages.
    pub fn messages(mut self, messages: DateMessages) -> Self {
        self.messages = messages;
        self
    }
}

/// Validates dates.
///
/// Check order: format, combined range, minimum, maximum. Values are
/// compared as instants, so `"2023-08-19T00:00:00+03:00"` and
/// `"2023-08-18 21:00"` are equal.
///
/// # Example
///
/// ```rust
/// use formrules::{DateConfig, DateValidator};
/// use serde_json::json;
///
/// let validator = DateValidator::new(
///     DateConfig::new()
///         .min_date_from(&json!("2023.07.15"))
///         .max_date_from(&json!("2023.09.10")),
/// );
///
/// assert!(validator.validate(&json!("2023.08.19")).valid);
/// assert!(!validator.validate(&json!("2023.10.01")).valid);
/// assert!(!validator.validate(&json!("abc")).valid);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DateValidator {
    config: DateConfig,
}

impl DateValidator {
    /// Creates a validator from its configuration.
    pub fn new(config: DateConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this validator was built with.
    pub fn config(&self) -> &DateConfig {
        &self.config
    }

    /// Validates a value against this validator's bounds.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        let config = &self.config;
        let messages = &config.messages;

        let Some(instant) = parse_instant(value) else {
            return ValidationResult::fail(resolve(messages.invalid_format.as_ref(), &(), value));
        };

        if let (Some(min), Some(max)) = (config.min_date, config.max_date) {
            if instant < min || instant > max {
                return ValidationResult::fail(resolve(
                    messages.invalid_range.as_ref(),
                    &(min, max),
                    value,
                ));
            }
        }

        if let Some(min) = config.min_date {
            if instant < min {
                return ValidationResult::fail(resolve(
                    messages.invalid_min_date.as_ref(),
                    &min,
                    value,
                ));
            }
        }

        if let Some(max) = config.max_date {
            if instant > max {
                return ValidationResult::fail(resolve(
                    messages.invalid_max_date.as_ref(),
                    &max,
                    value,
                ));
            }
        }

        ValidationResult::pass()
    }
}

impl Validator for DateValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        DateValidator::validate(self, value)
    }
}

/// Two-stage constructor for [`DateValidator`].
#[derive(Debug, Clone, Default)]
pub struct DateValidatorFactory {
    defaults: DateMessages,
}

impl DateValidatorFactory {
    /// Creates a factory with the given default messages.
    pub fn new(defaults: DateMessages) -> Self {
        Self { defaults }
    }
}

impl ValidatorFactory for DateValidatorFactory {
    type Config = DateConfig;
    type Output = DateValidator;

    fn create(&self, mut config: DateConfig) -> DateValidator {
        config.messages = config.messages.or_defaults(&self.defaults);
        DateValidator::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse_instant(&json!(0)), Some(utc(1970, 1, 1, 0, 0, 0)));
        assert_eq!(
            parse_instant(&json!("12.08.2023")),
            Some(utc(2023, 12, 8, 0, 0, 0))
        );
        assert_eq!(
            parse_instant(&json!("2023.08.19 14:00")),
            Some(utc(2023, 8, 19, 14, 0, 0))
        );
        assert_eq!(
            parse_instant(&json!(
                "Tue Dec 12 2023 14:33:12 GMT+0200 (Eastern European Standard Time)"
            )),
            Some(utc(2023, 12, 12, 12, 33, 12))
        );
        assert_eq!(
            parse_instant(&json!("2023-08-19T00:00:00+03:00")),
            Some(utc(2023, 8, 18, 21, 0, 0))
        );
    }

    #[test]
    fn test_rejects_unparseable() {
        for value in [
            json!(true),
            json!(null),
            json!({}),
            json!([]),
            json!(""),
            json!("abc"),
            json!("19/12/2023"),
            json!("19-12-2023"),
            json!("2023-19-12"),
            json!(1e300),
        ] {
            assert!(parse_instant(&value).is_none(), "{value}");
        }
    }

    #[test]
    fn test_range_before_single_bounds() {
        let validator = DateValidator::new(
            DateConfig::new()
                .min_date(utc(2023, 7, 15, 0, 0, 0))
                .max_date(utc(2023, 9, 10, 0, 0, 0))
                .messages(DateMessages {
                    invalid_range: Some("range".into()),
                    invalid_min_date: Some("min".into()),
                    invalid_max_date: Some("max".into()),
                    ..Default::default()
                }),
        );

        assert!(validator.validate(&json!("2023.09.10")).valid);
        assert_eq!(
            validator.validate(&json!("2023.01.01")).message.as_deref(),
            Some("range")
        );
    }

    #[test]
    fn test_single_bounds() {
        let min = DateValidator::new(
            DateConfig::new().min_date_from(&json!(1692442800000_i64)),
        );
        assert!(!min.validate(&json!(1692392400000_i64)).valid);
        assert!(min.validate(&json!(1692442800000_i64)).valid);

        let max = DateValidator::new(DateConfig::new().max_date_from(&json!(1692392400000_i64)));
        assert!(!max.validate(&json!("2023.08.19 14:00")).valid);
    }

    #[test]
    fn test_unparseable_bounds_are_ignored() {
        let validator = DateValidator::new(
            DateConfig::new()
                .min_date_from(&json!("abc"))
                .max_date_from(&json!(true)),
        );
        assert!(validator.validate(&json!("2023.08.19")).valid);
    }

    #[test]
    fn test_bound_messages_receive_bounds() {
        let validator = DateValidator::new(
            DateConfig::new()
                .min_date(utc(2023, 8, 19, 0, 0, 0))
                .messages(DateMessages {
                    invalid_min_date: Some(Message::computed(|min: &DateTime<Utc>, v: &Value| {
                        format!("{} is before {}", v, min.format("%Y-%m-%d"))
                    })),
                    ..Default::default()
                }),
        );

        assert_eq!(
            validator.validate(&json!("2023-08-01")).message.as_deref(),
            Some("\"2023-08-01\" is before 2023-08-19")
        );
    }
}
