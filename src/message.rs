//! Failure message specifications.
//!
//! Each failure kind of a validator can carry a [`Message`]: either literal
//! text or a function of the failing parameters and the offending value.
//! [`resolve`] turns an optional specification into the final text.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

type ComputeFn<P> = dyn Fn(&P, &Value) -> String + Send + Sync;

/// A message for one failure kind.
///
/// `P` is the parameter shape of that failure kind: `()` for format errors,
/// `f64` for a single numeric bound, `(f64, f64)` for a combined range, and
/// so on.
///
/// # Example
///
/// ```rust
/// use formrules::Message;
/// use serde_json::json;
///
/// let literal: Message<f64> = Message::literal("too small");
/// assert_eq!(literal.render(&5.0, &json!(3)), "too small");
///
/// let computed: Message<f64> = Message::computed(|min, value| {
///     format!("{} must be at least {}", value, min)
/// });
/// assert_eq!(computed.render(&5.0, &json!(3)), "3 must be at least 5");
/// ```
pub enum Message<P> {
    /// Fixed text, returned verbatim.
    Literal(String),
    /// Text computed from the failing parameters and the offending value.
    Computed(Arc<ComputeFn<P>>),
}

impl<P> Message<P> {
    /// Creates a literal message.
    pub fn literal(text: impl Into<String>) -> Self {
        Message::Literal(text.into())
    }

    /// Creates a message computed from the failing parameters and value.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&P, &Value) -> String + Send + Sync + 'static,
    {
        Message::Computed(Arc::new(f))
    }

    /// Produces the message text for the given parameters and value.
    pub fn render(&self, params: &P, value: &Value) -> String {
        match self {
            Message::Literal(text) => text.clone(),
            Message::Computed(f) => f(params, value),
        }
    }
}

impl<P> Clone for Message<P> {
    fn clone(&self) -> Self {
        match self {
            Message::Literal(text) => Message::Literal(text.clone()),
            Message::Computed(f) => Message::Computed(Arc::clone(f)),
        }
    }
}

impl<P> fmt::Debug for Message<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Message::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<P> From<&str> for Message<P> {
    fn from(text: &str) -> Self {
        Message::literal(text)
    }
}

impl<P> From<String> for Message<P> {
    fn from(text: String) -> Self {
        Message::Literal(text)
    }
}

/// Resolves an optional message specification.
///
/// An absent or empty literal yields `None`.
pub fn resolve<P>(message: Option<&Message<P>>, params: &P, value: &Value) -> Option<String> {
    match message? {
        Message::Literal(text) if text.is_empty() => None,
        spec => Some(spec.render(params, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_message_resolves_to_none() {
        assert_eq!(resolve::<()>(None, &(), &json!(1)), None);
    }

    #[test]
    fn test_empty_literal_resolves_to_none() {
        let message: Message<()> = Message::literal("");
        assert_eq!(resolve(Some(&message), &(), &json!(1)), None);
    }

    #[test]
    fn test_literal_ignores_params() {
        let message: Message<(f64, f64)> = "out of range".into();
        assert_eq!(
            resolve(Some(&message), &(1.0, 2.0), &json!(3)),
            Some("out of range".to_string())
        );
    }

    #[test]
    fn test_computed_receives_params_and_value() {
        let message: Message<(f64, f64)> =
            Message::computed(|(min, max), value| format!("{value} not in {min}..{max}"));
        assert_eq!(
            resolve(Some(&message), &(1.0, 2.0), &json!(3)),
            Some("3 not in 1..2".to_string())
        );
    }

    #[test]
    fn test_clone_shares_function() {
        let message: Message<()> = Message::computed(|_, _| "x".to_string());
        let cloned = message.clone();
        assert_eq!(cloned.render(&(), &json!(null)), "x");
        assert_eq!(format!("{:?}", cloned), "Computed(..)");
    }
}
