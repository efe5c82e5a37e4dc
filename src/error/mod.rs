//! Error types.
//!
//! Two channels are kept apart: configuration mistakes ([`BuilderError`],
//! [`PatternError`]) are returned as `Err` where they happen, while data that
//! fails validation is reported through [`FieldError`].

mod builder_error;
mod field_error;

pub use builder_error::{BuilderError, PatternError};
pub use field_error::FieldError;
