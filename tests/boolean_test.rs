//! Integration tests for boolean validation.

use formrules::{BooleanConfig, BooleanMessages, BooleanValidatorFactory, Message, ValidatorFactory};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

#[rstest]
#[case(false, json!(true), true)]
#[case(false, json!(false), true)]
#[case(false, json!("true"), false)]
#[case(false, json!(1), false)]
#[case(false, json!(null), false)]
#[case(true, json!("true"), true)]
#[case(true, json!("false"), true)]
#[case(true, json!("True"), false)]
#[case(true, json!("yes"), false)]
#[case(true, json!(0), false)]
fn test_accepted_values(#[case] allow_string: bool, #[case] value: Value, #[case] valid: bool) {
    let validator = BooleanValidatorFactory::default()
        .create(BooleanConfig::new().allow_string(allow_string));
    assert_eq!(validator.validate(&value).valid, valid);
}

#[test]
fn test_message_receives_value() {
    let factory = BooleanValidatorFactory::new(BooleanMessages {
        invalid_format: Some(Message::computed(|_, value| format!("{} is not a boolean", value))),
    });

    assert_eq!(
        factory.create_default().validate(&json!(1)).message.as_deref(),
        Some("1 is not a boolean")
    );
    assert_eq!(
        factory
            .create(BooleanConfig::new().messages(BooleanMessages {
                invalid_format: Some(Message::literal("nope")),
            }))
            .validate(&json!("x"))
            .message
            .as_deref(),
        Some("nope")
    );
}
