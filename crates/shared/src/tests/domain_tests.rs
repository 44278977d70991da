use super::*;
use crate::error::REQUIRED_FIELDS_MESSAGE;

fn values(pairs: &[(&str, &str)]) -> FieldValues {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn sample_schema() -> FormSchema {
    FormSchema::new(vec![
        FieldDescriptor::new("first", FieldKind::Text, "First", true),
        FieldDescriptor::new("note", FieldKind::Text, "Note", false),
        FieldDescriptor::new(
            "color",
            FieldKind::Dropdown {
                options: vec!["Red".to_string()],
            },
            "Color",
            true,
        ),
    ])
    .expect("schema")
}

#[test]
fn rejects_duplicate_field_names() {
    let err = FormSchema::new(vec![
        FieldDescriptor::new("a", FieldKind::Text, "A", true),
        FieldDescriptor::new("a", FieldKind::Number, "A again", false),
    ])
    .expect_err("duplicate");
    assert_eq!(err, FormError::DuplicateField("a".to_string()));
}

#[test]
fn absent_and_empty_required_values_are_missing() {
    let schema = sample_schema();
    let missing: Vec<_> = schema
        .missing_required(&values(&[("first", "")]))
        .into_iter()
        .map(|field| field.name.as_str())
        .collect();
    assert_eq!(missing, vec!["first", "color"]);
}

#[test]
fn whitespace_and_off_list_values_count_as_present() {
    let schema = sample_schema();
    let draft = values(&[("first", " "), ("color", "Chartreuse")]);
    assert!(schema.missing_required(&draft).is_empty());
}

#[test]
fn parses_form_type_keys_exactly() {
    assert_eq!(
        "paymentInformation".parse::<FormType>(),
        Ok(FormType::PaymentInformation)
    );
    assert_eq!(
        "payment".parse::<FormType>(),
        Err(FormError::UnknownFormType("payment".to_string()))
    );
    assert_eq!(FormType::AddressInformation.label(), "Address Information");
}

#[test]
fn serializes_dropdown_descriptor_with_type_tag() {
    let field = FieldDescriptor::new(
        "state",
        FieldKind::Dropdown {
            options: vec!["Texas".to_string()],
        },
        "State",
        true,
    );
    let json = serde_json::to_value(&field).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "name": "state",
            "type": "dropdown",
            "options": ["Texas"],
            "label": "State",
            "required": true,
        })
    );
}

#[test]
fn required_fields_error_displays_fixed_message() {
    let err = FormError::MissingRequiredFields {
        missing: vec!["firstName".to_string()],
    };
    assert_eq!(err.to_string(), "Please fill in all required fields.");
    assert_eq!(err.user_message(), Some(REQUIRED_FIELDS_MESSAGE));
}
