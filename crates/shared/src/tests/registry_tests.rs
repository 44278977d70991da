use super::*;

fn field_summary(schema: &FormSchema) -> Vec<(&str, &str, bool)> {
    schema
        .fields()
        .iter()
        .map(|field| (field.name.as_str(), field.label.as_str(), field.required))
        .collect()
}

fn field<'a>(schema: &'a FormSchema, name: &str) -> &'a FieldDescriptor {
    schema
        .fields()
        .iter()
        .find(|field| field.name == name)
        .unwrap_or_else(|| panic!("no field named {name}"))
}

#[test]
fn lists_the_three_form_types_in_declaration_order() {
    let types: Vec<_> = SchemaRegistry::global().form_types().collect();
    assert_eq!(
        types,
        vec![
            FormType::UserInformation,
            FormType::AddressInformation,
            FormType::PaymentInformation,
        ]
    );
}

#[test]
fn user_information_schema_matches_builtin_fields() {
    let schema = SchemaRegistry::global()
        .lookup("userInformation")
        .expect("user schema");
    assert_eq!(
        field_summary(schema),
        vec![
            ("firstName", "First Name", true),
            ("lastName", "Last Name", true),
            ("age", "Age", false),
        ]
    );
    assert_eq!(schema.fields()[2].kind, FieldKind::Number);
}

#[test]
fn address_schema_carries_state_dropdown_options() {
    let schema = SchemaRegistry::global()
        .lookup("addressInformation")
        .expect("address schema");
    assert_eq!(
        field_summary(schema),
        vec![
            ("street", "Street", true),
            ("city", "City", true),
            ("state", "State", true),
            ("zipCode", "Zip Code", false),
        ]
    );
    let state = field(schema, "state");
    assert_eq!(state.kind.options(), ["California", "Texas", "New York"]);
}

#[test]
fn payment_schema_requires_every_field() {
    let schema = SchemaRegistry::global()
        .lookup("paymentInformation")
        .expect("payment schema");
    let kinds: Vec<_> = schema.fields().iter().map(|f| f.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            FieldKind::Text,
            FieldKind::Date,
            FieldKind::Password,
            FieldKind::Text,
        ]
    );
    assert!(schema.fields().iter().all(|field| field.required));
    assert_eq!(field(schema, "cvv").label, "CVV");
}

#[test]
fn unknown_and_empty_keys_are_not_found() {
    let registry = SchemaRegistry::global();
    assert!(registry.lookup("").is_none());
    assert!(registry.lookup("shippingInformation").is_none());
    assert!(registry.lookup("UserInformation").is_none());
}

#[test]
fn builtin_schemas_pass_uniqueness_check() {
    for form in SchemaRegistry::global().forms() {
        FormSchema::new(form.schema.fields().to_vec()).expect("unique field names");
    }
}
