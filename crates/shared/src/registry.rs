//! Static form schemas keyed by form type.

use std::sync::LazyLock;

use crate::domain::{FieldDescriptor, FieldKind, FormSchema, FormType};

static BUILTIN: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::builtin);

#[derive(Debug, Clone)]
pub struct RegisteredForm {
    pub form_type: FormType,
    pub schema: FormSchema,
}

/// Read-only lookup from form-type key to schema.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    forms: Vec<RegisteredForm>,
}

impl SchemaRegistry {
    /// Process-wide registry, built on first use.
    pub fn global() -> &'static SchemaRegistry {
        &BUILTIN
    }

    fn builtin() -> Self {
        use FieldKind::{Date, Number, Password, Text};

        let forms = vec![
            RegisteredForm {
                form_type: FormType::UserInformation,
                schema: builtin_schema(vec![
                    FieldDescriptor::new("firstName", Text, "First Name", true),
                    FieldDescriptor::new("lastName", Text, "Last Name", true),
                    FieldDescriptor::new("age", Number, "Age", false),
                ]),
            },
            RegisteredForm {
                form_type: FormType::AddressInformation,
                schema: builtin_schema(vec![
                    FieldDescriptor::new("street", Text, "Street", true),
                    FieldDescriptor::new("city", Text, "City", true),
                    FieldDescriptor::new(
                        "state",
                        FieldKind::Dropdown {
                            options: vec![
                                "California".to_string(),
                                "Texas".to_string(),
                                "New York".to_string(),
                            ],
                        },
                        "State",
                        true,
                    ),
                    FieldDescriptor::new("zipCode", Text, "Zip Code", false),
                ]),
            },
            RegisteredForm {
                form_type: FormType::PaymentInformation,
                schema: builtin_schema(vec![
                    FieldDescriptor::new("cardNumber", Text, "Card Number", true),
                    FieldDescriptor::new("expiryDate", Date, "Expiry Date", true),
                    FieldDescriptor::new("cvv", Password, "CVV", true),
                    FieldDescriptor::new("cardholderName", Text, "Cardholder Name", true),
                ]),
            },
        ];

        Self { forms }
    }

    pub fn get(&self, form_type: FormType) -> Option<&FormSchema> {
        self.forms
            .iter()
            .find(|form| form.form_type == form_type)
            .map(|form| &form.schema)
    }

    /// Unknown keys, including the empty "no selection" key, yield `None`.
    pub fn lookup(&self, key: &str) -> Option<&FormSchema> {
        key.parse::<FormType>()
            .ok()
            .and_then(|form_type| self.get(form_type))
    }

    pub fn forms(&self) -> &[RegisteredForm] {
        &self.forms
    }

    pub fn form_types(&self) -> impl Iterator<Item = FormType> + '_ {
        self.forms.iter().map(|form| form.form_type)
    }
}

// Built-in field lists are fixed literals with distinct names; the tests
// re-check them through `FormSchema::new`.
fn builtin_schema(fields: Vec<FieldDescriptor>) -> FormSchema {
    FormSchema::from_trusted_fields(fields)
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
