use std::{collections::HashSet, fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Field name to raw string value, in the order the fields were first written.
pub type FieldValues = IndexMap<String, String>;

/// In-progress values for the selected form.
pub type Draft = FieldValues;

/// Snapshot of a draft taken at submit time.
pub type SubmissionEntry = FieldValues;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormType {
    UserInformation,
    AddressInformation,
    PaymentInformation,
}

impl FormType {
    pub const ALL: [FormType; 3] = [
        FormType::UserInformation,
        FormType::AddressInformation,
        FormType::PaymentInformation,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FormType::UserInformation => "userInformation",
            FormType::AddressInformation => "addressInformation",
            FormType::PaymentInformation => "paymentInformation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormType::UserInformation => "User Information",
            FormType::AddressInformation => "Address Information",
            FormType::PaymentInformation => "Payment Information",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormType::ALL
            .into_iter()
            .find(|form_type| form_type.key() == s)
            .ok_or_else(|| FormError::UnknownFormType(s.to_string()))
    }
}

/// Input kind of a field. Everything except the dropdown choices is a
/// presentation hint; values are always stored as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Password,
    Dropdown { options: Vec<String> },
}

impl FieldKind {
    pub fn options(&self) -> &[String] {
        match self {
            FieldKind::Dropdown { options } => options,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(name: &str, kind: FieldKind, label: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            label: label.to_string(),
            required,
        }
    }
}

/// Ordered field list of one form type. Field names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSchema {
    fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, FormError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(FormError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self { fields })
    }

    pub(crate) fn from_trusted_fields(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Required fields whose value is absent or the empty string.
    pub fn missing_required<'a>(&'a self, values: &FieldValues) -> Vec<&'a FieldDescriptor> {
        self.fields
            .iter()
            .filter(|field| field.required)
            .filter(|field| values.get(&field.name).is_none_or(|value| value.is_empty()))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
