//! Pure view-models for the active form and the submission table.

use shared::{Draft, FieldKind, SchemaRegistry, SubmissionEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldControl {
    Choice {
        placeholder: String,
        options: Vec<String>,
        selected: String,
    },
    /// Text-like input; `kind` only changes presentation.
    Input { kind: FieldKind, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub name: String,
    pub label: String,
    pub required: bool,
    pub control: FieldControl,
    /// The current validation message. Attached to every field of the form,
    /// not only to the ones that are missing.
    pub error: Option<String>,
}

impl RenderedField {
    pub fn value(&self) -> &str {
        match &self.control {
            FieldControl::Choice { selected, .. } => selected,
            FieldControl::Input { value, .. } => value,
        }
    }
}

/// One labeled control per field of the selected schema. Nothing for no or
/// an unknown selection.
pub fn render(
    registry: &SchemaRegistry,
    selection: Option<&str>,
    draft: &Draft,
    error: Option<&str>,
) -> Vec<RenderedField> {
    let Some(schema) = selection.and_then(|key| registry.lookup(key)) else {
        return Vec::new();
    };

    schema
        .fields()
        .iter()
        .map(|field| {
            let value = draft.get(&field.name).cloned().unwrap_or_default();
            let control = match &field.kind {
                FieldKind::Dropdown { options } => FieldControl::Choice {
                    placeholder: format!("Select {}", field.label),
                    options: options.clone(),
                    selected: value,
                },
                kind => FieldControl::Input {
                    kind: kind.clone(),
                    value,
                },
            };
            RenderedField {
                name: field.name.clone(),
                label: field.label.clone(),
                required: field.required,
                control,
                error: error.map(str::to_string),
            }
        })
        .collect()
}

pub fn render_state(registry: &SchemaRegistry, state: &crate::FormState) -> Vec<RenderedField> {
    render(registry, state.selection(), state.draft(), state.error())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub index: usize,
    /// Compact JSON object, keys in stored order.
    pub data: String,
}

pub fn log_rows(log: &[SubmissionEntry]) -> Vec<LogRow> {
    log.iter()
        .enumerate()
        .map(|(index, entry)| LogRow {
            index,
            data: entry_json(entry),
        })
        .collect()
}

fn entry_json(entry: &SubmissionEntry) -> String {
    // A map of strings always serializes.
    serde_json::to_string(entry).unwrap_or_else(|_| String::from("{}"))
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
