//! Applies one user action to a [`FormState`] and reports what the caller should surface.

use serde::{Deserialize, Serialize};
use shared::{FormError, SchemaRegistry};
use tracing::{debug, info, warn};

use crate::state::FormState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FormAction {
    /// Empty key clears the selection.
    SelectForm { key: String },
    SetField { name: String, value: String },
    Submit,
    Edit { index: usize },
    Delete { index: usize },
}

impl FormAction {
    pub fn name(&self) -> &'static str {
        match self {
            FormAction::SelectForm { .. } => "select_form",
            FormAction::SetField { .. } => "set_field",
            FormAction::Submit => "submit",
            FormAction::Edit { .. } => "edit",
            FormAction::Delete { .. } => "delete",
        }
    }
}

/// One-time notice shown to the user after a successful action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    Submitted,
    Deleted,
}

impl Acknowledgement {
    pub fn message(self) -> &'static str {
        match self {
            Acknowledgement::Submitted => "Form submitted successfully!",
            Acknowledgement::Deleted => "Entry deleted successfully",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Acknowledged(Acknowledgement),
    /// The state was left unchanged, apart from the validation message for
    /// [`FormError::MissingRequiredFields`].
    Rejected(FormError),
    /// Submit with no known form selected.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: FormState,
    pub outcome: Outcome,
}

impl Transition {
    fn new(state: FormState, outcome: Outcome) -> Self {
        Self { state, outcome }
    }
}

pub fn reduce(registry: &SchemaRegistry, state: FormState, action: FormAction) -> Transition {
    debug!(action = action.name(), "reducing form action");
    match action {
        FormAction::SelectForm { key } => select_form(registry, state, key),
        FormAction::SetField { name, value } => set_field(state, name, value),
        FormAction::Submit => submit(registry, state),
        FormAction::Edit { index } => edit(state, index),
        FormAction::Delete { index } => delete(state, index),
    }
}

fn select_form(registry: &SchemaRegistry, mut state: FormState, key: String) -> Transition {
    if !key.is_empty() && registry.lookup(&key).is_none() {
        warn!(key = %key, "selected unknown form type; nothing will render");
    }
    state.selection = (!key.is_empty()).then_some(key);
    state.draft.clear();
    state.error = None;
    Transition::new(state, Outcome::Applied)
}

fn set_field(mut state: FormState, name: String, value: String) -> Transition {
    state.draft.insert(name, value);
    Transition::new(state, Outcome::Applied)
}

fn submit(registry: &SchemaRegistry, mut state: FormState) -> Transition {
    let Some(schema) = state.active_schema(registry) else {
        debug!("submit without a known form selected; ignoring");
        return Transition::new(state, Outcome::Ignored);
    };

    let missing: Vec<String> = schema
        .missing_required(&state.draft)
        .into_iter()
        .map(|field| field.name.clone())
        .collect();
    if !missing.is_empty() {
        let err = FormError::MissingRequiredFields { missing };
        debug!(error = ?err, "submit rejected");
        state.error = err.user_message().map(str::to_string);
        return Transition::new(state, Outcome::Rejected(err));
    }

    let entry = std::mem::take(&mut state.draft);
    state.log.push(entry);
    state.error = None;
    info!(entries = state.log.len(), "form submitted");
    Transition::new(state, Outcome::Acknowledged(Acknowledgement::Submitted))
}

fn edit(mut state: FormState, index: usize) -> Transition {
    if index >= state.log.len() {
        return out_of_range(state, index);
    }
    // Read and removal happen together so the index refers to the same entry.
    state.draft = state.log.remove(index);
    debug!(index, "moved submitted entry back into draft");
    Transition::new(state, Outcome::Applied)
}

fn delete(mut state: FormState, index: usize) -> Transition {
    if index >= state.log.len() {
        return out_of_range(state, index);
    }
    state.log.remove(index);
    info!(index, entries = state.log.len(), "submitted entry deleted");
    Transition::new(state, Outcome::Acknowledged(Acknowledgement::Deleted))
}

fn out_of_range(state: FormState, index: usize) -> Transition {
    let err = FormError::EntryOutOfRange {
        index,
        len: state.log.len(),
    };
    warn!(%err, "ignoring log action");
    Transition::new(state, Outcome::Rejected(err))
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
