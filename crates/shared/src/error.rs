use thiserror::Error;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The only condition ever shown to the user. The message does not name
    /// the missing fields; `missing` is kept for logging.
    #[error("{}", REQUIRED_FIELDS_MESSAGE)]
    MissingRequiredFields { missing: Vec<String> },
    #[error("unknown form type '{0}'")]
    UnknownFormType(String),
    #[error("no submitted entry at index {index} (log has {len} entries)")]
    EntryOutOfRange { index: usize, len: usize },
    #[error("duplicate field name '{0}' in form schema")]
    DuplicateField(String),
}

impl FormError {
    /// Message surfaced in the validation slot of the form.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            FormError::MissingRequiredFields { .. } => Some(REQUIRED_FIELDS_MESSAGE),
            _ => None,
        }
    }
}
