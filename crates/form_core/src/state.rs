use shared::{Draft, FormSchema, SchemaRegistry, SubmissionEntry};

/// Everything one form session owns. Mutated only through [`crate::reduce`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub(crate) selection: Option<String>,
    pub(crate) draft: Draft,
    pub(crate) error: Option<String>,
    pub(crate) log: Vec<SubmissionEntry>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected form-type key. May name a form the registry does not know.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Draft value for display; absent fields read as empty.
    pub fn value(&self, name: &str) -> &str {
        self.draft.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn log(&self) -> &[SubmissionEntry] {
        &self.log
    }

    pub fn active_schema<'r>(&self, registry: &'r SchemaRegistry) -> Option<&'r FormSchema> {
        self.selection().and_then(|key| registry.lookup(key))
    }
}
