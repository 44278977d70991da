pub mod domain;
pub mod error;
pub mod registry;

pub use domain::{Draft, FieldDescriptor, FieldKind, FieldValues, FormSchema, FormType, SubmissionEntry};
pub use error::{FormError, REQUIRED_FIELDS_MESSAGE};
pub use registry::SchemaRegistry;
