//! Error types for parse and generate operations

/// Errors surfaced by the fallible FormDown entry points.
///
/// The primary entry points ([`crate::parse_formdown`], [`crate::generate_form_html`])
/// never fail; only the legacy [`crate::parse`], registry lookups and extension
/// validation return these.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormdownError {
    /// A field name was empty or started with a digit
    #[error("Invalid field name '{0}'")]
    InvalidFieldName(String),

    /// No renderer is registered for a field type
    #[error("Unknown field type '{0}'")]
    UnknownFieldType(String),

    /// An extension rejected a field
    #[error("Field '{field}': {message}")]
    Validation { field: String, message: String },
}
