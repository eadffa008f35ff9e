use std::fmt;

/// Fatal compilation error
///
/// Returned by the schema compiler when a fragment cannot be turned into a
/// class model. Any of these aborts the whole pass: a partially built model
/// set is never rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A fragment lacks the information needed to classify or name it
    ///
    /// Raised for fragments without `$ref`/`enum`/`oneOf`/`type`, for enum and
    /// union fragments without a `title`, and for structurally invalid values
    /// (e.g. a non-string `type`).
    MalformedFragment {
        /// Location of the fragment inside the schema document
        location: String,
        /// What is missing or wrong
        reason: String,
    },
    /// A property or union branch asked for an adapter the registry does not know
    UnresolvableAdapter {
        /// Location of the property or branch
        location: String,
        /// The adapter name that failed to resolve
        adapter: String,
    },
}

impl CompileError {
    pub(crate) fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        CompileError::MalformedFragment {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Location of the fragment that caused the error
    pub fn location(&self) -> &str {
        match self {
            CompileError::MalformedFragment { location, .. }
            | CompileError::UnresolvableAdapter { location, .. } => location,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::MalformedFragment { location, reason } => {
                write!(f, "malformed schema fragment at '{}': {}", location, reason)
            }
            CompileError::UnresolvableAdapter { location, adapter } => {
                write!(
                    f,
                    "invalid adapter '{}' requested at '{}': no such adapter is registered",
                    adapter, location
                )
            }
        }
    }
}

impl std::error::Error for CompileError {}
