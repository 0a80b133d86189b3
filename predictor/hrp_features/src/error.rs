use thiserror::Error;

/// Longest submitted value quoted back in an error, in characters.
const MAX_QUOTED_CHARS: usize = 32;

/// A submitted field that is absent or cannot be coerced to its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing field '{field}'")]
    Missing { field: String },
    #[error("field '{field}': cannot read {value:?} as {expected}")]
    Invalid {
        field: String,
        value: String,
        expected: String,
    },
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        ValidationError::Missing {
            field: field.into(),
        }
    }

    pub fn invalid(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        ValidationError::Invalid {
            field: field.into(),
            value: quoted(value.into()),
            expected: expected.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Missing { field } | ValidationError::Invalid { field, .. } => field,
        }
    }
}

fn quoted(mut value: String) -> String {
    if let Some((cut, _)) = value.char_indices().nth(MAX_QUOTED_CHARS) {
        value.truncate(cut);
        value.push('…');
    }
    value
}
