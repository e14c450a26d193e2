use thiserror::Error;

/// The one failure the classifier can report.
///
/// Lexical scanning is total, so every error originates at the oracle
/// boundary. No fallback label is ever substituted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("sentiment oracle unavailable: {reason}")]
    OracleUnavailable { reason: String },
}

impl ClassifyError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        ClassifyError::OracleUnavailable { reason: reason.into() }
    }
}

/// A label token that is not part of the wire vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sentiment label '{token}'")]
pub struct ParseLabelError {
    pub token: String,
}

impl From<ParseLabelError> for ClassifyError {
    fn from(err: ParseLabelError) -> Self {
        ClassifyError::unavailable(format!("oracle produced no usable label ({err})"))
    }
}
