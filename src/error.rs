use thiserror::Error;

pub type ExprResult<T> = Result<T, ExprError>;

/// Errors recorded while parsing, evaluating or sampling an expression.
///
/// Offsets are character (not byte) positions into the expression text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("syntax error at position {position}: {message}")]
    Syntax { message: String, position: usize },

    #[error("unknown identifier '{name}' at position {position}")]
    UnknownIdentifier { name: String, position: usize },

    #[error("unknown function '{name}' at position {position}")]
    UnknownFunction { name: String, position: usize },

    #[error("'{name}' at position {position} is not a function")]
    NotAFunction { name: String, position: usize },

    #[error("function '{name}' at position {position} is used without arguments")]
    MissingArguments { name: String, position: usize },

    #[error("function '{name}' expects {expected} argument(s), got {found} (position {position})")]
    ArgumentCount {
        name: String,
        expected: usize,
        found: usize,
        position: usize,
    },

    #[error("function '{name}' can only be used in column expressions (position {position})")]
    ColumnFunction { name: String, position: usize },

    #[error("invalid sample count {0}, expected at least 1")]
    InvalidSampleCount(usize),

    #[error("invalid range bound '{expression}': {reason}")]
    InvalidRange { expression: String, reason: String },

    #[error("output buffers hold {available} entries, {required} required")]
    LengthMismatch { required: usize, available: usize },
}

impl ExprError {
    /// Character offset of the error inside the expression, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            ExprError::Syntax { position, .. }
            | ExprError::UnknownIdentifier { position, .. }
            | ExprError::UnknownFunction { position, .. }
            | ExprError::NotAFunction { position, .. }
            | ExprError::MissingArguments { position, .. }
            | ExprError::ArgumentCount { position, .. }
            | ExprError::ColumnFunction { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>, position: usize) -> Self {
        ExprError::Syntax {
            message: message.into(),
            position,
        }
    }
}
