use crate::Variable;
use thiserror::Error;

/// Errors raised while parsing, evaluating or minimizing a Boolean expression.
///
/// None of them is recoverable for the request that raised it: the pipeline stops
/// and the error is returned to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoolminError {
    /// The expression text is malformed
    #[error("Syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    /// The evaluation context does not provide a value for this variable
    #[error("No value for variable {0} in this context")]
    UnboundVariable(Variable),

    /// The expression is false for every assignment
    #[error("The expression has no satisfying assignment")]
    NoSatisfyingAssignment,

    /// The truth table would be too large
    #[error("{count} variables exceed the limit of {max}")]
    TooManyVariables { count: usize, max: usize },

    /// The name is invalid
    #[error("The name '{0}' is invalid")]
    InvalidName(String),

    /// The name is not part of the set of variables
    #[error("There is no variable named '{0}'")]
    NoSuchVariableName(String),

    /// The pattern description is invalid
    #[error("Not a valid pattern: '{0}'")]
    InvalidPattern(String),
}

impl BoolminError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }
}
