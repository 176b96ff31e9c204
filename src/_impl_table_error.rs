use super::{TableError, MAX_VARIABLES};
use std::fmt::{Display, Formatter};

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            TableError::EmptyExpression => {
                write!(f, "The expression is empty.")
            }
            TableError::UnrecognizedToken { character, position } => {
                write!(
                    f,
                    "Unrecognized character {:?} at position {}.",
                    character, position
                )
            }
            TableError::TooFewVariables => {
                write!(
                    f,
                    "The expression contains no variables (expected at least one letter A-Z)."
                )
            }
            TableError::TooManyVariables { count } => {
                write!(
                    f,
                    "The expression uses {} distinct variables; at most {} are supported.",
                    count, MAX_VARIABLES
                )
            }
            TableError::Syntax { position, reason } => {
                write!(f, "Syntax error at position {}: {}.", position, reason)
            }
            TableError::Evaluation { reason } => {
                write!(
                    f,
                    "Evaluation failed ({}). This is a bug in the truth table pipeline.",
                    reason
                )
            }
        }
    }
}

impl std::error::Error for TableError {}
