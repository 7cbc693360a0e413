use crate::error::Status;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
///
/// None of these corrupt the environment: bindings written before the fault
/// stay in place and the session may keep evaluating further input.
pub enum RuntimeError {
    /// The left-hand side of an assignment was not a plain identifier
    /// (e.g. `2 + 3 = 4`).
    AssignmentTarget {
        /// The assignment operator.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Tried to read a variable that was never assigned.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An assignment produced a NaN.
    NotANumber {
        /// The name of the variable being assigned.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a name that matches no builtin.
    UnresolvedBuiltin {
        /// The name used at the call site.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An operator without binary semantics (e.g. `!`).
    UnknownOperator {
        /// The operator.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Evaluation reached a node that marks a parse failure or an absent
    /// expression.
    FaultedExpression {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The program requested cancellation through `exit()` or by aborting
    /// `input()`.
    Interrupted,
}

impl RuntimeError {
    /// Maps the error onto the shared status taxonomy.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::UnknownVariable { .. } | Self::NotANumber { .. } => Status::MathError,
            Self::Interrupted => Status::KeyboardInterrupt,
            Self::AssignmentTarget { .. }
            | Self::UnresolvedBuiltin { .. }
            | Self::UnknownOperator { .. }
            | Self::FaultedExpression { .. } => Status::RuntimeError,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AssignmentTarget { operator, line } => write!(f,
                                                                "Error on line {line}: Assignment target of '{operator}' must be an identifier."),
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Unknown variable '{name}'.")
            },
            Self::NotANumber { name, line } => write!(f,
                                                      "Error on line {line}: Assigning NaN to '{name}', this may be an illegal operation."),
            Self::UnresolvedBuiltin { name, line } => {
                write!(f, "Error on line {line}: Unknown function '{name}'.")
            },
            Self::UnknownOperator { operator, line } => {
                write!(f, "Error on line {line}: Unknown operator '{operator}'.")
            },
            Self::FaultedExpression { line } => {
                write!(f, "Error on line {line}: Uncaught error in expression.")
            },
            Self::Interrupted => write!(f, "Interrupted."),
        }
    }
}

impl std::error::Error for RuntimeError {}
