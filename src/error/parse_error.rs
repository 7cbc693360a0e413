use crate::error::Status;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while building the syntax tree.
pub enum ParseError {
    /// More than one operand was left once every operator had been reduced
    /// (e.g. `3 4`).
    UnreducedExpression {
        /// The number of operands left on the stack.
        operands: usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An operator had fewer than two operands to reduce with.
    MissingOperand {
        /// The operator lacking an operand.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// What the parser was looking for.
        expected: &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reached the end of a line or of the input unexpectedly.
    UnexpectedEnd {
        /// What the parser was looking for.
        expected: &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A parser resource bound was exceeded.
    TooComplex {
        /// Which bound was hit.
        resource: &'static str,
        /// The configured bound.
        limit:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A number token that is not a valid floating-point literal
    /// (e.g. `1.2.3`).
    InvalidNumber {
        /// The offending literal.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl ParseError {
    /// Maps the error onto the shared status taxonomy.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::UnreducedExpression { .. } | Self::InvalidNumber { .. } => Status::SyntaxError,
            Self::MissingOperand { .. } | Self::UnexpectedEnd { .. } => Status::UnexpectedEnd,
            Self::UnexpectedToken { .. } => Status::UnexpectedToken,
            Self::TooComplex { .. } => Status::TooComplexGrammar,
        }
    }

    /// The source line where the error occurred.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnreducedExpression { line, .. }
            | Self::MissingOperand { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEnd { line, .. }
            | Self::TooComplex { line, .. }
            | Self::InvalidNumber { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnreducedExpression { operands, line } => write!(f,
                                                                   "Error on line {line}: Expression did not reduce to a single value ({operands} operands left)."),
            Self::MissingOperand { operator, line } => {
                write!(f, "Error on line {line}: Operator '{operator}' is missing an operand.")
            },
            Self::UnexpectedToken { token, expected, line } => write!(f,
                                                                      "Error on line {line}: Unexpected token '{token}', expected {expected}."),
            Self::UnexpectedEnd { expected, line } => {
                write!(f, "Error on line {line}: Unexpected end of input, expected {expected}.")
            },
            Self::TooComplex { resource, limit, line } => write!(f,
                                                                 "Error on line {line}: Grammar too complex: more than {limit} {resource}."),
            Self::InvalidNumber { literal, line } => {
                write!(f, "Error on line {line}: Invalid number literal '{literal}'.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
