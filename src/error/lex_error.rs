use crate::error::Status;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while tokenizing source text.
///
/// Lexing stops at the first error; the tokens produced up to that point are
/// still returned to the caller alongside it.
pub enum LexError {
    /// An operator character directly followed another operator character
    /// without forming a two-character operator (e.g. `1 ++ 2`).
    TwoOperatorsInARow {
        /// The operator text that was in progress.
        previous: String,
        /// The offending character.
        found:    char,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A character that belongs to no token class.
    InvalidChar {
        /// The offending character.
        found: char,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl LexError {
    /// Maps the error onto the shared status taxonomy.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::TwoOperatorsInARow { .. } => Status::SyntaxError,
            Self::InvalidChar { .. } => Status::InvalidChar,
        }
    }

    /// The source line where the error occurred.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::TwoOperatorsInARow { line, .. } | Self::InvalidChar { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TwoOperatorsInARow { previous, found, line } => write!(f,
                                                                        "Error on line {line}: Two operators in a row: '{previous}' followed by '{found}'."),
            Self::InvalidChar { found, line } => {
                write!(f, "Error on line {line}: Invalid character '{}'.", found.escape_default())
            },
        }
    }
}

impl std::error::Error for LexError {}
