/// Lexing errors.
///
/// Defines the errors raised while splitting source text into tokens: two
/// operator characters in a row and characters outside the alphabet.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree,
/// including unreduced expressions, unexpected tokens and exceeded resource
/// bounds.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// reading unknown variables or assigning to something that is not an
/// identifier.
pub mod runtime_error;
/// The status taxonomy shared by all stages.
pub mod status;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use status::Status;

/// Any error produced by one of the three stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The lexer rejected the source.
    Lex(LexError),
    /// The parser rejected the token stream.
    Parse(ParseError),
    /// Evaluation failed or was cancelled.
    Runtime(RuntimeError),
}

impl Error {
    /// Maps the error onto the shared status taxonomy.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Lex(e) => e.status(),
            Self::Parse(e) => e.status(),
            Self::Runtime(e) => e.status(),
        }
    }

    /// Returns `true` if the error is a cooperative cancellation rather than
    /// a failure.
    #[must_use]
    pub const fn is_interrupt(&self) -> bool {
        matches!(self.status(), Status::KeyboardInterrupt)
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}

/// The best-effort output of one stage together with its first error.
///
/// A stage never aborts without output: the lexer returns the tokens produced
/// before the fault and the parser returns the statements completed before
/// it. Hosts that only care about success use [`Outcome::into_result`].
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T, E> {
    /// What the stage produced, possibly partial.
    pub output: T,
    /// The first error the stage encountered.
    pub error:  Option<E>,
}

impl<T, E> Outcome<T, E> {
    /// Wraps a complete, error-free output.
    pub const fn ok(output: T) -> Self {
        Self { output, error: None }
    }

    /// Wraps a partial output together with the error that stopped the stage.
    pub const fn failed(output: T, error: E) -> Self {
        Self { output,
               error: Some(error) }
    }

    /// Returns `true` if the stage reported no error.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Discards the partial output on failure.
    ///
    /// # Errors
    /// Returns the stage's error if one was recorded.
    pub fn into_result(self) -> Result<T, E> {
        match self.error {
            None => Ok(self.output),
            Some(e) => Err(e),
        }
    }
}
