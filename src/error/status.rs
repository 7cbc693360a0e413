/// The status taxonomy shared by every stage of the pipeline.
///
/// Each stage (lexing, parsing, evaluation) reports at most one error, and
/// every error maps onto exactly one `Status`. A host checks the status of a
/// stage before invoking the next one.
///
/// `Running` is the in-progress value a session holds while a stage is
/// executing; it is never produced by an error. `KeyboardInterrupt` is the
/// cooperative cancellation signal raised by `exit()` or an aborted `input()`
/// and is not a failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// The last stage completed without an error.
    Success,
    /// A stage is in progress.
    #[default]
    Running,
    /// Unclassified failure.
    Error,
    /// The source is malformed (e.g. two operators in a row, an unreduced
    /// expression).
    SyntaxError,
    /// A character outside the language's alphabet.
    InvalidChar,
    /// A token that cannot appear at its position.
    UnexpectedToken,
    /// The input ended where more tokens were required.
    UnexpectedEnd,
    /// A resource bound of the parser was exceeded.
    TooComplexGrammar,
    /// An evaluation fault, such as assigning to a non-identifier.
    RuntimeError,
    /// A numeric fault, such as reading an unassigned variable.
    MathError,
    /// Cooperative cancellation requested by the running program.
    KeyboardInterrupt,
}

impl Status {
    /// Returns `true` when a host may continue with the next stage.
    ///
    /// ## Example
    /// ```
    /// use winzig::error::Status;
    ///
    /// assert!(Status::Success.is_ok());
    /// assert!(Status::Running.is_ok());
    /// assert!(!Status::MathError.is_ok());
    /// ```
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Success | Self::Running)
    }

    /// Returns `true` for statuses that describe an actual failure.
    ///
    /// Cancellation is not a failure, so `KeyboardInterrupt` yields `false`.
    ///
    /// ## Example
    /// ```
    /// use winzig::error::Status;
    ///
    /// assert!(Status::MathError.is_failure());
    /// assert!(!Status::KeyboardInterrupt.is_failure());
    /// assert!(!Status::Success.is_failure());
    /// ```
    #[must_use]
    pub const fn is_failure(self) -> bool {
        !self.is_ok() && !matches!(self, Self::KeyboardInterrupt)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Success => "Success",
            Self::Running => "Running",
            Self::Error => "Error",
            Self::SyntaxError => "SyntaxError",
            Self::InvalidChar => "InvalidChar",
            Self::UnexpectedToken => "UnexpectedToken",
            Self::UnexpectedEnd => "UnexpectedEnd",
            Self::TooComplexGrammar => "TooComplexGrammar",
            Self::RuntimeError => "RuntimeError",
            Self::MathError => "MathError",
            Self::KeyboardInterrupt => "KeyboardInterrupt",
        };
        write!(f, "{name}")
    }
}
