use tracing::{debug, warn};

use crate::{
    ast::{Block, Number},
    error::{Error, Status},
    interpreter::{
        environment::Environment,
        evaluator::{
            core::Interpreter,
            function::console::{Console, StdConsole},
        },
        lexer::tokenize_into,
        parser::core::{Limits, parse_with_limits},
        stream::TokenStream,
    },
};

/// Configuration of a [`Session`].
///
/// ## Example
/// ```
/// use winzig::{Limits, SessionOptions};
///
/// let options = SessionOptions::new().with_seed(42)
///                                    .with_limits(Limits { max_depth: 64,
///                                                          ..Limits::default() });
/// assert_eq!(options.seed, Some(42));
/// assert_eq!(options.limits.max_depth, 64);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Parser resource bounds.
    pub limits: Limits,
    /// Seed of the random source; `None` seeds from the OS.
    pub seed:   Option<u64>,
}

impl SessionOptions {
    /// The default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the parser limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Makes `random()` reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A calculator session.
///
/// Owns everything that outlives a single input: the token stream (reused
/// for every input), the environment and the interpreter. Each call to
/// [`run`](Self::run) lexes, parses and evaluates one input, stopping at the
/// first stage that fails, and records the resulting [`Status`].
///
/// ## Example
/// ```
/// use winzig::Session;
///
/// let mut session = Session::new();
/// assert_eq!(session.run("x = 5").unwrap(), 5.0);
/// assert_eq!(session.run("x * 2").unwrap(), 10.0);
///
/// assert!(session.run("y").is_err());
/// assert_eq!(session.status(), winzig::Status::MathError);
/// ```
pub struct Session {
    stream:      TokenStream,
    environment: Environment,
    interpreter: Interpreter,
    limits:      Limits,
    status:      Status,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session on standard I/O with the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default())
    }

    /// Creates a session on standard I/O.
    #[must_use]
    pub fn with_options(options: SessionOptions) -> Self {
        Self::with_console(Box::new(StdConsole::new()), options)
    }

    /// Creates a session whose `print` and `input` use `console`.
    #[must_use]
    pub fn with_console(console: Box<dyn Console>, options: SessionOptions) -> Self {
        let mut interpreter = Interpreter::with_console(console);
        if let Some(seed) = options.seed {
            interpreter = interpreter.with_seed(seed);
        }
        Self { stream: TokenStream::new(),
               environment: Environment::new(),
               interpreter,
               limits: options.limits,
               status: Status::Running }
    }

    /// Runs one input and returns the value of its last statement.
    ///
    /// # Errors
    /// The first lex, parse or runtime error. Later stages do not run once a
    /// stage has failed; variables assigned before a runtime error stay bound.
    pub fn run(&mut self, source: &str) -> Result<Number, Error> {
        self.status = Status::Running;
        let result = match self.parse(source) {
            Ok(block) => self.interpreter
                             .evaluate(&mut self.environment, &block)
                             .map_err(Error::from),
            Err(error) => Err(error),
        };
        self.finish(result)
    }

    /// Lexes and parses one input without evaluating it.
    ///
    /// ## Example
    /// ```
    /// use winzig::Session;
    ///
    /// let block = Session::new().parse("if (x) { y = 1 }").unwrap();
    /// assert_eq!(block.to_string(), "ifx{\n(y = 1.000000);\n} else {\n}\n");
    /// ```
    ///
    /// # Errors
    /// The first lex or parse error.
    pub fn parse(&mut self, source: &str) -> Result<Block, Error> {
        tokenize_into(&mut self.stream, source)?;
        debug!(tokens = self.stream.len(), "tokenized input");
        let block = parse_with_limits(&mut self.stream, self.limits).into_result()?;
        Ok(block)
    }

    fn finish(&mut self, result: Result<Number, Error>) -> Result<Number, Error> {
        match &result {
            Ok(value) => {
                self.status = Status::Success;
                debug!(value, "input finished");
            },
            Err(error) => {
                self.status = error.status();
                if error.is_interrupt() {
                    debug!("input interrupted");
                } else {
                    warn!(%error, status = %self.status, "input failed");
                }
            },
        }
        result
    }

    /// Clears the transient state of the last input but keeps every variable.
    pub fn reset(&mut self) {
        self.status = Status::Running;
        self.stream.reset();
        self.interpreter.clear_interrupt();
    }

    /// Resets the session and also forgets every variable.
    pub fn clear(&mut self) {
        self.reset();
        self.environment.clear();
    }

    /// The status of the last input, or `Running` after a reset.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// The variables bound so far.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The parser limits in use.
    #[must_use]
    pub const fn limits(&self) -> Limits {
        self.limits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::evaluator::function::console::ScriptedConsole;

    fn session(input: &[&str]) -> Session {
        let console = ScriptedConsole::new(input.iter().copied());
        Session::with_console(Box::new(console), SessionOptions::new().with_seed(1))
    }

    #[test]
    fn a_failed_stage_stops_the_pipeline() {
        let mut session = session(&[]);
        let error = session.run("x = 1 ++ 2").unwrap_err();
        assert!(matches!(error, Error::Lex(_)));
        assert_eq!(session.status(), Status::SyntaxError);
        assert!(session.environment().is_empty());

        let error = session.run("x = 1\n3 4").unwrap_err();
        assert!(matches!(error, Error::Parse(_)));
        assert!(session.environment().is_empty());
    }

    #[test]
    fn runtime_errors_keep_earlier_bindings() {
        let mut session = session(&[]);
        assert!(session.run("a = 1; b = c").is_err());
        assert_eq!(session.status(), Status::MathError);
        assert_eq!(session.environment().get("a"), Some(1.0));
        assert_eq!(session.run("a + 1").unwrap(), 2.0);
        assert_eq!(session.status(), Status::Success);
    }

    #[test]
    fn reset_keeps_variables_and_clear_drops_them() {
        let mut session = session(&[]);
        session.run("n = 0").unwrap();
        session.reset();
        assert_eq!(session.status(), Status::Running);
        assert_eq!(session.run("n += 1").unwrap(), 1.0);
        assert_eq!(session.run("n += 1").unwrap(), 2.0);

        session.clear();
        assert!(session.run("n += 1").is_err());
    }

    #[test]
    fn input_reads_from_the_console() {
        let mut session = session(&["6"]);
        assert_eq!(session.run("x = input(0) * 7").unwrap(), 42.0);
    }

    #[test]
    fn an_interrupt_reports_keyboard_interrupt_and_the_next_input_runs() {
        let mut session = session(&["q"]);
        let error = session.run("x = input(0); x = 1").unwrap_err();
        assert!(error.is_interrupt());
        assert_eq!(session.status(), Status::KeyboardInterrupt);
        assert_eq!(session.environment().get("x"), Some(0.0));

        assert_eq!(session.run("x + 1").unwrap(), 1.0);
    }

    #[test]
    fn options_carry_the_parser_limits() {
        let limits = Limits { max_depth: 4,
                              ..Limits::default() };
        let mut session = Session::with_console(Box::new(ScriptedConsole::default()),
                                                SessionOptions::new().with_limits(limits));
        assert_eq!(session.limits(), limits);

        let error = session.run("if (1) { if (1) { if (1) { if (1) { 2 } } } }").unwrap_err();
        assert_eq!(error.status(), Status::TooComplexGrammar);
        assert!(session.status().is_failure());
    }

    #[test]
    fn seeded_sessions_draw_the_same_numbers() {
        let options = SessionOptions::new().with_seed(99);
        let mut first = Session::with_console(Box::new(ScriptedConsole::default()), options);
        let mut second = Session::with_console(Box::new(ScriptedConsole::default()), options);
        for _ in 0..3 {
            assert_eq!(first.run("random(0)").unwrap(), second.run("random(0)").unwrap());
        }
    }
}
