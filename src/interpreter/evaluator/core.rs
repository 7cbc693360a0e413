use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, trace};

use crate::{
    ast::{BinaryOperator, Block, Expr, Number, Statement},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::{
            binary::apply_binary,
            function::console::{Console, StdConsole},
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Threshold below which a condition counts as false.
///
/// `if` takes its else block when the condition is `< EPSILON`, while `while`
/// keeps looping only while it is `> EPSILON`. A negative condition therefore
/// takes the then block of an `if` but stops a loop.
pub const EPSILON: Number = 1e-9;

/// Stores the runtime evaluation context.
///
/// Holds everything the side-effecting builtins need besides their argument:
/// the console used by `print` and `input`, the random source behind `random`
/// and the cooperative cancellation flag raised by `exit` or an aborted
/// `input`.
///
/// Variables live in a separate [`Environment`] passed to
/// [`evaluate`](Self::evaluate), so one interpreter can serve a whole session.
///
/// ## Example
/// ```
/// use winzig::interpreter::{
///     environment::Environment,
///     evaluator::core::Interpreter,
///     lexer::tokenize,
///     parser::core::parse,
/// };
///
/// let mut stream = tokenize("x = 3; while (x) { x -= 1 }; x + 10").into_result().unwrap();
/// let block = parse(&mut stream).into_result().unwrap();
///
/// let mut env = Environment::new();
/// let mut interpreter = Interpreter::new();
/// assert_eq!(interpreter.evaluate(&mut env, &block), Ok(10.0));
/// assert_eq!(env.get("x"), Some(0.0));
/// ```
pub struct Interpreter {
    console:     Box<dyn Console>,
    rng:         StdRng,
    interrupted: bool,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter bound to standard I/O with an entropy-seeded
    /// random source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_console(Box::new(StdConsole::new()))
    }

    /// Creates an interpreter that talks to `console`.
    #[must_use]
    pub fn with_console(console: Box<dyn Console>) -> Self {
        Self { console,
               rng: StdRng::from_entropy(),
               interrupted: false }
    }

    /// Reseeds the random source so `random()` becomes reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The console used by `print` and `input`.
    pub fn console_mut(&mut self) -> &mut dyn Console {
        self.console.as_mut()
    }

    /// Requests cancellation of the running program.
    pub fn interrupt(&mut self) {
        debug!("cancellation requested");
        self.interrupted = true;
    }

    /// Returns `true` once cancellation has been requested.
    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Clears the cancellation flag so the next input can run.
    pub const fn clear_interrupt(&mut self) {
        self.interrupted = false;
    }

    /// Draws a number uniformly from `[0, 1)`.
    pub fn random(&mut self) -> Number {
        self.rng.r#gen::<Number>()
    }

    /// Evaluates the top-level block and returns the value of its last
    /// statement.
    ///
    /// The cancellation flag is cleared first, so an interrupt only ever
    /// stops the evaluation that raised it.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`]. Bindings written before the error
    /// stay in `env`.
    pub fn evaluate(&mut self, env: &mut Environment, block: &Block) -> EvalResult<Number> {
        self.clear_interrupt();
        let result = self.eval_block(env, block);
        match &result {
            Ok(value) => debug!(value, "evaluation finished"),
            Err(error) => debug!(%error, "evaluation stopped"),
        }
        result
    }

    /// Executes statements in order up to the terminator and yields the value
    /// of the last one, or `0` for an empty block.
    ///
    /// # Errors
    /// Propagates the first error of any statement, and reports
    /// [`RuntimeError::Interrupted`] if cancellation is requested between
    /// statements.
    pub fn eval_block(&mut self, env: &mut Environment, block: &Block) -> EvalResult<Number> {
        let mut value = 0.0;
        for statement in block.statements() {
            self.check_interrupt()?;
            if *statement == Statement::End {
                break;
            }
            value = self.eval_statement(env, statement)?;
        }
        self.check_interrupt()?;
        Ok(value)
    }

    /// Evaluates a single statement.
    ///
    /// # Errors
    /// Propagates errors from the condition, the chosen block or the
    /// expression.
    pub fn eval_statement(&mut self,
                          env: &mut Environment,
                          statement: &Statement)
                          -> EvalResult<Number> {
        match statement {
            Statement::Expression(expr) => self.eval_expression(env, expr),
            Statement::If { condition,
                            then_block,
                            else_block, } => {
                let condition = self.eval_expression(env, condition)?;
                trace!(condition, "if");
                if condition < EPSILON {
                    self.eval_block(env, else_block)
                } else {
                    self.eval_block(env, then_block)
                }
            },
            Statement::While { condition, body } => {
                let mut iterations = 0u64;
                while self.eval_expression(env, condition)? > EPSILON {
                    self.check_interrupt()?;
                    self.eval_block(env, body)?;
                    iterations += 1;
                }
                trace!(iterations, "while finished");
                Ok(0.0)
            },
            Statement::End => Ok(0.0),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// # Errors
    /// - [`RuntimeError::UnknownVariable`] for a variable never assigned.
    /// - [`RuntimeError::UnresolvedBuiltin`] for a call of an unknown name.
    /// - [`RuntimeError::AssignmentTarget`] when an assignment's left side is
    ///   not an identifier.
    /// - [`RuntimeError::NotANumber`] when an assignment would store NaN.
    /// - [`RuntimeError::UnknownOperator`] for `!`.
    /// - [`RuntimeError::FaultedExpression`] for the `Empty` and `Faulted`
    ///   sentinels.
    pub fn eval_expression(&mut self, env: &mut Environment, expr: &Expr) -> EvalResult<Number> {
        match expr {
            Expr::Literal(value) => Ok(*value),
            Expr::Identifier { name, line } => {
                env.get(name).ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                           line: *line, })
            },
            Expr::Call { name,
                         function,
                         arg,
                         line, } => {
                let Some(function) = function else {
                    return Err(RuntimeError::UnresolvedBuiltin { name: name.clone(),
                                                                 line: *line, });
                };
                let argument = self.eval_expression(env, arg)?;
                Ok(function.call(self, argument))
            },
            Expr::BinaryOp { op, lhs, rhs, line } if op.is_assignment() => {
                self.eval_assignment(env, *op, lhs, rhs, *line)
            },
            Expr::BinaryOp { op, lhs, rhs, line } => {
                let lhs = self.eval_expression(env, lhs)?;
                let rhs = self.eval_expression(env, rhs)?;
                apply_binary(*op, lhs, rhs, *line)
            },
            Expr::Empty => Err(RuntimeError::FaultedExpression { line: 0 }),
            Expr::Faulted { line } => Err(RuntimeError::FaultedExpression { line: *line }),
        }
    }

    /// Evaluates `=` and the compound assignments.
    ///
    /// The target is checked before anything is evaluated, so a bad target
    /// never touches the environment.
    fn eval_assignment(&mut self,
                       env: &mut Environment,
                       op: BinaryOperator,
                       lhs: &Expr,
                       rhs: &Expr,
                       line: usize)
                       -> EvalResult<Number> {
        let Expr::Identifier { name, .. } = lhs else {
            return Err(RuntimeError::AssignmentTarget { operator: op.symbol().to_string(),
                                                        line });
        };

        let value = self.eval_expression(env, rhs)?;
        let value = match op.compound_base() {
            Some(base) => {
                let current = env.get(name)
                                 .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(),
                                                                                line })?;
                apply_binary(base, current, value, line)?
            },
            None => value,
        };

        if value.is_nan() {
            return Err(RuntimeError::NotANumber { name: name.clone(),
                                                  line });
        }

        trace!(name = %name, value, "assign");
        env.set(name, value);
        Ok(value)
    }

    fn check_interrupt(&self) -> EvalResult<()> {
        if self.interrupted {
            Err(RuntimeError::Interrupted)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Status,
        interpreter::{
            evaluator::function::console::ScriptedConsole, lexer::tokenize, parser::core::parse,
        },
    };

    fn quiet() -> Interpreter {
        Interpreter::with_console(Box::new(ScriptedConsole::new(Vec::<String>::new())))
    }

    fn run(env: &mut Environment, source: &str) -> EvalResult<Number> {
        let mut stream = tokenize(source).into_result().unwrap();
        let block = parse(&mut stream).into_result().unwrap();
        quiet().evaluate(env, &block)
    }

    fn eval(source: &str) -> EvalResult<Number> {
        run(&mut Environment::new(), source)
    }

    #[test]
    fn arithmetic_follows_precedence() {
        assert_eq!(eval("2 + 3 * 4"), Ok(14.0));
        assert_eq!(eval("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(eval("2 ^ 10 - 24"), Ok(1000.0));
        assert_eq!(eval("7 % 4"), Ok(3.0));
    }

    #[test]
    fn a_block_yields_its_last_value() {
        assert_eq!(eval("1; 2; 3"), Ok(3.0));
        assert_eq!(eval(""), Ok(0.0));
    }

    #[test]
    fn compound_assignment_reads_then_stores() {
        let mut env = Environment::new();
        assert_eq!(run(&mut env, "x = 10"), Ok(10.0));
        assert_eq!(run(&mut env, "x -= 3"), Ok(7.0));
        assert_eq!(env.get("x"), Some(7.0));
        assert_eq!(run(&mut env, "x ^= 2"), Ok(49.0));
    }

    #[test]
    fn compound_assignment_of_an_unknown_variable_is_a_math_error() {
        let error = eval("y += 1").unwrap_err();
        assert_eq!(error.status(), Status::MathError);
    }

    #[test]
    fn a_non_identifier_target_leaves_the_environment_alone() {
        let mut env = Environment::new();
        let error = run(&mut env, "2 + 3 = 4").unwrap_err();
        assert!(matches!(error, RuntimeError::AssignmentTarget { .. }));
        assert_eq!(error.status(), Status::RuntimeError);
        assert!(env.is_empty());
    }

    #[test]
    fn chained_assignment_fails_on_the_outer_target() {
        let mut env = Environment::new();
        env.set("b", 1.0);
        let error = run(&mut env, "a = b = 3").unwrap_err();
        assert!(matches!(error, RuntimeError::AssignmentTarget { .. }));
    }

    #[test]
    fn storing_nan_is_a_math_error() {
        let mut env = Environment::new();
        let error = run(&mut env, "x = sqrt(0 - 1)").unwrap_err();
        assert!(matches!(error, RuntimeError::NotANumber { .. }));
        assert!(!env.contains("x"));
    }

    #[test]
    fn if_and_while_use_the_epsilon_threshold() {
        assert_eq!(eval("if (0) { 1 } else { 2 }"), Ok(2.0));
        assert_eq!(eval("if (0.0000000001) { 1 } else { 2 }"), Ok(2.0));
        assert_eq!(eval("if (0.00000001) { 1 } else { 2 }"), Ok(1.0));
        assert_eq!(eval("if (0 - 1) { 1 } else { 2 }"), Ok(1.0));

        let mut env = Environment::new();
        assert_eq!(run(&mut env, "x = 0 - 1; while (x) { x = 5 }"), Ok(0.0));
        assert_eq!(env.get("x"), Some(-1.0));
    }

    #[test]
    fn while_runs_until_the_condition_drops() {
        let mut env = Environment::new();
        run(&mut env, "n = 0; x = 3; while (x) { x -= 1; n += 1 }").unwrap();
        assert_eq!(env.get("x"), Some(0.0));
        assert_eq!(env.get("n"), Some(3.0));
    }

    #[test]
    fn bang_has_no_binary_meaning() {
        let error = eval("1 ! 2").unwrap_err();
        assert!(matches!(error, RuntimeError::UnknownOperator { .. }));
    }

    #[test]
    fn unresolved_calls_fail_at_evaluation() {
        let error = eval("nothing(1)").unwrap_err();
        assert!(matches!(error, RuntimeError::UnresolvedBuiltin { .. }));
        assert_eq!(error.status(), Status::RuntimeError);
    }

    #[test]
    fn sentinels_do_not_evaluate() {
        let mut env = Environment::new();
        let mut interpreter = quiet();
        let block = Block::new(vec![Statement::Expression(Expr::Faulted { line: 3 })]);
        assert_eq!(interpreter.evaluate(&mut env, &block),
                   Err(RuntimeError::FaultedExpression { line: 3 }));
        assert!(interpreter.eval_expression(&mut env, &Expr::Empty).is_err());
    }

    #[test]
    fn exit_stops_at_the_next_statement() {
        let mut env = Environment::new();
        let error = run(&mut env, "x = 1; exit(0); x = 2").unwrap_err();
        assert_eq!(error, RuntimeError::Interrupted);
        assert_eq!(error.status(), Status::KeyboardInterrupt);
        assert_eq!(env.get("x"), Some(1.0));
    }

    #[test]
    fn exit_breaks_out_of_an_endless_loop() {
        let mut env = Environment::new();
        let error = run(&mut env, "n = 0; while (1) { n += 1; if (n == 5) { exit(0) } }");
        assert_eq!(error, Err(RuntimeError::Interrupted));
        assert_eq!(env.get("n"), Some(5.0));
    }

    #[test]
    fn a_new_evaluation_clears_the_interrupt() {
        let mut env = Environment::new();
        let mut interpreter = quiet();
        interpreter.interrupt();

        let mut stream = tokenize("1 + 1").into_result().unwrap();
        let block = parse(&mut stream).into_result().unwrap();
        assert_eq!(interpreter.evaluate(&mut env, &block), Ok(2.0));
    }
}
