use tracing::debug;

use crate::{
    ast::{Block, Expr, Statement},
    error::{Outcome, ParseError},
    interpreter::stream::{Token, TokenKind, TokenStream},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Default capacity of the operand and operator stacks.
pub const STACK_SIZE: usize = 1024;
/// Default number of statements a single block may hold.
pub const BLOCK_SIZE: usize = 1024;
/// Default nesting depth of blocks, calls and parentheses.
pub const MAX_DEPTH: usize = 256;

/// Resource bounds applied while parsing.
///
/// Exceeding any of them yields [`ParseError::TooComplex`] rather than
/// exhausting memory or the native stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Capacity of the operand and operator stacks of one expression. Also
    /// bounds the height of an expression tree.
    pub stack_capacity: usize,
    /// Number of statements a single block may hold.
    pub block_capacity: usize,
    /// Nesting depth of blocks, calls and parentheses.
    pub max_depth:      usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { stack_capacity: STACK_SIZE,
               block_capacity: BLOCK_SIZE,
               max_depth:      MAX_DEPTH, }
    }
}

/// The parser state: a cursor over the token stream plus the nesting depth.
///
/// The expression, statement and block rules are implemented on this type in
/// the sibling modules.
pub struct Parser<'s> {
    pub(super) stream: &'s mut TokenStream,
    pub(super) limits: Limits,
    depth:             usize,
}

impl<'s> Parser<'s> {
    /// Creates a parser positioned at the current cursor of `stream`.
    pub fn new(stream: &'s mut TokenStream, limits: Limits) -> Self {
        Self { stream,
               limits,
               depth: 0 }
    }

    /// Enters one nesting level.
    ///
    /// # Errors
    /// [`ParseError::TooComplex`] if the level exceeds `max_depth`.
    pub(super) fn enter(&mut self, line: usize) -> ParseResult<()> {
        if self.depth >= self.limits.max_depth {
            return Err(ParseError::TooComplex { resource: "nesting depth",
                                                limit: self.limits.max_depth,
                                                line });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves one nesting level.
    pub(super) const fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Parses the whole remaining stream as the top-level block.
    ///
    /// Parsing stops at the first error. The statements parsed before it are
    /// kept and followed by a faulted statement, so the tree is always
    /// well-formed.
    pub fn parse_program(&mut self) -> Outcome<Block, ParseError> {
        let mut statements = Vec::new();
        let mut result = self.fill_block(false, &mut statements);
        if result.is_ok() && self.stream.overran() {
            result = Err(ParseError::UnexpectedEnd { expected: "more input",
                                                     line:     self.stream.peek().line, });
        }

        match result {
            Ok(()) => {
                debug!(statements = statements.len(), "parsed program");
                Outcome::ok(Block::new(statements))
            },
            Err(error) => {
                debug!(%error, statements = statements.len(), "parse failed");
                statements.push(Statement::Expression(Expr::Faulted { line: error.line() }));
                Outcome::failed(Block::new(statements), error)
            },
        }
    }
}

/// Builds the error for a token that is not the one the grammar requires.
///
/// Running into a line separator or the end of the stream is reported as an
/// unexpected end, anything else as an unexpected token.
pub(super) fn unexpected(token: &Token, expected: &'static str) -> ParseError {
    match token.kind {
        TokenKind::LineSeparator | TokenKind::EndOfStream => {
            ParseError::UnexpectedEnd { expected,
                                        line: token.line }
        },
        _ => ParseError::UnexpectedToken { token: token.text.clone(),
                                           expected,
                                           line: token.line },
    }
}

/// Parses a token stream into the top-level block with the default limits.
///
/// On failure the returned block holds everything parsed before the error,
/// followed by a faulted statement.
///
/// ## Example
/// ```
/// use winzig::interpreter::{lexer::tokenize, parser::core::parse};
///
/// let mut stream = tokenize("x = 1; x + 2").into_result().unwrap();
/// let block = parse(&mut stream).into_result().unwrap();
/// assert_eq!(block.len(), 2);
/// ```
pub fn parse(stream: &mut TokenStream) -> Outcome<Block, ParseError> {
    parse_with_limits(stream, Limits::default())
}

/// Parses a token stream into the top-level block with explicit limits.
pub fn parse_with_limits(stream: &mut TokenStream, limits: Limits) -> Outcome<Block, ParseError> {
    Parser::new(stream, limits).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Status, interpreter::lexer::tokenize};

    fn parse_source(source: &str) -> Outcome<Block, ParseError> {
        let mut stream = tokenize(source).into_result().unwrap();
        parse(&mut stream)
    }

    #[test]
    fn partial_block_ends_with_a_faulted_statement() {
        let outcome = parse_source("x = 1\n3 4\ny = 2");
        let error = outcome.error.clone().unwrap();
        assert_eq!(error.status(), Status::SyntaxError);
        assert_eq!(error.line(), 2);

        let statements = outcome.output.statements();
        assert_eq!(statements.len(), 3);
        assert!(matches!(statements[1], Statement::Expression(Expr::Faulted { line: 2 })));
        assert_eq!(statements[2], Statement::End);
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let source = format!("{}1{}", "(".repeat(40), ")".repeat(40));
        let mut stream = tokenize(&source).into_result().unwrap();
        let limits = Limits { max_depth: 16,
                              ..Limits::default() };
        let error = parse_with_limits(&mut stream, limits).error.unwrap();
        assert_eq!(error.status(), Status::TooComplexGrammar);

        let mut stream = tokenize(&source).into_result().unwrap();
        assert!(parse(&mut stream).is_ok());
    }

    #[test]
    fn empty_input_parses_to_an_empty_block() {
        let block = parse_source("").into_result().unwrap();
        assert!(block.is_empty());

        let block = parse_source("\n;\n").into_result().unwrap();
        assert!(block.is_empty());
    }
}
