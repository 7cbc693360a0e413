use crate::{
    ast::{Block, Statement},
    error::ParseError,
    interpreter::parser::core::{ParseResult, Parser, unexpected},
};

impl Parser<'_> {
    /// Parses a block of statements.
    ///
    /// With `require_braces` the block must open with `{` and ends after the
    /// `}` that closes it. Without, it runs to the end of the stream and a
    /// stray `}` is an error. Bare nested braces only adjust the depth, so
    /// their statements join the enclosing block.
    ///
    /// ## Example
    /// ```
    /// use winzig::interpreter::{
    ///     lexer::tokenize,
    ///     parser::core::{Limits, Parser},
    /// };
    ///
    /// let mut stream = tokenize("{ x = 1; { y = 2 } } z").into_result().unwrap();
    /// let mut parser = Parser::new(&mut stream, Limits::default());
    /// let block = parser.parse_block(true).unwrap();
    /// assert_eq!(block.len(), 2);
    /// assert!(stream.peek().is_word("z"));
    /// ```
    ///
    /// # Errors
    /// - [`ParseError::UnexpectedToken`] for a missing `{` or a stray `}`.
    /// - [`ParseError::UnexpectedEnd`] if the stream ends inside the braces.
    /// - [`ParseError::TooComplex`] if the block holds too many statements.
    pub fn parse_block(&mut self, require_braces: bool) -> ParseResult<Block> {
        let mut statements = Vec::new();
        self.fill_block(require_braces, &mut statements)?;
        Ok(Block::new(statements))
    }

    /// Parses statements into `statements`, which keeps whatever was parsed
    /// before an error.
    pub(super) fn fill_block(&mut self,
                             require_braces: bool,
                             statements: &mut Vec<Statement>)
                             -> ParseResult<()> {
        let line = self.stream.peek().line;
        self.enter(line)?;
        let result = self.fill_block_inner(require_braces, statements);
        self.leave();
        result
    }

    fn fill_block_inner(&mut self,
                        require_braces: bool,
                        statements: &mut Vec<Statement>)
                        -> ParseResult<()> {
        let mut depth = 0usize;
        if require_braces {
            self.skip_line_separators();
            let token = self.stream.peek();
            if !token.is_operator("{") {
                return Err(unexpected(token, "'{'"));
            }
            self.stream.advance();
            depth = 1;
        }

        loop {
            self.skip_line_separators();
            let token = self.stream.peek().clone();

            if token.is_end() {
                if depth > 0 {
                    return Err(ParseError::UnexpectedEnd { expected: "'}'",
                                                           line:     token.line, });
                }
                return Ok(());
            }

            if token.is_operator("{") {
                self.stream.advance();
                self.enter(token.line)?;
                depth += 1;
                continue;
            }

            if token.is_operator("}") {
                if depth == 0 {
                    return Err(unexpected(&token, "a statement"));
                }
                self.stream.advance();
                // The opening brace of a required block has no level of its own.
                if !(require_braces && depth == 1) {
                    self.leave();
                }
                depth -= 1;
                if depth == 0 && require_braces {
                    return Ok(());
                }
                continue;
            }

            let statement = self.parse_statement()?;
            if statement == Statement::End {
                continue;
            }
            if statements.len() >= self.limits.block_capacity {
                return Err(ParseError::TooComplex { resource: "statements",
                                                    limit: self.limits.block_capacity,
                                                    line: token.line });
            }
            statements.push(statement);
        }
    }
}
