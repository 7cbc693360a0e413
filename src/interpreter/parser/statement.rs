use tracing::trace;

use crate::{
    ast::{Block, Expr, Statement},
    interpreter::{
        parser::core::{ParseResult, Parser, unexpected},
        stream::TokenKind,
    },
};

impl Parser<'_> {
    /// Parses a single statement.
    ///
    /// The keywords `if` and `while` must match exactly; every other token
    /// starts an expression statement. The end of the stream yields
    /// [`Statement::End`].
    ///
    /// ## Example
    /// ```
    /// use winzig::{
    ///     ast::Statement,
    ///     interpreter::{
    ///         lexer::tokenize,
    ///         parser::core::{Limits, Parser},
    ///     },
    /// };
    ///
    /// let mut stream = tokenize("while (x) { x -= 1 }").into_result().unwrap();
    /// let mut parser = Parser::new(&mut stream, Limits::default());
    /// assert!(matches!(parser.parse_statement().unwrap(), Statement::While { .. }));
    /// assert_eq!(parser.parse_statement().unwrap(), Statement::End);
    /// ```
    ///
    /// # Errors
    /// Anything the expression or block rules report, plus an unexpected
    /// token or end when a condition does not start with `(`.
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self.stream.peek().clone();
        trace!(token = %token, line = token.line, "statement");

        match token.kind {
            TokenKind::EndOfStream => Ok(Statement::End),
            TokenKind::Word if token.text == "if" => {
                self.stream.advance();
                self.parse_if()
            },
            TokenKind::Word if token.text == "while" => {
                self.stream.advance();
                self.parse_while()
            },
            _ => Ok(Statement::Expression(self.parse_expression(false)?)),
        }
    }

    /// Parses the rest of an `if` after its keyword.
    ///
    /// `else` may follow the closing brace on the same or a later line, and
    /// may be followed directly by another `if`.
    fn parse_if(&mut self) -> ParseResult<Statement> {
        let condition = self.parse_condition("'(' after 'if'")?;
        let then_block = self.parse_block(true)?;

        self.skip_line_separators();
        let else_block = if self.stream.peek().is_word("else") {
            self.stream.advance();
            let token = self.stream.peek();
            if token.is_word("if") {
                let line = token.line;
                self.stream.advance();
                // Each link of an `else if` chain is one nesting level.
                self.enter(line)?;
                let chained = self.parse_if();
                self.leave();
                Block::new(vec![chained?])
            } else {
                self.parse_block(true)?
            }
        } else {
            Block::empty()
        };

        Ok(Statement::If { condition,
                           then_block,
                           else_block })
    }

    fn parse_while(&mut self) -> ParseResult<Statement> {
        let condition = self.parse_condition("'(' after 'while'")?;
        let body = self.parse_block(true)?;
        Ok(Statement::While { condition, body })
    }

    /// Parses a parenthesized condition.
    fn parse_condition(&mut self, expected: &'static str) -> ParseResult<Expr> {
        let token = self.stream.peek();
        if !token.is_operator("(") {
            return Err(unexpected(token, expected));
        }
        self.parse_expression(true)
    }

    pub(super) fn skip_line_separators(&mut self) {
        while self.stream.peek().kind == TokenKind::LineSeparator {
            self.stream.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{Block, Statement},
        error::Status,
        interpreter::{
            lexer::tokenize,
            parser::core::{Limits, ParseResult, Parser},
        },
    };

    fn statement(source: &str) -> ParseResult<Statement> {
        let mut stream = tokenize(source).into_result().unwrap();
        Parser::new(&mut stream, Limits::default()).parse_statement()
    }

    #[test]
    fn if_without_else_gets_an_empty_else_block() {
        let Statement::If { then_block,
                            else_block,
                            .. } = statement("if (x > 1) { y = 2 }").unwrap()
        else {
            panic!("expected an if statement");
        };
        assert_eq!(then_block.len(), 1);
        assert_eq!(else_block, Block::empty());
    }

    #[test]
    fn else_may_start_on_the_next_line() {
        let Statement::If { else_block, .. } = statement("if (x) {\n1\n}\nelse {\n2\n}").unwrap()
        else {
            panic!("expected an if statement");
        };
        assert_eq!(else_block.len(), 1);
    }

    #[test]
    fn else_if_chains_nest_in_the_else_block() {
        let Statement::If { else_block, .. } =
            statement("if (x < 0) { 1 } else if (x > 0) { 2 } else { 3 }").unwrap()
        else {
            panic!("expected an if statement");
        };
        assert!(matches!(else_block.statements()[0], Statement::If { .. }));
    }

    #[test]
    fn keywords_must_match_exactly() {
        let Statement::Expression(expr) = statement("iffy = 1").unwrap() else {
            panic!("expected an expression statement");
        };
        assert_eq!(expr.to_string(), "(iffy = 1.000000)");
    }

    #[test]
    fn conditions_need_parentheses() {
        assert_eq!(statement("while x { }").unwrap_err().status(), Status::UnexpectedToken);
        assert_eq!(statement("if").unwrap_err().status(), Status::UnexpectedEnd);
        assert_eq!(statement("if (x) y").unwrap_err().status(), Status::UnexpectedToken);
    }

    fn statement_with_depth(source: &str, max_depth: usize) -> ParseResult<Statement> {
        let mut stream = tokenize(source).into_result().unwrap();
        let limits = Limits { max_depth,
                              ..Limits::default() };
        Parser::new(&mut stream, limits).parse_statement()
    }

    #[test]
    fn else_if_chains_count_towards_the_nesting_depth() {
        let chain = |links: usize| format!("{}{{ 2 }}", "if (0) { 1 } else ".repeat(links));

        assert!(statement_with_depth(&chain(4), 16).is_ok());
        let error = statement_with_depth(&chain(40), 16).unwrap_err();
        assert_eq!(error.status(), Status::TooComplexGrammar);

        let error = statement(&chain(5000)).unwrap_err();
        assert_eq!(error.status(), Status::TooComplexGrammar);
    }

    #[test]
    fn nested_loops_count_towards_the_nesting_depth() {
        let nested = |levels: usize| {
            format!("{}x{}", "while (x) { ".repeat(levels), " }".repeat(levels))
        };

        assert!(statement_with_depth(&nested(4), 16).is_ok());
        let error = statement_with_depth(&nested(40), 16).unwrap_err();
        assert_eq!(error.status(), Status::TooComplexGrammar);
    }
}
