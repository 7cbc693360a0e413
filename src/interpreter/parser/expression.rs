use tracing::trace;

use crate::{
    ast::{BinaryOperator, Expr, Number},
    error::ParseError,
    interpreter::{
        evaluator::function::builtin::resolve,
        parser::core::{ParseResult, Parser, unexpected},
        stream::TokenKind,
    },
};

/// An entry of the operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    /// An open parenthesis.
    Open,
    /// A binary operator waiting for its right operand.
    Operator(BinaryOperator, usize),
}

/// An operand together with the height of its tree.
type Operand = (Expr, usize);

/// The two stacks of the operator-precedence algorithm, bounded by the
/// parser's stack capacity.
struct Stacks {
    operands:  Vec<Operand>,
    operators: Vec<Pending>,
    capacity:  usize,
}

impl Stacks {
    fn new(capacity: usize) -> Self {
        Self { operands: Vec::new(),
               operators: Vec::new(),
               capacity }
    }

    fn push_operand(&mut self, operand: Operand, line: usize) -> ParseResult<()> {
        if self.operands.len() >= self.capacity || operand.1 > self.capacity {
            return Err(ParseError::TooComplex { resource: "operands",
                                                limit: self.capacity,
                                                line });
        }
        self.operands.push(operand);
        Ok(())
    }

    fn push_operator(&mut self, pending: Pending, line: usize) -> ParseResult<()> {
        if self.operators.len() >= self.capacity {
            return Err(ParseError::TooComplex { resource: "operators",
                                                limit: self.capacity,
                                                line });
        }
        self.operators.push(pending);
        Ok(())
    }

    /// Pops two operands and pushes the node joining them with `op`.
    fn reduce(&mut self, op: BinaryOperator, line: usize) -> ParseResult<()> {
        let (Some((rhs, rhs_height)), Some((lhs, lhs_height))) =
            (self.operands.pop(), self.operands.pop())
        else {
            return Err(ParseError::MissingOperand { operator: op.symbol().to_string(),
                                                    line });
        };
        let height = 1 + lhs_height.max(rhs_height);
        self.push_operand((Expr::binary(op, lhs, rhs, line), height), line)
    }

    /// Reduces while the stacked operator binds at least as tightly as the
    /// incoming one, so equal levels group left to right.
    fn reduce_before(&mut self, incoming: BinaryOperator) -> ParseResult<()> {
        while let Some(&Pending::Operator(top, line)) = self.operators.last() {
            if top.precedence() > incoming.precedence() {
                break;
            }
            self.operators.pop();
            self.reduce(top, line)?;
        }
        Ok(())
    }

    /// Reduces everything above the innermost open parenthesis and drops it.
    fn close_paren(&mut self, line: usize) -> ParseResult<()> {
        loop {
            match self.operators.pop() {
                Some(Pending::Open) => return Ok(()),
                Some(Pending::Operator(op, op_line)) => self.reduce(op, op_line)?,
                None => {
                    return Err(ParseError::UnexpectedToken { token: ")".to_string(),
                                                             expected: "a matching '('",
                                                             line });
                },
            }
        }
    }
}

impl Parser<'_> {
    /// Parses one expression with the two-stack operator-precedence
    /// algorithm.
    ///
    /// Without `inside_parens` the expression runs until a line separator, the
    /// end of the stream or a `}`, none of which are consumed. With
    /// `inside_parens` the stream must start with `(` and the expression ends
    /// right after the matching `)`. A stream with nothing left yields
    /// [`Expr::Empty`].
    ///
    /// ## Example
    /// ```
    /// use winzig::interpreter::{
    ///     lexer::tokenize,
    ///     parser::core::{Limits, Parser},
    /// };
    ///
    /// let mut stream = tokenize("2 + 3 * 4").into_result().unwrap();
    /// let expr = Parser::new(&mut stream, Limits::default()).parse_expression(false).unwrap();
    /// assert_eq!(expr.to_string(), "(2.000000 + (3.000000 * 4.000000))");
    /// ```
    ///
    /// # Errors
    /// - [`ParseError::UnreducedExpression`] if more than one operand is left.
    /// - [`ParseError::MissingOperand`] if an operator lacks an operand.
    /// - [`ParseError::UnexpectedEnd`] if a parenthesis is left open.
    /// - [`ParseError::TooComplex`] if a stack or the nesting depth overflows.
    pub fn parse_expression(&mut self, inside_parens: bool) -> ParseResult<Expr> {
        self.parse_operand(inside_parens).map(|(expr, _)| expr)
    }

    fn parse_operand(&mut self, inside_parens: bool) -> ParseResult<Operand> {
        let line = self.stream.peek().line;
        self.enter(line)?;
        let result = self.parse_operand_inner(inside_parens);
        self.leave();
        result
    }

    fn parse_operand_inner(&mut self, inside_parens: bool) -> ParseResult<Operand> {
        let mut stacks = Stacks::new(self.limits.stack_capacity);
        let mut parens = 0usize;
        let mut consumed = false;
        let mut line;

        loop {
            let token = self.stream.peek().clone();
            line = token.line;

            match token.kind {
                TokenKind::LineSeparator | TokenKind::EndOfStream => {
                    if parens > 0 {
                        return Err(unexpected(&token, "')'"));
                    }
                    break;
                },
                TokenKind::Number => {
                    self.stream.advance();
                    let value = token.text
                                     .parse::<Number>()
                                     .map_err(|_| ParseError::InvalidNumber { literal:
                                                                                  token.text
                                                                                       .clone(),
                                                                              line })?;
                    stacks.push_operand((Expr::Literal(value), 1), line)?;
                },
                TokenKind::Word => {
                    self.stream.advance();
                    if self.stream.peek().is_operator("(") {
                        let (arg, height) = self.parse_operand(true)?;
                        trace!(name = %token.text, line, "call site");
                        let call = Expr::Call { function: resolve(&token.text),
                                                name: token.text,
                                                arg: Box::new(arg),
                                                line };
                        stacks.push_operand((call, height + 1), line)?;
                    } else {
                        stacks.push_operand((Expr::identifier(token.text, line), 1), line)?;
                    }
                },
                TokenKind::Operator => match token.text.as_str() {
                    "(" => {
                        self.stream.advance();
                        self.enter(line)?;
                        parens += 1;
                        stacks.push_operator(Pending::Open, line)?;
                    },
                    ")" => {
                        if parens == 0 {
                            return Err(unexpected(&token, "an operand or operator"));
                        }
                        self.stream.advance();
                        stacks.close_paren(line)?;
                        self.leave();
                        parens -= 1;
                        if inside_parens && parens == 0 {
                            consumed = true;
                            break;
                        }
                    },
                    "}" => {
                        if parens > 0 {
                            return Err(unexpected(&token, "')'"));
                        }
                        break;
                    },
                    symbol => {
                        let Some(op) = BinaryOperator::from_symbol(symbol) else {
                            return Err(unexpected(&token, "an operand or operator"));
                        };
                        self.stream.advance();
                        stacks.reduce_before(op)?;
                        stacks.push_operator(Pending::Operator(op, line), line)?;
                    },
                },
            }
            consumed = true;
        }

        while let Some(pending) = stacks.operators.pop() {
            match pending {
                Pending::Operator(op, op_line) => stacks.reduce(op, op_line)?,
                Pending::Open => return Err(ParseError::UnexpectedEnd { expected: "')'",
                                                                        line }),
            }
        }

        match stacks.operands.len() {
            0 if !consumed => Ok((Expr::Empty, 0)),
            1 => stacks.operands
                       .pop()
                       .ok_or(ParseError::UnreducedExpression { operands: 0,
                                                                line }),
            operands => Err(ParseError::UnreducedExpression { operands,
                                                              line }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::{BinaryOperator, Expr},
        error::{ParseError, Status},
        interpreter::{
            lexer::tokenize,
            parser::core::{Limits, ParseResult, Parser},
        },
    };

    fn expression(source: &str) -> ParseResult<Expr> {
        let mut stream = tokenize(source).into_result().unwrap();
        Parser::new(&mut stream, Limits::default()).parse_expression(false)
    }

    fn dump(source: &str) -> String {
        expression(source).unwrap().to_string()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(dump("2 + 3 * 4"), "(2.000000 + (3.000000 * 4.000000))");
        assert_eq!(dump("2 * 3 + 4"), "((2.000000 * 3.000000) + 4.000000)");
    }

    #[test]
    fn equal_precedence_groups_left_to_right() {
        assert_eq!(dump("8 / 4 / 2"), "((8.000000 / 4.000000) / 2.000000)");
        assert_eq!(dump("2 ^ 3 ^ 2"), "((2.000000 ^ 3.000000) ^ 2.000000)");
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(dump("(2 + 3) * 4"), "((2.000000 + 3.000000) * 4.000000)");
        assert_eq!(dump("((1))"), "1.000000");
    }

    #[test]
    fn assignment_binds_loosest() {
        assert_eq!(dump("x = y + 1 < 3"), "(x = ((y + 1.000000) < 3.000000))");
        assert_eq!(dump("x += 2 & 3"), "(x += (2.000000 & 3.000000))");
    }

    #[test]
    fn calls_resolve_their_builtin() {
        let expr = expression("sqrt(16) + 1").unwrap();
        let Expr::BinaryOp { op: BinaryOperator::Add, lhs, .. } = expr else {
            panic!("expected an addition");
        };
        let Expr::Call { name, function, arg, .. } = *lhs else {
            panic!("expected a call");
        };
        assert_eq!(name, "sqrt");
        assert_eq!(function.map(|f| f.name), Some("sqrt"));
        assert_eq!(*arg, Expr::Literal(16.0));

        let Expr::Call { function, .. } = expression("nothing(1)").unwrap() else {
            panic!("expected a call");
        };
        assert!(function.is_none());
    }

    #[test]
    fn nested_calls_parse_recursively() {
        assert_eq!(dump("abs(sin(x) - 1)"), "abs((sin(x) - 1.000000))");
    }

    #[test]
    fn the_expression_stops_before_a_closing_brace() {
        let mut stream = tokenize("x + 1 }").into_result().unwrap();
        let expr = Parser::new(&mut stream, Limits::default()).parse_expression(false)
                                                                .unwrap();
        assert_eq!(expr.to_string(), "(x + 1.000000)");
        assert!(stream.peek().is_operator("}"));
    }

    #[test]
    fn an_exhausted_stream_yields_empty() {
        assert_eq!(expression("").unwrap(), Expr::Empty);
    }

    #[test]
    fn adjacent_operands_are_unreduced() {
        let error = expression("3 4").unwrap_err();
        assert!(matches!(error, ParseError::UnreducedExpression { operands: 2, .. }));
        assert_eq!(error.status(), Status::SyntaxError);

        // The lexer folds the minus into the second literal.
        assert!(matches!(expression("3 -5").unwrap_err(),
                         ParseError::UnreducedExpression { .. }));
    }

    #[test]
    fn operators_without_operands_are_reported() {
        for source in ["1 +", "* 2", "!x"] {
            let error = expression(source).unwrap_err();
            assert_eq!(error.status(), Status::UnexpectedEnd, "{source}");
        }
    }

    #[test]
    fn unbalanced_parentheses_are_reported() {
        assert_eq!(expression("(1 + 2").unwrap_err().status(), Status::UnexpectedEnd);
        assert_eq!(expression("1 + 2)").unwrap_err().status(), Status::UnexpectedToken);
    }

    #[test]
    fn malformed_numbers_are_reported() {
        assert!(matches!(expression("1.2.3").unwrap_err(),
                         ParseError::InvalidNumber { .. }));
    }

    #[test]
    fn stack_capacity_bounds_the_tree() {
        let source = vec!["1"; 64].join(" + ");
        let mut stream = tokenize(&source).into_result().unwrap();
        let limits = Limits { stack_capacity: 16,
                              ..Limits::default() };
        let error = Parser::new(&mut stream, limits).parse_expression(false).unwrap_err();
        assert_eq!(error.status(), Status::TooComplexGrammar);
    }
}
