use std::fmt;

use crate::interpreter::evaluator::function::builtin::Builtin;

/// The single runtime value type of the language.
pub type Number = f64;

/// Represents a binary operator.
///
/// Every operator the lexer can produce has a variant here, including `!`,
/// which parses like any other operator but has no binary semantics, and the
/// whole assignment family.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Floating-point remainder (`%`)
    Rem,
    /// Exponentiation (`^`)
    Pow,
    /// Bitwise and on truncated operands (`&`)
    BitAnd,
    /// Bitwise or on truncated operands (`|`)
    BitOr,
    /// `!`, accepted by the parser but rejected at evaluation.
    Not,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Plain assignment (`=`)
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    RemAssign,
    /// `^=`
    PowAssign,
    /// `&=`
    AndAssign,
    /// `|=`
    OrAssign,
}

impl BinaryOperator {
    /// Looks up the operator spelled by a token.
    ///
    /// ## Example
    /// ```
    /// use winzig::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::from_symbol("+="), Some(BinaryOperator::AddAssign));
    /// assert_eq!(BinaryOperator::from_symbol("=="), Some(BinaryOperator::Equal));
    /// assert_eq!(BinaryOperator::from_symbol("("), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            "^" => Self::Pow,
            "&" => Self::BitAnd,
            "|" => Self::BitOr,
            "!" => Self::Not,
            "<" => Self::Less,
            ">" => Self::Greater,
            "<=" => Self::LessEqual,
            ">=" => Self::GreaterEqual,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "=" => Self::Assign,
            "+=" => Self::AddAssign,
            "-=" => Self::SubAssign,
            "*=" => Self::MulAssign,
            "/=" => Self::DivAssign,
            "%=" => Self::RemAssign,
            "^=" => Self::PowAssign,
            "&=" => Self::AndAssign,
            "|=" => Self::OrAssign,
            _ => return None,
        })
    }

    /// The source spelling of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Pow => "^",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::Not => "!",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::RemAssign => "%=",
            Self::PowAssign => "^=",
            Self::AndAssign => "&=",
            Self::OrAssign => "|=",
        }
    }

    /// Binding tightness; a lower number binds tighter.
    ///
    /// Parentheses occupy level 1 and are handled by the parser directly.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Not => 2,
            Self::Pow => 3,
            Self::Mul | Self::Div | Self::Rem => 4,
            Self::Add | Self::Sub => 5,
            Self::Less | Self::Greater | Self::LessEqual | Self::GreaterEqual => 6,
            Self::Equal | Self::NotEqual => 7,
            Self::BitAnd => 8,
            Self::BitOr => 9,
            Self::Assign
            | Self::AddAssign
            | Self::SubAssign
            | Self::MulAssign
            | Self::DivAssign
            | Self::RemAssign
            | Self::PowAssign
            | Self::AndAssign
            | Self::OrAssign => 10,
        }
    }

    /// Returns `true` for `=` and every compound assignment.
    ///
    /// The comparison forms `==`, `!=`, `<=` and `>=` also end in `=` but are
    /// not assignments.
    #[must_use]
    pub const fn is_assignment(self) -> bool {
        self.precedence() == 10
    }

    /// For a compound assignment, the operator applied before storing.
    ///
    /// ## Example
    /// ```
    /// use winzig::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::SubAssign.compound_base(), Some(BinaryOperator::Sub));
    /// assert_eq!(BinaryOperator::Assign.compound_base(), None);
    /// ```
    #[must_use]
    pub const fn compound_base(self) -> Option<Self> {
        match self {
            Self::AddAssign => Some(Self::Add),
            Self::SubAssign => Some(Self::Sub),
            Self::MulAssign => Some(Self::Mul),
            Self::DivAssign => Some(Self::Div),
            Self::RemAssign => Some(Self::Rem),
            Self::PowAssign => Some(Self::Pow),
            Self::AndAssign => Some(Self::BitAnd),
            Self::OrAssign => Some(Self::BitOr),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An abstract syntax tree node representing an expression.
///
/// Every non-leaf node exclusively owns its children; the tree has no sharing
/// and no cycles.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Literal(Number),
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation, including assignments.
    BinaryOp {
        /// The operator.
        op:   BinaryOperator,
        /// Left operand.
        lhs:  Box<Self>,
        /// Right operand.
        rhs:  Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A call of a builtin with a single argument (e.g. `sin(x)`).
    Call {
        /// The name written at the call site.
        name:     String,
        /// The builtin resolved from `name` at parse time, if any.
        function: Option<&'static Builtin>,
        /// The argument expression.
        arg:      Box<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Marks the absence of an expression at the end of the input.
    Empty,
    /// Marks a parse failure recorded in the tree.
    Faulted {
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// Shorthand for an identifier node.
    pub fn identifier(name: impl Into<String>, line: usize) -> Self {
        Self::Identifier { name: name.into(),
                           line }
    }

    /// Shorthand for a binary node.
    #[must_use]
    pub fn binary(op: BinaryOperator, lhs: Self, rhs: Self, line: usize) -> Self {
        Self::BinaryOp { op,
                         lhs: Box::new(lhs),
                         rhs: Box::new(rhs),
                         line }
    }

    /// Gets the line number from `self`; literals and sentinels report 0.
    ///
    /// ## Example
    /// ```
    /// use winzig::ast::Expr;
    ///
    /// assert_eq!(Expr::identifier("x", 5).line_number(), 5);
    /// assert_eq!(Expr::Literal(1.0).line_number(), 0);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Identifier { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Call { line, .. }
            | Self::Faulted { line } => *line,
            Self::Literal(_) | Self::Empty => 0,
        }
    }
}

/// A single statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression evaluated for its value.
    Expression(Expr),
    /// `if (condition) { ... } else { ... }`. The else block is always present
    /// and empty when the source has no `else`.
    If {
        /// The condition.
        condition:  Expr,
        /// Evaluated when the condition is truthy.
        then_block: Block,
        /// Evaluated otherwise.
        else_block: Block,
    },
    /// `while (condition) { ... }`.
    While {
        /// The loop condition.
        condition: Expr,
        /// The loop body.
        body:      Block,
    },
    /// Terminal marker of a block's statement sequence.
    End,
}

/// An ordered sequence of statements terminated by exactly one
/// [`Statement::End`].
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    statements: Vec<Statement>,
}

impl Default for Block {
    fn default() -> Self {
        Self::empty()
    }
}

impl Block {
    /// A block holding only the terminator.
    #[must_use]
    pub fn empty() -> Self {
        Self { statements: vec![Statement::End] }
    }

    /// Builds a block from statements and appends the terminator.
    ///
    /// `End` markers inside `statements` are dropped so the terminator stays
    /// unique.
    ///
    /// ## Example
    /// ```
    /// use winzig::ast::{Block, Expr, Statement};
    ///
    /// let block = Block::new(vec![Statement::Expression(Expr::Literal(1.0)), Statement::End]);
    /// assert_eq!(block.len(), 1);
    /// assert_eq!(block.statements().last(), Some(&Statement::End));
    /// ```
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Self {
        let mut statements: Vec<_> =
            statements.into_iter().filter(|s| !matches!(s, Statement::End)).collect();
        statements.push(Statement::End);
        Self { statements }
    }

    /// All statements, including the trailing `End`.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// The number of statements before the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len() - 1
    }

    /// Returns `true` if the block holds only the terminator.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value:.6}"),
            Self::Identifier { name, .. } => write!(f, "{name}"),
            Self::BinaryOp { op, lhs, rhs, .. } => write!(f, "({lhs} {op} {rhs})"),
            Self::Call { name, arg, .. } => write!(f, "{name}({arg})"),
            Self::Empty | Self::Faulted { .. } => write!(f, "<unknown>"),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expr) => writeln!(f, "{expr};"),
            Self::If { condition,
                       then_block,
                       else_block, } => {
                writeln!(f, "if{condition}{{\n{then_block}}} else {{\n{else_block}}}")
            },
            Self::While { condition, body } => writeln!(f, "while{condition}{{\n{body}}}"),
            Self::End => Ok(()),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operator_round_trips_through_its_symbol() {
        use BinaryOperator::*;
        for op in [Add, Sub, Mul, Div, Rem, Pow, BitAnd, BitOr, Not, Less, Greater, LessEqual,
                   GreaterEqual, Equal, NotEqual, Assign, AddAssign, SubAssign, MulAssign,
                   DivAssign, RemAssign, PowAssign, AndAssign, OrAssign]
        {
            assert_eq!(BinaryOperator::from_symbol(op.symbol()), Some(op));
        }
    }

    #[test]
    fn comparisons_ending_in_equals_are_not_assignments() {
        for symbol in ["==", "!=", "<=", ">="] {
            let op = BinaryOperator::from_symbol(symbol).unwrap();
            assert!(!op.is_assignment(), "{symbol}");
        }
        for symbol in ["=", "+=", "-=", "*=", "/=", "%=", "^=", "&=", "|="] {
            let op = BinaryOperator::from_symbol(symbol).unwrap();
            assert!(op.is_assignment(), "{symbol}");
        }
    }

    #[test]
    fn precedence_follows_the_table() {
        use BinaryOperator::*;
        assert!(Not.precedence() < Pow.precedence());
        assert!(Pow.precedence() < Mul.precedence());
        assert!(Mul.precedence() < Add.precedence());
        assert!(Add.precedence() < Less.precedence());
        assert!(Less.precedence() < Equal.precedence());
        assert!(Equal.precedence() < BitAnd.precedence());
        assert!(BitAnd.precedence() < BitOr.precedence());
        assert!(BitOr.precedence() < Assign.precedence());
    }

    #[test]
    fn display_matches_the_tree_dump_format() {
        let expr = Expr::binary(BinaryOperator::Assign,
                                Expr::identifier("x", 1),
                                Expr::binary(BinaryOperator::Add,
                                             Expr::Literal(1.0),
                                             Expr::Literal(2.5),
                                             1),
                                1);
        assert_eq!(expr.to_string(), "(x = (1.000000 + 2.500000))");

        let block = Block::new(vec![Statement::While { condition: Expr::identifier("x", 1),
                                                       body:      Block::new(vec![
                    Statement::Expression(Expr::identifier("y", 1)),
                ]), }]);
        assert_eq!(block.to_string(), "whilex{\ny;\n}\n");
    }

    #[test]
    fn empty_block_has_only_the_terminator() {
        let block = Block::empty();
        assert!(block.is_empty());
        assert_eq!(block.statements(), &[Statement::End]);
    }
}
