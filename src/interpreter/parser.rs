/// Parser state, limits and the top-level entry points.
///
/// Defines [`core::Parser`], the cursor over a token stream shared by all
/// grammar rules, the resource bounds in [`core::Limits`] and the functions
/// [`core::parse`] and [`core::parse_with_limits`] that turn a whole stream
/// into the top-level block.
pub mod core;

/// Expression parsing.
///
/// Implements the two-stack operator-precedence algorithm: operands and
/// operators are pushed left to right and reduced by binding tightness, with
/// parentheses as markers on the operator stack and builtin calls parsed
/// recursively.
pub mod expression;

/// Statement parsing.
///
/// Recognizes `if`/`else` and `while` by exact keyword match and treats
/// everything else as an expression statement.
pub mod statement;

/// Block parsing.
///
/// Groups statements into blocks, tracking brace depth and bounding the
/// number of statements per block.
pub mod block;
