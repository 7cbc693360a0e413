/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens:
/// words, numbers, operators and line separators, each tagged with its source
/// line. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Folds a `+` or `-` directly before digits into the number.
/// - Merges an operator character with a following `=` (`+=`, `==`, ...).
/// - Reports two operator characters in a row and characters outside the
///   language.
pub mod lexer;
/// The token stream shared between the lexer and the parser.
///
/// A cursor over the tokens of one input, always terminated by an
/// end-of-stream sentinel so lookahead past the end is well-defined.
pub mod stream;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// Expressions are parsed with an explicit two-stack operator-precedence
/// algorithm; statements and blocks are parsed recursively on top of it.
///
/// # Responsibilities
/// - Converts tokens into expressions, `if`/`while` statements and blocks.
/// - Resolves builtin calls against the builtin table.
/// - Bounds stack sizes, block sizes and nesting depth.
pub mod parser;
/// The evaluator module executes the AST and computes results.
///
/// The evaluator walks blocks, statements and expressions, applies operators,
/// stores assignments and calls builtins.
///
/// # Responsibilities
/// - Evaluates every AST node to a number.
/// - Applies the truthiness threshold of `if` and `while`.
/// - Reports runtime errors such as unknown variables or bad assignment
///   targets, and honours cancellation requests.
pub mod evaluator;
/// The variable store.
///
/// Maps names to numbers for the lifetime of a session.
pub mod environment;
