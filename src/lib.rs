//! # winzig
//!
//! winzig is a small expression-oriented scripting language for numeric
//! calculation. Source text flows through a lexer, an operator-precedence
//! parser and a tree-walking evaluator; every value is a single `f64`.
//! Programs use arithmetic, comparison and bitwise operators, assignments,
//! `if`/`else`, `while` and a fixed set of builtin functions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed code.
///
/// This module declares the `Expr`, `Statement` and `Block` types that
/// represent a program as a tree, together with the binary operator table.
/// The AST is built by the parser, traversed by the evaluator and printed by
/// the `Display` impls used for tree dumps.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source lines to nodes for error reporting.
/// - Encodes operator spelling, binding tightness and assignment forms.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// Each stage has its own error enum. All of them map onto one status
/// taxonomy and convert into the umbrella [`error::Error`] used by hosts.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers to messages.
/// - Carries partial stage output alongside the first error.
pub mod error;
/// Orchestrates the lexer, parser and evaluator.
///
/// # Responsibilities
/// - Tokenizes source into a reusable token stream.
/// - Builds the AST under configurable resource bounds.
/// - Evaluates the AST against a variable environment.
pub mod interpreter;
/// Sessions that run many inputs against one environment.
///
/// A session is what the REPL and the file runner drive: it reuses one token
/// stream, keeps variables across inputs and records the status of the last
/// input.
pub mod session;
/// General utilities for numeric conversion.
///
/// # Responsibilities
/// - Convert between `f64`, `i64` and `usize` in one audited place.
/// - Map booleans onto the language's truth values.
pub mod util;

pub use crate::{
    ast::Number,
    error::{Error, Status},
    interpreter::parser::core::Limits,
    session::{Session, SessionOptions},
};

/// Runs a whole program in a fresh session and returns its final value.
///
/// With `auto_print` the value is also written to stdout with six decimals.
///
/// # Errors
/// Returns the first lex, parse or runtime error.
///
/// # Examples
/// ```
/// use winzig::run_source;
///
/// // Simple expression: the result is calculated and no error occurs.
/// assert_eq!(run_source("x = 2 + 2; x * 10", false).unwrap(), 40.0);
///
/// // Example with an intentional error (unknown variable).
/// assert!(run_source("y = x + 1", false).is_err());
/// ```
pub fn run_source(source: &str, auto_print: bool) -> Result<Number, Error> {
    let value = Session::new().run(source)?;
    if auto_print {
        println!("{value:.6}");
    }
    Ok(value)
}
