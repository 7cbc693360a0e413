/// Core evaluation logic and runtime context.
///
/// Contains the [`core::Interpreter`], which walks blocks, statements and
/// expressions, performs assignments against an environment and carries the
/// console, the random source and the cancellation flag.
pub mod core;

/// Binary operator evaluation.
///
/// Implements arithmetic, bitwise and comparison operators on already
/// evaluated operands.
pub mod binary;

/// Builtin functions.
///
/// Holds the builtin table, call-site resolution and the console abstraction
/// used by `print` and `input`.
pub mod function;
