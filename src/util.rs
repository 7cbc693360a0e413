/// Numeric conversion helpers.
///
/// This module gathers the few places where the language's single number
/// type crosses into integer land: truncation for the bitwise operators,
/// counts returned by builtins and truth values produced by comparisons.
/// Keeping the casts here keeps the lossy conversions in one audited spot.
pub mod num;
