/// The builtin function table.
///
/// Declares every native function, the order used to resolve call sites and
/// the implementations of the side-effecting primitives.
pub mod builtin;
/// The I/O channel used by `print` and `input`.
pub mod console;
