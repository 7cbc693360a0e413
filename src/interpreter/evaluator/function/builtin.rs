use std::fmt;

use tracing::trace;

use crate::{ast::Number, interpreter::evaluator::core::Interpreter, util::num::usize_to_number};

/// Signature of a native builtin.
///
/// A builtin receives the interpreter, for the side-effecting primitives,
/// and its single evaluated argument.
pub type BuiltinFn = fn(&mut Interpreter, Number) -> Number;

/// A named native function exposed to the language.
pub struct Builtin {
    /// The name the builtin is called by.
    pub name: &'static str,
    /// The native implementation.
    pub func: BuiltinFn,
}

impl Builtin {
    /// Invokes the builtin.
    pub fn call(&self, interpreter: &mut Interpreter, argument: Number) -> Number {
        trace!(builtin = self.name, argument, "calling builtin");
        (self.func)(interpreter, argument)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Defines builtin functions by generating the lookup table and name list.
///
/// The macro produces:
/// - `BUILTINS` (static table, in declaration order),
/// - `BUILTIN_NAMES` (public list of builtin names in the same order).
macro_rules! builtin_functions {
    ($($name:literal => $func:expr),* $(,)?) => {
        /// Every builtin, in table order.
        pub static BUILTINS: &[Builtin] = &[
            $(Builtin { name: $name, func: $func },)*
        ];

        /// The names of all builtins, in table order.
        pub const BUILTIN_NAMES: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "abs"     => |_, x| x.abs(),
    "sin"     => |_, x| x.sin(),
    "cos"     => |_, x| x.cos(),
    "tan"     => |_, x| x.tan(),
    "asin"    => |_, x| x.asin(),
    "acos"    => |_, x| x.acos(),
    "atan"    => |_, x| x.atan(),
    "sqrt"    => |_, x| x.sqrt(),
    "log"     => |_, x| x.ln(),
    "log10"   => |_, x| x.log10(),
    "exp"     => |_, x| x.exp(),
    "ceil"    => |_, x| x.ceil(),
    "floor"   => |_, x| x.floor(),
    "round"   => |_, x| x.round(),
    "print"   => print,
    "input"   => input,
    "sign"    => sign,
    "boolean" => boolean,
    "random"  => |interpreter, _| interpreter.random(),
    "exit"    => exit,
}

/// The order in which names are tried when a call site does not spell a
/// builtin exactly.
///
/// A call resolves to the first builtin in this list whose name is contained
/// in the word at the call site. Because matching is by substring, a name must
/// come before every shorter name it contains: `log10` before `log`, `asin`
/// before `sin`, and so on.
pub const RESOLUTION_ORDER: &[&str] = &["boolean", "random", "log10", "floor", "round", "print",
                                        "input", "asin", "acos", "atan", "sqrt", "ceil",
                                        "sign", "exit", "abs", "sin", "cos", "tan", "log",
                                        "exp"];

/// Resolves the builtin called by `name`.
///
/// An exact match wins. Otherwise the first entry of [`RESOLUTION_ORDER`]
/// contained in `name` is used, so `mylog10` still calls `log10`. Names that
/// contain no builtin name resolve to `None`.
///
/// ## Example
/// ```
/// use winzig::interpreter::evaluator::function::builtin::resolve;
///
/// assert_eq!(resolve("log10").map(|b| b.name), Some("log10"));
/// assert_eq!(resolve("asin").map(|b| b.name), Some("asin"));
/// assert_eq!(resolve("prints").map(|b| b.name), Some("print"));
/// assert!(resolve("foo").is_none());
/// ```
#[must_use]
pub fn resolve(name: &str) -> Option<&'static Builtin> {
    if let Some(builtin) = lookup(name) {
        return Some(builtin);
    }
    RESOLUTION_ORDER.iter().find(|candidate| name.contains(*candidate)).and_then(|c| lookup(c))
}

fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}

/// Writes the value with six decimals and returns the number of characters
/// written, including the line break.
fn print(interpreter: &mut Interpreter, x: Number) -> Number {
    let text = format!("{x:.6}");
    interpreter.console_mut().write_line(&text);
    usize_to_number(text.len() + 1)
}

/// Reads a number from the console.
///
/// `q`/`Q` or the end of input request cancellation and yield `0`. Anything
/// else that does not parse as a number is reported and read again.
fn input(interpreter: &mut Interpreter, _: Number) -> Number {
    loop {
        let Some(token) = interpreter.console_mut().read_token() else {
            interpreter.interrupt();
            return 0.0;
        };
        if token.starts_with(['q', 'Q']) {
            interpreter.interrupt();
            return 0.0;
        }
        if let Ok(value) = token.parse::<Number>() {
            return value;
        }
        let console = interpreter.console_mut();
        console.write_line(&format!("Not a valid number: {token}"));
        console.write_line("Input Q to exit current program");
    }
}

fn exit(interpreter: &mut Interpreter, _: Number) -> Number {
    interpreter.interrupt();
    0.0
}

fn sign(_: &mut Interpreter, x: Number) -> Number {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn boolean(_: &mut Interpreter, x: Number) -> Number {
    if x > 0.0 { 1.0 } else { 0.0 }
}
