use std::{
    cell::RefCell,
    collections::VecDeque,
    io::{self, BufRead},
    rc::Rc,
};

/// The I/O channel used by the side-effecting builtins `print` and `input`.
///
/// The interpreter owns one console; hosts choose the implementation. The
/// binary uses [`StdConsole`], tests use [`ScriptedConsole`].
pub trait Console {
    /// Writes one line of output.
    fn write_line(&mut self, line: &str);

    /// Reads the next whitespace-delimited token of input.
    ///
    /// Returns `None` once the input is exhausted.
    fn read_token(&mut self) -> Option<String>;
}

/// A console backed by the process's standard input and output.
#[derive(Debug, Default)]
pub struct StdConsole {
    pending: VecDeque<String>,
}

impl StdConsole {
    /// Creates a console with no buffered input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Console for StdConsole {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }

    fn read_token(&mut self) -> Option<String> {
        let stdin = io::stdin();
        while self.pending.is_empty() {
            let mut buffer = String::new();
            match stdin.lock().read_line(&mut buffer) {
                Ok(0) | Err(_) => return None,
                Ok(_) => self.pending.extend(buffer.split_whitespace().map(str::to_string)),
            }
        }
        self.pending.pop_front()
    }
}

/// A handle on the lines written to a [`ScriptedConsole`].
///
/// The handle stays valid after the console has been moved into an
/// interpreter.
#[derive(Debug, Clone, Default)]
pub struct Transcript(Rc<RefCell<Vec<String>>>);

impl Transcript {
    /// All lines written so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

/// An in-memory console with scripted input and captured output.
///
/// ## Example
/// ```
/// use winzig::interpreter::evaluator::function::console::{Console, ScriptedConsole};
///
/// let mut console = ScriptedConsole::new(["4 2"]);
/// let transcript = console.transcript();
///
/// assert_eq!(console.read_token().as_deref(), Some("4"));
/// assert_eq!(console.read_token().as_deref(), Some("2"));
/// assert_eq!(console.read_token(), None);
///
/// console.write_line("done");
/// assert_eq!(transcript.lines(), ["done"]);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input:  VecDeque<String>,
    output: Transcript,
}

impl ScriptedConsole {
    /// Creates a console whose input is the given lines.
    pub fn new<I, S>(lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: AsRef<str>
    {
        let input = lines.into_iter()
                         .flat_map(|line| {
                             line.as_ref()
                                 .split_whitespace()
                                 .map(str::to_string)
                                 .collect::<Vec<_>>()
                         })
                         .collect();
        Self { input,
               output: Transcript::default() }
    }

    /// Returns a handle on the captured output.
    #[must_use]
    pub fn transcript(&self) -> Transcript {
        self.output.clone()
    }
}

impl Console for ScriptedConsole {
    fn write_line(&mut self, line: &str) {
        self.output.0.borrow_mut().push(line.to_string());
    }

    fn read_token(&mut self) -> Option<String> {
        self.input.pop_front()
    }
}
