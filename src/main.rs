use std::{fs, process::ExitCode};

use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use winzig::{
    Limits, Session, SessionOptions,
    interpreter::parser::core::{BLOCK_SIZE, MAX_DEPTH, STACK_SIZE},
};

const PROMPT: &str = ">>> ";
const VARIABLES_COMMAND: &str = ":vars";
const DEFAULT_FILTER: &str = "winzig=warn";

/// winzig is a tiny scripting language for numeric calculation. Without
/// CONTENTS it starts an interactive prompt.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells winzig to treat CONTENTS as a file path instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode automatically prints the final value of a script.
    #[arg(short, long)]
    pipe_mode: bool,

    /// Prints the parsed program instead of running it.
    #[arg(long)]
    dump_ast: bool,

    /// Seeds the random source so `random()` is reproducible.
    #[arg(long)]
    seed: Option<u64>,

    /// Capacity of the parser's operand and operator stacks.
    #[arg(long, default_value_t = STACK_SIZE)]
    max_stack: usize,

    /// Maximum number of statements per block.
    #[arg(long, default_value_t = BLOCK_SIZE)]
    max_statements: usize,

    /// Maximum nesting depth of blocks, calls and parentheses.
    #[arg(long, default_value_t = MAX_DEPTH)]
    max_depth: usize,

    /// Log filter, e.g. `winzig=debug`. Overrides `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,

    contents: Option<String>,
}

impl Args {
    fn session_options(&self) -> SessionOptions {
        let limits = Limits { stack_capacity: self.max_stack,
                              block_capacity: self.max_statements,
                              max_depth:      self.max_depth, };
        let options = SessionOptions::new().with_limits(limits);
        match self.seed {
            Some(seed) => options.with_seed(seed),
            None => options,
        }
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }.unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry().with(filter)
                                  .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                                  .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    let mut session = Session::with_options(args.session_options());
    debug!(limits = ?session.limits(), "session ready");

    let Some(contents) = &args.contents else {
        return run_repl(&mut session, args.dump_ast);
    };

    let script = if args.file {
        match fs::read_to_string(contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not \
                           exist? ({e})");
                return ExitCode::FAILURE;
            },
        }
    } else {
        contents.clone()
    };

    if args.dump_ast {
        return match session.parse(&script) {
            Ok(block) => {
                print!("{block}");
                ExitCode::SUCCESS
            },
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            },
        };
    }

    match session.run(&script) {
        Ok(value) => {
            if args.pipe_mode {
                println!("{value:.6}");
            }
            ExitCode::SUCCESS
        },
        Err(e) if !e.status().is_failure() => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

/// Reads, evaluates and prints one line at a time until `exit`, an interrupt
/// raised by the program, end of input or Ctrl-C.
///
/// `:vars` lists the variables bound so far.
fn run_repl(session: &mut Session, dump_ast: bool) -> ExitCode {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to start the prompt: {e}");
            return ExitCode::FAILURE;
        },
    };
    info!("interactive session started");

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Readline error: {e}");
                return ExitCode::FAILURE;
            },
        };
        if line.contains("exit") {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        if let Err(e) = editor.add_history_entry(line.as_str()) {
            debug!(error = %e, "history entry not recorded");
        }
        if line.trim() == VARIABLES_COMMAND {
            for (name, value) in session.environment().iter() {
                println!("{name} = {value:.6}");
            }
            continue;
        }

        session.reset();
        if dump_ast {
            match session.parse(&line) {
                Ok(block) => print!("{block}"),
                Err(e) => eprintln!("{e}"),
            }
            continue;
        }

        match session.run(&line) {
            Ok(value) => println!("{value:.6}"),
            Err(e) if e.is_interrupt() => {
                debug!("program requested exit");
                break;
            },
            Err(e) => eprintln!("{e}"),
        }
    }

    ExitCode::SUCCESS
}
