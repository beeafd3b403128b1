use std::rc::Rc;

use log::debug;

use crate::config::Config;
use crate::environment::Environment;
use crate::error::{ShellError, SyntaxError};
use crate::executor::{BuiltinManager, DefaultExecutor, ExecOutcome, Executor};
use crate::parser::LineParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Exit(i32),
}

/// Runs input lines one at a time against a single session environment.
pub struct Interpreter<E: Executor = DefaultExecutor> {
    env: Environment,
    executor: E,
    builtins: Rc<BuiltinManager>,
    max_loop_depth: usize,
}

impl Interpreter {
    pub fn new(config: &Config) -> Self {
        let builtins = Rc::new(BuiltinManager::new());
        Interpreter {
            env: Environment::new(config.pwd_initial_capacity),
            executor: DefaultExecutor::new(Rc::clone(&builtins)),
            builtins,
            max_loop_depth: config.max_loop_depth,
        }
    }
}

impl<E: Executor> Interpreter<E> {
    pub fn with_parts(
        env: Environment,
        executor: E,
        builtins: Rc<BuiltinManager>,
        max_loop_depth: usize,
    ) -> Self {
        Interpreter {
            env,
            executor,
            builtins,
            max_loop_depth,
        }
    }

    /// Runs a line read as raw bytes. A line that is not UTF-8 is
    /// reported like any other malformed line.
    pub fn run_bytes(&mut self, line: &[u8]) -> LineOutcome {
        match std::str::from_utf8(line) {
            Ok(text) => self.run_line(text),
            Err(e) => {
                self.env
                    .report(&ShellError::from(SyntaxError::InvalidEncoding(e)));
                LineOutcome::Continue
            }
        }
    }

    /// Parses the whole line, then runs its statements in order.
    ///
    /// A line that does not parse is reported once and nothing in it runs.
    /// A statement that fails is reported and the next one still runs.
    pub fn run_line(&mut self, line: &str) -> LineOutcome {
        let parser = LineParser::new(&self.builtins, self.max_loop_depth);
        let statements = match parser.parse_line(line) {
            Ok(statements) => statements,
            Err(err) => {
                self.env.report(&ShellError::from(err));
                return LineOutcome::Continue;
            }
        };

        for statement in &statements {
            match self.executor.exec(statement, &mut self.env) {
                Ok(ExecOutcome::Exit(code)) => {
                    debug!("exit requested with status {}", code);
                    return LineOutcome::Exit(code);
                }
                Ok(ExecOutcome::Code(code)) => debug!("statement finished with {}", code),
                Err(err) => self.env.report(&err),
            }
        }
        LineOutcome::Continue
    }
}
