use std::rc::Rc;

use log::debug;

use super::builtins::BuiltinManager;
use super::pipeline::PipelineHandler;
use crate::ast::Statement;
use crate::environment::Environment;
use crate::error::{ErrorKind, ShellError};

pub type ExecError = ShellError;
pub type ExecStatus = Result<ExecOutcome, ExecError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    Code(i32),
    /// The interpreter must terminate with this status.
    Exit(i32),
}

pub trait Executor {
    fn exec(&mut self, statement: &Statement, env: &mut Environment) -> ExecStatus;
}

pub struct DefaultExecutor {
    builtins: Rc<BuiltinManager>,
    pipelines: PipelineHandler,
}

impl Executor for DefaultExecutor {
    fn exec(&mut self, statement: &Statement, env: &mut Environment) -> ExecStatus {
        match statement {
            Statement::Builtin(cmd) => {
                debug!("builtin: {} {:?}", cmd.name, cmd.args);
                self.builtins.execute(&cmd.name, &cmd.args, env)
            }
            Statement::Loop { count, body } => self.exec_loop(*count, body, env),
            Statement::Pipeline(pipeline) => {
                env.flush()?;
                self.pipelines.run(pipeline)
            }
        }
    }
}

impl DefaultExecutor {
    pub fn new(builtins: Rc<BuiltinManager>) -> Self {
        DefaultExecutor {
            builtins,
            pipelines: PipelineHandler::default(),
        }
    }

    /// Runs `body` `count` times through the normal dispatch.
    ///
    /// A failed iteration is reported and the next one starts; `exit` ends
    /// the loop at once and a resource error aborts the whole loop.
    fn exec_loop(&mut self, count: usize, body: &Statement, env: &mut Environment) -> ExecStatus {
        let mut code = 0;
        for iteration in 0..count {
            match self.exec(body, env) {
                Ok(ExecOutcome::Exit(status)) => return Ok(ExecOutcome::Exit(status)),
                Ok(ExecOutcome::Code(status)) => code = status,
                Err(err) if err.kind() == ErrorKind::Resource => return Err(err),
                Err(err) => {
                    debug!("loop iteration {} of {} failed", iteration + 1, count);
                    env.report(&err);
                    code = 1;
                }
            }
        }
        Ok(ExecOutcome::Code(code))
    }
}
