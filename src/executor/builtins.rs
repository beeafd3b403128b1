use std::collections::HashMap;
use std::path::Path;

use crate::environment::Environment;
use crate::error::SyntaxError;
use crate::executor::{ExecError, ExecOutcome, ExecStatus};
use crate::parser::validator::expect_arity;

pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    /// Rejects arguments the command can never run with.
    fn check(&self, args: &[String]) -> Result<(), SyntaxError>;
    fn run(&self, args: &[String], env: &mut Environment) -> ExecStatus;
}

pub struct BuiltinManager {
    commands: HashMap<String, Box<dyn BuiltinCommand>>,
}

impl Default for BuiltinManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager {
            commands: HashMap::new(),
        };
        mgr.register(Box::new(ExitCommand {}));
        mgr.register(Box::new(CdCommand {}));
        mgr.register(Box::new(PwdCommand {}));
        mgr
    }

    fn register(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&dyn BuiltinCommand> {
        self.commands.get(name).map(|cmd| cmd.as_ref())
    }

    /// Runs a built-in by name. Statements built outside the parser may
    /// name one that is not registered.
    pub fn execute(&self, name: &str, args: &[String], env: &mut Environment) -> ExecStatus {
        match self.commands.get(name) {
            Some(cmd) => {
                cmd.check(args)?;
                cmd.run(args, env)
            }
            None => Err(ExecError::NoSuchBuiltin(name.to_string())),
        }
    }
}

pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }
    fn check(&self, args: &[String]) -> Result<(), SyntaxError> {
        expect_arity(self.name(), args, 0)
    }
    fn run(&self, _args: &[String], _env: &mut Environment) -> ExecStatus {
        Ok(ExecOutcome::Exit(0))
    }
}

pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }
    fn check(&self, args: &[String]) -> Result<(), SyntaxError> {
        expect_arity(self.name(), args, 1)
    }
    fn run(&self, args: &[String], env: &mut Environment) -> ExecStatus {
        env.change_dir(Path::new(&args[0]))?;
        Ok(ExecOutcome::Code(0))
    }
}

pub struct PwdCommand;

impl BuiltinCommand for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }
    fn check(&self, args: &[String]) -> Result<(), SyntaxError> {
        expect_arity(self.name(), args, 0)
    }
    fn run(&self, _args: &[String], env: &mut Environment) -> ExecStatus {
        let dir = env.current_dir()?;
        env.print_path(&dir)?;
        Ok(ExecOutcome::Code(0))
    }
}
