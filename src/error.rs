use std::io;
use std::path::PathBuf;

use nix::errno::Errno;
use thiserror::Error;

/// The only text a user ever sees for a rejected or failed statement.
pub const ERROR_MESSAGE: &str = "An error has occurred\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Operation,
    Resource,
}

/// A statement that can never be executed as written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("disallowed operator '{0}'")]
    DisallowedOperator(&'static str),
    #[error("{builtin}: expected {expected} argument(s), found {found}")]
    Arity {
        builtin: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("missing command before '>'")]
    EmptyCommand,
    #[error("more than one '>' in a statement")]
    MultipleRedirections,
    #[error("'>' must be a separate token followed by exactly one file name")]
    MisplacedRedirection,
    #[error("missing file name after '>'")]
    MissingRedirectTarget,
    #[error("empty command in pipeline")]
    EmptyPipelineStage,
    #[error("only the last pipeline stage may redirect its output")]
    RedirectBeforePipe,
    #[error("invalid loop count '{0}'")]
    InvalidLoopCount(String),
    #[error("loop needs a count and a command")]
    MissingLoopBody,
    #[error("loop nesting deeper than {0}")]
    LoopTooDeep(usize),
    #[error("line is not valid UTF-8: {0}")]
    InvalidEncoding(#[source] std::str::Utf8Error),
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("cd: {}: {source}", path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: Errno,
    },
    #[error("no such builtin: {0}")]
    NoSuchBuiltin(String),
    #[error("{program}: cannot execute: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{}: cannot open for writing: {source}", path.display())]
    OpenSink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("pipe: {0}")]
    Pipe(#[source] Errno),
    #[error("getcwd: {0}")]
    CurrentDir(#[source] Errno),
    #[error("wait: {0}")]
    Wait(#[source] io::Error),
    #[error("write: {0}")]
    Output(#[from] io::Error),
}

impl ShellError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShellError::Syntax(_) => ErrorKind::Syntax,
            ShellError::ChangeDir { .. }
            | ShellError::NoSuchBuiltin(_)
            | ShellError::Spawn { .. }
            | ShellError::OpenSink { .. } => ErrorKind::Operation,
            ShellError::Pipe(_)
            | ShellError::CurrentDir(_)
            | ShellError::Wait(_)
            | ShellError::Output(_) => ErrorKind::Resource,
        }
    }
}
