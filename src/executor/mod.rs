mod builtins;
mod executor;
mod path_resolver;
mod pipeline;

pub use builtins::{BuiltinCommand, BuiltinManager, CdCommand, ExitCommand, PwdCommand};
pub use executor::{DefaultExecutor, ExecError, ExecOutcome, ExecStatus, Executor};
pub use path_resolver::PathResolver;
pub use pipeline::{PipelineHandler, SINK_MODE};
