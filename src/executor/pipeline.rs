use std::fs::{File, OpenOptions};
use std::os::fd::OwnedFd;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

use log::{debug, warn};
use nix::fcntl::OFlag;
use nix::unistd::pipe2;

use super::executor::{ExecError, ExecOutcome, ExecStatus};
use super::path_resolver::PathResolver;
use crate::ast::{CommandNode, Pipeline};

/// Permission bits of a newly created sink file.
pub const SINK_MODE: u32 = 0o644;

/// Spawns every stage of a pipeline, wires stage `i`'s stdout to stage
/// `i + 1`'s stdin and waits for all of them.
///
/// Each pipe end is an `OwnedFd` handed to exactly one child through
/// `Stdio`. The parent's copy is closed as soon as that child is spawned,
/// and pipes are created close-on-exec so no other child inherits them.
pub struct PipelineHandler {
    resolver: PathResolver,
}

impl Default for PipelineHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineHandler {
    pub fn new() -> Self {
        PipelineHandler {
            resolver: PathResolver,
        }
    }

    /// Status of the last stage, once every stage has terminated.
    pub fn run(&self, pipeline: &Pipeline) -> ExecStatus {
        let mut sink = match &pipeline.sink {
            Some(path) => Some(open_sink(path)?),
            None => None,
        };

        let last = pipeline.stages.len().saturating_sub(1);
        let mut children = Vec::with_capacity(pipeline.stages.len());
        let mut upstream: Option<OwnedFd> = None;
        let mut failure = None;

        for (i, node) in pipeline.stages.iter().enumerate() {
            let mut command = self.prepare_command(node);

            if let Some(read_end) = upstream.take() {
                command.stdin(Stdio::from(read_end));
            }
            if i < last {
                match pipe2(OFlag::O_CLOEXEC) {
                    Ok((read_end, write_end)) => {
                        command.stdout(Stdio::from(write_end));
                        upstream = Some(read_end);
                    }
                    Err(errno) => {
                        warn!("pipe for stage {} failed: {}", i, errno);
                        failure = Some(ExecError::Pipe(errno));
                        break;
                    }
                }
            } else if let Some(file) = sink.take() {
                command.stdout(Stdio::from(file));
            }

            let spawned = command.spawn();
            // closes the parent's copies of this stage's descriptors
            drop(command);

            // A stage that fails to start behaves as if it exited at once:
            // its producer sees a closed pipe and its consumer reads EOF.
            match spawned {
                Ok(child) => {
                    debug!("stage {} spawned {} as pid {}", i, node.name, child.id());
                    children.push((node.name.as_str(), child));
                }
                Err(source) => {
                    debug!("stage {} could not start {}: {}", i, node.name, source);
                    failure.get_or_insert(ExecError::Spawn {
                        program: node.name.clone(),
                        source,
                    });
                }
            }
        }

        drop(upstream);

        let status = wait_all(children);
        match failure {
            Some(err) => Err(err),
            None => status.map(ExecOutcome::Code),
        }
    }

    fn prepare_command(&self, node: &CommandNode) -> Command {
        let mut command = Command::new(self.resolver.resolve(&node.name));
        command.arg0(&node.name).args(&node.args);
        command
    }
}

/// Waits in spawn order, so producers are reaped before their consumers.
fn wait_all(children: Vec<(&str, Child)>) -> Result<i32, ExecError> {
    let mut code = 0;
    let mut failure = None;
    for (name, mut child) in children {
        match child.wait() {
            Ok(status) => {
                code = exit_code(status);
                debug!("{} (pid {}) exited with {}", name, child.id(), code);
            }
            Err(e) => {
                warn!("waiting for {} (pid {}) failed: {}", name, child.id(), e);
                failure.get_or_insert(ExecError::Wait(e));
            }
        }
    }
    match failure {
        Some(err) => Err(err),
        None => Ok(code),
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

fn open_sink(path: &Path) -> Result<File, ExecError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(SINK_MODE)
        .open(path)
        .map_err(|source| ExecError::OpenSink {
            path: path.to_path_buf(),
            source,
        })
}
