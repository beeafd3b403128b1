use std::ffi::OsString;
use std::io::{self, Write};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use nix::errno::Errno;

use crate::error::{ERROR_MESSAGE, ShellError};

/// Upper bound for the `getcwd` buffer; reaching it is a resource error.
const MAX_CWD_CAPACITY: usize = 1 << 20;

/// Interpreter state shared by every statement of a session.
///
/// The working directory itself is the process's: `cd` changes it for the
/// interpreter and every child spawned afterwards.
pub struct Environment {
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
    cwd_capacity: usize,
}

impl Environment {
    pub fn new(cwd_capacity: usize) -> Self {
        Self::with_writers(Box::new(io::stdout()), Box::new(io::stderr()), cwd_capacity)
    }

    pub fn with_writers(
        stdout: Box<dyn Write>,
        stderr: Box<dyn Write>,
        cwd_capacity: usize,
    ) -> Self {
        Environment {
            stdout,
            stderr,
            cwd_capacity: cwd_capacity.max(1),
        }
    }

    /// Absolute working directory, asking `getcwd` with a buffer that starts
    /// at the configured capacity and doubles until the path fits.
    pub fn current_dir(&self) -> Result<PathBuf, ShellError> {
        let mut capacity = self.cwd_capacity;
        loop {
            let mut buf: Vec<u8> = vec![0; capacity];
            let ret = unsafe { libc::getcwd(buf.as_mut_ptr().cast(), buf.len()) };
            if !ret.is_null() {
                let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
                buf.truncate(len);
                return Ok(PathBuf::from(OsString::from_vec(buf)));
            }

            match Errno::last() {
                Errno::ERANGE if capacity < MAX_CWD_CAPACITY => {
                    debug!("getcwd buffer of {} bytes too small", capacity);
                    capacity = capacity.saturating_mul(2);
                }
                errno => {
                    warn!("getcwd failed with a {} byte buffer: {}", capacity, errno);
                    return Err(ShellError::CurrentDir(errno));
                }
            }
        }
    }

    pub fn change_dir(&mut self, path: &Path) -> Result<(), ShellError> {
        nix::unistd::chdir(path).map_err(|source| ShellError::ChangeDir {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("working directory is now {}", path.display());
        Ok(())
    }

    /// Writes `line` and a newline to the interpreter's output, flushed so it
    /// is ordered before anything a child writes afterwards.
    pub fn print_line(&mut self, line: &[u8]) -> Result<(), ShellError> {
        self.stdout.write_all(line)?;
        self.stdout.write_all(b"\n")?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn print_path(&mut self, path: &Path) -> Result<(), ShellError> {
        self.print_line(path.as_os_str().as_bytes())
    }

    pub fn flush(&mut self) -> Result<(), ShellError> {
        self.stdout.flush()?;
        Ok(())
    }

    /// Reports `err` with the fixed user-facing message; the detail only
    /// reaches the log.
    pub fn report(&mut self, err: &ShellError) {
        debug!("{:?} error: {}", err.kind(), err);
        if let Err(e) = self
            .stderr
            .write_all(ERROR_MESSAGE.as_bytes())
            .and_then(|()| self.stderr.flush())
        {
            warn!("cannot write error message: {}", e);
        }
    }
}
