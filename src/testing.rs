//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use crate::environment::Environment;

/// An in-memory writer whose contents stay readable after it is boxed.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An environment writing to buffers, returned alongside as (stdout, stderr).
pub fn capture_env() -> (Environment, SharedBuffer, SharedBuffer) {
    let out = SharedBuffer::default();
    let err = SharedBuffer::default();
    let env = Environment::with_writers(Box::new(out.clone()), Box::new(err.clone()), 16);
    (env, out, err)
}

/// Restores the process working directory when dropped.
pub struct DirGuard(PathBuf);

impl DirGuard {
    pub fn new() -> Self {
        DirGuard(std::env::current_dir().unwrap())
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.0);
    }
}
