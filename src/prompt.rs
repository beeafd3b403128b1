use std::io::{self, BufRead, Write};

pub struct ShellPrompt {
    prompt: String,
}

impl ShellPrompt {
    pub fn new(prompt: &str) -> Self {
        ShellPrompt {
            prompt: prompt.to_string(),
        }
    }

    pub fn show_prompt(&self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(self.prompt.as_bytes())?;
        out.flush()
    }

    /// Next line as raw bytes without its terminator, or `None` at end of
    /// input.
    pub fn read_line(&self) -> io::Result<Option<Vec<u8>>> {
        read_line_from(&mut io::stdin().lock())
    }
}

fn read_line_from<R: BufRead>(input: &mut R) -> io::Result<Option<Vec<u8>>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    if buf.ends_with(b"\n") {
        buf.pop();
        if buf.ends_with(b"\r") {
            buf.pop();
        }
    }
    Ok(Some(buf))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_read_lines() {
        let mut input = Cursor::new(&b"pwd\n\nloop 2 pwd ; exit\r\nlast"[..]);
        assert_eq!(read_line_from(&mut input).unwrap(), Some(b"pwd".to_vec()));
        assert_eq!(read_line_from(&mut input).unwrap(), Some(Vec::new()));
        assert_eq!(
            read_line_from(&mut input).unwrap(),
            Some(b"loop 2 pwd ; exit".to_vec())
        );
        assert_eq!(read_line_from(&mut input).unwrap(), Some(b"last".to_vec()));
        assert_eq!(read_line_from(&mut input).unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8_is_still_a_line() {
        let mut input = Cursor::new(&b"/bin/echo \xff\npwd\n"[..]);
        assert_eq!(
            read_line_from(&mut input).unwrap(),
            Some(b"/bin/echo \xff".to_vec())
        );
        assert_eq!(read_line_from(&mut input).unwrap(), Some(b"pwd".to_vec()));
    }
}
