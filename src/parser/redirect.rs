use std::path::PathBuf;

use crate::error::SyntaxError;

pub const REDIRECT: &str = ">";

/// Command tokens with any trailing `> file` removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirected {
    pub tokens: Vec<String>,
    pub sink: Option<PathBuf>,
}

/// Strips a trailing `> file` from `tokens`.
///
/// A `>` anywhere in the statement must be a token of its own, appear once,
/// and be followed by exactly one file name.
pub fn resolve(mut tokens: Vec<String>) -> Result<Redirected, SyntaxError> {
    if !tokens.iter().any(|token| token.contains(REDIRECT)) {
        return Ok(Redirected { tokens, sink: None });
    }

    if tokens.first().is_some_and(|token| token == REDIRECT) {
        return Err(SyntaxError::EmptyCommand);
    }

    let operators: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| *token == REDIRECT)
        .map(|(pos, _)| pos)
        .collect();

    let pos = match operators.as_slice() {
        [] => return Err(SyntaxError::MisplacedRedirection),
        [pos] => *pos,
        _ => return Err(SyntaxError::MultipleRedirections),
    };

    if pos + 1 == tokens.len() {
        return Err(SyntaxError::MissingRedirectTarget);
    }
    if pos + 2 != tokens.len() {
        return Err(SyntaxError::MisplacedRedirection);
    }

    let sink = tokens.pop().map(PathBuf::from);
    tokens.truncate(pos);
    if tokens.iter().any(|token| token.contains(REDIRECT)) {
        return Err(SyntaxError::MisplacedRedirection);
    }
    if let Some(file) = &sink {
        if file.as_os_str().to_string_lossy().contains(REDIRECT) {
            return Err(SyntaxError::MisplacedRedirection);
        }
    }

    Ok(Redirected { tokens, sink })
}
