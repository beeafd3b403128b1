//! Checks that decide whether a statement is executable, without running it.

use crate::error::SyntaxError;

/// Compound operators rejected anywhere in a raw line.
pub const DISALLOWED_OPERATORS: [&str; 3] = [";;", ">>", "||"];

pub fn check_operators(line: &str) -> Result<(), SyntaxError> {
    match DISALLOWED_OPERATORS.into_iter().find(|op| line.contains(*op)) {
        Some(op) => Err(SyntaxError::DisallowedOperator(op)),
        None => Ok(()),
    }
}

pub fn expect_arity(
    builtin: &'static str,
    args: &[String],
    expected: usize,
) -> Result<(), SyntaxError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(SyntaxError::Arity {
            builtin,
            expected,
            found: args.len(),
        })
    }
}

/// A loop count is a positive base-10 integer made of ASCII digits only.
pub fn parse_loop_count(token: &str) -> Result<usize, SyntaxError> {
    let invalid = || SyntaxError::InvalidLoopCount(token.to_string());
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match token.parse::<usize>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(count) => Ok(count),
    }
}

pub fn check_loop_depth(depth: usize, max_depth: usize) -> Result<(), SyntaxError> {
    if depth > max_depth {
        Err(SyntaxError::LoopTooDeep(max_depth))
    } else {
        Ok(())
    }
}
