pub mod redirect;
pub mod validator;

use log::debug;

use crate::ast::{CommandNode, Pipeline, Statement, StatementList};
use crate::error::SyntaxError;
use crate::executor::BuiltinManager;
use crate::tokenizer::{WHITESPACE, skip_tokens, tokenize};

pub const SEQUENCE: &str = ";";
pub const PIPE: char = '|';
pub const LOOP: &str = "loop";

/// Turns one input line into a fully validated [`StatementList`].
///
/// The same list is later handed to the executor, so nothing is tokenized
/// twice and a line that fails here runs no statement at all.
pub struct LineParser<'a> {
    builtins: &'a BuiltinManager,
    max_loop_depth: usize,
}

impl<'a> LineParser<'a> {
    pub fn new(builtins: &'a BuiltinManager, max_loop_depth: usize) -> Self {
        LineParser {
            builtins,
            max_loop_depth,
        }
    }

    pub fn parse_line(&self, line: &str) -> Result<StatementList, SyntaxError> {
        validator::check_operators(line)?;

        let mut statements = Vec::new();
        for entry in tokenize(line, SEQUENCE) {
            if let Some(statement) = self.parse_statement(&entry, 0)? {
                statements.push(statement);
            }
        }
        debug!("parsed {} statement(s) from {:?}", statements.len(), line);
        Ok(StatementList::new(statements))
    }

    /// `None` for a blank statement.
    fn parse_statement(&self, text: &str, depth: usize) -> Result<Option<Statement>, SyntaxError> {
        let tokens = tokenize(text, WHITESPACE);
        let Some(first) = tokens.first() else {
            return Ok(None);
        };

        if first == LOOP {
            return self.parse_loop(text, &tokens, depth).map(Some);
        }

        if let Some(builtin) = self.builtins.get(first) {
            builtin.check(&tokens[1..])?;
            return Ok(CommandNode::from_tokens(tokens).map(Statement::Builtin));
        }

        self.parse_pipeline(text)
            .map(|pipeline| Some(Statement::Pipeline(pipeline)))
    }

    fn parse_loop(
        &self,
        text: &str,
        tokens: &[String],
        depth: usize,
    ) -> Result<Statement, SyntaxError> {
        let depth = depth + 1;
        validator::check_loop_depth(depth, self.max_loop_depth)?;

        let count = match tokens.get(1) {
            Some(token) => validator::parse_loop_count(token)?,
            None => return Err(SyntaxError::MissingLoopBody),
        };

        let body_text = skip_tokens(text, WHITESPACE, 2);
        let body = self
            .parse_statement(body_text, depth)?
            .ok_or(SyntaxError::MissingLoopBody)?;

        Ok(Statement::Loop {
            count,
            body: Box::new(body),
        })
    }

    fn parse_pipeline(&self, text: &str) -> Result<Pipeline, SyntaxError> {
        let segments: Vec<&str> = text.split(PIPE).collect();
        let last = segments.len() - 1;

        let mut stages = Vec::with_capacity(segments.len());
        let mut sink = None;
        for (i, segment) in segments.iter().enumerate() {
            let resolved = redirect::resolve(tokenize(segment, WHITESPACE))?;
            if resolved.sink.is_some() {
                if i != last {
                    return Err(SyntaxError::RedirectBeforePipe);
                }
                sink = resolved.sink;
            }
            let stage =
                CommandNode::from_tokens(resolved.tokens).ok_or(SyntaxError::EmptyPipelineStage)?;
            stages.push(stage);
        }

        Ok(Pipeline { stages, sink })
    }
}
