use std::path::PathBuf;

/// One program (or built-in) name with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandNode {
    pub name: String,
    pub args: Vec<String>,
}

impl CommandNode {
    /// Splits non-empty `tokens` into name and arguments.
    pub fn from_tokens(mut tokens: Vec<String>) -> Option<Self> {
        if tokens.is_empty() {
            return None;
        }
        let args = tokens.split_off(1);
        let name = tokens.pop()?;
        Some(CommandNode { name, args })
    }
}

/// External programs chained stdout to stdin. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub stages: Vec<CommandNode>,
    pub sink: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Builtin(CommandNode),
    Loop { count: usize, body: Box<Statement> },
    Pipeline(Pipeline),
}

/// The validated statements of one input line, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementList {
    statements: Vec<Statement>,
}

impl StatementList {
    pub fn new(statements: Vec<Statement>) -> Self {
        StatementList { statements }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl<'a> IntoIterator for &'a StatementList {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
