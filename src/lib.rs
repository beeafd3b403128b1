pub mod ast;
pub mod config;
pub mod environment;
pub mod error;
pub mod executor;
pub mod interpreter;
pub mod logging;
pub mod parser;
pub mod prompt;
pub mod tokenizer;

#[cfg(test)]
mod testing;
