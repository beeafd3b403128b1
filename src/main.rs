use std::io::{self, Write};
use std::process;

use log::debug;
use smash::config::ConfigLoader;
use smash::error::ERROR_MESSAGE;
use smash::interpreter::{Interpreter, LineOutcome};
use smash::logging::init_logger;
use smash::prompt::ShellPrompt;

fn main() {
    let config = ConfigLoader::load().unwrap_or_else(|e| {
        eprintln!("smash: {}, using defaults", e);
        ConfigLoader::fallback()
    });
    init_logger(&config);

    // the interpreter takes no arguments, but still starts
    if std::env::args_os().len() > 1 {
        if let Err(e) = io::stderr().write_all(ERROR_MESSAGE.as_bytes()) {
            debug!("cannot report arguments: {}", e);
        }
    }

    let prompt = ShellPrompt::new(&config.prompt);
    let mut interpreter = Interpreter::new(&config);

    loop {
        if let Err(e) = prompt.show_prompt() {
            debug!("cannot write prompt: {}", e);
        }
        let line = match prompt.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                debug!("cannot read input: {}", e);
                break;
            }
        };

        if let LineOutcome::Exit(code) = interpreter.run_bytes(&line) {
            process::exit(code);
        }
    }
}
