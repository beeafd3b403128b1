use std::fs::OpenOptions;
use std::io::Write;
use std::process;

use chrono::Local;
use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::config::Config;

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

pub fn parse_level(level: &str) -> LevelFilter {
    match level {
        level if level.eq_ignore_ascii_case("off") => LevelFilter::Off,
        level if level.eq_ignore_ascii_case("error") => LevelFilter::Error,
        level if level.eq_ignore_ascii_case("warn") => LevelFilter::Warn,
        level if level.eq_ignore_ascii_case("info") => LevelFilter::Info,
        level if level.eq_ignore_ascii_case("debug") => LevelFilter::Debug,
        level if level.eq_ignore_ascii_case("trace") => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}

/// Installs the global logger. Records go to stderr unless `log_file` is
/// set, so they never mix with command output on stdout.
pub fn init_logger(config: &Config) {
    let level = parse_level(&config.log_level);

    let target = match &config.log_file {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Target::Pipe(Box::new(file)),
            Err(e) => {
                eprintln!("smash: cannot open log file {}: {}", path.display(), e);
                Target::Stderr
            }
        },
        None => Target::Stderr,
    };

    let installed = Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[PID:{}][{}] {} - {}",
                process::id(),
                record.level(),
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.args()
            )
        })
        .target(target)
        .filter(Some(CRATE_TARGET), level)
        .filter(None, LevelFilter::Warn)
        .try_init();

    // tests and embedders may have installed one already
    if installed.is_ok() {
        log::debug!("log level set to {}", level);
    }
}
