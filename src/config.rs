use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_ENV: &str = "SMASH_CONFIG";
pub const PROMPT_ENV: &str = "SMASH_PROMPT";
pub const LOG_LEVEL_ENV: &str = "SMASH_LOG_LEVEL";
pub const MAX_LOOP_DEPTH_ENV: &str = "SMASH_MAX_LOOP_DEPTH";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub prompt: String,
    /// Deepest `loop` nesting a single statement may use.
    pub max_loop_depth: usize,
    /// Initial buffer size for reading the working directory.
    pub pwd_initial_capacity: usize,
    pub log_level: String,
    /// Log records are appended here instead of going to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: "smash> ".to_string(),
            max_loop_depth: 64,
            pwd_initial_capacity: 16,
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(src)?;
        validate(&config)?;
        Ok(config)
    }

    /// Loads the session configuration.
    ///
    /// The file named by `SMASH_CONFIG` must exist; otherwise
    /// `$HOME/.config/smash/config.toml` is read when present. Environment
    /// overrides are applied last.
    pub fn load() -> Result<Config, ConfigError> {
        let mut config = match env::var_os(CONFIG_ENV) {
            Some(path) => Self::load_from_file(PathBuf::from(path))?,
            None => match default_path() {
                Some(path) if path.is_file() => Self::load_from_file(path)?,
                _ => Self::default_config(),
            },
        };
        apply_overrides(&mut config, |key| env::var(key).ok())?;
        Ok(config)
    }

    /// Defaults with the `SMASH_*` environment overrides applied; used when
    /// the configuration file cannot be loaded.
    pub fn fallback() -> Config {
        let mut config = Self::default_config();
        match apply_overrides(&mut config, |key| env::var(key).ok()) {
            Ok(()) => config,
            Err(_) => Self::default_config(),
        }
    }
}

fn default_path() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config/smash/config.toml"))
}

fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(prompt) = lookup(PROMPT_ENV) {
        config.prompt = prompt;
    }
    if let Some(level) = lookup(LOG_LEVEL_ENV) {
        config.log_level = level;
    }
    if let Some(depth) = lookup(MAX_LOOP_DEPTH_ENV) {
        config.max_loop_depth = depth.trim().parse().map_err(|_| ConfigError::Invalid {
            key: "max_loop_depth",
            value: depth.clone(),
        })?;
    }
    validate(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.max_loop_depth == 0 {
        return Err(ConfigError::Invalid {
            key: "max_loop_depth",
            value: "0".to_string(),
        });
    }
    if config.pwd_initial_capacity == 0 {
        return Err(ConfigError::Invalid {
            key: "pwd_initial_capacity",
            value: "0".to_string(),
        });
    }
    Ok(())
}
