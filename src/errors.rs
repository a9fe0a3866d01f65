// src/errors.rs

//! Crate-wide error type and `Result` alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipeflowError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("duplicate task '{key}'")]
    DuplicateTask { key: String },

    #[error("unknown task '{key}' referenced as a prerequisite of '{task}'")]
    UnknownNode { task: String, key: String },

    #[error("adding '{prev}' as a prerequisite of '{task}' would close a cycle")]
    Cycle { task: String, prev: String },

    #[error("done list contains tasks unreachable from the graph roots: {keys:?}")]
    InvalidDoneList { keys: Vec<String> },

    #[error("task '{task}' exited with code {code}")]
    TaskFailed { task: String, code: i32 },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PipeflowError>;
