//! Error types for OrbitOS.

use std::io;

/// Errors produced by the OrbitOS framework.
#[derive(Debug, thiserror::Error)]
pub enum OrbitError {
    #[error("command error: {0}")]
    Command(String),

    #[error("usage: {0}")]
    Usage(String),

    #[error("invalid expression: {0}")]
    Expr(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, OrbitError>;
