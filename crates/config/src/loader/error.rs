//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define the fatal layer failures (missing required layer, malformed content).
//! - Define `.env` loading failures and typed extraction failures.
//!
//! Does NOT handle:
//! - Non-fatal outcomes such as missing optional layers or unreadable files
//!   (reported through `LoadOutcome`, see layer.rs).
//! - Terminating the process (only `config()` in global.rs does that).
//!
//! Invariants:
//! - Every layer-related variant carries the path that failed.
//! - Dotenv errors carry the file path and a position, never line contents.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfError {
    /// The required layer has no file under any supported extension.
    #[error("No config file {path} found for required layer")]
    MissingRequired { path: PathBuf },

    /// A layer file exists but its content could not be parsed.
    #[error("Loading {path} file failed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// A `.env` file has a line that is not `KEY=value`.
    ///
    /// Only the byte position is kept; the line itself may hold a secret.
    #[error(
        "Invalid syntax in {path} at byte {position} (set DOTENV_DISABLED=1 to skip .env loading)"
    )]
    DotenvSyntax { path: PathBuf, position: usize },

    /// A `.env` file exists but could not be read.
    #[error("Unable to read {path}: {kind}")]
    DotenvRead { path: PathBuf, kind: ErrorKind },

    /// A configuration value could not be converted into the requested type.
    #[error("Config value at '{key}' has an unexpected shape: {source}")]
    Extract {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Syntax-level failures for the supported layer formats.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("content is not valid UTF-8")]
    Encoding,
}
