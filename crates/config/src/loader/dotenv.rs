//! `.env` file support.
//!
//! Responsibilities:
//! - Apply `KEY=value` pairs from a `.env` file to the process environment so
//!   `APP_ENV`, `NODE_ENV`, and `CONF_DIR` can come from it during development.
//!
//! Does NOT handle:
//! - Reading the variables back (see env.rs and root.rs).
//!
//! Invariants:
//! - Variables already set in the process are never overwritten.
//! - A missing file is not an error; `DOTENV_DISABLED=1|true` skips loading entirely.
//! - Errors name the file and a byte position, never line contents.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::env::env_var_or_none;
use super::error::ConfError;
use crate::constants::{DOTENV_DISABLED_VAR, DOTENV_FILE_NAME};

pub(crate) fn dotenv_disabled() -> bool {
    env_var_or_none(DOTENV_DISABLED_VAR)
        .is_some_and(|flag| flag == "1" || flag.eq_ignore_ascii_case("true"))
}

/// `<current_dir>/.env`, next to the default `conf/` directory.
pub(crate) fn default_dotenv_path() -> PathBuf {
    std::env::current_dir()
        .map(|cwd| cwd.join(DOTENV_FILE_NAME))
        .unwrap_or_else(|_| PathBuf::from(DOTENV_FILE_NAME))
}

/// Apply the file at `path`. Returns whether a file was found.
pub(crate) fn apply_dotenv(path: &Path) -> Result<bool, ConfError> {
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Applied .env file");
            Ok(true)
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(dotenvy::Error::LineParse(_, position)) => Err(ConfError::DotenvSyntax {
            path: path.to_path_buf(),
            position,
        }),
        Err(dotenvy::Error::Io(e)) => Err(ConfError::DotenvRead {
            path: path.to_path_buf(),
            kind: e.kind(),
        }),
        Err(_) => Err(ConfError::DotenvRead {
            path: path.to_path_buf(),
            kind: ErrorKind::InvalidData,
        }),
    }
}
