//! Configuration root resolution.
//!
//! Responsibilities:
//! - Determine the directory holding the layer files.
//!
//! Does NOT handle:
//! - Checking that the directory exists (missing layers are reported by the loader).
//!
//! Invariants:
//! - A non-empty `CONF_DIR` is returned verbatim, without trimming.
//! - Otherwise the root is `<current_dir>/conf`.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use crate::constants::{CONF_DIR_VAR, DEFAULT_CONF_DIR_NAME};

/// Resolve the configuration root from `CONF_DIR` or the working directory.
pub fn resolve_config_root() -> PathBuf {
    root_from(std::env::var_os(CONF_DIR_VAR), std::env::current_dir)
}

/// Pure resolution step, separated so the override/fallback rules are testable
/// without touching process state.
pub(crate) fn root_from(
    override_dir: Option<OsString>,
    current_dir: impl FnOnce() -> io::Result<PathBuf>,
) -> PathBuf {
    if let Some(dir) = override_dir.filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }

    match current_dir() {
        Ok(cwd) => cwd.join(DEFAULT_CONF_DIR_NAME),
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Unable to determine working directory; falling back to a relative config root"
            );
            PathBuf::from(DEFAULT_CONF_DIR_NAME)
        }
    }
}
