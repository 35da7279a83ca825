//! Environment variable access for configuration loading.
//!
//! Responsibilities:
//! - Read the environment tag from `APP_ENV`, then `NODE_ENV`, defaulting to `development`.
//! - Provide a helper for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Resolving the configuration root from `CONF_DIR` (see root.rs).
//! - `.env` file loading (see dotenv.rs).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.

use crate::constants::{DEFAULT_ENVIRONMENT, ENVIRONMENT_VAR, LEGACY_ENVIRONMENT_VAR};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    let value = std::env::var(key).ok()?;
    let trimmed = value.trim();
    match trimmed.len() {
        0 => None,
        len if len == value.len() => Some(value),
        _ => Some(trimmed.to_string()),
    }
}

/// The active environment tag.
///
/// Reads `APP_ENV`, then `NODE_ENV`; falls back to `"development"` when both
/// are unset or blank.
pub fn environment_tag() -> String {
    env_var_or_none(ENVIRONMENT_VAR)
        .or_else(|| env_var_or_none(LEGACY_ENVIRONMENT_VAR))
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}
