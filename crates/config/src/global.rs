//! Process-wide configuration accessor.
//!
//! Responsibilities:
//! - Apply `./.env`, then compose from `APP_ENV`/`NODE_ENV` and `CONF_DIR`, exactly
//!   once per process.
//! - Hand every caller the same `&'static Config`.
//! - Turn fatal load errors into process termination.
//!
//! Invariants:
//! - Concurrent first calls run a single composition; all callers observe its result.
//! - The cached value is never recomputed, even if environment variables change later.
//! - This is the only place in the crate that exits the process.

use std::sync::OnceLock;

use crate::constants::FATAL_EXIT_CODE;
use crate::loader::{ConfError, ConfLoader};
use crate::types::Config;

static CONFIG: OnceLock<Config> = OnceLock::new();

/// The composed configuration for this process.
///
/// The first call applies `./.env` (unless `DOTENV_DISABLED` is set) and composes
/// the base, environment, and secrets layers from the configuration root; later
/// calls return the same instance.
///
/// A malformed `.env`, a missing base layer, or a malformed layer terminates the
/// process with a non-zero status after printing the cause to stderr.
pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| match compose_from_process() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration could not be composed");
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(FATAL_EXIT_CODE);
        }
    })
}

fn compose_from_process() -> Result<Config, ConfError> {
    ConfLoader::new().load_dotenv()?.from_env().compose()
}
