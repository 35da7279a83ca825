//! Centralized constants for layered configuration loading.
//!
//! Variable names, layer names, and file conventions live here so the
//! loader, the resolver, and the tests agree on a single source.

// =============================================================================
// Environment Variables
// =============================================================================

/// Variable selecting the active environment tag.
pub const ENVIRONMENT_VAR: &str = "APP_ENV";

/// Fallback for the environment tag when `APP_ENV` is unset or blank.
pub const LEGACY_ENVIRONMENT_VAR: &str = "NODE_ENV";

/// Variable overriding the configuration root directory.
pub const CONF_DIR_VAR: &str = "CONF_DIR";

/// Variable that disables `.env` loading when set to `1` or `true`.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

// =============================================================================
// Layer Conventions
// =============================================================================

/// File name of the dotenv file read from the working directory.
pub const DOTENV_FILE_NAME: &str = ".env";

/// Environment tag used when neither `APP_ENV` nor `NODE_ENV` is set.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Directory name under the working directory holding the layer files.
pub const DEFAULT_CONF_DIR_NAME: &str = "conf";

/// Name of the required layer.
pub const BASE_LAYER: &str = "base";

/// Name of the optional secrets layer.
pub const SECRETS_LAYER: &str = "secrets";

/// Key injected into the composed configuration carrying the environment tag.
pub const ENVIRONMENT_KEY: &str = "environment";

/// File extensions tried for an extension-less layer reference, in priority order.
pub const LAYER_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

// =============================================================================
// Process Exit
// =============================================================================

/// Exit status used when composition hits a fatal load error.
pub const FATAL_EXIT_CODE: i32 = 1;
