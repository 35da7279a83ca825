//! Layer loading and composition.
//!
//! Responsibilities:
//! - Resolve the configuration root (`CONF_DIR` or `<cwd>/conf`) and the environment tag.
//! - Load the base, environment, and secrets layers with required/optional policy.
//! - Provide the `ConfLoader` builder that merges them into a `Config`.
//!
//! Does NOT handle:
//! - Process-wide caching or process termination (see global.rs).
//!
//! Invariants / Assumptions:
//! - Only the base layer is required.
//! - Malformed content is fatal for every layer; other read failures are not.

mod builder;
mod dotenv;
mod env;
mod error;
mod format;
mod layer;
mod root;

pub use builder::{Composition, ConfLoader, LayerReport};
pub use env::{env_var_or_none, environment_tag};
pub use error::{ConfError, ParseError};
pub use layer::{Layer, LoadOutcome, LoadedLayer, load_layer};
pub use root::resolve_config_root;
