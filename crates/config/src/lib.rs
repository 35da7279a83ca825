//! Layered configuration for applications.
//!
//! Composes a required `base` layer, an optional per-environment layer selected by
//! `APP_ENV` (or `NODE_ENV`), and an optional `secrets` layer from a configuration directory
//! (`CONF_DIR`, or `./conf`) into one deep-merged key-value tree.
//!
//! ```no_run
//! let conf = simplework_conf::config();
//! let port: Option<u16> = conf.extract("app.port").unwrap_or_default();
//! println!("{} on port {:?}", conf.environment(), port);
//! ```

pub mod constants;
mod global;
mod loader;
pub mod merge;
mod types;

pub use global::config;
pub use loader::{
    Composition, ConfError, ConfLoader, Layer, LayerReport, LoadOutcome, LoadedLayer,
    ParseError, env_var_or_none, environment_tag, load_layer, resolve_config_root,
};
pub use merge::{deep_merge, merge_layers};
pub use types::Config;
