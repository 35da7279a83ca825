//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfLoader` that composes base, environment,
//!   and secrets layers into a `Config`.
//! - Pick up the environment tag and configuration root from the process
//!   environment, or take them from builder methods.
//!
//! Does NOT handle:
//! - Caching the composed configuration (see global.rs).
//! - Parsing individual layer files (delegated to layer.rs).
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - Layers are merged base -> environment -> secrets, later wins.
//! - The `environment` key is applied after the merge and cannot be overridden by a layer.
//! - `.env` values only reach the loader through `load_dotenv*()` before `from_env()`.

use std::path::{Path, PathBuf};

use super::dotenv::{apply_dotenv, default_dotenv_path, dotenv_disabled};
use super::env::environment_tag;
use super::error::ConfError;
use super::layer::{Layer, LoadOutcome, load_layer};
use super::root::{resolve_config_root, root_from};
use crate::constants::{BASE_LAYER, DEFAULT_ENVIRONMENT, SECRETS_LAYER};
use crate::merge::merge_layers;
use crate::types::Config;

/// Per-layer record of what composition found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerReport {
    pub name: String,
    pub path: PathBuf,
    pub required: bool,
    pub outcome: LoadOutcome,
}

/// A composed configuration together with how each layer was resolved.
#[derive(Debug)]
pub struct Composition {
    pub config: Config,
    pub layers: Vec<LayerReport>,
}

/// Builder that resolves, loads, and merges configuration layers.
#[derive(Debug, Default, Clone)]
pub struct ConfLoader {
    root: Option<PathBuf>,
    environment: Option<String>,
}

impl ConfLoader {
    /// Create a loader with nothing resolved yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `<current_dir>/.env` to the process environment before reading it.
    ///
    /// # Errors
    ///
    /// See [`ConfLoader::load_dotenv_from`].
    pub fn load_dotenv(self) -> Result<Self, ConfError> {
        self.load_dotenv_from(default_dotenv_path())
    }

    /// Apply the `.env` file at `path` to the process environment.
    ///
    /// Variables already set win over the file. Skipped when `DOTENV_DISABLED`
    /// is `1` or `true`; a missing file is fine.
    ///
    /// # Errors
    ///
    /// `ConfError::DotenvSyntax` for a malformed line and `ConfError::DotenvRead`
    /// when the file exists but cannot be read.
    pub fn load_dotenv_from(self, path: impl AsRef<Path>) -> Result<Self, ConfError> {
        if !dotenv_disabled() {
            apply_dotenv(path.as_ref())?;
        }
        Ok(self)
    }

    /// Fill the environment tag and root from `APP_ENV`/`NODE_ENV` and `CONF_DIR`,
    /// leaving values already set through builder methods untouched.
    pub fn from_env(mut self) -> Self {
        if self.environment.is_none() {
            self.environment = Some(environment_tag());
        }
        if self.root.is_none() {
            self.root = Some(resolve_config_root());
        }
        self
    }

    /// Use `root` as the configuration directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Use `environment` as the environment tag.
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Compose the configuration.
    ///
    /// # Errors
    ///
    /// Fails with `ConfError::MissingRequired` if the base layer is absent and with
    /// `ConfError::Malformed` if any present layer does not parse.
    pub fn compose(self) -> Result<Config, ConfError> {
        self.compose_with_report().map(|composition| composition.config)
    }

    /// Compose the configuration and report the outcome of each layer.
    pub fn compose_with_report(self) -> Result<Composition, ConfError> {
        let environment = self
            .environment
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        let root = self
            .root
            .unwrap_or_else(|| root_from(None, std::env::current_dir));

        let plan = [
            (BASE_LAYER, true),
            (environment.as_str(), false),
            (SECRETS_LAYER, false),
        ];

        let mut layers: Vec<Layer> = Vec::with_capacity(plan.len());
        let mut reports = Vec::with_capacity(plan.len());
        for (name, required) in plan {
            let path = root.join(name);
            let loaded = load_layer(&path, required)?;
            layers.push(loaded.values);
            reports.push(LayerReport {
                name: name.to_string(),
                path,
                required,
                outcome: loaded.outcome,
            });
        }

        let merged = merge_layers(&layers);
        tracing::info!(
            environment = %environment,
            root = %root.display(),
            keys = merged.len(),
            "Configuration composed"
        );

        Ok(Composition {
            config: Config::new(environment, merged),
            layers: reports,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CONF_DIR_VAR, ENVIRONMENT_VAR};
    use serde_json::json;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn conf_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_compose_merges_in_precedence_order() {
        let dir = conf_dir(&[
            ("base.toml", "[a]\nx = 1\ny = 1\nz = 1\n"),
            ("staging.json", r#"{"a": {"y": 2, "z": 2}}"#),
            ("secrets.yaml", "a:\n  z: 3\n"),
        ]);

        let config = ConfLoader::new()
            .with_root(dir.path())
            .with_environment("staging")
            .compose()
            .unwrap();

        assert_eq!(config.get("a"), Some(json!({"x": 1, "y": 2, "z": 3})));
        assert_eq!(config.environment(), "staging");
    }

    #[test]
    fn test_environment_field_wins_over_every_layer() {
        let dir = conf_dir(&[
            ("base.toml", "environment = \"base\"\n"),
            ("qa.toml", "environment = \"qa-layer\"\n"),
            ("secrets.toml", "environment = \"secret\"\n"),
        ]);

        let config = ConfLoader::new()
            .with_root(dir.path())
            .with_environment("qa")
            .compose()
            .unwrap();

        assert_eq!(config.get("environment"), Some(json!("qa")));
    }

    #[test]
    fn test_report_records_missing_optional_layers() {
        let dir = conf_dir(&[("base.toml", "name = \"svc\"\n")]);

        let composition = ConfLoader::new()
            .with_root(dir.path())
            .with_environment("production")
            .compose_with_report()
            .unwrap();

        let outcomes: Vec<_> = composition
            .layers
            .iter()
            .map(|report| (report.name.as_str(), report.required, &report.outcome))
            .collect();
        assert!(matches!(outcomes[0], ("base", true, LoadOutcome::Loaded { .. })));
        assert_eq!(outcomes[1], ("production", false, &LoadOutcome::MissingOptional));
        assert_eq!(outcomes[2], ("secrets", false, &LoadOutcome::MissingOptional));
        assert_eq!(composition.layers[1].path, dir.path().join("production"));
    }

    #[test]
    fn test_missing_base_fails_composition() {
        let dir = conf_dir(&[("secrets.toml", "token = \"t\"\n")]);

        let result = ConfLoader::new().with_root(dir.path()).compose();
        assert!(matches!(result, Err(ConfError::MissingRequired { .. })));
    }

    #[test]
    fn test_malformed_environment_layer_fails_composition() {
        let dir = conf_dir(&[
            ("base.toml", "name = \"svc\"\n"),
            ("development.json", "{ \"name\": "),
        ]);

        let result = ConfLoader::new().with_root(dir.path()).compose();
        assert!(matches!(result, Err(ConfError::Malformed { .. })));
    }

    #[test]
    fn test_unreadable_secrets_layer_degrades_instead_of_failing() {
        let dir = conf_dir(&[("base.toml", "name = \"svc\"\n")]);
        fs::create_dir(dir.path().join("secrets.json")).unwrap();

        let composition = ConfLoader::new()
            .with_root(dir.path())
            .compose_with_report()
            .unwrap();

        assert_eq!(composition.config.get("name"), Some(json!("svc")));
        assert!(matches!(
            composition.layers[2].outcome,
            LoadOutcome::Unreadable { .. }
        ));
    }

    #[test]
    fn test_default_environment_is_development() {
        let dir = conf_dir(&[
            ("base.toml", "debug = false\n"),
            ("development.toml", "debug = true\n"),
        ]);

        let config = ConfLoader::new().with_root(dir.path()).compose().unwrap();
        assert_eq!(config.environment(), "development");
        assert_eq!(config.get("debug"), Some(json!(true)));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_variables() {
        let dir = conf_dir(&[("base.toml", "name = \"svc\"\n")]);
        let root = dir.path().to_string_lossy().into_owned();

        temp_env::with_vars(
            [
                (ENVIRONMENT_VAR, Some("production")),
                (CONF_DIR_VAR, Some(root.as_str())),
            ],
            || {
                let loader = ConfLoader::new().from_env();
                assert_eq!(loader.environment(), Some("production"));
                assert_eq!(loader.root(), Some(dir.path()));
            },
        );
    }

    #[test]
    #[serial]
    fn test_builder_values_take_precedence_over_env() {
        temp_env::with_vars(
            [
                (ENVIRONMENT_VAR, Some("production")),
                (CONF_DIR_VAR, Some("env-root")),
            ],
            || {
                let loader = ConfLoader::new()
                    .with_environment("qa")
                    .with_root("cli-root")
                    .from_env();
                assert_eq!(loader.environment(), Some("qa"));
                assert_eq!(loader.root(), Some(Path::new("cli-root")));
            },
        );
    }

    #[test]
    fn test_root_that_is_a_regular_file_fails_as_missing_base() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("conf");
        fs::write(&root, "not a directory\n").unwrap();

        let result = ConfLoader::new().with_root(&root).compose();
        assert!(matches!(result, Err(ConfError::MissingRequired { path }) if path == root.join("base")));
    }
}
