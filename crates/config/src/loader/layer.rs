//! Loading a single named layer from disk.
//!
//! Responsibilities:
//! - Resolve an extension-less layer reference (`<root>/base`) to a concrete file.
//! - Parse the file into an untyped mapping (formats live in format.rs).
//! - Classify the result: loaded, missing (optional or required), malformed, or unreadable.
//!
//! Does NOT handle:
//! - Merging layers (see merge.rs).
//! - Terminating the process on fatal outcomes (see global.rs).
//!
//! Invariants:
//! - A missing required layer and malformed content are returned as `Err`, whatever
//!   the `required` flag says for the latter.
//! - Any other read failure is logged and yields an empty layer, so composition
//!   continues in a degraded state.
//! - A document whose top level is not a mapping contributes an empty layer.
//! - A path under a regular file counts as missing, not unreadable.

use serde_json::{Map, Value};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::{ConfError, ParseError};
use super::format::LayerFormat;
use crate::constants::LAYER_EXTENSIONS;

/// One layer's key-value content.
pub type Layer = Map<String, Value>;

/// Non-fatal result classification for a layer load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was found and parsed.
    Loaded { source: PathBuf },
    /// No file exists for an optional layer.
    MissingOptional,
    /// A file exists but could not be read (permissions, not a regular file, ...).
    Unreadable { source: PathBuf, reason: String },
}

/// A layer's content together with how it was obtained.
#[derive(Debug, Clone)]
pub struct LoadedLayer {
    pub values: Layer,
    pub outcome: LoadOutcome,
}

impl LoadedLayer {
    fn empty(outcome: LoadOutcome) -> Self {
        Self {
            values: Layer::new(),
            outcome,
        }
    }
}

/// Load the layer referenced by `path`.
///
/// `path` is normally extension-less; each supported extension is tried in
/// priority order and the first existing file is used. A reference that already
/// names a supported extension is used as-is.
///
/// # Errors
///
/// - `ConfError::MissingRequired` when `required` is set and no file exists.
/// - `ConfError::Malformed` when the file exists but does not parse.
pub fn load_layer(path: &Path, required: bool) -> Result<LoadedLayer, ConfError> {
    let found: Vec<PathBuf> = layer_candidates(path)
        .into_iter()
        .filter(|candidate| candidate_present(candidate))
        .collect();

    let Some(source) = found.first().cloned() else {
        return missing(path, required);
    };
    if found.len() > 1 {
        tracing::warn!(
            using = %source.display(),
            shadowed = ?found[1..],
            "Multiple files found for config layer {}",
            path.display()
        );
    }

    let bytes = match fs::read(&source) {
        Ok(bytes) => bytes,
        Err(e) if is_absent(e.kind()) => return missing(path, required),
        Err(e) => {
            tracing::error!(error = %e, "Unknown error in loading {} config file", source.display());
            return Ok(LoadedLayer::empty(LoadOutcome::Unreadable {
                source,
                reason: e.to_string(),
            }));
        }
    };

    let values = String::from_utf8(bytes)
        .map_err(|_| ParseError::Encoding)
        .and_then(|content| parse_content(&source, &content))
        .map_err(|e| {
            tracing::error!(error = %e, "Loading {} file failed", source.display());
            ConfError::Malformed {
                path: source.clone(),
                source: e,
            }
        })?;

    tracing::debug!(source = %source.display(), keys = values.len(), "Loaded config layer");
    Ok(LoadedLayer {
        values,
        outcome: LoadOutcome::Loaded { source },
    })
}

/// Concrete files that may back a layer reference, in priority order.
fn layer_candidates(path: &Path) -> Vec<PathBuf> {
    if LayerFormat::from_path(path).is_some() {
        return vec![path.to_path_buf()];
    }

    LAYER_EXTENSIONS
        .iter()
        .map(|ext| {
            // Appended rather than `with_extension` so names like `eu.prod` keep their dot.
            let mut name = OsString::from(path.as_os_str());
            name.push(".");
            name.push(ext);
            PathBuf::from(name)
        })
        .collect()
}

/// A candidate counts as present unless the filesystem says it does not exist.
/// Other metadata failures surface later as an unreadable layer.
fn candidate_present(candidate: &Path) -> bool {
    match fs::metadata(candidate) {
        Ok(_) => true,
        Err(e) => !is_absent(e.kind()),
    }
}

/// `NotADirectory` means a path component is a regular file, so nothing can exist below it.
fn is_absent(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::NotFound | ErrorKind::NotADirectory)
}

fn missing(path: &Path, required: bool) -> Result<LoadedLayer, ConfError> {
    if required {
        tracing::error!("No config file {} FOUND for required layer", path.display());
        return Err(ConfError::MissingRequired {
            path: path.to_path_buf(),
        });
    }

    tracing::warn!(
        "No config file {} FOUND! This may cause issues...",
        path.display()
    );
    Ok(LoadedLayer::empty(LoadOutcome::MissingOptional))
}

fn parse_content(source: &Path, content: &str) -> Result<Layer, ParseError> {
    // Candidates always carry a supported extension.
    let format = LayerFormat::from_path(source).unwrap_or(LayerFormat::Json);
    match format.parse(content)? {
        Value::Object(map) => Ok(map),
        other => {
            tracing::debug!(
                source = %source.display(),
                kind = value_kind(&other),
                "Config layer has no top-level mapping; treating it as empty"
            );
            Ok(Layer::new())
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
