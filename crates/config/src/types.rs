//! The composed configuration object.
//!
//! Responsibilities:
//! - Hold the merged key-value tree and the environment tag it was built for.
//! - Offer dotted-path lookups and typed views via serde.
//!
//! Does NOT handle:
//! - Loading or merging layers (see loader/ and merge.rs).
//!
//! Invariants:
//! - The `environment` key is present and equals `environment()` at construction.
//! - Mutation through `write()` is allowed on purpose; every holder of the same
//!   `Config` observes it.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::constants::ENVIRONMENT_KEY;
use crate::loader::{ConfError, Layer};

/// Configuration composed from the base, environment, and secrets layers.
#[derive(Debug)]
pub struct Config {
    environment: String,
    values: RwLock<Layer>,
}

impl Config {
    /// Wrap merged layer values, overlaying the environment tag last.
    pub(crate) fn new(environment: String, mut values: Layer) -> Self {
        values.insert(
            ENVIRONMENT_KEY.to_string(),
            Value::String(environment.clone()),
        );
        Self {
            environment,
            values: RwLock::new(values),
        }
    }

    /// The environment tag this configuration was composed for.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Look up a value by dotted path (`"database.host"`, `"servers.0.port"`).
    ///
    /// Returns a clone so no lock is held by the caller.
    pub fn get(&self, path: &str) -> Option<Value> {
        let values = self.read();
        let mut segments = path.split('.');
        let mut current = values.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current.clone())
    }

    /// Deserialize the value at `path` into `T`; `Ok(None)` if the path is absent.
    pub fn extract<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ConfError> {
        self.get(path)
            .map(|value| {
                serde_json::from_value(value).map_err(|source| ConfError::Extract {
                    key: path.to_string(),
                    source,
                })
            })
            .transpose()
    }

    /// Deserialize the whole configuration into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfError> {
        serde_json::from_value(self.to_value()).map_err(|source| ConfError::Extract {
            key: String::new(),
            source,
        })
    }

    /// Snapshot of the whole tree.
    pub fn to_value(&self) -> Value {
        Value::Object(self.read().clone())
    }

    /// Shared read access to the underlying mapping.
    pub fn read(&self) -> RwLockReadGuard<'_, Layer> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Exclusive write access to the underlying mapping.
    pub fn write(&self) -> RwLockWriteGuard<'_, Layer> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }
}
