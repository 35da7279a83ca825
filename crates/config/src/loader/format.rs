//! Layer file formats.
//!
//! Maps a file extension to a parser and converts every format into the same
//! `serde_json::Value` tree. TOML datetimes become their RFC 3339 strings.

use serde_json::Value;
use std::path::Path;

use super::error::ParseError;
use super::layer::Layer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LayerFormat {
    Toml,
    Yaml,
    Json,
}

impl LayerFormat {
    pub(crate) fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub(crate) fn parse(self, content: &str) -> Result<Value, ParseError> {
        match self {
            Self::Toml => Ok(Value::Object(toml_table(toml::from_str(content)?))),
            Self::Yaml if content.trim().is_empty() => Ok(Value::Null),
            Self::Yaml => Ok(serde_yaml::from_str(content)?),
            Self::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

fn toml_table(table: toml::Table) -> Layer {
    table
        .into_iter()
        .map(|(key, value)| (key, toml_value(value)))
        .collect()
}

/// Datetimes keep their RFC 3339 text; non-finite floats keep their TOML spelling.
fn toml_value(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(non_finite(f).to_string())),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_value).collect()),
        toml::Value::Table(table) => Value::Object(toml_table(table)),
    }
}

fn non_finite(f: f64) -> &'static str {
    match f {
        f if f.is_nan() => "nan",
        f if f > 0.0 => "inf",
        _ => "-inf",
    }
}
