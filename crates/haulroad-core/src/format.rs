//! Source formats accepted for catalogs and config files.

use crate::{Error, Result};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Json5,
    Yaml,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("json5") => Ok(Self::Json5),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    pub fn parse(self, text: &str) -> Result<Value> {
        Ok(match self {
            Self::Json => serde_json::from_str(text)?,
            Self::Json5 => json5::from_str(text)?,
            Self::Yaml => serde_yaml::from_str(text)?,
        })
    }
}

/// Parses `text` as JSON, falling back to YAML (a superset for block-style documents).
pub fn parse_auto(text: &str) -> Result<Value> {
    match serde_json::from_str(text) {
        Ok(v) => Ok(v),
        Err(json_err) => {
            tracing::debug!(error = %json_err, "input is not JSON, trying YAML");
            Ok(serde_yaml::from_str(text)?)
        }
    }
}

pub fn read_path(path: &Path) -> Result<Value> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    format.parse(&text)
}
