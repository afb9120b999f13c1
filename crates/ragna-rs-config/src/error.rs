//! Config loading failures, labelled with the layer they came from.
//!
//! Layer labels look like `cwd(/srv/app/ragna.json5)` or `inline`, so every
//! message points at the file (and field) to fix.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer file exists in the stack but could not be read.
    #[error("cannot read config {layer}: {source}")]
    Read {
        layer: String,
        source: std::io::Error,
    },
    /// A layer is not valid JSON5.
    #[error("cannot parse config {layer}: {source}")]
    Parse {
        layer: String,
        source: json5::Error,
    },
    /// The merged layers passed the schema but not the typed model.
    #[error("cannot decode config {layer}: {source}")]
    Decode {
        layer: String,
        source: serde_json::Error,
    },
    /// A field has an unknown key, the wrong type or an unknown value.
    #[error("invalid config at {layer}:{path}: {message}")]
    InvalidField {
        layer: String,
        path: String,
        message: String,
    },
    /// A decoded value breaks a cross-field or range constraint.
    #[error("invalid config: {path}: {message}")]
    Constraint { path: String, message: String },
    /// The working directory used to locate the cwd layer is unusable.
    #[error("cannot resolve config directory {}: {source}", path.display())]
    Cwd {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn constraint(path: &str, message: impl Into<String>) -> Self {
        Self::Constraint {
            path: path.to_string(),
            message: message.into(),
        }
    }
}
