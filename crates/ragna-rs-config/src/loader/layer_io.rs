//! Reading layer files from disk.

use super::{ConfigLayer, ConfigLayerSource, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE, SchemaMode};
use super::{LoadedLayer, schema};
use crate::ConfigError;
use directories::UserDirs;
use log::debug;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Read one layer of the stack.
///
/// A missing file yields `None` unless the layer is `required`; a present
/// file must parse and pass the partial schema.
pub(super) fn load_layer(
    source: ConfigLayerSource,
    path: &Path,
    required: bool,
) -> Result<Option<LoadedLayer>, ConfigError> {
    let label = layer_label(source, path);
    let value = match read_json5(path, &label) {
        Ok(value) => value,
        Err(ConfigError::Read { source: err, .. })
            if !required && err.kind() == ErrorKind::NotFound =>
        {
            debug!("config layer absent ({label})");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };
    schema::validate_layer_schema(&value, SchemaMode::Partial, &label)?;
    debug!("config layer read ({label})");
    Ok(Some(LoadedLayer {
        meta: ConfigLayer {
            source,
            path: path.to_path_buf(),
        },
        value,
    }))
}

/// Read and parse a JSON5 file, tagging failures with `label`.
pub(super) fn read_json5(path: &Path, label: &str) -> Result<Value, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        layer: label.to_string(),
        source,
    })?;
    parse_json5(&contents, label)
}

pub(super) fn parse_json5(contents: &str, label: &str) -> Result<Value, ConfigError> {
    json5::from_str(contents).map_err(|source| ConfigError::Parse {
        layer: label.to_string(),
        source,
    })
}

/// `user(/home/me/.ragna/ragna.json5)` and friends.
pub(super) fn layer_label(source: ConfigLayerSource, path: &Path) -> String {
    let kind = match source {
        ConfigLayerSource::User => "user",
        ConfigLayerSource::Cwd => "cwd",
        ConfigLayerSource::Runtime => "runtime",
    };
    format!("{kind}({})", path.display())
}

/// Canonical form of the working directory; a directory that does not exist
/// yet is used as given.
pub(super) fn resolve_cwd(cwd: &Path) -> Result<PathBuf, ConfigError> {
    match cwd.canonicalize() {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(cwd.to_path_buf()),
        Err(source) => Err(ConfigError::Cwd {
            path: cwd.to_path_buf(),
            source,
        }),
    }
}

/// Key used to spot the same file listed under two layers.
pub(super) fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// `~/.ragna/ragna.json5`, when a home directory is known.
pub(super) fn default_user_config_path() -> Option<PathBuf> {
    let dirs = UserDirs::new()?;
    Some(
        dirs.home_dir()
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILE),
    )
}
