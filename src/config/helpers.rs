// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

use crate::TomlError;

/// Expand a leading `~/` to the user's home directory.
pub(super) fn expand_home(path: &Path) -> Result<PathBuf, TomlError> {
    let Some(rest) = path.to_str().and_then(|p| p.strip_prefix("~/")) else {
        return Ok(path.to_path_buf());
    };

    let home = dirs::home_dir().ok_or_else(|| TomlError::FileError {
        message: "Could not determine home directory for ~ expansion".into(),
        path: path.to_string_lossy().to_string(),
        hint: Some("Set HOME or use an absolute path".into()),
        code: Some(300),
    })?;

    Ok(home.join(rest))
}

/// Builds the error returned when a typed lookup misses.
pub(super) fn not_found(path: &str) -> TomlError {
    TomlError::NotFound {
        path: path.to_string(),
        hint: Some("Check that the path exists in your config file".into()),
        code: Some(304),
    }
}
