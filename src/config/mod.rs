// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::ast::Document;
use crate::parser;
use crate::TomlError;

mod access;
mod conversion;
mod helpers;
mod validation;

impl Document {
    /// Reads the whole file into memory and parses it. A leading `~/` is
    /// expanded to the home directory.
    ///
    /// # Example
    /// ```ignore
    /// let doc = Document::from_file("config.toml")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TomlError> {
        let path = helpers::expand_home(path.as_ref())?;

        let content = fs::read_to_string(&path).map_err(|e| TomlError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path.to_string_lossy().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        debug!(path = %path.display(), bytes = content.len(), "loaded config file");
        parser::parse(&content)
    }

    /// Load from `primary`, or from `fallback` when the primary file cannot be read.
    ///
    /// Only file errors trigger the fallback; a primary file that exists but is
    /// structurally broken is reported as is.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self, TomlError> {
        match Self::from_file(&primary) {
            Ok(doc) => Ok(doc),
            Err(TomlError::FileError { .. }) => {
                debug!(
                    primary = %primary.as_ref().display(),
                    fallback = %fallback.as_ref().display(),
                    "primary config unreadable, trying fallback"
                );
                Self::from_file(&fallback).map_err(|e| match e {
                    TomlError::FileError { message, .. } => TomlError::FileError {
                        message: format!(
                            "Failed to load config from primary path '{}' or fallback path '{}': {}",
                            primary.as_ref().display(),
                            fallback.as_ref().display(),
                            message
                        ),
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the config files exists".into()),
                        code: Some(301),
                    },
                    other => other,
                })
            }
            Err(other) => Err(other),
        }
    }
}

impl FromStr for Document {
    type Err = TomlError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        parser::parse(content)
    }
}
