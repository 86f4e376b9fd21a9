// Author: Dustin Pilgrim
// License: MIT

use super::*;
use crate::ast::Value;

impl Document {
    /// Get a typed value using dot notation.
    ///
    /// # Examples
    /// ```no_run
    /// # use toml_tree::Document;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let doc = Document::from_file("config.toml")?;
    /// let ip: String = doc.get("servers.alpha.ip")?;
    /// let max: i64 = doc.get("database.connection_max")?;
    /// let enabled: bool = doc.get("database.enabled")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns `NotFound` if the path doesn't exist, the node's `ValueError`
    /// if its text failed to parse, or a `TypeError` if the value has another type.
    pub fn get<T>(&self, path: &str) -> Result<T, TomlError>
    where
        T: TryFrom<Value, Error = TomlError>,
    {
        let leaf = self.get_leaf(path).ok_or_else(|| helpers::not_found(path))?;

        if let Some(e) = leaf.error() {
            return Err(e.clone());
        }

        T::try_from(leaf.value().clone()).map_err(|e| e.at_line(leaf.line()))
    }

    /// Like [`Document::get`] but a missing path is `Ok(None)`.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, TomlError>
    where
        T: TryFrom<Value, Error = TomlError>,
    {
        match self.get(path) {
            Ok(value) => Ok(Some(value)),
            Err(TomlError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// # Examples
    /// ```no_run
    /// # use toml_tree::Document;
    /// # let doc = Document::from_file("config.toml").unwrap();
    /// let port = doc.get_or("server.port", 8080i64);
    /// let debug = doc.get_or("debug", false);
    /// ```
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = TomlError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// True if `path` names either a section or a value.
    pub fn has(&self, path: &str) -> bool {
        self.get_leaf(path).is_some() || self.get_section(path).is_some()
    }

    /// Names of the children of the section at `path`, in file order. An empty
    /// path lists the top level.
    pub fn keys(&self, path: &str) -> Result<Vec<String>, TomlError> {
        let section = if path.is_empty() {
            self.root()
        } else {
            self.get_section(path).ok_or_else(|| helpers::not_found(path))?
        };

        Ok(section.children().map(|child| child.name().to_string()).collect())
    }
}
