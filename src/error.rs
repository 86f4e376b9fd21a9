// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

/// The main error type for parsing, loading and typed access.
///
/// Structural problems (`SyntaxError`, `FileError`) abort a parse. `ValueError`s are
/// attached to the offending node and only surface through [`crate::Document::errors`]
/// or [`crate::Document::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TomlError {
    #[error("[TOML] Syntax Error at line {line}: {message}{}", suffix(.hint, .code))]
    SyntaxError {
        message: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a value's raw text matches none of the value grammars.
    #[error("[TOML] Value Error at line {line}: {message} in `{raw}`{}", suffix(.hint, .code))]
    ValueError {
        message: String,
        raw: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[TOML] Type Error at line {line}: {message}{}", suffix(.hint, .code))]
    TypeError {
        message: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[TOML] Path '{path}' not found{}", suffix(.hint, .code))]
    NotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[TOML] File Error '{path}': {message}{}", suffix(.hint, .code))]
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[TOML] Export Error: {message}{}", suffix(.hint, .code))]
    ExportError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl TomlError {
    pub fn code(&self) -> Option<u32> {
        match self {
            TomlError::SyntaxError { code, .. }
            | TomlError::ValueError { code, .. }
            | TomlError::TypeError { code, .. }
            | TomlError::NotFound { code, .. }
            | TomlError::FileError { code, .. }
            | TomlError::ExportError { code, .. } => *code,
        }
    }

    /// Source line the error points at, `0` when there is none.
    pub fn line(&self) -> usize {
        match self {
            TomlError::SyntaxError { line, .. }
            | TomlError::ValueError { line, .. }
            | TomlError::TypeError { line, .. } => *line,
            TomlError::NotFound { .. }
            | TomlError::FileError { .. }
            | TomlError::ExportError { .. } => 0,
        }
    }

    /// Re-anchors a line-less error (typically a conversion failure) onto a source line.
    pub(crate) fn at_line(self, at: usize) -> Self {
        match self {
            TomlError::TypeError { message, line: 0, hint, code } => TomlError::TypeError {
                message,
                line: at,
                hint,
                code,
            },
            TomlError::ValueError { message, raw, line: 0, hint, code } => TomlError::ValueError {
                message,
                raw,
                line: at,
                hint,
                code,
            },
            other => other,
        }
    }
}
