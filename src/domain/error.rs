//! Domain error types.

use std::io;
use std::process::ExitCode;

/// Coarse classification of a [`ConfigFileError`], useful for matching
/// without caring about the attached context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidSectionName,
    InvalidVariableName,
    MalformedLine,
    NotFound,
    NumberFormat,
    SourceUnreadable,
}

/// Error raised while loading or querying configuration data.
///
/// `line` fields are 1-based; a `line` of 0 means the name did not come from
/// the source text (e.g. a configured default section).
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("line {line}: invalid section name '{name}'")]
    InvalidSectionName { line: usize, name: String },

    #[error("line {line}: invalid variable name '{name}'")]
    InvalidVariableName { line: usize, name: String },

    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("variable '{variable}' not found in section '{section}'")]
    NotFound { section: String, variable: String },

    #[error("value '{value}' of [{section}] {variable} is not a valid {target}")]
    NumberFormat {
        section: String,
        variable: String,
        value: String,
        target: &'static str,
    },

    #[error("cannot read configuration source {origin}: {source}")]
    SourceUnreadable {
        origin: String,
        #[source]
        source: io::Error,
    },
}

impl ConfigFileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigFileError::InvalidSectionName { .. } => ErrorKind::InvalidSectionName,
            ConfigFileError::InvalidVariableName { .. } => ErrorKind::InvalidVariableName,
            ConfigFileError::MalformedLine { .. } => ErrorKind::MalformedLine,
            ConfigFileError::NotFound { .. } => ErrorKind::NotFound,
            ConfigFileError::NumberFormat { .. } => ErrorKind::NumberFormat,
            ConfigFileError::SourceUnreadable { .. } => ErrorKind::SourceUnreadable,
        }
    }
}

impl From<&ConfigFileError> for ExitCode {
    fn from(err: &ConfigFileError) -> Self {
        let code: u8 = match err.kind() {
            ErrorKind::SourceUnreadable => 1,
            ErrorKind::InvalidSectionName
            | ErrorKind::InvalidVariableName
            | ErrorKind::MalformedLine => 2,
            ErrorKind::NotFound => 3,
            ErrorKind::NumberFormat => 4,
        };
        ExitCode::from(code)
    }
}
