//! Configuration errors.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    /// Reading a file.
    Read,
    /// Writing a file.
    Write,
    /// Creating a directory.
    CreateDir,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IoOp::Read => "read",
            IoOp::Write => "write",
            IoOp::CreateDir => "create directory",
        })
    }
}

/// Error from loading, saving or resolving a preset.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file or directory operation failed.
    #[error("cannot {op} '{}': {source}", path.display())]
    Io {
        /// What was attempted.
        op: IoOp,
        /// Path it was attempted on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Preset text is not valid TOML for a [`crate::Preset`].
    #[error("malformed preset TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Preset could not be written as TOML.
    #[error("cannot serialize preset: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Parameter name that matches no address of the node.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Text that does not parse as a value or time for `field`.
    #[error("invalid value '{value}' for '{field}'")]
    InvalidValue {
        /// Parameter or field the value belongs to.
        field: String,
        /// The text as given.
        value: String,
    },

    /// Preset failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] crate::validation::ValidationError),
}

impl ConfigError {
    fn io(op: IoOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// I/O error from reading `path`.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(IoOp::Read, path, source)
    }

    /// I/O error from writing `path`.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(IoOp::Write, path, source)
    }

    /// I/O error from creating the directory `path`.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(IoOp::CreateDir, path, source)
    }

    /// Unparseable `value` for `field`.
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// The failed filesystem operation, if this is an I/O error.
    pub fn io_op(&self) -> Option<IoOp> {
        match self {
            ConfigError::Io { op, .. } => Some(*op),
            _ => None,
        }
    }
}
