//! Error types for Statline.
//!
//! This module defines a comprehensive error type for the Statline core,
//! providing specific error variants for different failure modes and enabling
//! programmatic error handling.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// The main error type for Statline operations.
///
/// `StatlineError` provides specific error variants for different failure
/// modes, making it possible to programmatically handle different error cases.
#[derive(Debug)]
pub enum StatlineError {
    /// An error occurred while loading or parsing configuration.
    ConfigError {
        /// Description of the configuration issue.
        message: String,
        /// The config file path, if applicable.
        path: Option<PathBuf>,
        /// The underlying error.
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error occurred while constructing a syntax tree through the builder.
    TreeError {
        /// Description of the invalid construction step.
        message: String,
    },

    /// An error occurred while applying text edits to source text.
    EditError {
        /// Description of what went wrong.
        message: String,
        /// The byte offset of the offending edit, if applicable.
        offset: Option<usize>,
    },

    /// An error occurred during file system operations.
    IoError {
        /// The operation being performed.
        operation: String,
        /// The path involved in the error.
        path: Option<PathBuf>,
        /// The underlying IO error.
        source: Option<io::Error>,
    },
}

impl StatlineError {
    /// Creates a new `ConfigError` with the given message.
    ///
    /// # Arguments
    /// * `message` - A description of the configuration issue.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Creates a new `ConfigError` with a file path.
    ///
    /// # Arguments
    /// * `message` - A description of the configuration issue.
    /// * `path` - The path to the config file.
    pub fn config_error_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::ConfigError {
            message: message.into(),
            path: Some(path),
            source: None,
        }
    }

    /// Creates a new `TreeError` with the given message.
    ///
    /// # Arguments
    /// * `message` - A description of the invalid construction step.
    pub fn tree_error(message: impl Into<String>) -> Self {
        Self::TreeError {
            message: message.into(),
        }
    }

    /// Creates a new `EditError` with the given message.
    ///
    /// # Arguments
    /// * `message` - A description of what went wrong.
    pub fn edit_error(message: impl Into<String>) -> Self {
        Self::EditError {
            message: message.into(),
            offset: None,
        }
    }

    /// Creates a new `EditError` anchored at a byte offset.
    ///
    /// # Arguments
    /// * `message` - A description of what went wrong.
    /// * `offset` - The byte offset of the offending edit.
    pub fn edit_error_at(message: impl Into<String>, offset: usize) -> Self {
        Self::EditError {
            message: message.into(),
            offset: Some(offset),
        }
    }

    /// Creates a new `IoError` with a path and underlying error.
    ///
    /// # Arguments
    /// * `operation` - A description of the IO operation being performed.
    /// * `path` - The path involved in the error.
    /// * `source` - The underlying IO error.
    pub fn io_error_with_source(
        operation: impl Into<String>,
        path: PathBuf,
        source: io::Error,
    ) -> Self {
        Self::IoError {
            operation: operation.into(),
            path: Some(path),
            source: Some(source),
        }
    }

    /// Returns the name of the error variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConfigError { .. } => "ConfigError",
            Self::TreeError { .. } => "TreeError",
            Self::EditError { .. } => "EditError",
            Self::IoError { .. } => "IoError",
        }
    }

    /// Returns suggested recovery actions for the error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { .. } => vec![
                "Check the configuration file syntax".to_string(),
                "Verify all required fields are present".to_string(),
                "Ensure the file is valid TOML format".to_string(),
                "Review the documentation for configuration options".to_string(),
            ],
            Self::TreeError { .. } => vec![
                "Ensure builder calls are balanced (every start has an end)".to_string(),
                "Check that alternate slots are only marked on conditional nodes".to_string(),
            ],
            Self::EditError { offset, .. } => {
                let mut s = vec![
                    "Only apply edits produced by a single checker pass".to_string(),
                    "Re-run the checker after applying edits instead of reusing stale ones"
                        .to_string(),
                ];
                if offset.is_some() {
                    s.push("Verify the edit offsets against the original source text".to_string());
                }
                s
            }
            Self::IoError { .. } => vec![
                "Check that the path exists and is accessible".to_string(),
                "Verify you have the necessary permissions".to_string(),
            ],
        }
    }
}

impl fmt::Display for StatlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError { message, path, .. } => {
                if let Some(p) = path {
                    write!(f, "Configuration error in '{}': {}", p.display(), message)
                } else {
                    write!(f, "Configuration error: {}", message)
                }
            }
            Self::TreeError { message } => {
                write!(f, "Tree construction error: {}", message)
            }
            Self::EditError { message, offset } => {
                if let Some(at) = offset {
                    write!(f, "Edit error at offset {}: {}", at, message)
                } else {
                    write!(f, "Edit error: {}", message)
                }
            }
            Self::IoError {
                operation, path, ..
            } => {
                if let Some(p) = path {
                    write!(
                        f,
                        "IO error during '{}' at '{}': operation failed",
                        operation,
                        p.display()
                    )
                } else {
                    write!(f, "IO error during '{}': operation failed", operation)
                }
            }
        }
    }
}

impl std::error::Error for StatlineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigError { source, .. } => source.as_ref().map(|s| s.as_ref() as _),
            Self::TreeError { .. } => None,
            Self::EditError { .. } => None,
            Self::IoError { source, .. } => source.as_ref().map(|e| e as _),
        }
    }
}

impl From<io::Error> for StatlineError {
    fn from(err: io::Error) -> Self {
        Self::IoError {
            operation: "file operation".to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<toml::de::Error> for StatlineError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError {
            message: err.message().to_string(),
            path: None,
            source: Some(Box::new(err)),
        }
    }
}

/// A convenient `Result` type alias using [`StatlineError`].
pub type Result<T> = std::result::Result<T, StatlineError>;
