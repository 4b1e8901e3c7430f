//! Error types for octant_atlas
//!
//! This module provides structured error handling using thiserror.
//! Per-region conditions (empty regions, ambiguous identifiers, hand-edited
//! descriptions) are reported as outcome values, not errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for atlas operations
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Which input document failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    StarCatalog,
    FictionalCatalog,
    RegionDocument,
    NationDirectory,
    Config,
}

impl std::fmt::Display for InputRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InputRole::StarCatalog => "star catalog",
            InputRole::FictionalCatalog => "fictional catalog",
            InputRole::RegionDocument => "region document",
            InputRole::NationDirectory => "nation directory",
            InputRole::Config => "config file",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while loading, naming, or writing regions
#[derive(Error, Debug)]
pub enum AtlasError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required input is absent or unparsable. Fatal: aborts before any output.
    #[error("Failed to load {role} from {path}: {reason}")]
    MissingInput {
        role: InputRole,
        path: PathBuf,
        reason: String,
    },

    /// A region bound is not a closed [min, max] interval
    #[error("Region {octant_number} has an invalid {axis} range")]
    InvalidRange { octant_number: i64, axis: char },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AtlasError>,
    },
}

impl AtlasError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AtlasError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create a missing-input error
    pub fn missing_input(role: InputRole, path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AtlasError::MissingInput {
            role,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        AtlasError::InvalidConfig {
            message: message.into(),
        }
    }

    /// The input role behind this error, looking through context wrappers
    pub fn input_role(&self) -> Option<InputRole> {
        match self {
            AtlasError::MissingInput { role, .. } => Some(*role),
            AtlasError::WithContext { source, .. } => source.input_role(),
            _ => None,
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_names_the_input() {
        let err = AtlasError::missing_input(
            InputRole::RegionDocument,
            "/tmp/octants.json",
            "file not found",
        );
        let msg = err.to_string();
        assert!(msg.contains("region document"));
        assert!(msg.contains("/tmp/octants.json"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_error_with_context() {
        let err = AtlasError::invalid_config("bad separator");
        let wrapped = err.with_context("loading config");
        assert!(wrapped.to_string().contains("loading config"));
    }

    #[test]
    fn test_input_role_through_context() {
        let err = AtlasError::missing_input(InputRole::StarCatalog, "stars.json", "eof")
            .with_context("naming pass");
        assert_eq!(err.input_role(), Some(InputRole::StarCatalog));
        assert_eq!(AtlasError::invalid_config("x").input_role(), None);
    }

    #[test]
    fn test_invalid_range_display() {
        let err = AtlasError::InvalidRange {
            octant_number: 3,
            axis: 'y',
        };
        assert_eq!(err.to_string(), "Region 3 has an invalid y range");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AtlasError = io_err.into();
        assert!(matches!(err, AtlasError::Io(_)));
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(AtlasError::invalid_config("test"));
        let err = result.context("during processing").unwrap_err();
        assert!(err.to_string().contains("during processing"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("not json").unwrap_err();
        let err: AtlasError = json_err.into();
        assert!(matches!(err, AtlasError::Json(_)));
    }
}
