//! Error types for the photo editor.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Errors raised while turning user input into something the editor can use.
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum ValidationError {
    /// Path-related validation error
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    /// Instruction parameters out of range or unknown
    #[error("Instruction error: {0}")]
    Instruction(String),
}

/// File path errors.
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum PathError {
    /// File does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    /// Path exists but is not a file
    #[error("Not a file: {0}")]
    NotFile(PathBuf),
    /// IO error accessing the path
    #[error("IO error: {0}")]
    IO(String),
}

/// Main error type for the editor.
///
/// All errors in the application are converted to this type before being
/// returned to the frontend.
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum EditorError {
    /// Input validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The file could not be read or is not a supported image
    #[error("Decode error: {0}")]
    Decode(String),

    /// The remote image model call failed. Detail is logged, not carried.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Another edit is still in flight
    #[error("An edit is already in progress")]
    Busy,

    /// Export requested before any edit exists
    #[error("There is no edited image to export")]
    NothingToExport,

    /// Re-encoding for export failed
    #[error("Export error: {0}")]
    Export(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),
}

/// Convenience result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

// Helper methods for error creation
impl EditorError {
    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn gateway<T: Into<String>>(msg: T) -> Self {
        Self::Gateway(msg.into())
    }

    pub fn export<T: Into<String>>(msg: T) -> Self {
        Self::Export(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    pub fn instruction<T: Into<String>>(msg: T) -> Self {
        Self::Validation(ValidationError::Instruction(msg.into()))
    }
}

// Helper methods for validation error creation
impl ValidationError {
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotFound(path.into()))
    }

    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotFile(path.into()))
    }
}

// Convert std::io::Error to EditorError
impl From<io::Error> for EditorError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert io::Error to PathError
impl From<io::Error> for PathError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert PathError to EditorError
impl From<PathError> for EditorError {
    fn from(err: PathError) -> Self {
        Self::Validation(ValidationError::Path(err))
    }
}
