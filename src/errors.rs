//! Centralized error handling for nc-subset
//!
//! This module provides structured error types to replace the generic `Box<dyn Error>`
//! used at the binary boundaries, enabling better error context and type safety.

use std::fmt;

/// Main error type for nc-subset operations
#[derive(Debug)]
pub enum NcSubsetError {
    /// NetCDF file operation errors
    NetCDFError(netcdf::Error),

    /// I/O operation errors
    IoError(std::io::Error),

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),

    /// Variable not found in dataset
    VariableNotFound { var: String },

    /// A dimension was declared twice with different lengths
    DimensionMismatch {
        dim: String,
        declared: usize,
        len: usize,
    },

    /// Variable has an element type the dataset model does not carry
    UnsupportedType { var: String, kind: String },

    /// Identifier file contained a token that is not an integer
    InvalidId { line: usize, token: String },

    /// Generic error for everything else
    Generic(String),
}

impl fmt::Display for NcSubsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NcSubsetError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            NcSubsetError::IoError(e) => write!(f, "I/O error: {}", e),
            NcSubsetError::ArrayError(e) => write!(f, "Array error: {}", e),
            NcSubsetError::VariableNotFound { var } => {
                write!(f, "Variable '{}' not found in file", var)
            }
            NcSubsetError::DimensionMismatch { dim, declared, len } => write!(
                f,
                "Dimension '{}' declared with length {} but already has length {}",
                dim, len, declared
            ),
            NcSubsetError::UnsupportedType { var, kind } => {
                write!(f, "Variable '{}' has unsupported element type '{}'", var, kind)
            }
            NcSubsetError::InvalidId { line, token } => {
                write!(f, "Invalid ID '{}' on line {} of ID file", token, line)
            }
            NcSubsetError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for NcSubsetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NcSubsetError::NetCDFError(e) => Some(e),
            NcSubsetError::IoError(e) => Some(e),
            NcSubsetError::ArrayError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<netcdf::Error> for NcSubsetError {
    fn from(error: netcdf::Error) -> Self {
        NcSubsetError::NetCDFError(error)
    }
}

impl From<std::io::Error> for NcSubsetError {
    fn from(error: std::io::Error) -> Self {
        NcSubsetError::IoError(error)
    }
}

impl From<ndarray::ShapeError> for NcSubsetError {
    fn from(error: ndarray::ShapeError) -> Self {
        NcSubsetError::ArrayError(error)
    }
}

impl From<String> for NcSubsetError {
    fn from(error: String) -> Self {
        NcSubsetError::Generic(error)
    }
}

impl From<&str> for NcSubsetError {
    fn from(error: &str) -> Self {
        NcSubsetError::Generic(error.to_string())
    }
}

/// Result type alias for nc-subset operations
pub type Result<T> = std::result::Result<T, NcSubsetError>;
