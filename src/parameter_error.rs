//! Error handling for the parameter loader

use std::io;

/// Unified error to report failures while reading and validating the kinematic parameters.
#[derive(Debug)]
pub enum ParameterError {
    IoError(io::Error),
    ParseError(String),
    InvalidLength { field: String, expected: usize, found: usize },
    NotFinite(String),
    InconsistentLimits(String),
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ParameterError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            ParameterError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            ParameterError::InvalidLength { ref field, expected, found } =>
                write!(f, "Invalid Length of {}: expected {}, found {}", field, expected, found),
            ParameterError::NotFinite(ref field) =>
                write!(f, "Not a finite value: {}", field),
            ParameterError::InconsistentLimits(ref msg) =>
                write!(f, "Inconsistent Limits: {}", msg),
        }
    }
}

impl std::error::Error for ParameterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParameterError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ParameterError {
    fn from(err: io::Error) -> Self {
        ParameterError::IoError(err)
    }
}
