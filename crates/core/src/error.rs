//! Error types for evoscape

use thiserror::Error;

/// Main error type for evoscape operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in grid of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Grid size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Label not present in rank table: {0}")]
    UnknownLabel(String),

    #[error("Resource not present in alphabet: {0}")]
    UnknownResource(String),

    #[error("Malformed phenotype string: {0}")]
    InvalidPhenotype(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for evoscape operations
pub type Result<T> = std::result::Result<T, Error>;
