//! Core error types for nearclass-core.
//!
//! Per-record data-quality problems are never errors: normalization reports
//! a drop reason and counts it. The types here cover whole-collection
//! structural breaches, the catalog API, storage, and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for nearclass-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Catalog API errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Catalog-API-specific errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A term string did not match "<year> <quarter>"
    #[error("Invalid term '{0}': expected e.g. \"2025 Fall\" or \"2026 Winter\"")]
    InvalidTerm(String),

    /// HTTP transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered but not with the agreed envelope
    #[error("Catalog API returned an unexpected shape: {0}")]
    UnexpectedShape(String),

    /// The raw catalog root was not a list of session records
    #[error("Expected the raw catalog JSON to be a list of session objects")]
    NotAList,
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    /// CSV read/write failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File IO failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No usable data directory on this platform
    #[error("Could not determine a data directory")]
    NoDataDir,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}
