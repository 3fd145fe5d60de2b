// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum EdgarError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("Filing search failed: HTTP {0}")]
    Query(reqwest::StatusCode), // Search endpoint returned a non-success status

    #[error("No filings found for {0}")]
    EmptyResult(String), // Search succeeded but matched nothing; names the queried scope

    #[error("Document download failed: HTTP {0}")]
    Download(reqwest::StatusCode), // Archive or PDF endpoint returned a non-success status

    #[error("Fund symbol not found: {0}")]
    SymbolNotFound(String), // Symbol absent from the series mapping; recovered via ticker fallback

    #[error("Failed to parse filings response: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("EDGAR interaction failed: {0}")]
    Edgar(#[from] EdgarError), // Automatically convert Edgar errors

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("`fund_symbols` and `file_names` must be same length ({symbols} symbols, {files} file names)")]
    LengthMismatch { symbols: usize, files: usize },
}
