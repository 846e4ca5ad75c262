//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`StoreRead`] thrown when the backing document cannot be read or parsed.
//! - [`StoreWrite`] thrown when the backing document cannot be written.
//! - [`NotFound`] thrown when a lookup by id, category or date yields nothing.
//! - [`Validation`] thrown when input for a record is missing or malformed.
//!
//!  [`StoreRead`]: EngineError::StoreRead
//!  [`StoreWrite`]: EngineError::StoreWrite
//!  [`NotFound`]: EngineError::NotFound
//!  [`Validation`]: EngineError::Validation
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot read store: {0}")]
    StoreRead(String),
    #[error("cannot write store: {0}")]
    StoreWrite(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
}
