//! Error types for Tessera operations.
//!
//! This module provides the main error type [`TesseraError`] which wraps
//! the scene composition errors of [`SceneError`] together with I/O,
//! configuration and scene-description failures.

use std::io;

use thiserror::Error;

use tessera_core::error::SceneError;

/// The main error type for Tessera operations.
#[derive(Debug, Error)]
pub enum TesseraError {
    #[error("{0}")]
    Scene(#[from] SceneError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scene description error: {0}")]
    Description(String),
}
