//! Error adapter for converting TesseraError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use tessera::{SceneError, TesseraError};

/// Adapter giving a [`TesseraError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a TesseraError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            TesseraError::Scene(_) => "tessera::scene",
            TesseraError::Io(_) => "tessera::io",
            TesseraError::Config(_) => "tessera::config",
            TesseraError::Description(_) => "tessera::description",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            TesseraError::Scene(SceneError::InvalidReference(_)) => {
                "entities must be declared with a `name` before they are referenced"
            }
            TesseraError::Scene(SceneError::IndexOutOfRange { .. }) => {
                "`cell` indices are [row, col] within the canvas grid"
            }
            TesseraError::Description(_) => "check the scene description against the documented format",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
