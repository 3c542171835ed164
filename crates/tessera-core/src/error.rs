//! Error types raised while composing a scene.
//!
//! All of these are programmer-error class failures: they are reported at the
//! call that triggers them (construction, indexing or resolution) and are
//! never retried.

use thiserror::Error;

/// Errors produced by scene construction, cell lookup and anchor resolution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// A grid, scene or shape dimension was non-positive or otherwise unusable.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// A cell index fell outside the grid.
    #[error("cell ({row}, {col}) is out of range for a {rows}x{cols} grid")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A reference to an entity or grid that does not exist, or to an
    /// entity that cannot serve the requested purpose.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// A named anchor token that is not part of the anchor vocabulary.
    #[error("invalid anchor `{0}`, valid anchors: {anchors}", anchors = crate::anchor::Anchor::NAMES.join(", "))]
    InvalidAnchor(String),
}

impl SceneError {
    /// Shorthand for an [`SceneError::InvalidDimension`] error.
    pub fn invalid_dimension(message: impl Into<String>) -> Self {
        Self::InvalidDimension(message.into())
    }

    /// Shorthand for an [`SceneError::InvalidReference`] error.
    pub fn invalid_reference(message: impl Into<String>) -> Self {
        Self::InvalidReference(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_message() {
        let err = SceneError::IndexOutOfRange {
            row: 7,
            col: 2,
            rows: 5,
            cols: 10,
        };
        assert_eq!(
            err.to_string(),
            "cell (7, 2) is out of range for a 5x10 grid"
        );
    }

    #[test]
    fn test_invalid_anchor_lists_vocabulary() {
        let err = SceneError::InvalidAnchor("middle_ish".to_string());
        let message = err.to_string();
        assert!(message.contains("middle_ish"));
        assert!(message.contains("top_left"));
        assert!(message.contains("bottom_right"));
    }
}
