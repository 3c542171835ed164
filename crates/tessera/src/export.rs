//! Export of scenes to output documents.
//!
//! Rendering walks four phases:
//!
//! ```text
//! Collecting  every entity and connection rendered to one element, tagged with its z-index
//!     ↓
//! Sorting     stable sort by ascending z-index
//!     ↓
//! Emitting    background first, then the sorted elements
//!     ↓
//! Done        finished document; the scene is untouched
//! ```
//!
//! Any failure aborts the whole render; no partial document is returned.

/// SVG export backend.
pub mod svg;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn ::svg::Node>;
