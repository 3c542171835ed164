//! Tessera Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Tessera scene
//! engine:
//!
//! - **Geometry**: points, sizes, frames and Bezier evaluation ([`geometry`] module)
//! - **Anchors**: named points of a frame ([`anchor::Anchor`])
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Strokes**: line style definitions ([`stroke`] module)
//! - **Errors**: the scene error taxonomy ([`error::SceneError`])

pub mod anchor;
pub mod color;
pub mod error;
pub mod geometry;
pub mod stroke;
