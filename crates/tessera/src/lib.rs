//! Tessera - programmatic 2D scene composition with deterministic SVG output.
//!
//! A [`Scene`] owns entities (dots, lines, curves, polygons, text, borders
//! and fills), the [`Connection`](connection::Connection)s between them and
//! optional [`Grid`](grid::Grid)s of cells. Entities are positioned
//! symbolically through [`Position`]s resolved against whichever
//! [`Surface`] they are drawn on: the whole canvas or a single cell.
//! Rendering stable-sorts everything by z-index and emits one SVG element
//! per item after the background.
//!
//! # Examples
//!
//! ```
//! use tessera::{Scene, Surface, anchor::Anchor, connection::ConnectionStyle, entity::{DotStyle, LineStyle}};
//!
//! let mut scene = Scene::with_grid(3, 1, 40).unwrap();
//! let left = scene.cell_surface(0, 0).unwrap().add_dot(Anchor::Center, &DotStyle::new()).unwrap();
//! let right = scene.cell_surface(0, 2).unwrap().add_dot(Anchor::Center, &DotStyle::new()).unwrap();
//! scene
//!     .add_connection(left.connect(right, Anchor::Center, Anchor::Center, &ConnectionStyle::new()))
//!     .unwrap();
//! scene.add_line(Anchor::BottomLeft, Anchor::BottomRight, &LineStyle::new().z_index(-1)).unwrap();
//!
//! let svg = scene.render_svg().unwrap();
//! assert!(svg.find("<line").unwrap() < svg.find("<circle").unwrap());
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod connection;
pub mod description;
pub mod entity;
pub mod export;
pub mod grid;
pub mod image;
pub mod surface;

mod error;
mod identifier;
mod position;
mod scene;

pub use tessera_core::{anchor, color, geometry, stroke};

pub use error::TesseraError;
pub use identifier::{ConnectionId, EntityId, GridId};
pub use position::Position;
pub use scene::Scene;
pub use surface::{CellSurface, Surface};
pub use tessera_core::error::SceneError;

use log::{debug, info};

use config::AppConfig;
use description::SceneDescription;

/// Builds scenes from TOML descriptions with a fixed configuration.
///
/// # Examples
///
/// ```
/// use tessera::{SceneBuilder, config::AppConfig};
///
/// let source = r#"
///     [canvas]
///     width = 40
///     height = 40
///
///     [[entity]]
///     kind = "dot"
///     radius = 5
/// "#;
///
/// let svg = SceneBuilder::new(AppConfig::default()).render_svg(source).unwrap();
/// assert!(svg.contains("<circle"));
/// ```
#[derive(Debug, Default)]
pub struct SceneBuilder {
    config: AppConfig,
}

impl SceneBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parses a description and builds its scene.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Description`] for malformed descriptions and
    /// [`TesseraError::Scene`] for scene construction failures.
    pub fn build(&self, source: &str) -> Result<Scene, TesseraError> {
        info!("Parsing scene description");
        let description = SceneDescription::from_toml(source)?;
        debug!(
            entities = description.entity_count(),
            connections = description.connection_count();
            "Scene description parsed"
        );
        description.build(&self.config)
    }

    /// Parses a description and renders its scene to SVG text.
    ///
    /// # Errors
    ///
    /// See [`SceneBuilder::build`] and [`Scene::render_svg`].
    pub fn render_svg(&self, source: &str) -> Result<String, TesseraError> {
        let scene = self.build(source)?;
        let svg = scene.render_svg()?;
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
