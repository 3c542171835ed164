//! Connections between entities.
//!
//! A [`Connection`] stores handles to its two endpoints and the positions to
//! attach to on each, never copies of their geometry. Endpoint positions are
//! resolved against each entity's current [`bounds`](crate::entity::Entity::bounds)
//! when the scene is rendered, so moving an endpoint before rendering moves
//! the connection with it.
//!
//! ```
//! # use tessera::{Scene, Surface, anchor::Anchor, connection::ConnectionStyle, entity::DotStyle};
//! let mut scene = Scene::new(100, 40).unwrap();
//! let a = scene.add_dot(Anchor::Left, &DotStyle::new().radius(4.0)).unwrap();
//! let b = scene.add_dot(Anchor::Right, &DotStyle::new().radius(4.0)).unwrap();
//!
//! let link = a.connect(b, Anchor::Right, Anchor::Left, &ConnectionStyle::new());
//! scene.add_connection(link).unwrap();
//! ```

use log::trace;

use tessera_core::{
    color::Color,
    error::SceneError,
    geometry::Point,
    stroke::{StrokeCap, StrokeDefinition, StrokeStyle},
};

use crate::{
    config::Defaults,
    entity::{StrokeFields, render_segment},
    export::SvgNode,
    identifier::EntityId,
    position::Position,
    scene::Scene,
};

define_style! {
    /// Overrides for [`Connection`]s.
    ConnectionStyle {
        color: Color,
        width: f32,
        dash: StrokeStyle,
        cap: StrokeCap,
        z_index: i32,
    }
}

impl ConnectionStyle {
    pub(crate) fn to_stroke(&self, defaults: &Defaults) -> Result<StrokeDefinition, SceneError> {
        StrokeFields {
            color: self.color,
            width: self.width,
            dash: self.dash.as_ref(),
            cap: self.cap,
            join: None,
        }
        .resolve(defaults)
    }
}

/// A straight link between two entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    source: EntityId,
    target: EntityId,
    start: Position,
    end: Position,
    style: ConnectionStyle,
    z_index: i32,
}

impl Connection {
    /// Creates a connection from `source` to `target`.
    ///
    /// `start` is resolved against the source's bounds and `end` against the
    /// target's. The z-index is taken from `style`, defaulting to 0.
    pub fn new(
        source: EntityId,
        target: EntityId,
        start: impl Into<Position>,
        end: impl Into<Position>,
        style: &ConnectionStyle,
    ) -> Self {
        Self {
            source,
            target,
            start: start.into(),
            end: end.into(),
            style: style.clone(),
            z_index: style.z_index.unwrap_or(0),
        }
    }

    pub fn source(&self) -> EntityId {
        self.source
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn style(&self) -> &ConnectionStyle {
        &self.style
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    /// Replaces the style. A `z_index` set on `style` also replaces the
    /// connection's z-index; otherwise the current one is kept.
    pub fn set_style(&mut self, style: ConnectionStyle) {
        if let Some(z_index) = style.z_index {
            self.z_index = z_index;
        }
        self.style = style;
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.color = Some(color);
    }

    /// Resolves both endpoints against the entities' current geometry.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidReference`] if either endpoint is missing
    /// from `scene`, or any error from resolving the endpoint positions.
    pub fn resolve(&self, scene: &Scene) -> Result<(Point, Point), SceneError> {
        let source = scene.entity(self.source)?;
        let target = scene.entity(self.target)?;

        let start = self.start.resolve(source.bounds(), scene)?;
        let end = self.end.resolve(target.bounds(), scene)?;

        trace!(
            source:% = self.source,
            target:% = self.target,
            start:? = start,
            end:? = end;
            "Resolved connection"
        );
        Ok((start, end))
    }

    pub(crate) fn render_to_svg(&self, scene: &Scene) -> Result<SvgNode, SceneError> {
        let (start, end) = self.resolve(scene)?;
        let stroke = self.style.to_stroke(scene.defaults())?;
        Ok(render_segment(start, end, &stroke))
    }
}

impl EntityId {
    /// Builds a [`Connection`] from this entity to `target`.
    ///
    /// The connection is not registered; pass it to
    /// [`Scene::add_connection`](crate::Scene::add_connection).
    pub fn connect(
        self,
        target: EntityId,
        start: impl Into<Position>,
        end: impl Into<Position>,
        style: &ConnectionStyle,
    ) -> Connection {
        Connection::new(self, target, start, end, style)
    }
}
