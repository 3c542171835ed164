//! Drawable entities.
//!
//! An [`Entity`] pairs one variant of the closed [`EntityKind`] set with a
//! z-index. Geometry is resolved to absolute pixels when the entity is created
//! and is only changed afterwards through [`Entity::translate`]; style
//! attributes and the z-index stay freely mutable.
//!
//! Each variant has a matching style object (`DotStyle`, `LineStyle`, ...)
//! made of optional fields. A style object is merged over another with
//! `merged_over`, where the receiver's set fields win; fields left unset at
//! creation time fall back to the scene's [`Defaults`](crate::config::Defaults).
//!
//! ```
//! # use tessera::entity::DotStyle;
//! # use tessera::color::Color;
//! let shared = DotStyle::new().radius(4.0).color(Color::new("teal").unwrap());
//! let merged = DotStyle::new().radius(1.5).merged_over(&shared);
//!
//! assert_eq!(merged, DotStyle::new().radius(1.5).color(Color::new("teal").unwrap()));
//! ```

mod border;
mod curve;
mod dot;
mod fill;
mod line;
mod polygon;
mod text;

pub use border::{Border, BorderStyle};
pub use curve::{Curve, CurveControl, CurveShape, CurveStyle};
pub use dot::{Dot, DotStyle};
pub use fill::{Fill, FillStyle};
pub use line::{Line, LineStyle};
pub use polygon::{Polygon, PolygonStyle};
pub use text::{Text, TextAlign, TextStyle};

pub(crate) use line::render_segment;

use tessera_core::{
    color::Color,
    error::SceneError,
    geometry::{Bounds, Point},
    stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle},
};

use crate::{config::Defaults, export::SvgNode};

/// Checks that a size is a positive, finite number of pixels.
pub(crate) fn positive_dimension(name: &str, value: f32) -> Result<f32, SceneError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SceneError::invalid_dimension(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

/// The stroke fields a style object may override.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StrokeFields<'a> {
    pub(crate) color: Option<Color>,
    pub(crate) width: Option<f32>,
    pub(crate) dash: Option<&'a StrokeStyle>,
    pub(crate) cap: Option<StrokeCap>,
    pub(crate) join: Option<StrokeJoin>,
}

impl StrokeFields<'_> {
    /// Fills unset fields from `defaults` and validates the width.
    pub(crate) fn resolve(self, defaults: &Defaults) -> Result<StrokeDefinition, SceneError> {
        let width = positive_dimension("stroke width", self.width.unwrap_or(defaults.line_width()))?;
        let mut stroke = StrokeDefinition::new(self.color.unwrap_or(defaults.color()), width);
        if let Some(dash) = self.dash {
            stroke.set_style(dash.clone());
        }
        if let Some(cap) = self.cap {
            stroke.set_cap(cap);
        }
        if let Some(join) = self.join {
            stroke.set_join(join);
        }
        Ok(stroke)
    }
}

/// The closed set of drawable variants.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Dot(Dot),
    Line(Line),
    Curve(Curve),
    Polygon(Polygon),
    Text(Text),
    Border(Border),
    Fill(Fill),
}

impl EntityKind {
    /// Returns the lowercase variant name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dot(_) => "dot",
            Self::Line(_) => "line",
            Self::Curve(_) => "curve",
            Self::Polygon(_) => "polygon",
            Self::Text(_) => "text",
            Self::Border(_) => "border",
            Self::Fill(_) => "fill",
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for EntityKind {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(Dot, Line, Curve, Polygon, Text, Border, Fill);

/// A drawable object owned by a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    kind: EntityKind,
    z_index: i32,
}

impl Entity {
    /// Creates an entity at z-index 0.
    pub fn new(kind: impl Into<EntityKind>) -> Self {
        Self {
            kind: kind.into(),
            z_index: 0,
        }
    }

    /// Sets the z-index (builder style).
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Mutable access to the variant, for variant-specific style setters.
    pub fn kind_mut(&mut self) -> &mut EntityKind {
        &mut self.kind
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    /// Sets the primary color of the entity: the fill of dots, polygons and
    /// fills, the stroke of lines, curves and borders, the glyph color of text.
    pub fn set_color(&mut self, color: Color) {
        match &mut self.kind {
            EntityKind::Dot(dot) => dot.set_color(color),
            EntityKind::Line(line) => line.stroke_mut().set_color(color),
            EntityKind::Curve(curve) => curve.stroke_mut().set_color(color),
            EntityKind::Polygon(polygon) => polygon.set_fill(Some(color)),
            EntityKind::Text(text) => text.set_color(color),
            EntityKind::Border(border) => border.stroke_mut().set_color(color),
            EntityKind::Fill(fill) => fill.set_color(color),
        }
    }

    /// Returns the axis-aligned bounding box of the entity's geometry.
    ///
    /// Connections resolve their anchors against this frame.
    pub fn bounds(&self) -> Bounds {
        match &self.kind {
            EntityKind::Dot(dot) => dot.bounds(),
            EntityKind::Line(line) => line.bounds(),
            EntityKind::Curve(curve) => curve.bounds(),
            EntityKind::Polygon(polygon) => polygon.bounds(),
            EntityKind::Text(text) => text.bounds(),
            EntityKind::Border(border) => border.frame(),
            EntityKind::Fill(fill) => fill.frame(),
        }
    }

    /// Evaluates the entity's parametric form at `t`.
    ///
    /// Returns `None` for variants without one (dots, text, borders, fills).
    pub fn point_at(&self, t: f32) -> Option<Point> {
        match &self.kind {
            EntityKind::Line(line) => Some(line.point_at(t)),
            EntityKind::Curve(curve) => Some(curve.point_at(t)),
            EntityKind::Polygon(polygon) => Some(polygon.point_at(t)),
            EntityKind::Dot(_) | EntityKind::Text(_) | EntityKind::Border(_) | EntityKind::Fill(_) => {
                None
            }
        }
    }

    /// Moves the entity's geometry by `offset`.
    pub fn translate(&mut self, offset: Point) {
        match &mut self.kind {
            EntityKind::Dot(dot) => dot.translate(offset),
            EntityKind::Line(line) => line.translate(offset),
            EntityKind::Curve(curve) => curve.translate(offset),
            EntityKind::Polygon(polygon) => polygon.translate(offset),
            EntityKind::Text(text) => text.translate(offset),
            EntityKind::Border(border) => border.translate(offset),
            EntityKind::Fill(fill) => fill.translate(offset),
        }
    }

    /// Serializes the entity to a single SVG element.
    pub(crate) fn render_to_svg(&self) -> SvgNode {
        match &self.kind {
            EntityKind::Dot(dot) => dot.render_to_svg(),
            EntityKind::Line(line) => line.render_to_svg(),
            EntityKind::Curve(curve) => curve.render_to_svg(),
            EntityKind::Polygon(polygon) => polygon.render_to_svg(),
            EntityKind::Text(text) => text.render_to_svg(),
            EntityKind::Border(border) => border.render_to_svg(),
            EntityKind::Fill(fill) => fill.render_to_svg(),
        }
    }
}
