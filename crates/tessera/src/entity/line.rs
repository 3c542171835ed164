//! Straight line segments.

use svg::node::element as svg_element;

use tessera_core::{
    apply_stroke,
    color::Color,
    error::SceneError,
    geometry::{Bounds, Point},
    stroke::{StrokeCap, StrokeDefinition, StrokeStyle},
};

use super::StrokeFields;
use crate::{config::Defaults, export::SvgNode};

define_style! {
    /// Overrides for [`Line`] entities.
    LineStyle {
        color: Color,
        width: f32,
        dash: StrokeStyle,
        cap: StrokeCap,
        z_index: i32,
    }
}

impl LineStyle {
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

/// A straight segment between two resolved points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    start: Point,
    end: Point,
    stroke: StrokeDefinition,
}

impl Line {
    pub fn new(start: Point, end: Point, stroke: StrokeDefinition) -> Self {
        Self { start, end, stroke }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn stroke_mut(&mut self) -> &mut StrokeDefinition {
        &mut self.stroke
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Linear interpolation between the endpoints; exact at `t = 0` and `t = 1`.
    pub fn point_at(&self, t: f32) -> Point {
        self.start.lerp(self.end, t)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::enclosing([self.start, self.end]).unwrap_or_default()
    }

    pub(crate) fn translate(&mut self, offset: Point) {
        self.start = self.start.add_point(offset);
        self.end = self.end.add_point(offset);
    }

    pub(crate) fn render_to_svg(&self) -> SvgNode {
        render_segment(self.start, self.end, &self.stroke)
    }
}

/// Renders a stroked `<line>` between two points.
pub(crate) fn render_segment(start: Point, end: Point, stroke: &StrokeDefinition) -> SvgNode {
    let line = svg_element::Line::new()
        .set("x1", start.x())
        .set("y1", start.y())
        .set("x2", end.x())
        .set("y2", end.y());

    Box::new(apply_stroke!(line, stroke))
}
