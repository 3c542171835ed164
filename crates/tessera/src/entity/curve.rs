//! Quadratic and cubic Bezier curves.

use svg::node::element as svg_element;

use tessera_core::{
    apply_stroke,
    color::Color,
    error::SceneError,
    geometry::{Bounds, Point, cubic_bezier, quadratic_bezier},
    stroke::{StrokeCap, StrokeDefinition, StrokeStyle},
};

use super::StrokeFields;
use crate::{config::Defaults, export::SvgNode, position::Position, scene::Scene};

const BOUNDS_SAMPLES: usize = 32;

define_style! {
    /// Overrides for [`Curve`] entities.
    CurveStyle {
        color: Color,
        width: f32,
        dash: StrokeStyle,
        cap: StrokeCap,
        z_index: i32,
    }
}

impl CurveStyle {
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

/// How the caller describes the bend of a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveControl {
    /// A quadratic curve whose control point sits on the chord's
    /// perpendicular bisector, `k` chord lengths away from the midpoint.
    /// Positive values bend toward `(-dy, dx)` of the start-to-end chord.
    Curvature(f32),
    /// A quadratic curve with an explicit control point.
    Quadratic(Position),
    /// A cubic curve with two explicit control points.
    Cubic(Position, Position),
}

impl Default for CurveControl {
    fn default() -> Self {
        Self::Curvature(0.25)
    }
}

impl CurveControl {
    /// Resolves the control form for a curve from `start` to `end`.
    ///
    /// Control positions are resolved in `frame`, the same frame as the
    /// endpoints.
    pub(crate) fn resolve(
        &self,
        start: Point,
        end: Point,
        frame: Bounds,
        scene: &Scene,
    ) -> Result<CurveShape, SceneError> {
        match *self {
            Self::Curvature(k) => {
                if !k.is_finite() {
                    return Err(SceneError::invalid_dimension(format!(
                        "curvature must be finite, got {k}"
                    )));
                }
                let offset = end.sub_point(start).perpendicular().scale(k);
                Ok(CurveShape::Quadratic(start.midpoint(end).add_point(offset)))
            }
            Self::Quadratic(control) => Ok(CurveShape::Quadratic(control.resolve(frame, scene)?)),
            Self::Cubic(c1, c2) => Ok(CurveShape::Cubic(
                c1.resolve(frame, scene)?,
                c2.resolve(frame, scene)?,
            )),
        }
    }
}

/// Resolved control points of a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveShape {
    Quadratic(Point),
    Cubic(Point, Point),
}

impl CurveShape {
    fn translate(self, offset: Point) -> Self {
        match self {
            Self::Quadratic(c) => Self::Quadratic(c.add_point(offset)),
            Self::Cubic(c1, c2) => Self::Cubic(c1.add_point(offset), c2.add_point(offset)),
        }
    }
}

/// A stroked Bezier curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    start: Point,
    end: Point,
    shape: CurveShape,
    stroke: StrokeDefinition,
}

impl Curve {
    pub fn new(start: Point, end: Point, shape: CurveShape, stroke: StrokeDefinition) -> Self {
        Self {
            start,
            end,
            shape,
            stroke,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn shape(&self) -> CurveShape {
        self.shape
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn stroke_mut(&mut self) -> &mut StrokeDefinition {
        &mut self.stroke
    }

    /// Evaluates the Bezier formula at `t`.
    pub fn point_at(&self, t: f32) -> Point {
        match self.shape {
            CurveShape::Quadratic(c) => quadratic_bezier(self.start, c, self.end, t),
            CurveShape::Cubic(c1, c2) => cubic_bezier(self.start, c1, c2, self.end, t),
        }
    }

    /// Bounding box of the drawn curve, sampled along its parameter range.
    pub fn bounds(&self) -> Bounds {
        let samples = (0..=BOUNDS_SAMPLES).map(|i| self.point_at(i as f32 / BOUNDS_SAMPLES as f32));
        Bounds::enclosing(samples).unwrap_or_default()
    }

    pub(crate) fn translate(&mut self, offset: Point) {
        self.start = self.start.add_point(offset);
        self.end = self.end.add_point(offset);
        self.shape = self.shape.translate(offset);
    }

    fn path_data(&self) -> String {
        let (sx, sy) = (self.start.x(), self.start.y());
        let (ex, ey) = (self.end.x(), self.end.y());
        match self.shape {
            CurveShape::Quadratic(c) => format!("M {sx} {sy} Q {} {} {ex} {ey}", c.x(), c.y()),
            CurveShape::Cubic(c1, c2) => format!(
                "M {sx} {sy} C {} {} {} {} {ex} {ey}",
                c1.x(),
                c1.y(),
                c2.x(),
                c2.y()
            ),
        }
    }

    pub(crate) fn render_to_svg(&self) -> SvgNode {
        let path = svg_element::Path::new()
            .set("d", self.path_data())
            .set("fill", "none");

        Box::new(apply_stroke!(path, &self.stroke))
    }
}
