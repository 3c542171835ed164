//! Closed polygons built from vertex lists.

use svg::node::element as svg_element;

use tessera_core::{
    apply_stroke,
    color::Color,
    error::SceneError,
    geometry::{Bounds, Point},
    stroke::{StrokeDefinition, StrokeJoin},
};

use super::StrokeFields;
use crate::{config::Defaults, export::SvgNode};

define_style! {
    /// Overrides for [`Polygon`] entities.
    PolygonStyle {
        fill: Color,
        /// Setting either outline field enables the outline.
        stroke_color: Color,
        stroke_width: f32,
        /// Corner style of the outline.
        join: StrokeJoin,
        z_index: i32,
    }
}

/// A closed shape with at least three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
    fill: Option<Color>,
    stroke: Option<StrokeDefinition>,
}

impl Polygon {
    /// Creates a polygon from resolved vertices.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidDimension`] for fewer than three vertices.
    pub fn new(
        vertices: Vec<Point>,
        fill: Option<Color>,
        stroke: Option<StrokeDefinition>,
    ) -> Result<Self, SceneError> {
        if vertices.len() < 3 {
            return Err(SceneError::invalid_dimension(format!(
                "a polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        Ok(Self {
            vertices,
            fill,
            stroke,
        })
    }

    pub(crate) fn from_style(
        vertices: Vec<Point>,
        style: &PolygonStyle,
        defaults: &Defaults,
    ) -> Result<Self, SceneError> {
        let stroke = match (style.stroke_color, style.stroke_width) {
            (None, None) => None,
            (color, width) => Some(
                StrokeFields {
                    color,
                    width,
                    join: style.join,
                    ..StrokeFields::default()
                }
                .resolve(defaults)?,
            ),
        };
        Self::new(
            vertices,
            Some(style.fill.unwrap_or(defaults.color())),
            stroke,
        )
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    /// Sets the fill color; `None` leaves the interior unpainted.
    pub fn set_fill(&mut self, fill: Option<Color>) {
        self.fill = fill;
    }

    pub fn set_stroke(&mut self, stroke: Option<StrokeDefinition>) {
        self.stroke = stroke;
    }

    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.vertices
            .iter()
            .copied()
            .zip(self.vertices.iter().copied().cycle().skip(1))
    }

    /// Total length of the closed outline.
    pub fn perimeter(&self) -> f32 {
        self.edges().map(|(a, b)| a.distance(b)).sum()
    }

    /// Walks the closed outline by arc length: `t = 0` and `t = 1` are the
    /// first vertex. Values outside `[0, 1]` wrap around.
    pub fn point_at(&self, t: f32) -> Point {
        let first = self.vertices[0];
        let perimeter = self.perimeter();
        if perimeter <= 0.0 {
            return first;
        }

        let mut remaining = t.rem_euclid(1.0) * perimeter;
        for (a, b) in self.edges() {
            let length = a.distance(b);
            if remaining <= length {
                if length <= 0.0 {
                    return a;
                }
                return a.lerp(b, remaining / length);
            }
            remaining -= length;
        }
        first
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::enclosing(self.vertices.iter().copied()).unwrap_or_default()
    }

    pub(crate) fn translate(&mut self, offset: Point) {
        for vertex in &mut self.vertices {
            *vertex = vertex.add_point(offset);
        }
    }

    fn path_data(&self) -> String {
        let mut data = String::new();
        for (i, vertex) in self.vertices.iter().enumerate() {
            let command = if i == 0 { "M" } else { " L" };
            data.push_str(&format!("{command} {} {}", vertex.x(), vertex.y()));
        }
        data.push_str(" Z");
        data
    }

    pub(crate) fn render_to_svg(&self) -> SvgNode {
        let path = svg_element::Path::new().set("d", self.path_data());
        let path = match self.fill {
            Some(fill) => path
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha()),
            None => path.set("fill", "none"),
        };

        match &self.stroke {
            Some(stroke) => Box::new(apply_stroke!(path, stroke)),
            None => Box::new(path),
        }
    }
}
