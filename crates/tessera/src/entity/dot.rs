//! Point-like entities rendered as circles.

use svg::node::element as svg_element;

use tessera_core::{
    apply_stroke,
    color::Color,
    error::SceneError,
    geometry::{Bounds, Point, Size},
    stroke::StrokeDefinition,
};

use super::{StrokeFields, positive_dimension};
use crate::{config::Defaults, export::SvgNode};

define_style! {
    /// Overrides for [`Dot`] entities.
    DotStyle {
        radius: f32,
        color: Color,
        /// Color of an optional outline; setting either outline field enables it.
        stroke_color: Color,
        stroke_width: f32,
        z_index: i32,
    }
}

/// A filled circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    center: Point,
    radius: f32,
    color: Color,
    stroke: Option<StrokeDefinition>,
}

impl Dot {
    pub fn new(center: Point, radius: f32, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
            stroke: None,
        }
    }

    /// Builds a dot from `style`, falling back to `defaults`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidDimension`] for a radius or outline width
    /// that is not a positive number.
    pub(crate) fn from_style(
        center: Point,
        style: &DotStyle,
        defaults: &Defaults,
    ) -> Result<Self, SceneError> {
        let radius = positive_dimension("dot radius", style.radius.unwrap_or(defaults.dot_radius()))?;
        let stroke = match (style.stroke_color, style.stroke_width) {
            (None, None) => None,
            (color, width) => Some(
                StrokeFields {
                    color,
                    width,
                    ..StrokeFields::default()
                }
                .resolve(defaults)?,
            ),
        };

        Ok(Self {
            center,
            radius,
            color: style.color.unwrap_or(defaults.color()),
            stroke,
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_stroke(&mut self, stroke: Option<StrokeDefinition>) {
        self.stroke = stroke;
    }

    pub fn bounds(&self) -> Bounds {
        let diameter = self.radius * 2.0;
        Bounds::new_from_center(self.center, Size::new(diameter, diameter))
    }

    pub(crate) fn translate(&mut self, offset: Point) {
        self.center = self.center.add_point(offset);
    }

    pub(crate) fn render_to_svg(&self) -> SvgNode {
        let circle = svg_element::Circle::new()
            .set("cx", self.center.x())
            .set("cy", self.center.y())
            .set("r", self.radius)
            .set("fill", self.color.to_string())
            .set("fill-opacity", self.color.alpha());

        match &self.stroke {
            Some(stroke) => Box::new(apply_stroke!(circle, stroke)),
            None => Box::new(circle),
        }
    }
}
