//! Rectangular outlines of a surface frame.

use svg::node::element as svg_element;

use tessera_core::{
    apply_stroke,
    color::Color,
    error::SceneError,
    geometry::{Bounds, Point},
    stroke::{StrokeDefinition, StrokeJoin, StrokeStyle},
};

use super::StrokeFields;
use crate::{config::Defaults, export::SvgNode};

define_style! {
    /// Overrides for [`Border`] entities.
    BorderStyle {
        color: Color,
        width: f32,
        dash: StrokeStyle,
        /// Corner style of the outline.
        join: StrokeJoin,
        z_index: i32,
    }
}

/// An outline drawn just inside `frame`.
///
/// The rectangle is inset by half the stroke width, so the painted stroke
/// never leaves the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    frame: Bounds,
    stroke: StrokeDefinition,
}

impl Border {
    pub fn new(frame: Bounds, stroke: StrokeDefinition) -> Self {
        Self { frame, stroke }
    }

    pub(crate) fn from_style(
        frame: Bounds,
        style: &BorderStyle,
        defaults: &Defaults,
    ) -> Result<Self, SceneError> {
        let stroke = StrokeFields {
            color: style.color,
            width: style.width,
            dash: style.dash.as_ref(),
            cap: None,
            join: style.join,
        }
        .resolve(defaults)?;
        Ok(Self::new(frame, stroke))
    }

    /// The frame the border outlines.
    pub fn frame(&self) -> Bounds {
        self.frame
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn stroke_mut(&mut self) -> &mut StrokeDefinition {
        &mut self.stroke
    }

    /// The rectangle the stroke is centered on.
    pub fn outline(&self) -> Bounds {
        self.frame.inset(self.stroke.width() / 2.0)
    }

    pub(crate) fn translate(&mut self, offset: Point) {
        self.frame = self.frame.translate(offset);
    }

    pub(crate) fn render_to_svg(&self) -> SvgNode {
        let outline = self.outline();
        let rect = svg_element::Rectangle::new()
            .set("x", outline.min_x())
            .set("y", outline.min_y())
            .set("width", outline.width())
            .set("height", outline.height())
            .set("fill", "none");

        Box::new(apply_stroke!(rect, &self.stroke))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::geometry::Size;

    fn frame() -> Bounds {
        Bounds::new_from_top_left(Point::new(20.0, 20.0), Size::new(20.0, 20.0))
    }

    #[test]
    fn test_border_inset_keeps_stroke_inside() {
        let border = Border::new(frame(), StrokeDefinition::new(Color::default(), 4.0));
        let outline = border.outline();
        assert_eq!(outline.min_point(), Point::new(22.0, 22.0));
        assert_eq!(outline.to_size(), Size::new(16.0, 16.0));
        assert_eq!(border.frame(), frame());
    }

    #[test]
    fn test_border_from_style() {
        let style = BorderStyle::new()
            .width(2.0)
            .dash(StrokeStyle::Dashed)
            .join(StrokeJoin::Bevel);
        let border = Border::from_style(frame(), &style, &Defaults::default()).unwrap();
        assert_eq!(border.stroke().width(), 2.0);
        assert_eq!(*border.stroke().style(), StrokeStyle::Dashed);

        let svg = border.render_to_svg().to_string();
        assert!(svg.contains("stroke-linejoin=\"bevel\""));
    }

    #[test]
    fn test_border_renders_unfilled_rect() {
        let border = Border::new(frame(), StrokeDefinition::new(Color::default(), 2.0));
        let svg = border.render_to_svg().to_string();
        assert!(svg.starts_with("<rect"));
        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains("x=\"21\""));
        assert!(svg.contains("width=\"18\""));
    }
}
