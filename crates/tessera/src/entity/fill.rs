//! Solid fills of a surface frame.

use svg::node::element as svg_element;

use tessera_core::{
    color::Color,
    geometry::{Bounds, Point},
};

use crate::{config::Defaults, export::SvgNode};

define_style! {
    /// Overrides for [`Fill`] entities.
    FillStyle {
        color: Color,
        /// Opacity in `[0, 1]`, combined with the color's own alpha.
        opacity: f32,
        z_index: i32,
    }
}

/// A rectangle painted over an entire frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    frame: Bounds,
    color: Color,
    opacity: f32,
}

impl Fill {
    pub fn new(frame: Bounds, color: Color, opacity: f32) -> Self {
        Self {
            frame,
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    pub(crate) fn from_style(frame: Bounds, style: &FillStyle, defaults: &Defaults) -> Self {
        Self::new(
            frame,
            style.color.unwrap_or(defaults.color()),
            style.opacity.unwrap_or(1.0),
        )
    }

    pub fn frame(&self) -> Bounds {
        self.frame
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub(crate) fn translate(&mut self, offset: Point) {
        self.frame = self.frame.translate(offset);
    }

    pub(crate) fn render_to_svg(&self) -> SvgNode {
        let rect = svg_element::Rectangle::new()
            .set("x", self.frame.min_x())
            .set("y", self.frame.min_y())
            .set("width", self.frame.width())
            .set("height", self.frame.height())
            .set("fill", self.color.to_string())
            .set("fill-opacity", self.color.alpha() * self.opacity);

        Box::new(rect)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use tessera_core::geometry::Size;

    fn frame() -> Bounds {
        Bounds::new_from_top_left(Point::new(0.0, 10.0), Size::new(30.0, 15.0))
    }

    #[test]
    fn test_fill_opacity_is_clamped() {
        let mut fill = Fill::new(frame(), Color::default(), 1.5);
        assert_approx_eq!(f32, fill.opacity(), 1.0);
        fill.set_opacity(-0.5);
        assert_approx_eq!(f32, fill.opacity(), 0.0);
    }

    #[test]
    fn test_fill_from_style_defaults_to_opaque() {
        let fill = Fill::from_style(frame(), &FillStyle::new(), &Defaults::default());
        assert_approx_eq!(f32, fill.opacity(), 1.0);
        assert_eq!(fill.color(), Defaults::default().color());
    }

    #[test]
    fn test_fill_renders_rect() {
        let fill = Fill::new(frame(), Color::new("red").unwrap(), 0.5);
        let svg = fill.render_to_svg().to_string();
        assert!(svg.starts_with("<rect"));
        assert!(svg.contains("fill=\"red\""));
        assert!(svg.contains("fill-opacity=\"0.5\""));
        assert!(svg.contains("height=\"15\""));
    }
}
