//! Text labels.
//!
//! Text is measured with `cosmic-text` so that its bounds reflect real font
//! metrics. Measurement shares one lazily initialised [`FontSystem`]; loading
//! system fonts is expensive and happens at most once per process.

use std::{
    fmt,
    str::FromStr,
    sync::{Mutex, OnceLock, PoisonError},
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;
use svg::node::{Text as SvgText, element as svg_element};

use tessera_core::{
    color::Color,
    error::SceneError,
    geometry::{Bounds, Point, Size},
};

use super::positive_dimension;
use crate::{config::Defaults, export::SvgNode};

const LINE_HEIGHT_FACTOR: f32 = 1.15;
const FALLBACK_ADVANCE_FACTOR: f32 = 0.55;

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAlign {
    /// Returns the SVG `text-anchor` value.
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl FromStr for TextAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" | "left" => Ok(Self::Start),
            "middle" | "center" => Ok(Self::Middle),
            "end" | "right" => Ok(Self::End),
            _ => Err(format!(
                "invalid text alignment `{s}`, valid values: start, middle, end"
            )),
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_svg_value())
    }
}

define_style! {
    /// Overrides for [`Text`] entities.
    TextStyle {
        font_size: f32,
        font_family: String,
        color: Color,
        align: TextAlign,
        z_index: i32,
    }
}

/// A text label anchored at a point.
///
/// The anchor point is the vertical center of the text block; horizontally
/// it is the start, middle or end of each line depending on [`TextAlign`].
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    content: String,
    position: Point,
    font_family: String,
    font_size: f32,
    color: Color,
    align: TextAlign,
    size: Size,
}

impl Text {
    pub fn new(
        content: impl Into<String>,
        position: Point,
        font_family: impl Into<String>,
        font_size: f32,
        color: Color,
        align: TextAlign,
    ) -> Self {
        let content = content.into();
        let font_family = font_family.into();
        let size = measure_text(&content, &font_family, font_size);
        Self {
            content,
            position,
            font_family,
            font_size,
            color,
            align,
            size,
        }
    }

    /// Builds a label from `style`, falling back to `defaults`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidDimension`] if the font size is not a
    /// positive number.
    pub(crate) fn from_style(
        content: impl Into<String>,
        position: Point,
        style: &TextStyle,
        defaults: &Defaults,
    ) -> Result<Self, SceneError> {
        let font_size = positive_dimension("font size", style.font_size.unwrap_or(defaults.font_size()))?;
        let font_family = style
            .font_family
            .clone()
            .unwrap_or_else(|| defaults.font_family().to_string());
        Ok(Self::new(
            content,
            position,
            font_family,
            font_size,
            style.color.unwrap_or(defaults.color()),
            style.align.unwrap_or_default(),
        ))
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn align(&self) -> TextAlign {
        self.align
    }

    /// Measured size of the text block.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    pub fn bounds(&self) -> Bounds {
        let left = match self.align {
            TextAlign::Start => self.position.x(),
            TextAlign::Middle => self.position.x() - self.size.width() / 2.0,
            TextAlign::End => self.position.x() - self.size.width(),
        };
        let top = self.position.y() - self.size.height() / 2.0;
        Bounds::new_from_top_left(Point::new(left, top), self.size)
    }

    pub(crate) fn translate(&mut self, offset: Point) {
        self.position = self.position.add_point(offset);
    }

    pub(crate) fn render_to_svg(&self) -> SvgNode {
        let lines: Vec<&str> = self.content.lines().collect();
        let line_height = if lines.is_empty() {
            0.0
        } else {
            self.size.height() / lines.len() as f32
        };
        let y_offset = -(self.size.height() + line_height) / 2.0;

        let mut text = svg_element::Text::new("")
            .set("x", self.position.x())
            .set("y", self.position.y() + y_offset)
            .set("text-anchor", self.align.to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", self.color.to_string())
            .set("fill-opacity", self.color.alpha());

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", self.position.x())
                .set("dy", line_height)
                .add(SvgText::new(line));
            text = text.add(tspan);
        }

        Box::new(text)
    }
}

/// Measures `content` in pixels for the given font.
pub(crate) fn measure_text(content: &str, font_family: &str, font_size: f32) -> Size {
    TEXT_MANAGER
        .get_or_init(TextManager::new)
        .calculate_text_size(content, font_family, font_size)
}

/// Owns the shared [`FontSystem`] used for measurement.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    fn calculate_text_size(&self, text: &str, font_family: &str, font_size: f32) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT_FACTOR);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(font_family));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        // No usable fonts: approximate from the character count.
        if max_width <= 0.0 {
            let longest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
            max_width = longest as f32 * font_size * FALLBACK_ADVANCE_FACTOR;
        }
        if total_height <= 0.0 {
            total_height = text.lines().count().max(1) as f32 * metrics.line_height;
        }

        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn label(content: &str, align: TextAlign) -> Text {
        Text::new(
            content,
            Point::new(100.0, 50.0),
            "sans-serif",
            12.0,
            Color::default(),
            align,
        )
    }

    #[test]
    fn test_text_align_from_str() {
        assert_eq!("start".parse::<TextAlign>().unwrap(), TextAlign::Start);
        assert_eq!("center".parse::<TextAlign>().unwrap(), TextAlign::Middle);
        assert_eq!("end".parse::<TextAlign>().unwrap(), TextAlign::End);
        assert!("justify".parse::<TextAlign>().is_err());
        assert_eq!(TextAlign::default(), TextAlign::Middle);
    }

    #[test]
    fn test_measure_empty_text() {
        let size = measure_text("", "sans-serif", 12.0);
        assert!(size.is_zero());
    }

    #[test]
    fn test_measure_text_grows_with_lines_and_size() {
        let single = measure_text("Line 1", "sans-serif", 12.0);
        let multi = measure_text("Line 1\nLine 2\nLine 3", "sans-serif", 12.0);
        let large = measure_text("Line 1", "sans-serif", 24.0);

        assert!(single.width() > 0.0);
        assert!(multi.height() > single.height());
        assert!(large.height() > single.height());
    }

    #[test]
    fn test_text_bounds_follow_alignment() {
        let middle = label("Tessera", TextAlign::Middle);
        let width = middle.size().width();
        assert_approx_eq!(f32, middle.bounds().center().x(), 100.0);
        assert_approx_eq!(f32, middle.bounds().center().y(), 50.0);

        let start = label("Tessera", TextAlign::Start);
        assert_approx_eq!(f32, start.bounds().min_x(), 100.0);

        let end = label("Tessera", TextAlign::End);
        assert_approx_eq!(f32, end.bounds().max_x(), 100.0);
        assert_approx_eq!(f32, end.bounds().width(), width);
    }

    #[test]
    fn test_text_from_style_uses_defaults() {
        let defaults = Defaults::default().with_font("monospace", 9.0);
        let text = Text::from_style("x", Point::default(), &TextStyle::new(), &defaults).unwrap();
        assert_eq!(text.font_family(), "monospace");
        assert_approx_eq!(f32, text.font_size(), 9.0);
        assert_eq!(text.align(), TextAlign::Middle);
    }

    #[test]
    fn test_text_from_style_rejects_bad_font_size() {
        let style = TextStyle::new().font_size(-3.0);
        let err = Text::from_style("x", Point::default(), &style, &Defaults::default()).unwrap_err();
        assert!(matches!(err, SceneError::InvalidDimension(_)));
    }

    #[test]
    fn test_text_renders_tspans() {
        let svg = label("first\nsecond", TextAlign::Start).render_to_svg().to_string();
        assert!(svg.starts_with("<text"));
        assert!(svg.contains("text-anchor=\"start\""));
        assert!(svg.contains("first"));
        assert!(svg.contains("second"));
        assert_eq!(svg.matches("<tspan").count(), 2);
    }
}
