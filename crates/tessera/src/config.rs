//! Configuration types for Tessera scenes.
//!
//! Configuration replaces any process-wide palette: the resolved
//! [`Defaults`] are handed to each [`Scene`](crate::Scene) explicitly and are
//! consulted only when neither a direct override nor a style object supplies
//! a value. All types implement [`serde::Deserialize`] for loading from TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`StyleConfig`] - The `[style]` section as written in a config file.
//! - [`Defaults`] - Validated per-scene fallback values.
//!
//! # Example
//!
//! ```
//! # use tessera::config::AppConfig;
//! let config = AppConfig::from_toml(r#"
//!     [style]
//!     color = "navy"
//!     dot_radius = 3.5
//! "#).unwrap();
//!
//! let defaults = config.style().defaults().unwrap();
//! assert_eq!(defaults.dot_radius(), 3.5);
//! ```

use serde::Deserialize;

use tessera_core::color::Color;

use crate::TesseraError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified style configuration.
    pub fn new(style: StyleConfig) -> Self {
        Self { style }
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Config`] if the text is not valid TOML or does
    /// not match the configuration schema.
    pub fn from_toml(content: &str) -> Result<Self, TesseraError> {
        toml::from_str(content).map_err(|err| TesseraError::Config(err.to_string()))
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Visual styling configuration as written in a configuration file.
///
/// Fields that are not set fall back to [`Defaults::default`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background color for scenes that do not choose their own.
    #[serde(default)]
    background_color: Option<String>,

    /// Default entity color.
    #[serde(default)]
    color: Option<String>,

    #[serde(default)]
    dot_radius: Option<f32>,

    #[serde(default)]
    line_width: Option<f32>,

    #[serde(default)]
    font_family: Option<String>,

    #[serde(default)]
    font_size: Option<f32>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, TesseraError> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| TesseraError::Config(format!("invalid background color: {err}")))
    }

    /// Validates this section and produces the scene [`Defaults`].
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Config`] for an unparsable color or a
    /// non-positive size.
    pub fn defaults(&self) -> Result<Defaults, TesseraError> {
        let mut defaults = Defaults::default();

        if let Some(color) = &self.color {
            defaults.color = Color::new(color)
                .map_err(|err| TesseraError::Config(format!("invalid default color: {err}")))?;
        }
        if let Some(radius) = self.dot_radius {
            defaults.dot_radius = positive("dot_radius", radius)?;
        }
        if let Some(width) = self.line_width {
            defaults.line_width = positive("line_width", width)?;
        }
        if let Some(family) = &self.font_family {
            defaults.font_family = family.clone();
        }
        if let Some(size) = self.font_size {
            defaults.font_size = positive("font_size", size)?;
        }

        Ok(defaults)
    }
}

fn positive(name: &str, value: f32) -> Result<f32, TesseraError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TesseraError::Config(format!(
            "`{name}` must be a positive number, got {value}"
        )))
    }
}

/// Fallback style values used by every `add_*` call of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    color: Color,
    dot_radius: f32,
    line_width: f32,
    font_family: String,
    font_size: f32,
}

impl Defaults {
    /// Default color of dots, lines, curves, polygon fills, text, borders and fills.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn dot_radius(&self) -> f32 {
        self.dot_radius
    }

    /// Stroke width of lines, curves, borders and connections.
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_dot_radius(mut self, radius: f32) -> Self {
        self.dot_radius = radius;
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            color: Color::default(),
            dot_radius: 2.0,
            line_width: 1.0,
            font_family: String::from("sans-serif"),
            font_size: 12.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_default_config_produces_default_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.style().defaults().unwrap(), Defaults::default());
        assert!(config.style().background_color().unwrap().is_none());
    }

    #[test]
    fn test_style_section_overrides() {
        let config = AppConfig::from_toml(
            r#"
            [style]
            background_color = "ivory"
            color = "crimson"
            line_width = 0.5
            font_family = "Georgia"
            font_size = 18
            "#,
        )
        .unwrap();

        let defaults = config.style().defaults().unwrap();
        assert_eq!(defaults.color(), Color::new("crimson").unwrap());
        assert_approx_eq!(f32, defaults.line_width(), 0.5);
        assert_eq!(defaults.font_family(), "Georgia");
        assert_approx_eq!(f32, defaults.font_size(), 18.0);
        assert_approx_eq!(f32, defaults.dot_radius(), 2.0);

        assert_eq!(
            config.style().background_color().unwrap(),
            Some(Color::new("ivory").unwrap())
        );
    }

    #[test]
    fn test_invalid_color_is_config_error() {
        let config = AppConfig::from_toml("[style]\ncolor = \"sparkly\"").unwrap();
        let err = config.style().defaults().unwrap_err();
        assert!(matches!(err, TesseraError::Config(_)));
    }

    #[test]
    fn test_non_positive_size_is_config_error() {
        let config = AppConfig::from_toml("[style]\ndot_radius = 0").unwrap();
        assert!(config.style().defaults().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = AppConfig::from_toml("[style\ncolor = 1").unwrap_err();
        assert!(matches!(err, TesseraError::Config(_)));
    }
}
