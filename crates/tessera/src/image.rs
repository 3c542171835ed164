//! Image sampling seam.
//!
//! Decoding image files is left to the caller: anything that can report its
//! pixel dimensions and average a rectangular region implements
//! [`ImageSource`] and can seed a scene through
//! [`Scene::from_image`](crate::Scene::from_image).

use log::warn;

use tessera_core::{color::Color, error::SceneError, geometry::Bounds};

use crate::grid::CellAttributes;

/// A source of per-region color and brightness.
pub trait ImageSource {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Averages the pixels inside `region`.
    fn sample(&self, region: Bounds) -> CellAttributes;
}

/// An in-memory, row-major RGB8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl RgbBuffer {
    /// Wraps `pixels`, which must hold exactly `width * height` entries.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidDimension`] for a zero dimension or a
    /// pixel count that does not match.
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Result<Self, SceneError> {
        let expected = width as usize * height as usize;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(SceneError::invalid_dimension(format!(
                "a {width}x{height} image needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds an image by evaluating `pixel(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut pixel: impl FnMut(u32, u32) -> [u8; 3],
    ) -> Result<Self, SceneError> {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| pixel(x, y))
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

impl ImageSource for RgbBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn sample(&self, region: Bounds) -> CellAttributes {
        let x0 = region.min_x().max(0.0).floor() as u32;
        let y0 = region.min_y().max(0.0).floor() as u32;
        let x1 = (region.max_x().ceil().max(0.0) as u32).min(self.width);
        let y1 = (region.max_y().ceil().max(0.0) as u32).min(self.height);

        let mut sum = [0u64; 3];
        let mut count = 0u64;
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(rgb) = self.pixel(x, y) {
                    for (total, channel) in sum.iter_mut().zip(rgb) {
                        *total += u64::from(channel);
                    }
                    count += 1;
                }
            }
        }

        if count == 0 {
            return CellAttributes::new(Color::from_rgb8(0, 0, 0), 0.0);
        }

        let [r, g, b] = sum.map(|total| (total / count) as u8);
        CellAttributes::new(Color::from_rgb8(r, g, b), luma(r, g, b))
    }
}

/// Rec. 601 luma of an RGB8 triple, in `[0, 1]`.
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    let value = (0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)) / 255.0;
    value.min(1.0)
}

/// Clamps a brightness to `[0, 1]`, warning when the value was outside.
/// NaN maps to `0`.
pub(crate) fn clamp_brightness(value: f32) -> f32 {
    if value.is_nan() {
        warn!(brightness = value; "Replacing NaN brightness with 0");
        return 0.0;
    }
    if !(0.0..=1.0).contains(&value) {
        warn!(brightness = value; "Clamping sampled brightness into [0, 1]");
        return value.clamp(0.0, 1.0);
    }
    value
}
