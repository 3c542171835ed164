//! Named anchors within a frame.
//!
//! An [`Anchor`] names a fixed relative point of a rectangular frame. Anchors
//! resolve through [`Bounds::relative_point`], so they behave exactly like the
//! equivalent relative coordinate.
//!
//! ```text
//!   top_left ──── top ──── top_right
//!      │                       │
//!     left      center       right
//!      │                       │
//! bottom_left ── bottom ── bottom_right
//! ```

use std::{fmt, str::FromStr};

use crate::{
    error::SceneError,
    geometry::{Bounds, Point},
};

/// A named point of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    #[default]
    Center,
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Anchor {
    /// Every anchor, in reading order.
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::Top,
        Anchor::TopRight,
        Anchor::Left,
        Anchor::Center,
        Anchor::Right,
        Anchor::BottomLeft,
        Anchor::Bottom,
        Anchor::BottomRight,
    ];

    /// Canonical names of the anchors, matching [`Anchor::ALL`].
    pub const NAMES: [&'static str; 9] = [
        "top_left",
        "top",
        "top_right",
        "left",
        "center",
        "right",
        "bottom_left",
        "bottom",
        "bottom_right",
    ];

    /// Returns the canonical name of this anchor.
    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top_left",
            Self::Top => "top",
            Self::TopRight => "top_right",
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::BottomLeft => "bottom_left",
            Self::Bottom => "bottom",
            Self::BottomRight => "bottom_right",
        }
    }

    /// Returns the relative `(x, y)` pair this anchor stands for.
    pub fn relative(self) -> (f32, f32) {
        match self {
            Self::TopLeft => (0.0, 0.0),
            Self::Top => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::Left => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::Right => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::Bottom => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }

    /// Resolves this anchor to an absolute point within `frame`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tessera_core::anchor::Anchor;
    /// # use tessera_core::geometry::{Bounds, Point, Size};
    /// let frame = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(40.0, 20.0));
    ///
    /// assert_eq!(Anchor::Center.resolve(frame), Point::new(20.0, 10.0));
    /// assert_eq!(Anchor::BottomRight.resolve(frame), Point::new(40.0, 20.0));
    /// ```
    pub fn resolve(self, frame: Bounds) -> Point {
        let (rx, ry) = self.relative();
        frame.relative_point(rx, ry)
    }
}

impl FromStr for Anchor {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "center" | "centre" | "middle" => Ok(Self::Center),
            "top_left" | "topleft" => Ok(Self::TopLeft),
            "top" | "top_center" => Ok(Self::Top),
            "top_right" | "topright" => Ok(Self::TopRight),
            "left" | "center_left" => Ok(Self::Left),
            "right" | "center_right" => Ok(Self::Right),
            "bottom_left" | "bottomleft" => Ok(Self::BottomLeft),
            "bottom" | "bottom_center" => Ok(Self::Bottom),
            "bottom_right" | "bottomright" => Ok(Self::BottomRight),
            _ => Err(SceneError::InvalidAnchor(s.to_string())),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::geometry::Size;

    fn frame() -> Bounds {
        Bounds::new_from_top_left(Point::new(20.0, 40.0), Size::new(20.0, 20.0))
    }

    #[test]
    fn test_anchor_names_match_all() {
        for (anchor, name) in Anchor::ALL.iter().zip(Anchor::NAMES) {
            assert_eq!(anchor.name(), name);
            assert_eq!(name.parse::<Anchor>().unwrap(), *anchor);
        }
    }

    #[test]
    fn test_anchor_resolve_corners() {
        let frame = frame();
        assert_eq!(Anchor::TopLeft.resolve(frame), Point::new(20.0, 40.0));
        assert_eq!(Anchor::TopRight.resolve(frame), Point::new(40.0, 40.0));
        assert_eq!(Anchor::BottomLeft.resolve(frame), Point::new(20.0, 60.0));
        assert_eq!(Anchor::BottomRight.resolve(frame), Point::new(40.0, 60.0));
    }

    #[test]
    fn test_anchor_resolve_edges_and_center() {
        let frame = frame();
        let center = Anchor::Center.resolve(frame);
        assert_approx_eq!(f32, center.x(), 30.0);
        assert_approx_eq!(f32, center.y(), 50.0);

        assert_eq!(Anchor::Top.resolve(frame), Point::new(30.0, 40.0));
        assert_eq!(Anchor::Bottom.resolve(frame), Point::new(30.0, 60.0));
        assert_eq!(Anchor::Left.resolve(frame), Point::new(20.0, 50.0));
        assert_eq!(Anchor::Right.resolve(frame), Point::new(40.0, 50.0));
    }

    #[test]
    fn test_anchor_from_str_aliases() {
        assert_eq!("top-left".parse::<Anchor>().unwrap(), Anchor::TopLeft);
        assert_eq!("BOTTOM_RIGHT".parse::<Anchor>().unwrap(), Anchor::BottomRight);
        assert_eq!("middle".parse::<Anchor>().unwrap(), Anchor::Center);
        assert_eq!("top_center".parse::<Anchor>().unwrap(), Anchor::Top);
        assert_eq!("center-right".parse::<Anchor>().unwrap(), Anchor::Right);
    }

    #[test]
    fn test_anchor_from_str_unknown() {
        let err = "upper_middle".parse::<Anchor>().unwrap_err();
        assert_eq!(err, SceneError::InvalidAnchor("upper_middle".to_string()));
    }

    #[test]
    fn test_anchor_display() {
        assert_eq!(Anchor::BottomLeft.to_string(), "bottom_left");
    }
}
