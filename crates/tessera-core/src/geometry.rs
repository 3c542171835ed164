//! Geometric primitives for scene composition.
//!
//! This module provides the fundamental geometric types used throughout
//! Tessera for positioning entities, describing cell frames and evaluating
//! parametric paths.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in scene pixel space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular frame defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Tessera uses the SVG coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

/// A 2D point in scene pixel space.
///
/// # Examples
///
/// ```
/// # use tessera_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Returns true if both coordinates are finite numbers
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the Euclidean distance from the origin
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Calculates the Euclidean distance to another point
    pub fn distance(self, other: Point) -> f32 {
        other.sub_point(self).hypot()
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Linearly interpolates between this point (`t = 0`) and `other` (`t = 1`).
    ///
    /// Values of `t` outside `[0, 1]` extrapolate along the same line.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tessera_core::geometry::Point;
    /// let a = Point::new(0.0, 0.0);
    /// let b = Point::new(10.0, 20.0);
    ///
    /// assert_eq!(a.lerp(b, 0.0), a);
    /// assert_eq!(a.lerp(b, 1.0), b);
    /// assert_eq!(a.lerp(b, 0.5), Point::new(5.0, 10.0));
    /// ```
    pub fn lerp(self, other: Point, t: f32) -> Self {
        if t == 0.0 {
            return self;
        }
        if t == 1.0 {
            return other;
        }
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Returns the vector rotated 90 degrees clockwise in screen space.
    pub fn perpendicular(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }
}

/// Evaluates a quadratic Bezier curve at `t`.
pub fn quadratic_bezier(start: Point, control: Point, end: Point, t: f32) -> Point {
    if t == 0.0 {
        return start;
    }
    if t == 1.0 {
        return end;
    }
    let u = 1.0 - t;
    Point::new(
        u * u * start.x + 2.0 * u * t * control.x + t * t * end.x,
        u * u * start.y + 2.0 * u * t * control.y + t * t * end.y,
    )
}

/// Evaluates a cubic Bezier curve at `t`.
pub fn cubic_bezier(start: Point, c1: Point, c2: Point, end: Point, t: f32) -> Point {
    if t == 0.0 {
        return start;
    }
    if t == 1.0 {
        return end;
    }
    let u = 1.0 - t;
    let a = u * u * u;
    let b = 3.0 * u * u * t;
    let c = 3.0 * u * t * t;
    let d = t * t * t;
    Point::new(
        a * start.x + b * c1.x + c * c2.x + d * end.x,
        a * start.y + b * c1.y + c * c2.y + d * end.y,
    )
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// A rectangular frame with minimum and maximum coordinates.
///
/// Bounds are the frame type used for anchor resolution: a cell's bounds,
/// the whole canvas, or an entity's bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates the smallest bounds containing every point.
    ///
    /// Returns `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let initial = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(points.fold(initial, |acc, p| Self {
            min_x: acc.min_x.min(p.x),
            min_y: acc.min_y.min(p.y),
            max_x: acc.max_x.max(p.x),
            max_y: acc.max_y.max(p.y),
        }))
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Maps a relative coordinate to an absolute point within this frame.
    ///
    /// `(0, 0)` is the top-left corner and `(1, 1)` the bottom-right corner.
    /// Components outside `[0, 1]` land outside the frame and are not clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tessera_core::geometry::{Bounds, Point, Size};
    /// let frame = Bounds::new_from_top_left(Point::new(20.0, 40.0), Size::new(20.0, 20.0));
    ///
    /// assert_eq!(frame.relative_point(0.0, 0.0), Point::new(20.0, 40.0));
    /// assert_eq!(frame.relative_point(0.5, 0.5), Point::new(30.0, 50.0));
    /// assert_eq!(frame.relative_point(1.5, 0.0), Point::new(50.0, 40.0));
    /// ```
    pub fn relative_point(self, rx: f32, ry: f32) -> Point {
        Point::new(
            self.min_x + rx * self.width(),
            self.min_y + ry * self.height(),
        )
    }

    /// Returns true if the point lies inside the bounds, edges included
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Shrinks the bounds by `amount` on every side.
    ///
    /// The result never inverts: an inset larger than half a dimension
    /// collapses that dimension onto the center.
    pub fn inset(&self, amount: f32) -> Self {
        let center = self.center();
        let half_width = (self.width() / 2.0 - amount).max(0.0);
        let half_height = (self.height() / 2.0 - amount).max(0.0);
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_default() {
        let point = Point::default();
        assert!(point.is_zero());
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);
        assert_eq!(p1.add_point(p2), Point::new(7.0, 11.0));
        assert_eq!(p1.sub_point(p2), Point::new(3.0, 5.0));
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_approx_eq!(f32, a.distance(b), 5.0);
    }

    #[test]
    fn test_point_lerp_endpoints_are_exact() {
        let a = Point::new(0.1, 0.7);
        let b = Point::new(13.3, -2.9);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_point_lerp_extrapolates() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let p = a.lerp(b, 1.5);
        assert_approx_eq!(f32, p.x(), 15.0);
        assert_approx_eq!(f32, p.y(), 0.0);
    }

    #[test]
    fn test_point_perpendicular() {
        let v = Point::new(1.0, 0.0);
        assert_eq!(v.perpendicular(), Point::new(-0.0, 1.0));
    }

    #[test]
    fn test_quadratic_bezier() {
        let start = Point::new(0.0, 0.0);
        let control = Point::new(50.0, 100.0);
        let end = Point::new(100.0, 0.0);

        assert_eq!(quadratic_bezier(start, control, end, 0.0), start);
        assert_eq!(quadratic_bezier(start, control, end, 1.0), end);

        let mid = quadratic_bezier(start, control, end, 0.5);
        assert_approx_eq!(f32, mid.x(), 50.0);
        assert_approx_eq!(f32, mid.y(), 50.0);
    }

    #[test]
    fn test_cubic_bezier() {
        let start = Point::new(0.0, 0.0);
        let c1 = Point::new(0.0, 100.0);
        let c2 = Point::new(100.0, 100.0);
        let end = Point::new(100.0, 0.0);

        assert_eq!(cubic_bezier(start, c1, c2, end, 0.0), start);
        assert_eq!(cubic_bezier(start, c1, c2, end, 1.0), end);

        let mid = cubic_bezier(start, c1, c2, end, 0.5);
        assert_approx_eq!(f32, mid.x(), 50.0);
        assert_approx_eq!(f32, mid.y(), 75.0);
    }

    #[test]
    fn test_bounds_new_from_center() {
        let center = Point::new(50.0, 60.0);
        let bounds = Bounds::new_from_center(center, Size::new(20.0, 30.0));

        assert_eq!(bounds.min_x(), 40.0);
        assert_eq!(bounds.min_y(), 45.0);
        assert_eq!(bounds.max_x(), 60.0);
        assert_eq!(bounds.max_y(), 75.0);
        assert_eq!(bounds.center(), center);
    }

    #[test]
    fn test_bounds_new_from_top_left() {
        let top_left = Point::new(10.0, 20.0);
        let bounds = Bounds::new_from_top_left(top_left, Size::new(30.0, 40.0));

        assert_eq!(bounds.max_x(), 40.0);
        assert_eq!(bounds.max_y(), 60.0);
        assert_eq!(bounds.width(), 30.0);
        assert_eq!(bounds.height(), 40.0);
        assert_eq!(bounds.min_point(), top_left);
    }

    #[test]
    fn test_bounds_enclosing() {
        let bounds = Bounds::enclosing([
            Point::new(5.0, 1.0),
            Point::new(-2.0, 8.0),
            Point::new(3.0, -4.0),
        ])
        .unwrap();

        assert_eq!(bounds.min_x(), -2.0);
        assert_eq!(bounds.min_y(), -4.0);
        assert_eq!(bounds.max_x(), 5.0);
        assert_eq!(bounds.max_y(), 8.0);

        assert!(Bounds::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn test_bounds_relative_point_corners() {
        let frame = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(100.0, 50.0));

        assert_eq!(frame.relative_point(0.0, 0.0), Point::new(10.0, 10.0));
        assert_eq!(frame.relative_point(1.0, 1.0), Point::new(110.0, 60.0));
        assert_eq!(frame.relative_point(0.5, 0.5), frame.center());
    }

    #[test]
    fn test_bounds_relative_point_not_clamped() {
        let frame = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let outside = frame.relative_point(-0.5, 2.0);

        assert_eq!(outside, Point::new(-5.0, 20.0));
        assert!(!frame.contains(outside));
    }

    #[test]
    fn test_bounds_merge_and_translate() {
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
        let b = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));

        let merged = a.merge(&b);
        assert_eq!(merged.width(), 130.0);
        assert_eq!(merged.height(), 120.0);

        let moved = a.translate(Point::new(5.0, 5.0));
        assert_eq!(moved.min_point(), Point::new(5.0, 5.0));
        assert_eq!(moved.to_size(), a.to_size());
    }

    #[test]
    fn test_bounds_inset() {
        let frame = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(20.0, 10.0));

        let inset = frame.inset(1.0);
        assert_eq!(inset.min_point(), Point::new(1.0, 1.0));
        assert_eq!(inset.to_size(), Size::new(18.0, 8.0));

        let collapsed = frame.inset(8.0);
        assert_approx_eq!(f32, collapsed.height(), 0.0);
        assert_approx_eq!(f32, collapsed.width(), 4.0);
    }

    proptest! {
        #[test]
        fn prop_relative_point_inside_frame(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            w in 0.0f32..300.0,
            h in 0.0f32..300.0,
            rx in 0.0f32..=1.0,
            ry in 0.0f32..=1.0,
        ) {
            let frame = Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h));
            let p = frame.relative_point(rx, ry);
            // Allow for rounding at the far edge.
            let tolerance = 1e-3;
            prop_assert!(p.x() >= frame.min_x() - tolerance && p.x() <= frame.max_x() + tolerance);
            prop_assert!(p.y() >= frame.min_y() - tolerance && p.y() <= frame.max_y() + tolerance);
        }

        #[test]
        fn prop_relative_origin_is_exact_top_left(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            w in 0.0f32..300.0,
            h in 0.0f32..300.0,
        ) {
            let frame = Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h));
            prop_assert_eq!(frame.relative_point(0.0, 0.0), frame.min_point());
        }
    }
}
