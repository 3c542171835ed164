//! Positional specifiers and their resolution to absolute pixels.
//!
//! Every point handed to an `add_*` call is a [`Position`]. It is resolved
//! once, at creation time, against the frame of the surface the call was made
//! on: a cell's rectangle or the whole canvas.
//!
//! | Form | Resolves to |
//! |------|-------------|
//! | [`Position::Absolute`] | the point itself |
//! | [`Position::Relative`] | `frame.min + (rx * width, ry * height)`, never clamped |
//! | [`Position::Anchor`] | the anchor's fixed relative pair, as above |
//! | [`Position::Along`] | the referenced entity's parametric form at `t` |

use log::trace;

use tessera_core::{
    anchor::Anchor,
    error::SceneError,
    geometry::{Bounds, Point},
};

use crate::{identifier::EntityId, scene::Scene};

/// A symbolic or absolute position.
///
/// # Examples
///
/// ```
/// # use tessera::{Position, anchor::Anchor, geometry::Point};
/// let a: Position = Anchor::TopLeft.into();
/// let b: Position = Point::new(3.0, 4.0).into();
/// let c = Position::relative(0.25, 0.75);
/// # let _ = (a, b, c);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// An absolute pixel position in scene space.
    Absolute(Point),
    /// A position relative to the frame, `(0, 0)` top-left and `(1, 1)` bottom-right.
    Relative(f32, f32),
    /// A named anchor of the frame.
    Anchor(Anchor),
    /// The point at parameter `t` along a line, curve or polygon entity.
    Along { entity: EntityId, t: f32 },
}

impl Position {
    /// Shorthand for [`Position::Absolute`].
    pub fn absolute(x: f32, y: f32) -> Self {
        Self::Absolute(Point::new(x, y))
    }

    /// Shorthand for [`Position::Relative`].
    pub fn relative(rx: f32, ry: f32) -> Self {
        Self::Relative(rx, ry)
    }

    /// Shorthand for [`Position::Along`].
    pub fn along(entity: EntityId, t: f32) -> Self {
        Self::Along { entity, t }
    }

    /// Resolves this position to an absolute point.
    ///
    /// `frame` is the rectangle relative and anchored forms are measured in;
    /// `scene` supplies the entities referenced by along-path positions.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidReference`] when an along-path position
    /// names an entity that does not exist or has no parametric form, or
    /// when `t` is not a finite number.
    pub fn resolve(&self, frame: Bounds, scene: &Scene) -> Result<Point, SceneError> {
        let point = match *self {
            Self::Absolute(point) => point,
            Self::Relative(rx, ry) => frame.relative_point(rx, ry),
            Self::Anchor(anchor) => anchor.resolve(frame),
            Self::Along { entity, t } => {
                if !t.is_finite() {
                    return Err(SceneError::invalid_reference(format!(
                        "path parameter for {entity} must be finite, got {t}"
                    )));
                }
                let target = scene.entity(entity)?;
                target.point_at(t).ok_or_else(|| {
                    SceneError::invalid_reference(format!(
                        "{entity} is a {}, which has no parametric path",
                        target.kind().name()
                    ))
                })?
            }
        };

        trace!(position:? = self, x = point.x(), y = point.y(); "Resolved position");
        Ok(point)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::Anchor(Anchor::Center)
    }
}

impl From<Anchor> for Position {
    fn from(anchor: Anchor) -> Self {
        Self::Anchor(anchor)
    }
}

impl From<Point> for Position {
    fn from(point: Point) -> Self {
        Self::Absolute(point)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        entity::{DotStyle, LineStyle},
        surface::Surface,
    };
    use tessera_core::geometry::Size;

    fn frame() -> Bounds {
        Bounds::new_from_top_left(Point::new(20.0, 40.0), Size::new(20.0, 20.0))
    }

    #[test]
    fn test_absolute_is_unchanged() {
        let scene = Scene::new(100, 100).unwrap();
        let p = Position::absolute(7.5, -3.0).resolve(frame(), &scene).unwrap();
        assert_eq!(p, Point::new(7.5, -3.0));
    }

    #[test]
    fn test_relative_uses_frame() {
        let scene = Scene::new(100, 100).unwrap();
        let p = Position::relative(0.0, 0.0).resolve(frame(), &scene).unwrap();
        assert_eq!(p, Point::new(20.0, 40.0));

        let p = Position::relative(0.25, 1.0).resolve(frame(), &scene).unwrap();
        assert_approx_eq!(f32, p.x(), 25.0);
        assert_approx_eq!(f32, p.y(), 60.0);
    }

    #[test]
    fn test_relative_outside_unit_range_is_not_clamped() {
        let scene = Scene::new(100, 100).unwrap();
        let p = Position::relative(2.0, -1.0).resolve(frame(), &scene).unwrap();
        assert_eq!(p, Point::new(60.0, 20.0));
    }

    #[test]
    fn test_anchor_matches_relative_pair() {
        let scene = Scene::new(100, 100).unwrap();
        for anchor in Anchor::ALL {
            let (rx, ry) = anchor.relative();
            let by_anchor = Position::from(anchor).resolve(frame(), &scene).unwrap();
            let by_relative = Position::relative(rx, ry).resolve(frame(), &scene).unwrap();
            assert_eq!(by_anchor, by_relative, "anchor {anchor}");
        }
    }

    #[test]
    fn test_along_line_endpoints_and_midpoint() {
        let mut scene = Scene::new(100, 100).unwrap();
        let line = scene
            .add_line(
                Position::absolute(10.0, 10.0),
                Position::absolute(30.0, 50.0),
                &LineStyle::default(),
            )
            .unwrap();

        let start = Position::along(line, 0.0).resolve(frame(), &scene).unwrap();
        let end = Position::along(line, 1.0).resolve(frame(), &scene).unwrap();
        let mid = Position::along(line, 0.5).resolve(frame(), &scene).unwrap();

        assert_eq!(start, Point::new(10.0, 10.0));
        assert_eq!(end, Point::new(30.0, 50.0));
        assert_approx_eq!(f32, mid.x(), 20.0);
        assert_approx_eq!(f32, mid.y(), 30.0);
    }

    #[test]
    fn test_along_dot_is_invalid_reference() {
        let mut scene = Scene::new(100, 100).unwrap();
        let dot = scene.add_dot(Anchor::Center, &DotStyle::default()).unwrap();

        let err = Position::along(dot, 0.5)
            .resolve(frame(), &scene)
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidReference(_)));
    }

    #[test]
    fn test_along_non_finite_parameter_is_rejected() {
        let mut scene = Scene::new(100, 100).unwrap();
        let line = scene
            .add_line(Anchor::Left, Anchor::Right, &LineStyle::default())
            .unwrap();

        let err = Position::along(line, f32::NAN)
            .resolve(frame(), &scene)
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidReference(_)));
    }

    #[test]
    fn test_along_unknown_entity_is_invalid_reference() {
        let scene = Scene::new(100, 100).unwrap();
        let err = Position::along(EntityId::new(9), 0.5)
            .resolve(frame(), &scene)
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidReference(_)));
    }
}
