//! The entity-creation surface shared by scenes and cells.
//!
//! [`Surface`] supplies every `add_*` operation as a provided method on top of
//! three accessors: the frame positions resolve against, and the owning
//! scene. [`Scene`] implements it with the whole canvas as its frame;
//! [`CellSurface`] implements it with one grid cell's rectangle. Either way
//! the entity is registered with the scene and its handle returned.
//!
//! Each `add_*` call resolves its positions against [`Surface::frame`],
//! fills unset style fields from the scene's [`Defaults`](crate::config::Defaults)
//! and takes the z-index from the style object (0 when unset). Radii, stroke
//! widths and font sizes must be positive, or the call fails with
//! [`SceneError::InvalidDimension`] and nothing is added.

use tessera_core::{
    error::SceneError,
    geometry::{Bounds, Point},
};

use crate::{
    entity::{
        Border, BorderStyle, Curve, CurveControl, CurveStyle, Dot, DotStyle, Entity, Fill,
        FillStyle, Line, LineStyle, Polygon, PolygonStyle, Text, TextStyle,
    },
    grid::Cell,
    identifier::EntityId,
    position::Position,
    scene::Scene,
};

/// Something entities can be drawn on.
pub trait Surface {
    /// The rectangle positions are resolved against.
    fn frame(&self) -> Bounds;

    fn scene(&self) -> &Scene;

    fn scene_mut(&mut self) -> &mut Scene;

    /// Resolves `position` against this surface's frame.
    fn resolve(&self, position: impl Into<Position>) -> Result<Point, SceneError> {
        position.into().resolve(self.frame(), self.scene())
    }

    /// Registers a pre-built entity with the owning scene.
    fn add(&mut self, entity: Entity) -> EntityId {
        self.scene_mut().push_entity(entity)
    }

    /// Adds a dot centered at `at`.
    fn add_dot(&mut self, at: impl Into<Position>, style: &DotStyle) -> Result<EntityId, SceneError> {
        let center = self.resolve(at)?;
        let dot = Dot::from_style(center, style, self.scene().defaults())?;
        Ok(self.add(Entity::new(dot).with_z_index(style.z_index.unwrap_or(0))))
    }

    /// Adds a straight line from `start` to `end`.
    fn add_line(
        &mut self,
        start: impl Into<Position>,
        end: impl Into<Position>,
        style: &LineStyle,
    ) -> Result<EntityId, SceneError> {
        let start = self.resolve(start)?;
        let end = self.resolve(end)?;
        let line = Line::new(start, end, style.to_stroke(self.scene().defaults())?);
        Ok(self.add(Entity::new(line).with_z_index(style.z_index.unwrap_or(0))))
    }

    /// Adds a Bezier curve from `start` to `end` bent by `control`.
    fn add_curve(
        &mut self,
        start: impl Into<Position>,
        end: impl Into<Position>,
        control: CurveControl,
        style: &CurveStyle,
    ) -> Result<EntityId, SceneError> {
        let start = self.resolve(start)?;
        let end = self.resolve(end)?;
        let shape = control.resolve(start, end, self.frame(), self.scene())?;
        let curve = Curve::new(start, end, shape, style.to_stroke(self.scene().defaults())?);
        Ok(self.add(Entity::new(curve).with_z_index(style.z_index.unwrap_or(0))))
    }

    /// Adds a closed polygon through `vertices`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidDimension`] for fewer than three vertices.
    fn add_polygon<I, P>(&mut self, vertices: I, style: &PolygonStyle) -> Result<EntityId, SceneError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        let vertices = vertices
            .into_iter()
            .map(|vertex| self.resolve(vertex))
            .collect::<Result<Vec<_>, _>>()?;
        let polygon = Polygon::from_style(vertices, style, self.scene().defaults())?;
        Ok(self.add(Entity::new(polygon).with_z_index(style.z_index.unwrap_or(0))))
    }

    /// Adds a text label anchored at `at`.
    fn add_text(
        &mut self,
        content: impl Into<String>,
        at: impl Into<Position>,
        style: &TextStyle,
    ) -> Result<EntityId, SceneError> {
        let position = self.resolve(at)?;
        let text = Text::from_style(content, position, style, self.scene().defaults())?;
        Ok(self.add(Entity::new(text).with_z_index(style.z_index.unwrap_or(0))))
    }

    /// Outlines this surface's frame.
    fn add_border(&mut self, style: &BorderStyle) -> Result<EntityId, SceneError> {
        let border = Border::from_style(self.frame(), style, self.scene().defaults())?;
        Ok(self.add(Entity::new(border).with_z_index(style.z_index.unwrap_or(0))))
    }

    /// Fills this surface's frame.
    fn add_fill(&mut self, style: &FillStyle) -> EntityId {
        let fill = Fill::from_style(self.frame(), style, self.scene().defaults());
        self.add(Entity::new(fill).with_z_index(style.z_index.unwrap_or(0)))
    }
}

/// A grid cell borrowed together with its scene, ready to draw into.
///
/// Obtained from [`Scene::in_cell`] or [`Scene::cell_surface`].
#[derive(Debug)]
pub struct CellSurface<'a> {
    scene: &'a mut Scene,
    cell: Cell,
}

impl<'a> CellSurface<'a> {
    pub(crate) fn new(scene: &'a mut Scene, cell: Cell) -> Self {
        Self { scene, cell }
    }

    pub fn cell(&self) -> &Cell {
        &self.cell
    }
}

impl Surface for CellSurface<'_> {
    fn frame(&self) -> Bounds {
        self.cell.frame()
    }

    fn scene(&self) -> &Scene {
        &*self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene {
        &mut *self.scene
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::entity::EntityKind;
    use tessera_core::{anchor::Anchor, color::Color};

    #[test]
    fn test_cell_surface_resolves_in_cell_frame() {
        let mut scene = Scene::with_grid(4, 2, 10).unwrap();
        let id = scene
            .cell_surface(1, 2)
            .unwrap()
            .add_dot(Anchor::Center, &DotStyle::new())
            .unwrap();

        let EntityKind::Dot(dot) = scene.entity(id).unwrap().kind() else {
            panic!("expected a dot");
        };
        assert_eq!(dot.center(), Point::new(25.0, 15.0));
    }

    #[test]
    fn test_cell_entities_belong_to_scene() {
        let mut scene = Scene::with_grid(3, 3, 10).unwrap();
        let grid = scene.grid().cloned().unwrap();
        for cell in grid.border(1) {
            scene.in_cell(&cell).unwrap().add_fill(&FillStyle::new());
        }
        assert_eq!(scene.entities().len(), 8);
    }

    #[test]
    fn test_style_z_index_is_applied() {
        let mut scene = Scene::new(50, 50).unwrap();
        let id = scene
            .add_line(Anchor::TopLeft, Anchor::BottomRight, &LineStyle::new().z_index(4))
            .unwrap();
        assert_eq!(scene.entity(id).unwrap().z_index(), 4);
    }

    #[test]
    fn test_direct_overrides_beat_style_object() {
        let mut scene = Scene::new(50, 50).unwrap();
        let shared = DotStyle::new().radius(9.0).color(Color::new("red").unwrap());
        let id = scene
            .add_dot(Anchor::Center, &DotStyle::new().radius(1.0).merged_over(&shared))
            .unwrap();

        let EntityKind::Dot(dot) = scene.entity(id).unwrap().kind() else {
            panic!("expected a dot");
        };
        assert_approx_eq!(f32, dot.radius(), 1.0);
        assert_eq!(dot.color(), Color::new("red").unwrap());
    }

    #[test]
    fn test_polygon_vertices_resolve_relative() {
        let mut scene = Scene::new(100, 50).unwrap();
        let id = scene
            .add_polygon(
                [
                    Position::relative(0.0, 0.0),
                    Position::relative(1.0, 0.0),
                    Position::relative(0.5, 1.0),
                ],
                &PolygonStyle::new(),
            )
            .unwrap();

        let EntityKind::Polygon(polygon) = scene.entity(id).unwrap().kind() else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.vertices()[2], Point::new(50.0, 50.0));
    }

    #[test]
    fn test_degenerate_polygon_is_rejected() {
        let mut scene = Scene::new(10, 10).unwrap();
        let err = scene
            .add_polygon([Anchor::TopLeft, Anchor::Center], &PolygonStyle::new())
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidDimension(_)));
        assert!(scene.entities().is_empty());
    }

    #[test]
    fn test_non_positive_sizes_are_rejected() {
        let mut scene = Scene::new(50, 50).unwrap();

        let err = scene
            .add_dot(Anchor::Center, &DotStyle::new().radius(-4.0))
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidDimension(_)));
        assert!(
            scene
                .add_line(Anchor::Left, Anchor::Right, &LineStyle::new().width(0.0))
                .is_err()
        );
        assert!(
            scene
                .add_text("label", Anchor::Center, &TextStyle::new().font_size(f32::NAN))
                .is_err()
        );
        assert!(scene.add_border(&BorderStyle::new().width(-1.0)).is_err());
        assert!(scene.entities().is_empty());
    }

    #[test]
    fn test_border_uses_cell_frame() {
        let mut scene = Scene::with_grid(2, 2, 20).unwrap();
        let id = scene
            .cell_surface(0, 1)
            .unwrap()
            .add_border(&BorderStyle::new().width(2.0))
            .unwrap();

        assert_eq!(scene.entity(id).unwrap().bounds().min_point(), Point::new(20.0, 0.0));
    }
}
