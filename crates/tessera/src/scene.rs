//! The scene container.
//!
//! A [`Scene`] owns everything that ends up in the document: its grids, its
//! entities, its connections and an optional background. Entities and
//! connections share one insertion-ordered list; rendering stable-sorts that
//! list by z-index, so items on the same z-index keep the order they were
//! added in.

use std::path::Path;

use log::{info, trace};

use tessera_core::{
    color::Color,
    error::SceneError,
    geometry::{Bounds, Point, Size},
};

use crate::{
    TesseraError,
    config::Defaults,
    connection::Connection,
    entity::Entity,
    export::svg as svg_export,
    grid::{Cell, Grid},
    identifier::{ConnectionId, EntityId, GridId},
    image::ImageSource,
    surface::{CellSurface, Surface},
};

/// One renderable item, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SceneItem {
    Entity(EntityId),
    Connection(ConnectionId),
}

/// A fixed-size canvas holding grids, entities and connections.
///
/// # Examples
///
/// ```
/// # use tessera::{Scene, Surface, anchor::Anchor, color::Color, entity::{DotStyle, FillStyle}};
/// let mut scene = Scene::with_grid(4, 4, 25)
///     .unwrap()
///     .with_background(Color::new("white").unwrap());
///
/// let grid = scene.grid().cloned().unwrap();
/// for cell in grid.filter(|cell| (cell.row() + cell.col()) % 2 == 0) {
///     scene.in_cell(&cell).unwrap().add_fill(&FillStyle::new());
/// }
/// scene.add_dot(Anchor::Center, &DotStyle::new().radius(10.0)).unwrap();
///
/// let svg = scene.render_svg().unwrap();
/// assert!(svg.contains("<circle"));
/// ```
#[derive(Debug, Clone)]
pub struct Scene {
    width: u32,
    height: u32,
    background: Option<Color>,
    defaults: Defaults,
    grids: Vec<Grid>,
    primary_grid: Option<GridId>,
    entities: Vec<Entity>,
    connections: Vec<Connection>,
    items: Vec<SceneItem>,
}

impl Scene {
    /// Creates an empty scene with no grid.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::invalid_dimension(format!(
                "scene dimensions must be positive, got {width}x{height}"
            )));
        }
        info!(width, height; "Creating scene");
        Ok(Self {
            width,
            height,
            background: None,
            defaults: Defaults::default(),
            grids: Vec::new(),
            primary_grid: None,
            entities: Vec::new(),
            connections: Vec::new(),
            items: Vec::new(),
        })
    }

    /// Creates a scene sized `cols * cell_size` by `rows * cell_size` with an
    /// empty primary grid covering it.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidDimension`] for a zero dimension or a
    /// canvas too large to represent.
    pub fn with_grid(cols: usize, rows: usize, cell_size: u32) -> Result<Self, SceneError> {
        let width = canvas_extent(cols, cell_size)?;
        let height = canvas_extent(rows, cell_size)?;

        let mut scene = Self::new(width, height)?;
        let id = scene.add_grid(cols, rows, cell_size, Point::default())?;
        scene.primary_grid = Some(id);
        Ok(scene)
    }

    /// Creates a scene sized to `source`, with a primary grid of
    /// `grid_size`-pixel cells whose attributes are sampled from the image.
    ///
    /// Columns and rows are the image dimensions divided by `grid_size`,
    /// rounded down; a partial strip at the right or bottom edge is left
    /// without cells.
    ///
    /// There is no separate cell size: `grid_size` is both the sampling
    /// region and the cell edge, so each cell covers its pixels exactly.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidDimension`] if `grid_size` is zero or
    /// larger than either image dimension.
    pub fn from_image(source: &impl ImageSource, grid_size: u32) -> Result<Self, SceneError> {
        if grid_size == 0 {
            return Err(SceneError::invalid_dimension("grid size must be positive"));
        }
        let (width, height) = (source.width(), source.height());
        let cols = (width / grid_size) as usize;
        let rows = (height / grid_size) as usize;
        if cols == 0 || rows == 0 {
            return Err(SceneError::invalid_dimension(format!(
                "a {width}x{height} image holds no {grid_size}px cells"
            )));
        }

        let mut scene = Self::new(width, height)?;
        let grid = Grid::new(
            GridId::new(0),
            cols,
            rows,
            grid_size,
            Point::default(),
        )?;
        let attributes = grid.iter().map(|cell| source.sample(cell.frame())).collect();
        let grid = grid.with_attributes(attributes)?;

        info!(cols, rows, grid_size; "Sampled image into grid");
        scene.grids.push(grid);
        scene.primary_grid = Some(GridId::new(0));
        Ok(scene)
    }

    /// Sets the background color (builder style).
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Replaces the fallback style values (builder style).
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Sets or clears the background; `None` leaves the canvas transparent.
    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// The rectangle covering the whole canvas.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(
            Point::default(),
            Size::new(self.width as f32, self.height as f32),
        )
    }

    /// Adds a further grid at `origin`. Grids may overlap and may extend past
    /// the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidDimension`] if any dimension is zero.
    pub fn add_grid(
        &mut self,
        cols: usize,
        rows: usize,
        cell_size: u32,
        origin: Point,
    ) -> Result<GridId, SceneError> {
        let id = GridId::new(self.grids.len());
        let grid = Grid::new(id, cols, rows, cell_size, origin)?;
        trace!(grid:% = id, cols, rows, cell_size; "Added grid");
        self.grids.push(grid);
        Ok(id)
    }

    /// The primary grid, created by [`Scene::with_grid`] or [`Scene::from_image`].
    pub fn grid(&self) -> Option<&Grid> {
        self.primary_grid.and_then(|id| self.grids.get(id.index()))
    }

    /// All grids, in creation order.
    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    /// Looks up a grid by handle.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidReference`] if the grid does not belong to this scene.
    pub fn grid_by_id(&self, id: GridId) -> Result<&Grid, SceneError> {
        self.grids
            .get(id.index())
            .ok_or_else(|| SceneError::invalid_reference(format!("{id} does not exist")))
    }

    /// Borrows the scene as a surface framed by `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidReference`] if the cell's grid does not
    /// belong to this scene, and [`SceneError::IndexOutOfRange`] if the cell
    /// lies outside that grid.
    pub fn in_cell(&mut self, cell: &Cell) -> Result<CellSurface<'_>, SceneError> {
        let cell = self.grid_by_id(cell.grid())?.cell(cell.row(), cell.col())?;
        Ok(CellSurface::new(self, cell))
    }

    /// Borrows the scene as a surface framed by cell `(row, col)` of the
    /// primary grid.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::IndexOutOfRange`] if there is no primary grid or
    /// the indices are outside it.
    pub fn cell_surface(&mut self, row: usize, col: usize) -> Result<CellSurface<'_>, SceneError> {
        let cell = match self.grid() {
            Some(grid) => grid.cell(row, col)?,
            None => {
                return Err(SceneError::IndexOutOfRange {
                    row,
                    col,
                    rows: 0,
                    cols: 0,
                });
            }
        };
        Ok(CellSurface::new(self, cell))
    }

    pub(crate) fn push_entity(&mut self, entity: Entity) -> EntityId {
        let id = EntityId::new(self.entities.len());
        trace!(entity:% = id, kind = entity.kind().name(), z_index = entity.z_index(); "Added entity");
        self.entities.push(entity);
        self.items.push(SceneItem::Entity(id));
        id
    }

    /// Looks up an entity by handle.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidReference`] if the entity does not belong to this scene.
    pub fn entity(&self, id: EntityId) -> Result<&Entity, SceneError> {
        self.entities
            .get(id.index())
            .ok_or_else(|| SceneError::invalid_reference(format!("{id} does not exist")))
    }

    /// Mutable access to an entity, for style, z-index or position changes.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidReference`] if the entity does not belong to this scene.
    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, SceneError> {
        self.entities
            .get_mut(id.index())
            .ok_or_else(|| SceneError::invalid_reference(format!("{id} does not exist")))
    }

    /// All entities, in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Registers a connection. Both endpoints must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidReference`] if either endpoint is unknown,
    /// or [`SceneError::InvalidDimension`] if the stroke width is not positive.
    pub fn add_connection(&mut self, connection: Connection) -> Result<ConnectionId, SceneError> {
        self.entity(connection.source())?;
        self.entity(connection.target())?;
        connection.style().to_stroke(&self.defaults)?;

        let id = ConnectionId::new(self.connections.len());
        trace!(
            connection:% = id,
            source:% = connection.source(),
            target:% = connection.target();
            "Added connection"
        );
        self.connections.push(connection);
        self.items.push(SceneItem::Connection(id));
        Ok(id)
    }

    /// Looks up a connection by handle.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidReference`] if the connection does not belong to this scene.
    pub fn connection(&self, id: ConnectionId) -> Result<&Connection, SceneError> {
        self.connections
            .get(id.index())
            .ok_or_else(|| SceneError::invalid_reference(format!("{id} does not exist")))
    }

    /// Mutable access to a connection, for style or z-index changes.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidReference`] if the connection does not belong to this scene.
    pub fn connection_mut(&mut self, id: ConnectionId) -> Result<&mut Connection, SceneError> {
        self.connections
            .get_mut(id.index())
            .ok_or_else(|| SceneError::invalid_reference(format!("{id} does not exist")))
    }

    /// All connections, in insertion order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub(crate) fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Renders the scene to a complete SVG document.
    ///
    /// Rendering does not modify the scene; rendering twice without changes
    /// in between produces identical text.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidReference`] if a connection can no longer
    /// be resolved. No partial document is produced.
    pub fn render_svg(&self) -> Result<String, SceneError> {
        svg_export::render_document(self).map(|document| document.to_string())
    }

    /// Renders the scene and writes the document to `path`.
    ///
    /// The document is rendered in full before the file is created.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Scene`] if rendering fails and
    /// [`TesseraError::Io`] if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TesseraError> {
        let document = self.render_svg()?;
        svg_export::write_document(path.as_ref(), &document)
    }
}

impl Surface for Scene {
    fn frame(&self) -> Bounds {
        self.bounds()
    }

    fn scene(&self) -> &Scene {
        self
    }

    fn scene_mut(&mut self) -> &mut Scene {
        self
    }
}

fn canvas_extent(count: usize, cell_size: u32) -> Result<u32, SceneError> {
    u32::try_from(count)
        .ok()
        .and_then(|count| count.checked_mul(cell_size))
        .ok_or_else(|| {
            SceneError::invalid_dimension(format!(
                "{count} cells of {cell_size}px exceed the maximum canvas size"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        connection::ConnectionStyle,
        entity::{DotStyle, LineStyle},
        image::RgbBuffer,
    };
    use tessera_core::anchor::Anchor;

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(matches!(
            Scene::new(0, 10).unwrap_err(),
            SceneError::InvalidDimension(_)
        ));
    }

    #[test]
    fn test_with_grid_sizes_canvas() {
        let scene = Scene::with_grid(10, 5, 20).unwrap();
        assert_eq!(scene.width(), 200);
        assert_eq!(scene.height(), 100);

        let grid = scene.grid().unwrap();
        assert_eq!((grid.cols(), grid.rows()), (10, 5));
        assert!(grid.iter().all(|cell| cell.attributes().is_none()));
    }

    #[test]
    fn test_with_grid_rejects_zero() {
        assert!(Scene::with_grid(0, 5, 20).is_err());
        assert!(Scene::with_grid(5, 5, 0).is_err());
    }

    #[test]
    fn test_from_image_samples_cells() {
        let image = RgbBuffer::from_fn(300, 150, |x, _| if x < 150 { [0, 0, 0] } else { [255, 255, 255] })
            .unwrap();
        let scene = Scene::from_image(&image, 30).unwrap();

        assert_eq!((scene.width(), scene.height()), (300, 150));
        let grid = scene.grid().unwrap();
        assert_eq!((grid.cols(), grid.rows()), (10, 5));
        assert_eq!(grid.cell(0, 0).unwrap().brightness(), Some(0.0));
        assert!(grid.cell(4, 9).unwrap().brightness().unwrap() > 0.99);
    }

    #[test]
    fn test_from_image_rejects_oversized_cells() {
        let image = RgbBuffer::new(10, 10, vec![[0, 0, 0]; 100]).unwrap();
        assert!(matches!(
            Scene::from_image(&image, 11).unwrap_err(),
            SceneError::InvalidDimension(_)
        ));
        assert!(Scene::from_image(&image, 0).is_err());
    }

    #[test]
    fn test_additional_grids() {
        let mut scene = Scene::new(100, 100).unwrap();
        assert!(scene.grid().is_none());

        let id = scene.add_grid(2, 2, 10, Point::new(50.0, 50.0)).unwrap();
        assert!(scene.grid().is_none());
        let cell = scene.grid_by_id(id).unwrap().cell(1, 1).unwrap();
        assert_eq!(cell.frame().min_point(), Point::new(60.0, 60.0));

        scene.in_cell(&cell).unwrap().add_dot(Anchor::Center, &DotStyle::new()).unwrap();
        assert_eq!(scene.entities().len(), 1);
    }

    #[test]
    fn test_cell_surface_without_grid() {
        let mut scene = Scene::new(10, 10).unwrap();
        assert!(matches!(
            scene.cell_surface(0, 0).unwrap_err(),
            SceneError::IndexOutOfRange { .. }
        ));
    }

    #[test]
    fn test_in_cell_rejects_foreign_grid() {
        let other = Scene::with_grid(1, 1, 10).unwrap();
        let cell = other.grid().unwrap().cell(0, 0).unwrap();

        let mut scene = Scene::new(10, 10).unwrap();
        assert!(matches!(
            scene.in_cell(&cell).unwrap_err(),
            SceneError::InvalidReference(_)
        ));
    }

    #[test]
    fn test_add_connection_validates_endpoints() {
        let mut scene = Scene::new(10, 10).unwrap();
        let a = scene.add_dot(Anchor::Left, &DotStyle::new()).unwrap();
        let dangling = a.connect(EntityId::new(5), Anchor::Center, Anchor::Center, &ConnectionStyle::new());

        assert!(scene.add_connection(dangling).is_err());
        assert!(scene.connections().is_empty());
    }

    #[test]
    fn test_add_connection_rejects_bad_width() {
        let mut scene = Scene::new(10, 10).unwrap();
        let a = scene.add_dot(Anchor::Left, &DotStyle::new()).unwrap();
        let b = scene.add_dot(Anchor::Right, &DotStyle::new()).unwrap();
        let link = a.connect(b, Anchor::Center, Anchor::Center, &ConnectionStyle::new().width(-1.0));

        assert!(matches!(
            scene.add_connection(link).unwrap_err(),
            SceneError::InvalidDimension(_)
        ));
        assert!(scene.connections().is_empty());
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut scene = Scene::new(10, 10).unwrap();
        let a = scene.add_dot(Anchor::Left, &DotStyle::new()).unwrap();
        let b = scene.add_dot(Anchor::Right, &DotStyle::new()).unwrap();
        let c = scene
            .add_connection(a.connect(b, Anchor::Center, Anchor::Center, &ConnectionStyle::new()))
            .unwrap();
        let d = scene.add_line(Anchor::Top, Anchor::Bottom, &LineStyle::new()).unwrap();

        assert_eq!(
            scene.items(),
            &[
                SceneItem::Entity(a),
                SceneItem::Entity(b),
                SceneItem::Connection(c),
                SceneItem::Entity(d),
            ]
        );
    }

    #[test]
    fn test_save_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.svg");

        let scene = Scene::new(20, 20).unwrap();
        scene.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), scene.render_svg().unwrap());
    }
}
