//! Grids of equally sized cells.
//!
//! A [`Grid`] is a fixed `cols × rows` arrangement of square cells sharing a
//! size and an origin in scene space. Cells are plain values computed on
//! demand from the grid geometry, so iteration is lazy, restartable and
//! always row-major.
//!
//! ```text
//! origin
//!   ┌──────┬──────┬──────┐
//!   │ 0,0  │ 0,1  │ 0,2  │   cell (row, col) frame:
//!   ├──────┼──────┼──────┤   origin + (col * size, row * size)
//!   │ 1,0  │ 1,1  │ 1,2  │
//!   └──────┴──────┴──────┘
//! ```

use std::{iter::FusedIterator, rc::Rc};

use tessera_core::{
    color::Color,
    error::SceneError,
    geometry::{Bounds, Point, Size},
};

use crate::{identifier::GridId, image::clamp_brightness};

/// Precomputed per-cell data sampled from an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellAttributes {
    color: Color,
    brightness: f32,
}

impl CellAttributes {
    /// Creates attributes; `brightness` is clamped to `[0, 1]` with a
    /// warning, and NaN becomes `0`.
    pub fn new(color: Color, brightness: f32) -> Self {
        Self {
            color,
            brightness: clamp_brightness(brightness),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Perceived brightness in `[0, 1]`.
    pub fn brightness(&self) -> f32 {
        self.brightness
    }
}

/// One rectangular region of a grid.
///
/// A cell holds no entities. Drawing "in" a cell goes through
/// [`Scene::in_cell`](crate::Scene::in_cell), which registers entities with
/// the scene and resolves positions against the cell frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    grid: GridId,
    row: usize,
    col: usize,
    frame: Bounds,
    attributes: Option<CellAttributes>,
}

impl Cell {
    /// The grid this cell belongs to.
    pub fn grid(&self) -> GridId {
        self.grid
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// The cell's rectangle in scene pixels.
    pub fn frame(&self) -> Bounds {
        self.frame
    }

    pub fn attributes(&self) -> Option<&CellAttributes> {
        self.attributes.as_ref()
    }

    /// Sampled color, if the grid was derived from an image.
    pub fn color(&self) -> Option<Color> {
        self.attributes.map(|attributes| attributes.color())
    }

    /// Sampled brightness, if the grid was derived from an image.
    pub fn brightness(&self) -> Option<f32> {
        self.attributes.map(|attributes| attributes.brightness())
    }
}

/// A fixed arrangement of square cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    id: GridId,
    cols: usize,
    rows: usize,
    cell_size: u32,
    origin: Point,
    attributes: Option<Rc<[CellAttributes]>>,
}

impl Grid {
    pub(crate) fn new(
        id: GridId,
        cols: usize,
        rows: usize,
        cell_size: u32,
        origin: Point,
    ) -> Result<Self, SceneError> {
        if cols == 0 || rows == 0 || cell_size == 0 {
            return Err(SceneError::invalid_dimension(format!(
                "grid dimensions must be positive, got {cols} cols x {rows} rows with cell size {cell_size}"
            )));
        }
        Ok(Self {
            id,
            cols,
            rows,
            cell_size,
            origin,
            attributes: None,
        })
    }

    /// Attaches sampled attributes, one per cell in row-major order.
    pub(crate) fn with_attributes(
        mut self,
        attributes: Vec<CellAttributes>,
    ) -> Result<Self, SceneError> {
        if attributes.len() != self.len() {
            return Err(SceneError::invalid_dimension(format!(
                "expected {} cell attributes, got {}",
                self.len(),
                attributes.len()
            )));
        }
        self.attributes = Some(attributes.into());
        Ok(self)
    }

    pub fn id(&self) -> GridId {
        self.id
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Number of cells, `cols * rows`.
    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    /// Always false; grids have at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The rectangle covered by the whole grid.
    pub fn bounds(&self) -> Bounds {
        let size = self.cell_size as f32;
        Bounds::new_from_top_left(
            self.origin,
            Size::new(self.cols as f32 * size, self.rows as f32 * size),
        )
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::IndexOutOfRange`] if either index is outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, SceneError> {
        self.get(row, col).ok_or(SceneError::IndexOutOfRange {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Returns the cell at `(row, col)`, or `None` if it is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.rows && col < self.cols).then(|| self.build_cell(row * self.cols + col))
    }

    /// Iterates every cell in row-major order.
    pub fn iter(&self) -> Cells<'_> {
        Cells {
            grid: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Iterates the cells matching `predicate`, in row-major order.
    pub fn filter<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = Cell> + 'a
    where
        P: FnMut(&Cell) -> bool + 'a,
    {
        self.iter().filter(move |cell| predicate(cell))
    }

    /// Iterates the cells lying within `thickness` cells of the grid edge,
    /// in row-major order.
    ///
    /// A thickness of zero yields nothing; a thickness of half the smaller
    /// dimension or more yields every cell.
    pub fn border(&self, thickness: usize) -> impl Iterator<Item = Cell> + '_ {
        let (rows, cols) = (self.rows, self.cols);
        self.iter().filter(move |cell| {
            cell.row < thickness
                || cell.col < thickness
                || cell.row + thickness >= rows
                || cell.col + thickness >= cols
        })
    }

    fn build_cell(&self, index: usize) -> Cell {
        let row = index / self.cols;
        let col = index % self.cols;
        let size = self.cell_size as f32;
        let top_left = self
            .origin
            .add_point(Point::new(col as f32 * size, row as f32 * size));

        Cell {
            grid: self.id,
            row,
            col,
            frame: Bounds::new_from_top_left(top_left, Size::new(size, size)),
            attributes: self
                .attributes
                .as_ref()
                .and_then(|attributes| attributes.get(index).copied()),
        }
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = Cell;
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major iterator over the cells of a [`Grid`].
#[derive(Debug, Clone)]
pub struct Cells<'a> {
    grid: &'a Grid,
    front: usize,
    back: usize,
}

impl Iterator for Cells<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let cell = self.grid.build_cell(self.front);
        self.front += 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Cells<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.grid.build_cell(self.back))
    }
}

impl ExactSizeIterator for Cells<'_> {}

impl FusedIterator for Cells<'_> {}
