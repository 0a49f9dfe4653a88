//! Main Grid type

use crate::error::{Error, Result};
use crate::topology::Cell;
use ndarray::{Array2, ArrayView2};

/// A 2-D grid of cell values.
///
/// `Grid<T>` stores values of type `T` in row-major order. Unlike a
/// numeric raster, `T` is only required to be `Clone`, so cells may
/// hold categorical labels (resource sets, phenotype strings) or lists
/// of observations.
///
/// Grids are treated as immutable inputs by every algorithm: transforms
/// return a new grid rather than mutating in place, so a source grid can
/// be reused across multiple derived statistics.
///
/// # Example
///
/// ```ignore
/// use evoscape_core::Grid;
///
/// let mut grid: Grid<u8> = Grid::filled(60, 60, 0);
/// grid.set(10, 20, 3)?;
/// let value = grid.get(10, 20)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: Clone> {
    /// Grid data stored in row-major order (row, col)
    data: Array2<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a new grid with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// Create a grid from a flat row-major vector
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data: array })
    }

    /// Create a grid from an ndarray
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data }
    }

    // Dimensions

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get a reference to the value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<&T> {
        self.data.get((row, col)).ok_or(Error::IndexOutOfBounds {
            row,
            col,
            rows: self.rows(),
            cols: self.cols(),
        })
    }

    /// Get the value at a `(x, y)` cell coordinate.
    ///
    /// Cell coordinates are `(column, row)`, matching the patch and
    /// topology convention.
    pub fn get_cell(&self, cell: Cell) -> Result<&T> {
        self.get(cell.1, cell.0)
    }

    /// Set the value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Consume the grid and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Iterate over `((row, col), &value)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        self.data.indexed_iter()
    }

    /// Element-wise transform producing a derived grid.
    ///
    /// The source grid is untouched; relabeling (e.g. raw labels to
    /// cluster ranks) always goes through here.
    pub fn map<U: Clone>(&self, f: impl Fn(&T) -> U) -> Grid<U> {
        Grid {
            data: self.data.map(f),
        }
    }

    /// Fallible element-wise transform.
    ///
    /// Stops at the first error; no partial grid is returned.
    pub fn try_map<U: Clone>(&self, f: impl Fn(&T) -> Result<U>) -> Result<Grid<U>> {
        let (rows, cols) = self.shape();
        let mut out = Vec::with_capacity(self.len());
        for value in self.data.iter() {
            out.push(f(value)?);
        }
        Grid::from_vec(out, rows, cols)
    }
}
