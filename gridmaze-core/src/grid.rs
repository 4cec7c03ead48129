use std::{collections::VecDeque, fmt};

use smallvec::SmallVec;
use thiserror::Error;

use crate::{array::Array2D, dims::Dims};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid size {0:?}, both dimensions must be positive")]
    InvalidSize(Dims),
    #[error("position {pos:?} is out of bounds of a grid of size {size:?}")]
    OutOfBounds { pos: Dims, size: Dims },
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRows {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unexpected character `{0}` in grid text, use `.` for open and `#` for wall")]
    UnknownChar(char),
}

/// Rectangular grid of cells, `true` being walkable and `false` being a wall.
///
/// Size is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OccupancyGrid(Array2D<bool>);

impl OccupancyGrid {
    /// Creates a grid with every cell blocked.
    pub fn new(size: Dims) -> Result<Self, GridError> {
        Array2D::new_dims(false, size)
            .map(Self)
            .ok_or(GridError::InvalidSize(size))
    }

    /// Creates a grid with every cell open.
    pub fn new_open(size: Dims) -> Result<Self, GridError> {
        let mut grid = Self::new(size)?;
        grid.0.fill(true);
        Ok(grid)
    }

    /// Builds a grid from rows of cells, `rows[y][x]`.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let mut grid = Self::new(Dims::from((width, height)))?;

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRows {
                    row: y,
                    found: row.len(),
                    expected: width,
                });
            }
            for (x, &open) in row.iter().enumerate() {
                grid.0[Dims::from((x, y))] = open;
            }
        }

        Ok(grid)
    }

    /// Parses a grid drawn with `.` (open) and `#` (wall), one string per row.
    pub fn from_strings<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let rows = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .map(|c| match c {
                        '.' => Ok(true),
                        '#' => Ok(false),
                        other => Err(GridError::UnknownChar(other)),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_rows(&rows)
    }

    pub fn size(&self) -> Dims {
        self.0.size()
    }

    pub fn width(&self) -> usize {
        self.0.width()
    }

    pub fn height(&self) -> usize {
        self.0.height()
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.0.dim_to_idx(pos).is_some()
    }

    fn check_bounds(&self, pos: Dims) -> Result<(), GridError> {
        if self.is_in_bounds(pos) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                pos,
                size: self.size(),
            })
        }
    }

    pub fn get(&self, pos: Dims) -> Result<bool, GridError> {
        self.check_bounds(pos)?;
        Ok(self.0[pos])
    }

    pub fn set(&mut self, pos: Dims, open: bool) -> Result<(), GridError> {
        self.check_bounds(pos)?;
        self.0[pos] = open;
        Ok(())
    }

    /// Returns whether the cell is open, cells outside the grid count as walls.
    pub fn is_open(&self, pos: Dims) -> bool {
        self.0.get(pos).copied().unwrap_or(false)
    }

    /// Open 4-neighbors of a cell, in order up, right, down, left.
    pub fn open_neighbors(&self, pos: Dims) -> SmallVec<[Dims; 4]> {
        pos.orthogonal_neighbors()
            .filter(|&n| self.is_open(n))
            .collect()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        self.0.iter_pos()
    }

    pub fn iter_open(&self) -> impl Iterator<Item = Dims> + '_ {
        self.iter_pos().filter(|&pos| self.0[pos])
    }

    pub fn open_count(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }

    /// Marks every open cell reachable from `from` through 4-connected open cells.
    ///
    /// Empty mask if `from` is blocked or outside the grid.
    pub fn reachable_from(&self, from: Dims) -> Array2D<bool> {
        let mut seen = Array2D::new(false, self.width(), self.height());
        if !self.is_open(from) {
            return seen;
        }

        let mut queue = VecDeque::from([from]);
        seen[from] = true;
        while let Some(pos) = queue.pop_front() {
            for next in self.open_neighbors(pos) {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }

        seen
    }

    /// Whether every open cell can reach every other one. A grid without open cells is not
    /// connected.
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.iter_open().next() else {
            return false;
        };

        let reachable = self.reachable_from(first);
        reachable.iter().filter(|&&b| b).count() == self.open_count()
    }

    pub fn as_array(&self) -> &Array2D<bool> {
        &self.0
    }

    pub fn into_array(self) -> Array2D<bool> {
        self.0
    }
}

impl From<Array2D<bool>> for OccupancyGrid {
    fn from(array: Array2D<bool>) -> Self {
        Self(array)
    }
}

/// Draws the grid with `.` for open cells and `#` for walls, same notation as
/// [`OccupancyGrid::from_strings`].
impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let c = if self.0[Dims::from((x, y))] { '.' } else { '#' };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
