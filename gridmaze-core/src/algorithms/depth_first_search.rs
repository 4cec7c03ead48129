use rand::{seq::SliceRandom as _, Rng};
use smallvec::SmallVec;

use crate::{
    array::Array2D,
    dims::Dims,
    grid::{GridError, OccupancyGrid},
};

/// Steps between carve nodes, walls sit on the odd coordinates in between.
const LATTICE_STEP: [Dims; 4] = [Dims(0, -2), Dims(2, 0), Dims(0, 2), Dims(-2, 0)];

fn unvisited_neighbors(pos: Dims, visited: &Array2D<bool>) -> SmallVec<[Dims; 4]> {
    LATTICE_STEP
        .iter()
        .map(|&step| pos + step)
        .filter(|&next| matches!(visited.get(next), Some(&false)))
        .collect()
}

/// Carves a maze starting at the origin. Only the carved cells are open.
pub(super) fn carve<R: Rng>(size: Dims, rng: &mut R) -> Result<OccupancyGrid, GridError> {
    let mut grid = OccupancyGrid::new(size)?;
    let mut visited = Array2D::new_dims(false, size).ok_or(GridError::InvalidSize(size))?;

    let mut stack = Vec::with_capacity((size.product() as usize / 4).max(1));
    stack.push(Dims::ZERO);

    while let Some(&current) = stack.last() {
        visited[current] = true;
        grid.set(current, true)?;

        match unvisited_neighbors(current, &visited).choose(rng) {
            Some(&next) => {
                stack.push(next);
                grid.set((current + next) / 2, true)?;
            }
            None => {
                stack.pop();
            }
        }
    }

    Ok(grid)
}

/// Opens the bottom-right cell and its left and upper neighbors.
pub(super) fn open_far_corner(grid: &mut OccupancyGrid) -> Result<(), GridError> {
    let Dims(w, h) = grid.size();
    if w <= 2 || h <= 2 {
        return Ok(());
    }

    log::trace!("Opening far corner of {}x{} maze", w, h);
    for pos in [Dims(w - 1, h - 1), Dims(w - 2, h - 1), Dims(w - 1, h - 2)] {
        grid.set(pos, true)?;
    }

    Ok(())
}
