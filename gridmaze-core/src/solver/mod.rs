pub mod stats;

use std::{cmp::Reverse, collections::BinaryHeap, fmt, ops::Deref};

use hashbrown::{HashMap, HashSet};
use rayon::prelude::*;

use crate::{dims::Dims, grid::OccupancyGrid};

/// Ordered cells from start to end, both inclusive. Empty when there is no route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Dims>);

impl Path {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<Dims> {
        self.0.first().copied()
    }

    pub fn end(&self) -> Option<Dims> {
        self.0.last().copied()
    }

    pub fn cells(&self) -> &[Dims] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Dims> {
        self.0
    }

    /// Checks that the path is a walk through open cells of `grid`: it starts at `start`,
    /// ends at `end`, every step moves to a 4-neighbor and no cell repeats.
    pub fn is_valid_in(&self, grid: &OccupancyGrid, start: Dims, end: Dims) -> bool {
        if self.start() != Some(start) || self.end() != Some(end) {
            return false;
        }

        if !self.0.iter().all(|&pos| grid.is_open(pos)) {
            return false;
        }

        if !self.0.windows(2).all(|pair| pair[0].is_adjacent(pair[1])) {
            return false;
        }

        let unique: HashSet<_> = self.0.iter().collect();
        unique.len() == self.0.len()
    }

    fn reconstruct(came_from: &HashMap<Dims, Dims>, end: Dims) -> Self {
        let mut cells = vec![end];
        let mut current = end;
        while let Some(&prev) = came_from.get(&current) {
            cells.push(prev);
            current = prev;
        }
        cells.reverse();
        Self(cells)
    }
}

impl Deref for Path {
    type Target = [Dims];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Dims>> for Path {
    fn from(cells: Vec<Dims>) -> Self {
        Self(cells)
    }
}

impl IntoIterator for Path {
    type Item = Dims;
    type IntoIter = std::vec::IntoIter<Dims>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Dims;
    type IntoIter = std::slice::Iter<'a, Dims>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Finds a route between two cells of a grid.
///
/// Implementations never modify the grid and keep all their working state local to the
/// call, so one finder can be shared between threads. Unusable endpoints (outside the grid
/// or on a wall) and unreachable goals both yield an empty [`Path`].
pub trait PathFinder: fmt::Debug + Sync + Send {
    fn find_path(&self, grid: &OccupancyGrid, start: Dims, end: Dims) -> Path;
}

fn endpoints_open(grid: &OccupancyGrid, start: Dims, end: Dims) -> bool {
    let open = grid.is_open(start) && grid.is_open(end);
    if !open {
        log::debug!("Endpoint {} or {} is blocked or outside of the grid", start, end);
    }
    open
}

/// A* over 4-connected cells with unit cost and Manhattan heuristic, returns a shortest path.
///
/// Among frontier cells with equal f-score, the one closer to the goal is expanded first,
/// remaining ties go to the cell that entered the frontier earliest.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl PathFinder for AStar {
    fn find_path(&self, grid: &OccupancyGrid, start: Dims, end: Dims) -> Path {
        if !endpoints_open(grid, start, end) {
            return Path::empty();
        }

        let heuristic = |pos: Dims| pos.manhattan(end);

        // (f, h, insertion order, cell), min-heap via Reverse
        let mut open = BinaryHeap::new();
        let mut closed = HashSet::new();
        let mut g_score = HashMap::new();
        let mut came_from = HashMap::new();
        let mut order = 0u64;

        g_score.insert(start, 0u32);
        open.push(Reverse((heuristic(start), heuristic(start), order, start)));

        while let Some(Reverse((_, _, _, current))) = open.pop() {
            if current == end {
                return Path::reconstruct(&came_from, current);
            }

            // stale frontier entry, already expanded with a better score
            if !closed.insert(current) {
                continue;
            }

            let tentative = g_score[&current] + 1;
            for next in grid.open_neighbors(current) {
                if closed.contains(&next) {
                    continue;
                }

                if g_score.get(&next).map_or(true, |&known| tentative < known) {
                    came_from.insert(next, current);
                    g_score.insert(next, tentative);

                    order += 1;
                    let h = heuristic(next);
                    open.push(Reverse((tentative + h, h, order, next)));
                }
            }
        }

        log::debug!("No path from {} to {}", start, end);
        Path::empty()
    }
}

/// Plain depth-first walk, returns the first route it stumbles upon.
///
/// Neighbors are pushed up, right, down, left, so left is explored first. The result is a
/// valid path but generally not the shortest one, except in a perfect maze where only one
/// simple path exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl PathFinder for DepthFirst {
    fn find_path(&self, grid: &OccupancyGrid, start: Dims, end: Dims) -> Path {
        if !endpoints_open(grid, start, end) {
            return Path::empty();
        }

        let mut stack = vec![(start, None)];
        let mut visited = HashSet::new();
        let mut came_from = HashMap::new();

        while let Some((current, parent)) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(parent) = parent {
                came_from.insert(current, parent);
            }

            if current == end {
                return Path::reconstruct(&came_from, current);
            }

            for next in grid.open_neighbors(current) {
                if !visited.contains(&next) {
                    stack.push((next, Some(current)));
                }
            }
        }

        log::debug!("No path from {} to {}", start, end);
        Path::empty()
    }
}

/// Shortest path from `start` to `end`, empty if there is none.
pub fn solve(grid: &OccupancyGrid, start: Dims, end: Dims) -> Path {
    AStar.find_path(grid, start, end)
}

/// Solves every `(start, end)` pair against the same grid, in parallel.
///
/// Results are in the order of `requests`.
pub fn solve_all(grid: &OccupancyGrid, requests: &[(Dims, Dims)]) -> Vec<Path> {
    solve_all_with(&AStar, grid, requests)
}

pub fn solve_all_with<F: PathFinder + ?Sized>(
    finder: &F,
    grid: &OccupancyGrid,
    requests: &[(Dims, Dims)],
) -> Vec<Path> {
    requests
        .par_iter()
        .map(|&(start, end)| finder.find_path(grid, start, end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> OccupancyGrid {
        OccupancyGrid::from_strings(rows).unwrap()
    }

    #[test]
    fn open_grid_is_manhattan() {
        let g = OccupancyGrid::new_open(Dims(6, 4)).unwrap();
        let path = solve(&g, Dims(0, 0), Dims(5, 3));
        assert_eq!(path.len(), 5 + 3 + 1);
        assert!(path.is_valid_in(&g, Dims(0, 0), Dims(5, 3)));
    }

    #[test]
    fn start_is_end() {
        let g = grid(&["..", ".."]);
        assert_eq!(solve(&g, Dims(1, 1), Dims(1, 1)).cells(), &[Dims(1, 1)]);
    }

    #[test]
    fn picks_shorter_route() {
        // short route across the top, long one around the bottom
        let g = grid(&[
            ".....", //
            ".###.", //
            ".#.#.", //
            ".#.#.", //
            ".....",
        ]);
        let path = solve(&g, Dims(0, 1), Dims(4, 1));
        assert_eq!(path.len(), 7);
        assert!(path.contains(&Dims(2, 0)));
        assert!(!path.contains(&Dims(2, 4)));
    }

    #[test]
    fn deterministic_ties() {
        let g = OccupancyGrid::new_open(Dims(5, 5)).unwrap();
        let first = solve(&g, Dims(0, 0), Dims(4, 4));
        for _ in 0..10 {
            assert_eq!(solve(&g, Dims(0, 0), Dims(4, 4)), first);
        }
    }

    #[test]
    fn tie_break_order() {
        let g = OccupancyGrid::new_open(Dims(3, 3)).unwrap();

        // equal f everywhere, closer to goal first, then first inserted (up, right, down, left)
        assert_eq!(
            solve(&g, Dims(0, 0), Dims(2, 2)).cells(),
            &[Dims(0, 0), Dims(1, 0), Dims(2, 0), Dims(2, 1), Dims(2, 2)]
        );
        assert_eq!(
            solve(&g, Dims(2, 2), Dims(0, 0)).cells(),
            &[Dims(2, 2), Dims(2, 1), Dims(2, 0), Dims(1, 0), Dims(0, 0)]
        );
    }

    #[test]
    fn blocked_or_outside_endpoints() {
        let g = grid(&["..#", "...", "..."]);
        assert!(solve(&g, Dims(0, 0), Dims(2, 0)).is_empty());
        assert!(solve(&g, Dims(2, 0), Dims(0, 0)).is_empty());
        assert!(solve(&g, Dims(-1, 0), Dims(2, 2)).is_empty());
        assert!(solve(&g, Dims(0, 0), Dims(3, 2)).is_empty());
    }

    #[test]
    fn depth_first_finds_a_valid_route() {
        let g = grid(&[
            ".....", //
            ".###.", //
            ".#.#.", //
            ".#.#.", //
            ".....",
        ]);
        let path = DepthFirst.find_path(&g, Dims(0, 1), Dims(4, 1));
        assert!(path.is_valid_in(&g, Dims(0, 1), Dims(4, 1)));
        assert!(path.len() >= 7);

        let walled = grid(&[".#.", ".#.", ".#."]);
        assert!(DepthFirst.find_path(&walled, Dims(0, 0), Dims(2, 2)).is_empty());
    }

    #[test]
    fn path_validation() {
        let g = grid(&["...", "#..", "..."]);
        let ok = Path::from(vec![Dims(0, 0), Dims(1, 0), Dims(1, 1)]);
        assert!(ok.is_valid_in(&g, Dims(0, 0), Dims(1, 1)));
        assert!(!ok.is_valid_in(&g, Dims(0, 0), Dims(2, 2)));

        let jump = Path::from(vec![Dims(0, 0), Dims(1, 1)]);
        assert!(!jump.is_valid_in(&g, Dims(0, 0), Dims(1, 1)));

        let wall = Path::from(vec![Dims(0, 0), Dims(0, 1), Dims(1, 1)]);
        assert!(!wall.is_valid_in(&g, Dims(0, 0), Dims(1, 1)));

        let repeat = Path::from(vec![Dims(0, 0), Dims(1, 0), Dims(0, 0), Dims(1, 0)]);
        assert!(!repeat.is_valid_in(&g, Dims(0, 0), Dims(1, 0)));

        assert!(!Path::empty().is_valid_in(&g, Dims(0, 0), Dims(0, 0)));
    }

    #[test]
    fn batch_keeps_order() {
        let g = grid(&["...", ".#.", "..."]);
        let requests = [
            (Dims(0, 0), Dims(2, 2)),
            (Dims(0, 0), Dims(1, 1)),
            (Dims(2, 0), Dims(2, 0)),
        ];
        let paths = solve_all(&g, &requests);
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0].len(), 5);
        assert!(paths[1].is_empty());
        assert_eq!(paths[2].cells(), &[Dims(2, 0)]);
    }
}
