use std::fmt;

use crate::{dims::Dims, grid::OccupancyGrid};

use super::Path;

const HARD_MIN_PATH: usize = 100;
const HARD_MIN_DEAD_ENDS: usize = 50;
const MEDIUM_MIN_PATH: usize = 50;
const MEDIUM_MIN_DEAD_ENDS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Both the path length and the dead end count have to exceed the thresholds of a level.
    pub fn classify(path_length: usize, dead_end_count: usize) -> Self {
        if path_length > HARD_MIN_PATH && dead_end_count > HARD_MIN_DEAD_ENDS {
            Difficulty::Hard
        } else if path_length > MEDIUM_MIN_PATH && dead_end_count > MEDIUM_MIN_DEAD_ENDS {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MazeStatistics {
    /// Number of cells on the path, endpoints included.
    pub path_length: usize,
    /// Measured by the caller, copied as is.
    pub solve_time_ms: f64,
    pub difficulty: Difficulty,
    pub dead_end_count: usize,
}

/// Counts open cells off the outer ring that have exactly one open neighbor.
pub fn count_dead_ends(grid: &OccupancyGrid) -> usize {
    let Dims(w, h) = grid.size();

    Dims::iter_fill(Dims::ONE, Dims(w - 1, h - 1))
        .filter(|&pos| grid.is_open(pos) && grid.open_neighbors(pos).len() == 1)
        .count()
}

pub fn calculate_stats(grid: &OccupancyGrid, path: &Path, solve_time_ms: f64) -> MazeStatistics {
    let path_length = path.len();
    let dead_end_count = count_dead_ends(grid);

    MazeStatistics {
        path_length,
        solve_time_ms,
        difficulty: Difficulty::classify(path_length, dead_end_count),
        dead_end_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(Difficulty::classify(0, 0), Difficulty::Easy);
        assert_eq!(Difficulty::classify(101, 51), Difficulty::Hard);
        assert_eq!(Difficulty::classify(100, 51), Difficulty::Medium);
        assert_eq!(Difficulty::classify(101, 50), Difficulty::Medium);
        assert_eq!(Difficulty::classify(51, 26), Difficulty::Medium);
        assert_eq!(Difficulty::classify(50, 26), Difficulty::Easy);
        assert_eq!(Difficulty::classify(51, 25), Difficulty::Easy);
        assert_eq!(Difficulty::classify(500, 10), Difficulty::Easy);
    }

    #[test]
    fn dead_ends_skip_outer_ring() {
        let grid = OccupancyGrid::from_strings(&[
            ".##..", //
            ".#.#.", //
            "...#.", //
            "####.", //
        ])
        .unwrap();
        // (2,1) is the only interior cell with a single open neighbor,
        // (0,0) and (4,3) are dead ends too but lie on the border
        assert_eq!(count_dead_ends(&grid), 1);
    }

    #[test]
    fn tiny_grids_have_no_interior() {
        let grid = OccupancyGrid::new_open(Dims(2, 2)).unwrap();
        assert_eq!(count_dead_ends(&grid), 0);
        let grid = OccupancyGrid::new_open(Dims(1, 1)).unwrap();
        assert_eq!(count_dead_ends(&grid), 0);
    }

    #[test]
    fn stats_are_pure() {
        let grid = OccupancyGrid::from_strings(&["...", ".#.", "..."]).unwrap();
        let path = Path::from(vec![Dims(0, 0), Dims(1, 0), Dims(2, 0)]);

        let a = calculate_stats(&grid, &path, 1.5);
        let b = calculate_stats(&grid, &path, 99.0);
        assert_eq!(a.path_length, 3);
        assert_eq!(a.solve_time_ms, 1.5);
        assert_eq!(b.solve_time_ms, 99.0);
        assert_eq!(
            (a.path_length, a.dead_end_count, a.difficulty),
            (b.path_length, b.dead_end_count, b.difficulty)
        );
        assert_eq!(a.difficulty, Difficulty::Easy);
    }

    #[test]
    fn empty_path_stats() {
        let grid = OccupancyGrid::new(Dims(5, 5)).unwrap();
        let stats = calculate_stats(&grid, &Path::empty(), 0.0);
        assert_eq!(stats.path_length, 0);
        assert_eq!(stats.dead_end_count, 0);
        assert_eq!(stats.difficulty, Difficulty::Easy);
    }
}
