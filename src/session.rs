use std::time::Instant;

use gridmaze_core::{
    calculate_stats,
    dims::Dims,
    solver::{AStar, PathFinder},
    GenerationError, MazeGenerator, MazeStatistics, OccupancyGrid, Path,
};
use rand::{thread_rng, Rng as _};

/// One generated maze together with the cells to route between.
#[derive(Debug, Clone)]
pub struct MazeSession {
    grid: OccupancyGrid,
    seed: u64,
    start: Dims,
    end: Dims,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub path: Path,
    pub stats: MazeStatistics,
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }
}

impl MazeSession {
    /// Generates a maze, picking a random seed if none is given. Endpoints default to the
    /// origin and the bottom-right corner.
    pub fn generate(
        size: Dims,
        seed: Option<u64>,
        corner_fixup: bool,
    ) -> Result<Self, GenerationError> {
        let seed = seed.unwrap_or_else(|| thread_rng().gen());
        let grid = MazeGenerator::from_seed(seed)
            .with_corner_fixup(corner_fixup)
            .generate(size)?;

        log::info!("Generated {}x{} maze with seed {}", size.0, size.1, seed);

        Ok(Self {
            grid,
            seed,
            start: Dims::ZERO,
            end: Self::default_end(size),
        })
    }

    pub fn default_end(size: Dims) -> Dims {
        size - Dims::ONE
    }

    pub fn with_endpoints(mut self, start: Dims, end: Dims) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn start(&self) -> Dims {
        self.start
    }

    pub fn end(&self) -> Dims {
        self.end
    }

    /// Solves the maze with `finder`, timing the search.
    pub fn solve_with(&self, finder: &dyn PathFinder) -> SolveOutcome {
        let started = Instant::now();
        let path = finder.find_path(&self.grid, self.start, self.end);
        let solve_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        if path.is_empty() {
            log::warn!("No route from {} to {}", self.start, self.end);
        }

        let stats = calculate_stats(&self.grid, &path, solve_time_ms);
        SolveOutcome { path, stats }
    }

    pub fn solve(&self) -> SolveOutcome {
        self.solve_with(&AStar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmaze_core::solver::DepthFirst;

    #[test]
    fn seeded_sessions_repeat() {
        let a = MazeSession::generate(Dims(15, 15), Some(3), true).unwrap();
        let b = MazeSession::generate(Dims(15, 15), Some(3), true).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.seed(), 3);
        assert_eq!(a.end(), Dims(14, 14));
    }

    #[test]
    fn solves_to_corner() {
        let session = MazeSession::generate(Dims(29, 29), Some(10), true).unwrap();
        let outcome = session.solve();
        assert!(outcome.is_solved());
        assert!(outcome
            .path
            .is_valid_in(session.grid(), Dims::ZERO, Dims(28, 28)));
        assert_eq!(outcome.stats.path_length, outcome.path.len());
        assert!(outcome.stats.solve_time_ms >= 0.0);
    }

    #[test]
    fn depth_first_never_beats_astar() {
        let session = MazeSession::generate(Dims(21, 31), Some(4), true).unwrap();
        let shortest = session.solve();
        let walked = session.solve_with(&DepthFirst);
        assert!(walked.is_solved());
        assert!(walked.path.len() >= shortest.path.len());
    }

    #[test]
    fn unsolvable_is_not_an_error() {
        let session = MazeSession::generate(Dims(9, 9), Some(1), true)
            .unwrap()
            .with_endpoints(Dims::ZERO, Dims(1, 1));
        let outcome = session.solve();
        assert!(!outcome.is_solved());
        assert_eq!(outcome.stats.path_length, 0);
    }

    #[test]
    fn invalid_size() {
        assert!(matches!(
            MazeSession::generate(Dims(0, 3), None, true),
            Err(GenerationError::InvalidSize(Dims(0, 3)))
        ));
    }
}
