pub mod algorithms;
pub mod array;
pub mod dims;
pub mod grid;
pub mod solver;

pub use algorithms::{GenerationError, MazeGenerator, Random};
pub use dims::Dims;
pub use grid::{GridError, OccupancyGrid};
pub use solver::{
    solve,
    stats::{calculate_stats, Difficulty, MazeStatistics},
    Path,
};
