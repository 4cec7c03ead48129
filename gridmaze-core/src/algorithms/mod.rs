mod depth_first_search;

use rand::{thread_rng, Rng, SeedableRng as _};
use thiserror::Error;

use crate::{
    dims::Dims,
    grid::{GridError, OccupancyGrid},
};

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("invalid maze size {0:?}, width and height must be at least 1")]
    InvalidSize(Dims),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Carves perfect mazes with randomized depth-first search.
///
/// The generator owns only its random source, every call to [`MazeGenerator::generate`]
/// works on fresh buffers, so the same generator can be reused for any number of mazes.
/// Two generators created from the same seed produce the same sequence of mazes.
#[derive(Debug, Clone)]
pub struct MazeGenerator<R = Random> {
    rng: R,
    corner_fixup: bool,
}

impl MazeGenerator<Random> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(Random::seed_from_u64(seed))
    }

    /// Seeds the generator from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        let seed = thread_rng().gen();
        log::debug!("Maze generator seed: {}", seed);
        Self::from_seed(seed)
    }
}

impl<R: Rng> MazeGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            corner_fixup: true,
        }
    }

    /// Whether the bottom-right corner and its two neighbors are forced open after carving.
    ///
    /// On by default. Lattice carving only visits even coordinates, so with an even width or
    /// height the last column or row is never reached; the fix-up opens the far corner anyway.
    /// The forced cells always border the carved cell `(w - 2, h - 2)`, so the corner stays
    /// reachable. On odd sizes the corner is already carved and the fix-up can open the wall
    /// it was not entered through, which introduces a cycle.
    pub fn with_corner_fixup(mut self, value: bool) -> Self {
        self.corner_fixup = value;
        self
    }

    pub fn corner_fixup(&self) -> bool {
        self.corner_fixup
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_rng(self) -> R {
        self.rng
    }

    pub fn generate(&mut self, size: Dims) -> Result<OccupancyGrid, GenerationError> {
        if !size.all_positive() {
            return Err(GenerationError::InvalidSize(size));
        }

        log::debug!("Generating maze of size {}x{}", size.0, size.1);

        let mut grid = depth_first_search::carve(size, &mut self.rng)?;
        if self.corner_fixup {
            depth_first_search::open_far_corner(&mut grid)?;
        }

        Ok(grid)
    }

    pub fn generate_wh(
        &mut self,
        width: i32,
        height: i32,
    ) -> Result<OccupancyGrid, GenerationError> {
        self.generate(Dims(width, height))
    }
}
