use std::{
    fmt,
    ops::{Add, AddAssign, Div, Mul, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position of a cell in a grid, or a size of a grid, `(x, y)`.
///
/// Signed on purpose, so requests left or above the grid can be expressed and rejected
/// instead of wrapping around.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);
    pub const ONE: Dims = Dims(1, 1);

    /// Unit offsets of the 4-connected neighborhood, in order up, right, down, left.
    pub const ORTHOGONAL: [Dims; 4] = [Dims(0, -1), Dims(1, 0), Dims(0, 1), Dims(-1, 0)];

    pub fn all_positive(self) -> bool {
        self.0 > 0 && self.1 > 0
    }

    pub fn all_non_negative(self) -> bool {
        self.0 >= 0 && self.1 >= 0
    }

    pub fn product(self) -> i32 {
        self.0 * self.1
    }

    pub fn manhattan(self, other: Dims) -> u32 {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }

    pub fn is_adjacent(self, other: Dims) -> bool {
        self.manhattan(other) == 1
    }

    /// Iterates `from..to` row by row.
    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> {
        (from.1..to.1).flat_map(move |y| (from.0..to.0).map(move |x| Dims(x, y)))
    }

    pub fn orthogonal_neighbors(self) -> impl Iterator<Item = Dims> {
        Self::ORTHOGONAL.into_iter().map(move |off| self + off)
    }
}

impl Add for Dims {
    type Output = Dims;

    fn add(self, other: Dims) -> Dims {
        Dims(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Dims {
    type Output = Dims;

    fn sub(self, other: Dims) -> Dims {
        Dims(self.0 - other.0, self.1 - other.1)
    }
}

impl AddAssign for Dims {
    fn add_assign(&mut self, other: Dims) {
        self.0 += other.0;
        self.1 += other.1;
    }
}

impl SubAssign for Dims {
    fn sub_assign(&mut self, other: Dims) {
        self.0 -= other.0;
        self.1 -= other.1;
    }
}

impl Mul<i32> for Dims {
    type Output = Dims;

    fn mul(self, other: i32) -> Dims {
        Dims(self.0 * other, self.1 * other)
    }
}

impl Div<i32> for Dims {
    type Output = Dims;

    fn div(self, other: i32) -> Dims {
        Dims(self.0 / other, self.1 / other)
    }
}

impl From<(i32, i32)> for Dims {
    fn from(tuple: (i32, i32)) -> Self {
        Dims(tuple.0, tuple.1)
    }
}

impl From<Dims> for (i32, i32) {
    fn from(val: Dims) -> Self {
        (val.0, val.1)
    }
}

impl From<(usize, usize)> for Dims {
    fn from(tuple: (usize, usize)) -> Self {
        Dims(tuple.0 as i32, tuple.1 as i32)
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected two integers separated by a comma, got `{0}`")]
pub struct ParseDimsError(pub String);

impl FromStr for Dims {
    type Err = ParseDimsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDimsError(s.to_string());

        let (x, y) = s
            .split_once(|c| c == ',' || c == 'x')
            .ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;

        Ok(Dims(x, y))
    }
}
