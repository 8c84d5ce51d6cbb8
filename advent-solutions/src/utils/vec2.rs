//! 2-D integer vector

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Integer position or offset on a plane
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vec2 {
    pub x: i64,
    pub y: i64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0, 0);
    pub const UP: Vec2 = Vec2::new(0, 1);
    pub const DOWN: Vec2 = Vec2::new(0, -1);
    pub const LEFT: Vec2 = Vec2::new(-1, 0);
    pub const RIGHT: Vec2 = Vec2::new(1, 0);

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The one of the 9 directions with components in `{-1, 0, 1}` closest to this vector
    pub fn signum(self) -> Self {
        Self::new(self.x.signum(), self.y.signum())
    }

    /// Largest absolute component
    pub fn chebyshev(self) -> i64 {
        self.x.abs().max(self.y.abs())
    }

    /// Sum of absolute components
    pub fn manhattan(self) -> i64 {
        self.x.abs() + self.y.abs()
    }
}

impl From<(i64, i64)> for Vec2 {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Vec2) {
        *self = *self + other;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Vec2) {
        *self = *self - other;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<i64> for Vec2 {
    type Output = Vec2;

    fn mul(self, k: i64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}
