//! Half-integer angular momenta.
use std::fmt;
use std::ops::{Add, Sub};

/// Angular momentum stored as twice its value, so that `Half(3)` is `3/2`
/// and `Half(4)` is `2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Half<T>(pub T);

impl<T> Half<T> {
    /// Unwrap to twice the logical value.
    #[inline]
    pub fn twice(self) -> T {
        self.0
    }
}

/// Doubles the argument: `Half::from(1) == Half(2)`.
impl From<i32> for Half<i32> {
    #[inline]
    fn from(j: i32) -> Self {
        Half(2 * j)
    }
}

impl fmt::Display for Half<i32> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.try_get() {
            Ok(j) => write!(f, "{}", j),
            Err(h) => write!(f, "{}/2", h.0),
        }
    }
}

impl Half<i32> {
    /// The value if it is an integer, otherwise `Err(self)`.
    #[inline]
    pub fn try_get(self) -> Result<i32, Self> {
        if self.0 % 2 == 0 {
            Ok(self.0 / 2)
        } else {
            Err(self)
        }
    }

    #[inline]
    pub fn abs_diff(self, other: Self) -> Self {
        Half((self.0 - other.0).abs())
    }

    /// Number of projections, `2j + 1`.
    #[inline]
    pub fn multiplicity(self) -> i32 {
        self.0 + 1
    }
}

impl Add for Half<i32> {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self::Output {
        Half(self.0 + other.0)
    }
}

impl Sub for Half<i32> {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self::Output {
        Half(self.0 - other.0)
    }
}
