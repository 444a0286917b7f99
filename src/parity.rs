//! Spatial parity of orbits, kets, and channels.
use std::ops::Add;
use num::Integer;

/// Parity `(-1)^l`.  Combining states adds parities modulo 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
         Serialize, Deserialize)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// Parity of `(-1)^i`.
    #[inline]
    pub fn of<T: Integer>(i: T) -> Self {
        if i.is_even() {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Parity::Even => 1,
            Parity::Odd => -1,
        }
    }
}

/// `0` for even and `1` for odd, as used in channel numbering.
impl From<Parity> for i32 {
    #[inline]
    fn from(p: Parity) -> Self {
        match p {
            Parity::Even => 0,
            Parity::Odd => 1,
        }
    }
}

impl From<Parity> for usize {
    #[inline]
    fn from(p: Parity) -> Self {
        i32::from(p) as usize
    }
}

impl Add for Parity {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self::Output {
        if self == other {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}
