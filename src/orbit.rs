//! Single-particle orbits.
//!
//! The isospin convention here is proton = −½, neutron = +½.
use std::{fmt, str};
use regex::Regex;
use super::isqrt::isqrt_u64;
use super::parity::Parity;

quick_error! {
    /// Error type for orbit construction.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Error {
        InvalidQuantumNumbers(n: i32, l: i32, j2: i32, tz2: i32) {
            display("invalid orbit quantum numbers \
                     (n = {}, l = {}, j2 = {}, tz2 = {})", n, l, j2, tz2)
        }
        InvalidLabel(label: String) {
            display("invalid orbit label: {:?}", label)
        }
    }
}

/// Alphabet of spectroscopic letters for orbital angular momentum.
pub const ORB_ANG_CHART: &str = "spdfghiklmnoqrtuvwxyz";

/// Occupation of an orbit in the reference state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
         Serialize, Deserialize)]
pub enum Occ {
    /// Occupied (hole).
    I,
    /// Unoccupied (particle).
    A,
}

/// Whether an orbit lies inside the valence space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
         Serialize, Deserialize)]
pub enum Space {
    Inside,
    Outside,
}

pub fn check_quantum_numbers(n: i32, l: i32, j2: i32, tz2: i32)
                             -> Result<(), Error>
{
    let ok = n >= 0
        && l >= 0
        && j2 > 0
        && (j2 == 2 * l + 1 || j2 == 2 * l - 1)
        && (tz2 == -1 || tz2 == 1);
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidQuantumNumbers(n, l, j2, tz2))
    }
}

/// Position of an orbit with the given (valid) quantum numbers.
///
/// Orbits are ordered by shell `e = 2n + l`, then by `j2` descending, then
/// protons before neutrons.  The mapping is dense: shell `e` occupies the
/// positions `e (e + 1) .. (e + 1) (e + 2)`.
#[inline]
pub fn index1(n: i32, l: i32, j2: i32, tz2: i32) -> usize {
    let e = 2 * n + l;
    (e * (e + 3) + 1 - j2 + (tz2 + 1) / 2) as usize
}

/// Inverse of `index1`, returning `(n, l, j2, tz2)`.
pub fn unindex1(i: usize) -> (i32, i32, i32, i32) {
    let i = i as u64;
    // largest e with e (e + 1) <= i
    let e = (isqrt_u64(4 * i + 1) - 1) / 2;
    let r = (i - e * (e + 1)) as i32;
    let e = e as i32;
    let tz2 = 2 * (r % 2) - 1;
    let j2 = 2 * e + 1 - (r - r % 2);
    let lo = (j2 - 1) / 2;
    let l = if (e - lo) % 2 == 0 { lo } else { lo + 1 };
    ((e - l) / 2, l, j2, tz2)
}

/// Radial quantum number, orbital angular momentum, and twice the total
/// angular momentum of an oscillator orbital.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nlj {
    pub n: i32,
    pub l: i32,
    pub j2: i32,
}

impl Nlj {
    /// Shell index (e)
    pub fn shell(self) -> i32 {
        2 * self.n + self.l
    }
}

/// Iterator over the 3D harmonic oscillator orbitals in order of
/// increasing shell.
#[derive(Clone, Copy, Debug)]
pub struct Ho3dIter(pub Nlj);

impl Default for Ho3dIter {
    fn default() -> Self {
        Ho3dIter(Nlj { n: 0, l: 0, j2: 1 })
    }
}

impl Iterator for Ho3dIter {
    type Item = Nlj;
    fn next(&mut self) -> Option<Self::Item> {
        let nlj = self.0;
        let greater_j2 = 2 * nlj.l + 1;
        self.0 = if nlj.j2 != greater_j2 {
            Nlj { j2: greater_j2, .. nlj }
        } else if nlj.n > 0 {
            Nlj { n: nlj.n - 1, l: nlj.l + 2, j2: nlj.j2 + 2 }
        } else {
            let e = nlj.shell() + 1;
            Nlj { n: e / 2, l: e % 2, j2: 1 }
        };
        Some(nlj)
    }
}

/// Spectroscopic orbit label such as `p0s1` (proton 0s½) or `n1d5`
/// (neutron 1d5/2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrbitLabel {
    pub n: i32,
    pub l: i32,
    pub j2: i32,
    pub tz2: i32,
}

impl fmt::Display for OrbitLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let t = if self.tz2 < 0 { 'p' } else { 'n' };
        match ORB_ANG_CHART.chars().nth(self.l as usize) {
            Some(c) => write!(f, "{}{}{}{}", t, self.n, c, self.j2),
            None => write!(f, "{}{}[{}]{}", t, self.n, self.l, self.j2),
        }
    }
}

impl str::FromStr for OrbitLabel {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidLabel(s.to_owned());
        let m = re!(r"^([pn])(\d+)([a-z])(\d+)$")
            .captures(s)
            .ok_or_else(invalid)?;
        let tz2 = if &m[1] == "p" { -1 } else { 1 };
        let n = m[2].parse().map_err(|_| invalid())?;
        let l = ORB_ANG_CHART.find(&m[3]).ok_or_else(invalid)? as i32;
        let j2 = m[4].parse().map_err(|_| invalid())?;
        check_quantum_numbers(n, l, j2, tz2)?;
        Ok(Self { n, l, j2, tz2 })
    }
}

/// Single-particle orbit.  Immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    n: i32,
    l: i32,
    j2: i32,
    tz2: i32,
    occ: Occ,
    space: Space,
    spe: f64,
}

impl fmt::Display for Orbit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.label().fmt(f)
    }
}

impl Orbit {
    pub fn new(
        n: i32,
        l: i32,
        j2: i32,
        tz2: i32,
        occ: Occ,
        space: Space,
        spe: f64,
    ) -> Result<Self, Error> {
        check_quantum_numbers(n, l, j2, tz2)?;
        Ok(Self { n, l, j2, tz2, occ, space, spe })
    }

    pub fn from_label(
        label: OrbitLabel,
        occ: Occ,
        space: Space,
        spe: f64,
    ) -> Result<Self, Error> {
        Self::new(label.n, label.l, label.j2, label.tz2, occ, space, spe)
    }

    #[inline]
    pub fn n(&self) -> i32 {
        self.n
    }

    #[inline]
    pub fn l(&self) -> i32 {
        self.l
    }

    /// Twice the total angular momentum.
    #[inline]
    pub fn j2(&self) -> i32 {
        self.j2
    }

    /// Twice the isospin projection.
    #[inline]
    pub fn tz2(&self) -> i32 {
        self.tz2
    }

    #[inline]
    pub fn occ(&self) -> Occ {
        self.occ
    }

    #[inline]
    pub fn space(&self) -> Space {
        self.space
    }

    /// Single-particle energy.
    #[inline]
    pub fn spe(&self) -> f64 {
        self.spe
    }

    /// Shell index `2n + l`.
    #[inline]
    pub fn e(&self) -> i32 {
        2 * self.n + self.l
    }

    #[inline]
    pub fn parity(&self) -> Parity {
        Parity::of(self.l)
    }

    /// Position of this orbit in a model space.
    #[inline]
    pub fn index(&self) -> usize {
        index1(self.n, self.l, self.j2, self.tz2)
    }

    pub fn label(&self) -> OrbitLabel {
        OrbitLabel { n: self.n, l: self.l, j2: self.j2, tz2: self.tz2 }
    }

    #[inline]
    pub fn is_hole(&self) -> bool {
        self.occ == Occ::I
    }

    #[inline]
    pub fn is_particle(&self) -> bool {
        self.occ == Occ::A
    }

    #[inline]
    pub fn is_valence(&self) -> bool {
        self.space == Space::Inside
    }

    #[inline]
    pub fn is_qspace(&self) -> bool {
        self.space == Space::Outside
    }
}
