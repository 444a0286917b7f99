//! Two- and three-body kets.
use super::half::Half;
use super::isqrt::{icbrt_u64, isqrt_u64};
use super::orbit::Orbit;
use super::parity::Parity;

/// Position of the two-body ket `(p, q)` with `p ≤ q`.
#[inline]
pub fn index2(p: usize, q: usize) -> usize {
    debug_assert!(p <= q);
    q * (q + 1) / 2 + p
}

/// Inverse of `index2`.
pub fn unindex2(i: usize) -> (usize, usize) {
    let q = ((isqrt_u64(8 * i as u64 + 1) - 1) / 2) as usize;
    (i - q * (q + 1) / 2, q)
}

/// Position of the three-body ket `(p, q, r)` with `p ≤ q ≤ r`.
#[inline]
pub fn index3(p: usize, q: usize, r: usize) -> usize {
    debug_assert!(p <= q && q <= r);
    r * (r + 1) * (r + 2) / 6 + index2(p, q)
}

/// Inverse of `index3`.
pub fn unindex3(i: usize) -> (usize, usize, usize) {
    let tet = |r: usize| r * (r + 1) * (r + 2) / 6;
    // r (r + 1) (r + 2) / 6 ≈ (r + 1)^3 / 6
    let mut r = (icbrt_u64(6 * i as u64) as usize).saturating_sub(1);
    while tet(r + 1) <= i {
        r += 1;
    }
    while tet(r) > i {
        r -= 1;
    }
    let (p, q) = unindex2(i - tet(r));
    (p, q, r)
}

/// Two-body ket `|p q⟩` with `p ≤ q`.
///
/// All quantum numbers are derived from the orbits when the ket is built;
/// the ket keeps no reference to its model space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ket {
    pub p: usize,
    pub q: usize,
    pub parity: Parity,
    /// Isospin projection `(tz2_p + tz2_q) / 2`.
    pub tz: i32,
    pub j_min: Half<i32>,
    pub j_max: Half<i32>,
    /// Spacing of the allowed `J`: `2` for identical orbits, else `1`.
    pub j_step: i32,
    /// Total oscillator quanta.
    pub e2: i32,
    /// `(-1)^((j2_p + j2_q) / 2)`
    phase_jj: i32,
}

impl Ket {
    pub fn new(p: usize, q: usize, op: &Orbit, oq: &Orbit) -> Self {
        assert!(p <= q, "kets are stored with p ≤ q (got {}, {})", p, q);
        let (jp, jq) = (Half(op.j2()), Half(oq.j2()));
        let (j_max, j_step) = if p == q {
            // Pauli: identical orbits only couple to even J
            (jp + jq - Half(2), 2)
        } else {
            (jp + jq, 1)
        };
        let jj = (op.j2() + oq.j2()) / 2;
        Self {
            p,
            q,
            parity: op.parity() + oq.parity(),
            tz: (op.tz2() + oq.tz2()) / 2,
            j_min: jp.abs_diff(jq),
            j_max,
            j_step,
            e2: op.e() + oq.e(),
            phase_jj: if jj % 2 == 0 { 1 } else { -1 },
        }
    }

    /// `1` if both orbits are identical, else `0`.
    #[inline]
    pub fn delta_pq(&self) -> i32 {
        (self.p == self.q) as i32
    }

    /// Exchange phase `(-1)^(j_p + j_q − J)` for swapping `p` and `q`.
    #[inline]
    pub fn phase(&self, j: i32) -> i32 {
        if j % 2 == 0 {
            self.phase_jj
        } else {
            -self.phase_jj
        }
    }

    /// Whether `J` is an allowed coupling for this ket.
    #[inline]
    pub fn admits_j(&self, j: i32) -> bool {
        let j = Half::from(j);
        j >= self.j_min && j <= self.j_max
            && (j - self.j_min).twice() % (2 * self.j_step) == 0
    }

    /// The allowed total angular momenta.
    pub fn j_range(&self) -> impl Iterator<Item = i32> {
        (self.j_min.twice() / 2 ..= self.j_max.twice() / 2)
            .step_by(self.j_step as usize)
    }
}

/// Three-body ket `|p q r⟩` with `p ≤ q ≤ r`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ket3 {
    pub p: usize,
    pub q: usize,
    pub r: usize,
    pub parity: Parity,
    /// Twice the isospin projection.
    pub tz2: i32,
    /// Total oscillator quanta.
    pub e3: i32,
}

impl Ket3 {
    pub fn new(
        (p, q, r): (usize, usize, usize),
        (op, oq, or): (&Orbit, &Orbit, &Orbit),
    ) -> Self {
        assert!(p <= q && q <= r,
                "kets are stored with p ≤ q ≤ r (got {}, {}, {})", p, q, r);
        Self {
            p,
            q,
            r,
            parity: op.parity() + oq.parity() + or.parity(),
            tz2: op.tz2() + oq.tz2() + or.tz2(),
            e3: op.e() + oq.e() + or.e(),
        }
    }
}
