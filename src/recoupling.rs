//! Angular momentum recoupling coefficients: Wigner 6j and 9j symbols and
//! harmonic oscillator (Talmi–Moshinsky) brackets.
//!
//! Each coefficient type packs its arguments into a `u64` using fixed-width
//! fields.  Since every field is range-checked before packing, distinct
//! argument tuples always produce distinct keys; arguments that do not fit
//! are evaluated directly and never cached.
use std::{cmp, fmt};
use std::sync::Arc;
use wigner_symbols::{ClebschGordan, Wigner6j};
use super::cache::CoefficientCache;
use super::half::Half;

/// Bits per (doubled) argument of a 6j key: 6 × 10 = 60 bits.
pub const SIX_J_BITS: u32 = 10;
/// Bits per (doubled) argument of a 9j key: 9 × 7 = 63 bits.
pub const NINE_J_BITS: u32 = 7;
/// Bits per argument of a Moshinsky key: 9 × 7 = 63 bits.
pub const MOSHINSKY_BITS: u32 = 7;

fn pack(fields: &[i32], bits: u32) -> Option<u64> {
    debug_assert!(fields.len() as u32 * bits <= 64);
    let mut key = 0u64;
    for &x in fields {
        if x < 0 || x >= 1 << bits {
            return None;
        }
        key = key << bits | x as u64;
    }
    Some(key)
}

/// Returns `(-1)^φ`
#[inline]
pub fn phase(phi: i32) -> f64 {
    if phi % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Whether `(a, b, c)` satisfy the triangle condition and sum to an
/// integer.
#[inline]
pub fn triangle(a: Half<i32>, b: Half<i32>, c: Half<i32>) -> bool {
    let (a, b, c) = (a.twice(), b.twice(), c.twice());
    a >= 0 && b >= 0 && c >= 0
        && (a + b + c) % 2 == 0
        && c >= (a - b).abs()
        && c <= a + b
}

/// Arguments of the Wigner 6j symbol `{j1 j2 j3; j4 j5 j6}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SixJ {
    pub j1: Half<i32>,
    pub j2: Half<i32>,
    pub j3: Half<i32>,
    pub j4: Half<i32>,
    pub j5: Half<i32>,
    pub j6: Half<i32>,
}

impl SixJ {
    /// Whether the symbol can be nonzero.
    pub fn is_valid(&self) -> bool {
        triangle(self.j1, self.j2, self.j3)
            && triangle(self.j1, self.j5, self.j6)
            && triangle(self.j4, self.j2, self.j6)
            && triangle(self.j4, self.j5, self.j3)
    }

    pub fn key(&self) -> Option<u64> {
        pack(&[self.j1.twice(), self.j2.twice(), self.j3.twice(),
               self.j4.twice(), self.j5.twice(), self.j6.twice()],
             SIX_J_BITS)
    }
}

/// Arguments of the Wigner 9j symbol
/// `{j1 j2 j3; j4 j5 j6; j7 j8 j9}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NineJ {
    pub j1: Half<i32>,
    pub j2: Half<i32>,
    pub j3: Half<i32>,
    pub j4: Half<i32>,
    pub j5: Half<i32>,
    pub j6: Half<i32>,
    pub j7: Half<i32>,
    pub j8: Half<i32>,
    pub j9: Half<i32>,
}

impl NineJ {
    /// Whether the symbol can be nonzero.
    pub fn is_valid(&self) -> bool {
        triangle(self.j1, self.j2, self.j3)
            && triangle(self.j4, self.j5, self.j6)
            && triangle(self.j7, self.j8, self.j9)
            && triangle(self.j1, self.j4, self.j7)
            && triangle(self.j2, self.j5, self.j8)
            && triangle(self.j3, self.j6, self.j9)
    }

    pub fn key(&self) -> Option<u64> {
        pack(&[self.j1.twice(), self.j2.twice(), self.j3.twice(),
               self.j4.twice(), self.j5.twice(), self.j6.twice(),
               self.j7.twice(), self.j8.twice(), self.j9.twice()],
             NINE_J_BITS)
    }
}

/// Arguments of the Moshinsky bracket
/// `⟨N Λ, n λ; L | n1 l1, n2 l2; L⟩` relating centre-of-mass and relative
/// oscillator states to the two-particle ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Moshinsky {
    /// Centre-of-mass radial quantum number (N).
    pub n_cm: i32,
    /// Centre-of-mass orbital angular momentum (Λ).
    pub l_cm: i32,
    /// Relative radial quantum number (n).
    pub n_rel: i32,
    /// Relative orbital angular momentum (λ).
    pub l_rel: i32,
    pub n1: i32,
    pub l1: i32,
    pub n2: i32,
    pub l2: i32,
    /// Total orbital angular momentum (L).
    pub l: i32,
}

impl Moshinsky {
    /// Selection rules: conservation of oscillator quanta and the two
    /// triangle conditions.  Parity follows from the former.
    pub fn is_allowed(&self) -> bool {
        let m = self;
        [m.n_cm, m.l_cm, m.n_rel, m.l_rel, m.n1, m.l1, m.n2, m.l2, m.l]
            .iter().all(|&x| x >= 0)
            && m.e_cm() + m.e_rel() == m.e1() + m.e2()
            && triangle(Half::from(m.l1), Half::from(m.l2), Half::from(m.l))
            && triangle(Half::from(m.l_cm), Half::from(m.l_rel),
                        Half::from(m.l))
    }

    pub fn e1(&self) -> i32 {
        2 * self.n1 + self.l1
    }

    pub fn e2(&self) -> i32 {
        2 * self.n2 + self.l2
    }

    pub fn e_cm(&self) -> i32 {
        2 * self.n_cm + self.l_cm
    }

    pub fn e_rel(&self) -> i32 {
        2 * self.n_rel + self.l_rel
    }

    /// Map to the representative with `(n1, l1) ≥ (n2, l2)` and
    /// `(N, Λ) ≥ (n, λ)`, returning the sign relating the two brackets.
    pub fn canonicalize(&self) -> (f64, Self) {
        let mut m = *self;
        let mut sign = 1.0;
        if (m.n1, m.l1) < (m.n2, m.l2) {
            // exchange of particles 1 and 2
            sign *= phase(m.l_cm + m.l);
            m = Self { n1: m.n2, l1: m.l2, n2: m.n1, l2: m.l1, .. m };
        }
        if (m.n_cm, m.l_cm) < (m.n_rel, m.l_rel) {
            // exchange of centre-of-mass and relative motion
            sign *= phase(m.l1 + m.l);
            m = Self { n_cm: m.n_rel, l_cm: m.l_rel,
                       n_rel: m.n_cm, l_rel: m.l_cm, .. m };
        }
        (sign, m)
    }

    pub fn key(&self) -> Option<u64> {
        pack(&[self.n_cm, self.l_cm, self.n_rel, self.l_rel,
               self.n1, self.l1, self.n2, self.l2, self.l],
             MOSHINSKY_BITS)
    }
}

/// Pure evaluators for the raw coefficients.  Only called with arguments
/// that pass the selection rules (`is_valid` / `is_allowed`).
pub trait RawCoefficients: Send + Sync {
    fn six_j(&self, args: &SixJ) -> f64;
    fn nine_j(&self, args: &NineJ) -> f64;
    fn moshinsky(&self, args: &Moshinsky) -> f64;
}

/// Exact 6j and Clebsch–Gordan values from `wigner_symbols`; 9j symbols
/// and Moshinsky brackets are built on top of them.
#[derive(Clone, Copy, Debug, Default)]
pub struct WignerCoefficients;

fn double_factorial(k: i32) -> f64 {
    let mut r = 1.0;
    let mut k = k;
    while k > 1 {
        r *= k as f64;
        k -= 2;
    }
    r
}

/// Coefficient for splitting the oscillator state `(e, l)` into two
/// oscillators `(ea, la)` and `(eb, lb)`, with all projections `m = 0`.
fn split_coefficient(
    (e, l): (i32, i32),
    (ea, la): (i32, i32),
    (eb, lb): (i32, i32),
) -> f64 {
    if e < l || ea < la || eb < lb
        || (e - l) % 2 != 0 || (ea - la) % 2 != 0 || (eb - lb) % 2 != 0
        || (la + lb + l) % 2 != 0
        || !triangle(Half::from(la), Half::from(lb), Half::from(l))
    {
        return 0.0;
    }
    let (n, na, nb) = ((e - l) / 2, (ea - la) / 2, (eb - lb) / 2);
    let cg = f64::from(ClebschGordan {
        tj1: 2 * la, tm1: 0,
        tj2: 2 * lb, tm2: 0,
        tj12: 2 * l, tm12: 0,
    }.value());
    let radial = double_factorial(2 * n) * double_factorial(2 * n + 2 * l + 1)
        / (double_factorial(2 * na) * double_factorial(2 * na + 2 * la + 1)
           * double_factorial(2 * nb) * double_factorial(2 * nb + 2 * lb + 1));
    phase(na + nb - n)
        * ((2 * la + 1) as f64 * (2 * lb + 1) as f64 / (2 * l + 1) as f64)
        .sqrt()
        * cg
        * radial.sqrt()
}

/// Orbital angular momenta `l ≤ e` with the parity of `e`.
fn l_values(e: i32) -> impl Iterator<Item = i32> {
    (e % 2 ..= e).step_by(2)
}

impl RawCoefficients for WignerCoefficients {
    fn six_j(&self, a: &SixJ) -> f64 {
        f64::from(Wigner6j {
            tj1: a.j1.twice(),
            tj2: a.j2.twice(),
            tj3: a.j3.twice(),
            tj4: a.j4.twice(),
            tj5: a.j5.twice(),
            tj6: a.j6.twice(),
        }.value())
    }

    /// Sum over products of three 6j symbols.
    fn nine_j(&self, a: &NineJ) -> f64 {
        let lo = cmp::max(a.j1.abs_diff(a.j9),
                          cmp::max(a.j4.abs_diff(a.j8), a.j2.abs_diff(a.j6)));
        let hi = cmp::min(a.j1 + a.j9, cmp::min(a.j4 + a.j8, a.j2 + a.j6));
        let mut sum = 0.0;
        for tx in (lo.twice() ..= hi.twice()).step_by(2) {
            let x = Half(tx);
            let f1 = SixJ { j1: a.j1, j2: a.j4, j3: a.j7,
                            j4: a.j8, j5: a.j9, j6: x };
            let f2 = SixJ { j1: a.j2, j2: a.j5, j3: a.j8,
                            j4: a.j4, j5: x, j6: a.j6 };
            let f3 = SixJ { j1: a.j3, j2: a.j6, j3: a.j9,
                            j4: x, j5: a.j1, j6: a.j2 };
            if !(f1.is_valid() && f2.is_valid() && f3.is_valid()) {
                continue;
            }
            sum += phase(tx) * x.multiplicity() as f64
                * self.six_j(&f1) * self.six_j(&f2) * self.six_j(&f3);
        }
        sum
    }

    /// Closed form in terms of oscillator splitting coefficients, with the
    /// relative coordinate `(r1 − r2)/√2` and radial functions positive at
    /// the origin.
    fn moshinsky(&self, m: &Moshinsky) -> f64 {
        let (e1, e2, ecm, erel) = (m.e1(), m.e2(), m.e_cm(), m.e_rel());
        if e1 + e2 != ecm + erel {
            return 0.0;
        }
        let mut sum = 0.0;
        for ea in 0 ..= cmp::min(e1, ecm) {
            let (eb, ec) = (e1 - ea, ecm - ea);
            let ed = e2 - ec;
            if ed < 0 {
                continue;
            }
            for la in l_values(ea) {
                for lb in l_values(eb) {
                    let g1 = split_coefficient((e1, m.l1), (ea, la), (eb, lb));
                    if g1 == 0.0 {
                        continue;
                    }
                    for lc in l_values(ec) {
                        let gcm = split_coefficient((ecm, m.l_cm),
                                                    (ea, la), (ec, lc));
                        if gcm == 0.0 {
                            continue;
                        }
                        for ld in l_values(ed) {
                            let g2 = split_coefficient((e2, m.l2),
                                                       (ec, lc), (ed, ld));
                            let grel = split_coefficient((erel, m.l_rel),
                                                         (eb, lb), (ed, ld));
                            if g2 == 0.0 || grel == 0.0 {
                                continue;
                            }
                            let nj = NineJ {
                                j1: Half::from(la),
                                j2: Half::from(lb),
                                j3: Half::from(m.l1),
                                j4: Half::from(lc),
                                j5: Half::from(ld),
                                j6: Half::from(m.l2),
                                j7: Half::from(m.l_cm),
                                j8: Half::from(m.l_rel),
                                j9: Half::from(m.l),
                            };
                            if !nj.is_valid() {
                                continue;
                            }
                            sum += phase(ld) * g1 * g2 * gcm * grel
                                * self.nine_j(&nj);
                        }
                    }
                }
            }
        }
        let weight = ((2 * m.l1 + 1) * (2 * m.l2 + 1)
                      * (2 * m.l_cm + 1) * (2 * m.l_rel + 1)) as f64;
        sum * weight.sqrt() * 0.5f64.powi(e1 + e2).sqrt()
    }
}

/// Memoized 6j, 9j, and Moshinsky coefficients sharing one evaluator.
#[derive(Clone)]
pub struct Recoupling {
    six_j: CoefficientCache,
    nine_j: CoefficientCache,
    moshinsky: CoefficientCache,
    raw: Arc<dyn RawCoefficients>,
}

impl fmt::Debug for Recoupling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Recoupling")
            .field("six_j", &self.six_j)
            .field("nine_j", &self.nine_j)
            .field("moshinsky", &self.moshinsky)
            .finish()
    }
}

/// 16 shards per cache, evaluated by `WignerCoefficients`.
impl Default for Recoupling {
    fn default() -> Self {
        Self::new(16)
    }
}

impl Recoupling {
    pub fn new(num_shards: usize) -> Self {
        Self::with_raw(num_shards, Arc::new(WignerCoefficients))
    }

    pub fn with_raw(num_shards: usize, raw: Arc<dyn RawCoefficients>)
                    -> Self
    {
        Self {
            six_j: CoefficientCache::new(num_shards),
            nine_j: CoefficientCache::new(num_shards),
            moshinsky: CoefficientCache::new(num_shards),
            raw,
        }
    }

    /// The underlying evaluator.
    pub fn raw(&self) -> &dyn RawCoefficients {
        &*self.raw
    }

    pub fn six_j(&self, args: SixJ) -> f64 {
        if !args.is_valid() {
            return 0.0;
        }
        let raw = &self.raw;
        match args.key() {
            Some(key) => self.six_j.get_or_insert_with(key, || raw.six_j(&args)),
            None => {
                trace!("uncached 6j: {:?}", args);
                raw.six_j(&args)
            }
        }
    }

    pub fn nine_j(&self, args: NineJ) -> f64 {
        if !args.is_valid() {
            return 0.0;
        }
        let raw = &self.raw;
        match args.key() {
            Some(key) => self.nine_j.get_or_insert_with(key, || raw.nine_j(&args)),
            None => {
                trace!("uncached 9j: {:?}", args);
                raw.nine_j(&args)
            }
        }
    }

    pub fn moshinsky(&self, args: Moshinsky) -> f64 {
        if !args.is_allowed() {
            return 0.0;
        }
        let (sign, args) = args.canonicalize();
        let raw = &self.raw;
        let value = match args.key() {
            Some(key) => {
                self.moshinsky.get_or_insert_with(key, || raw.moshinsky(&args))
            }
            None => {
                trace!("uncached Moshinsky bracket: {:?}", args);
                raw.moshinsky(&args)
            }
        };
        sign * value
    }

    /// Whether the bracket (or its canonical representative) is cached.
    pub fn contains_moshinsky(&self, args: Moshinsky) -> bool {
        args.is_allowed()
            && args.canonicalize().1.key()
                   .map(|key| self.moshinsky.contains(key))
                   .unwrap_or(false)
    }

    pub fn six_j_is_empty(&self) -> bool {
        self.six_j.is_empty()
    }

    pub fn num_six_j(&self) -> usize {
        self.six_j.len()
    }

    pub fn num_nine_j(&self) -> usize {
        self.nine_j.len()
    }

    pub fn num_moshinsky(&self) -> usize {
        self.moshinsky.len()
    }

    /// Empty all three caches.
    pub fn clear(&self) {
        self.six_j.clear();
        self.nine_j.clear();
        self.moshinsky.clear();
    }

    /// Evaluate and store every canonical bracket whose total number of
    /// oscillator quanta does not exceed `e_max`.  Returns the number of
    /// brackets visited.
    pub fn precalculate_moshinsky(&self, e_max: i32) -> usize {
        let mut count = 0;
        for_each_canonical_moshinsky(e_max, |m| {
            self.moshinsky(m);
            count += 1;
        });
        debug!("Moshinsky brackets up to e = {}: {} visited, {} cached",
               e_max, count, self.num_moshinsky());
        count
    }
}

/// Visit every allowed canonical Moshinsky argument tuple with total
/// quanta `≤ e_max`.
pub fn for_each_canonical_moshinsky<F: FnMut(Moshinsky)>(e_max: i32, mut f: F) {
    for e in 0 ..= e_max {
        for e1 in 0 ..= e {
            let e2 = e - e1;
            for l1 in l_values(e1) {
                for l2 in l_values(e2) {
                    let (n1, n2) = ((e1 - l1) / 2, (e2 - l2) / 2);
                    if (n1, l1) < (n2, l2) {
                        continue;
                    }
                    for l in (l1 - l2).abs() ..= l1 + l2 {
                        for ecm in 0 ..= e {
                            let erel = e - ecm;
                            for l_cm in l_values(ecm) {
                                for l_rel in l_values(erel) {
                                    let m = Moshinsky {
                                        n_cm: (ecm - l_cm) / 2,
                                        l_cm,
                                        n_rel: (erel - l_rel) / 2,
                                        l_rel,
                                        n1, l1, n2, l2, l,
                                    };
                                    if (m.n_cm, m.l_cm) < (m.n_rel, m.l_rel)
                                        || !m.is_allowed()
                                    {
                                        continue;
                                    }
                                    f(m);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use super::*;
    use super::super::utils::Toler;

    fn six_j(t: [i32; 6]) -> SixJ {
        SixJ { j1: Half(t[0]), j2: Half(t[1]), j3: Half(t[2]),
               j4: Half(t[3]), j5: Half(t[4]), j6: Half(t[5]) }
    }

    fn nine_j(t: [i32; 9]) -> NineJ {
        NineJ { j1: Half(t[0]), j2: Half(t[1]), j3: Half(t[2]),
                j4: Half(t[3]), j5: Half(t[4]), j6: Half(t[5]),
                j7: Half(t[6]), j8: Half(t[7]), j9: Half(t[8]) }
    }

    fn mosh(t: [i32; 9]) -> Moshinsky {
        Moshinsky { n_cm: t[0], l_cm: t[1], n_rel: t[2], l_rel: t[3],
                    n1: t[4], l1: t[5], n2: t[6], l2: t[7], l: t[8] }
    }

    #[test]
    fn test_triangle() {
        assert!(triangle(Half(1), Half(1), Half(2)));
        assert!(triangle(Half(1), Half(1), Half(0)));
        assert!(!triangle(Half(1), Half(1), Half(1)));
        assert!(!triangle(Half(2), Half(2), Half(6)));
        assert!(!triangle(Half(-2), Half(2), Half(0)));
    }

    #[test]
    fn test_raw_six_j() {
        let w = WignerCoefficients;
        let toler = Toler { abserr: 1e-14, relerr: 1e-12 };
        toler_assert_eq!(toler, w.six_j(&six_j([2, 2, 2, 2, 2, 2])), 1.0 / 6.0);
        toler_assert_eq!(toler, w.six_j(&six_j([1, 1, 2, 1, 1, 0])), 0.5);
        toler_assert_eq!(toler, w.six_j(&six_j([2, 2, 2, 1, 1, 1])), -1.0 / 3.0);
        toler_assert_eq!(toler, w.six_j(&six_j([4, 2, 2, 2, 2, 2])), 1.0 / 6.0);
    }

    #[test]
    fn test_raw_nine_j() {
        let w = WignerCoefficients;
        let toler = Toler { abserr: 1e-14, relerr: 1e-12 };
        toler_assert_eq!(toler,
                         w.nine_j(&nine_j([2, 2, 0, 2, 2, 0, 0, 0, 0])),
                         1.0 / 3.0);
        toler_assert_eq!(toler,
                         w.nine_j(&nine_j([1, 1, 2, 1, 1, 2, 2, 2, 4])),
                         1.0 / 9.0);
    }

    #[test]
    fn test_raw_moshinsky() {
        let w = WignerCoefficients;
        let toler = Toler { abserr: 1e-13, relerr: 1e-12 };
        toler_assert_eq!(toler, w.moshinsky(&mosh([0, 0, 0, 0, 0, 0, 0, 0, 0])),
                         1.0);
        // 0p ⊗ 0s → (0p, 0s) and (0s, 0p)
        let a = w.moshinsky(&mosh([0, 1, 0, 0, 0, 1, 0, 0, 1]));
        let b = w.moshinsky(&mosh([0, 0, 0, 1, 0, 1, 0, 0, 1]));
        toler_assert_eq!(toler, a, 0.5f64.sqrt());
        toler_assert_eq!(toler, b, 0.5f64.sqrt());
        toler_assert_eq!(toler, a * a + b * b, 1.0);
    }

    #[test]
    fn test_moshinsky_symmetries() {
        let w = WignerCoefficients;
        let toler = Toler { abserr: 1e-12, relerr: 1e-10 };
        let mut n = 0;
        for_each_canonical_moshinsky(3, |m| {
            let direct = w.moshinsky(&m);
            let swapped = Moshinsky { n1: m.n2, l1: m.l2,
                                      n2: m.n1, l2: m.l1, .. m };
            let (sign, canon) = swapped.canonicalize();
            assert_eq!(canon, m);
            toler_assert_eq!(toler, w.moshinsky(&swapped), sign * direct);
            let exchanged = Moshinsky { n_cm: m.n_rel, l_cm: m.l_rel,
                                        n_rel: m.n_cm, l_rel: m.l_cm, .. m };
            let (sign, canon) = exchanged.canonicalize();
            assert_eq!(canon, m);
            toler_assert_eq!(toler, w.moshinsky(&exchanged), sign * direct);
            n += 1;
        });
        assert!(n > 0);
    }

    #[test]
    fn test_keys_distinct() {
        let mut keys = HashSet::new();
        let r = 0 .. 6;
        for a in r.clone() { for b in r.clone() { for c in r.clone() {
            for d in r.clone() { for e in r.clone() { for f in r.clone() {
                let key = six_j([a, b, c, d, e, f]).key().unwrap();
                assert!(keys.insert(key));
            }}}
        }}}
        assert_eq!(six_j([1024, 0, 0, 0, 0, 0]).key(), None);
        assert_eq!(six_j([1023, 0, 0, 0, 0, 0]).key(), Some(1023 << 50));
        assert_eq!(nine_j([0, 0, 0, 0, 0, 0, 0, 0, 128]).key(), None);
        assert_eq!(mosh([0, 0, 0, 0, 0, 0, 0, 0, -1]).key(), None);

        let mut keys = HashSet::new();
        for_each_canonical_moshinsky(8, |m| {
            assert!(keys.insert(m.key().unwrap()), "collision at {:?}", m);
        });
    }

    #[test]
    fn test_cached_lookups() {
        let r = Recoupling::new(4);
        assert!(r.six_j_is_empty());
        let s = six_j([2, 2, 2, 2, 2, 2]);
        let x = r.six_j(s);
        assert!(!r.six_j_is_empty());
        assert_eq!(r.six_j(s).to_bits(), x.to_bits());
        assert_eq!(r.num_six_j(), 1);
        // selection rules are not cached
        assert_eq!(r.six_j(six_j([2, 2, 1, 2, 2, 2])), 0.0);
        assert_eq!(r.num_six_j(), 1);
        // too large to pack
        let big = six_j([1200, 1200, 0, 1200, 1200, 0]);
        assert!(big.key().is_none());
        let _ = r.six_j(big);
        assert_eq!(r.num_six_j(), 1);

        let m = mosh([0, 1, 0, 0, 0, 0, 0, 1, 1]);
        let (sign, canon) = m.canonicalize();
        assert_eq!(canon, mosh([0, 1, 0, 0, 0, 1, 0, 0, 1]));
        assert_eq!(r.moshinsky(m), sign * r.moshinsky(canon));
        assert_eq!(r.num_moshinsky(), 1);
        assert!(r.contains_moshinsky(m));
        assert_eq!(r.moshinsky(mosh([0, 0, 0, 0, 0, 1, 0, 0, 1])), 0.0);
    }
}
