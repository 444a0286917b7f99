#[macro_use]
extern crate modelspace;
extern crate rand;
extern crate rand_xorshift;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use modelspace::half::Half;
use modelspace::recoupling::{for_each_canonical_moshinsky, Moshinsky, NineJ,
                             RawCoefficients, SixJ, WignerCoefficients};
use modelspace::utils::Toler;
use modelspace::{Conf, ModelSpace, ModelSpaceBuilder};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

const TOLER: Toler = Toler { abserr: 1e-12, relerr: 1e-10 };

const RNG_SEED: [u8; 16] = [
    0x54, 0x67, 0x3a, 0x19, 0x69, 0xd4, 0xa7, 0xa8,
    0x05, 0x0e, 0x83, 0x97, 0xbb, 0xa7, 0x3b, 0x11,
];

fn model_space(n2max: i32) -> ModelSpace {
    let conf = Conf { n2max, n3max: 0, .. Conf::with_nmax(1) };
    ModelSpaceBuilder::oscillator(conf, &["p0s1", "n0s1"], &[])
        .unwrap()
        .build()
        .unwrap()
}

/// Forwards to `WignerCoefficients` while counting the calls.
#[derive(Debug, Default)]
struct Counting {
    calls: AtomicUsize,
}

impl Counting {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RawCoefficients for Counting {
    fn six_j(&self, args: &SixJ) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        WignerCoefficients.six_j(args)
    }

    fn nine_j(&self, args: &NineJ) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        WignerCoefficients.nine_j(args)
    }

    fn moshinsky(&self, args: &Moshinsky) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        WignerCoefficients.moshinsky(args)
    }
}

fn six_j(t: [i32; 6]) -> SixJ {
    SixJ { j1: Half(t[0]), j2: Half(t[1]), j3: Half(t[2]),
           j4: Half(t[3]), j5: Half(t[4]), j6: Half(t[5]) }
}

#[test]
fn test_memoization() {
    let counting = Arc::new(Counting::default());
    let ms = model_space(2).with_evaluator(counting.clone());
    assert!(ms.six_j_is_empty());

    let s = six_j([2, 2, 2, 1, 1, 1]);
    let x = ms.six_j(s);
    toler_assert_eq!(TOLER, x, -1.0 / 3.0);
    assert_eq!(ms.six_j(s), x);
    assert_eq!(ms.six_j(s), x);
    assert_eq!(counting.calls(), 1);
    assert!(!ms.six_j_is_empty());

    // selection rules short-circuit without touching the cache
    assert_eq!(ms.six_j(six_j([2, 2, 2, 1, 1, 0])), 0.0);
    assert_eq!(ms.recoupling().num_six_j(), 1);
    assert_eq!(counting.calls(), 1);

    let nj = NineJ { j1: Half(1), j2: Half(1), j3: Half(2),
                     j4: Half(1), j5: Half(1), j6: Half(2),
                     j7: Half(2), j8: Half(2), j9: Half(4) };
    toler_assert_eq!(TOLER, ms.nine_j(nj), 1.0 / 9.0);
    toler_assert_eq!(TOLER, ms.nine_j(nj), 1.0 / 9.0);
    assert_eq!(counting.calls(), 2);

    // both orderings of the particles share one cache entry
    let m = Moshinsky { n_cm: 0, l_cm: 1, n_rel: 0, l_rel: 0,
                        n1: 0, l1: 1, n2: 0, l2: 0, l: 1 };
    let swapped = Moshinsky { n1: 0, l1: 0, n2: 0, l2: 1, .. m };
    let a = ms.moshinsky(m);
    let b = ms.moshinsky(swapped);
    toler_assert_eq!(TOLER, a, 0.5f64.sqrt());
    toler_assert_eq!(TOLER, b.abs(), a);
    assert_eq!(counting.calls(), 3);
    assert_eq!(ms.recoupling().num_moshinsky(), 1);
    assert_eq!(ms.moshinsky(Moshinsky { l: 2, .. m }), 0.0);
    assert_eq!(counting.calls(), 3);
}

#[test]
fn test_precalculate_moshinsky() {
    let ms = model_space(2);
    let n = ms.precalculate_moshinsky();
    assert!(n > 0);
    assert_eq!(ms.recoupling().num_moshinsky(), n);
    // idempotent
    assert_eq!(ms.precalculate_moshinsky(), n);
    assert_eq!(ms.recoupling().num_moshinsky(), n);

    let raw = WignerCoefficients;
    for_each_canonical_moshinsky(2, |m| {
        assert!(ms.recoupling().contains_moshinsky(m));
        let swapped = Moshinsky { n1: m.n2, l1: m.l2, n2: m.n1, l2: m.l1,
                                  .. m };
        assert!(ms.recoupling().contains_moshinsky(swapped));
        // the cache stores the raw value unchanged
        assert_eq!(ms.moshinsky(m), raw.moshinsky(&m));
    });
    let beyond = Moshinsky { n_cm: 0, l_cm: 3, n_rel: 0, l_rel: 0,
                             n1: 0, l1: 3, n2: 0, l2: 0, l: 3 };
    assert!(!ms.recoupling().contains_moshinsky(beyond));
}

#[test]
fn test_unitarity() {
    // ∑ over (N Λ n λ) of <N Λ, n λ; L | n1 l1, n2 l2; L>² = 1
    let ms = model_space(4);
    ms.precalculate_moshinsky();
    for &(n1, l1, n2, l2, l) in &[(0, 1, 0, 1, 0), (0, 2, 0, 1, 2),
                                   (1, 0, 0, 1, 1), (0, 2, 1, 0, 2)] {
        let e = 2 * n1 + l1 + 2 * n2 + l2;
        let mut sum = 0.0;
        for e_cm in 0 ..= e {
            for l_cm in (e_cm % 2 ..= e_cm).step_by(2) {
                let e_rel = e - e_cm;
                for l_rel in (e_rel % 2 ..= e_rel).step_by(2) {
                    let x = ms.moshinsky(Moshinsky {
                        n_cm: (e_cm - l_cm) / 2, l_cm,
                        n_rel: (e_rel - l_rel) / 2, l_rel,
                        n1, l1, n2, l2, l,
                    });
                    sum += x * x;
                }
            }
        }
        toler_assert_eq!(TOLER, sum, 1.0);
    }
}

#[test]
fn test_threaded() {
    let ms = Arc::new(model_space(2));
    let mut children = Vec::default();
    for _ in 0 .. 4 {
        let ms = ms.clone();
        children.push(thread::spawn(move || {
            let raw = WignerCoefficients;
            for_each_canonical_moshinsky(2, |m| {
                assert_eq!(ms.moshinsky(m), raw.moshinsky(&m));
            });
            for j in 0 .. 4 {
                let s = six_j([j, j, 2, 1, 1, 1]);
                let expected = if s.is_valid() { raw.six_j(&s) } else { 0.0 };
                assert_eq!(ms.six_j(s), expected);
            }
        }));
    }
    for child in children {
        child.join().unwrap();
    }
    let mut n = 0;
    for_each_canonical_moshinsky(2, |_| n += 1);
    assert_eq!(ms.recoupling().num_moshinsky(), n);
}

#[test]
fn test_six_j_symmetries() {
    let ms = model_space(0);
    let mut rng = XorShiftRng::from_seed(RNG_SEED);
    let mut valid = 0;
    for _ in 0 .. 500 {
        let t: Vec<i32> = (0 .. 6).map(|_| rng.gen_range(0 ..= 6)).collect();
        let s = six_j([t[0], t[1], t[2], t[3], t[4], t[5]]);
        let x = ms.six_j(s);
        if s.is_valid() {
            valid += 1;
        } else {
            assert_eq!(x, 0.0);
        }
        // column permutation
        let p = six_j([t[1], t[2], t[0], t[4], t[5], t[3]]);
        toler_assert_eq!(TOLER, ms.six_j(p), x);
        let p = six_j([t[1], t[0], t[2], t[4], t[3], t[5]]);
        toler_assert_eq!(TOLER, ms.six_j(p), x);
        // exchange of upper and lower arguments in two columns
        let p = six_j([t[3], t[4], t[2], t[0], t[1], t[5]]);
        toler_assert_eq!(TOLER, ms.six_j(p), x);
    }
    assert!(valid > 0);
}
