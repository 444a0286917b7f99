//! Integer roots for inverting the packed index formulas.

/// Calculate the integer square root `⌊√n⌋`.
pub fn isqrt_u64(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    // use floating-point calculations to get an initial guess
    let mut r = (n as f64).sqrt() as u64;
    // apply integer variant of Newton's method to refine guess
    loop { // [invariant] n > 0 && r > 0
        let r_new = (r + n / r) / 2;
        // either no change or a +1 increase ends the iteration; the latter
        // avoids nonconverging cycles
        if r == r_new || r == r_new - 1 {
            return r;
        }
        r = r_new;
    }
}

/// Calculate the integer cube root `⌊∛n⌋`.
pub fn icbrt_u64(n: u64) -> u64 {
    // the floating-point guess is off by at most one for n < 2^64
    let mut r = (n as f64).cbrt() as u64;
    while r > 0 && r.checked_pow(3).map(|c| c > n).unwrap_or(true) {
        r -= 1;
    }
    while (r + 1).checked_pow(3).map(|c| c <= n).unwrap_or(false) {
        r += 1;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isqrt() {
        for n in 0 .. 65535 {
            assert!((isqrt_u64(n)).pow(2) <= n, "⌊√{n}⌋^2 ≤ {n}", n = n);
            assert!((isqrt_u64(n) + 1).pow(2) > n,
                    "(⌊√{n}⌋ + 1)^2 > {n}", n = n);
        }
        for r in 1 .. 65535 {
            assert_eq!(isqrt_u64(r * r - 1), r - 1);
            assert_eq!(isqrt_u64(r * r), r);
            assert_eq!(isqrt_u64(r * r + 1), r);
        }
        for n in 0xffffffffffffff00 .. 0xffffffffffffffff {
            assert_eq!(isqrt_u64(n), 0xffffffff);
        }
    }

    #[test]
    fn test_icbrt() {
        for n in 0 .. 100000 {
            let r = icbrt_u64(n);
            assert!(r.pow(3) <= n && (r + 1).pow(3) > n, "⌊∛{}⌋ = {}", n, r);
        }
        for r in 1 .. 2642245u64 {
            if r % 997 != 0 {
                continue;
            }
            assert_eq!(icbrt_u64(r * r * r - 1), r - 1);
            assert_eq!(icbrt_u64(r * r * r), r);
        }
        assert_eq!(icbrt_u64(u64::max_value()), 2642245);
    }
}
