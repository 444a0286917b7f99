//! Miscellaneous utilities.
use conv::ValueInto;

/// Shorthand for casting numbers.  Panics if out of range.
pub fn cast<T: ValueInto<U>, U>(x: T) -> U {
    x.value_into().expect("integer conversion failure")
}

/// Tolerance for comparing floating-point numbers.
///
/// Two numbers `a` and `b` are considered equal if
/// `|a − b| ≤ abserr + relerr × max(|a|, |b|)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Toler {
    pub abserr: f64,
    pub relerr: f64,
}

/// `{ abserr: 1e-12, relerr: 1e-12 }`
impl Default for Toler {
    fn default() -> Self {
        Self {
            abserr: 1e-12,
            relerr: 1e-12,
        }
    }
}

impl Toler {
    pub fn is_eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.abserr + self.relerr * a.abs().max(b.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toler() {
        let toler = Toler { abserr: 1e-2, relerr: 1e-3 };
        assert!(toler.is_eq(10.0, 10.02));
        assert!(!toler.is_eq(10.0, 10.05));
        assert!(Toler::default().is_eq(0.0, 1e-13));
        let n: i32 = cast(42usize);
        assert_eq!(n, 42);
    }
}
