/// Check whether two `f64` numbers are equal within the given
/// [`Toler`](utils/struct.Toler.html).
///
/// ```
/// #[macro_use]
/// extern crate modelspace;
///
/// use modelspace::utils::Toler;
///
/// fn main() {
///     toler_assert_eq!(Toler { abserr: 1e-2, relerr: 1e-3 }, 10.0, 10.02);
/// }
/// ```
#[macro_export]
macro_rules! toler_assert_eq {
    ($toler:expr, $left:expr, $right:expr) => {
        let toler = &$toler;
        let left = $left;
        let right = $right;
        assert!(toler.is_eq(left, right),
                "{} does not equal to {} within {:?}",
                left, right, toler)
    }
}

/// Declare a regular expression (`Regex`) cached via `lazy_static!`.
/// This macro is mainly for internal use.
///
/// ```
/// #[macro_use]
/// extern crate lazy_static;
/// #[macro_use]
/// extern crate modelspace;
/// extern crate regex;
///
/// use regex::Regex;
///
/// fn main() {
///     let r: &Regex = re!(r"^([pn])(\d+)([a-z])(\d+)$");
///     assert!(r.is_match("p0s1"));
/// }
/// ```
#[macro_export]
macro_rules! re {
    ($e:expr) => {
        {
            lazy_static! {
                static ref REGEX: Regex = Regex::new($e)
                    .expect("invalid regular expression literal");
            }
            &REGEX
        }
    }
}
