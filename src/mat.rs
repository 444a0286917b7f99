//! Dense matrices, used for subspace projectors.
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul};
use num::Zero;

/// The indexing convention is row-major.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatShape {
    /// The slow index.
    pub num_rows: usize,
    /// The fast index.
    pub num_cols: usize,
}

impl MatShape {
    pub fn contains(&self, i: usize, j: usize) -> bool {
        i < self.num_rows && j < self.num_cols
    }

    #[inline]
    fn raw_index(&self, i: usize, j: usize) -> usize {
        assert!(self.contains(i, j),
                "index ({}, {}) out of bounds for {}×{} matrix",
                i, j, self.num_rows, self.num_cols);
        i * self.num_cols + j
    }
}

/// Owned matrix with packed row-major storage.
#[derive(Clone, Default, PartialEq)]
pub struct Mat<T> {
    data: Vec<T>,
    shape: MatShape,
}

impl<T: fmt::Debug> fmt::Debug for Mat<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

impl<T: Clone + Zero> Mat<T> {
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![T::zero(); num_rows * num_cols],
            shape: MatShape { num_rows, num_cols },
        }
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.num_cols(), self.num_rows());
        for (i, row) in self.rows().enumerate() {
            for (j, x) in row.iter().enumerate() {
                t[(j, i)] = x.clone();
            }
        }
        t
    }
}

impl<T> Mat<T> {
    #[inline]
    pub fn shape(&self) -> MatShape {
        self.shape
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.shape.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.shape.num_cols
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.num_rows(), self.num_cols())
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if self.shape.contains(i, j) {
            self.data.get(i * self.num_cols() + j)
        } else {
            None
        }
    }

    pub fn row(&self, i: usize) -> Option<&[T]> {
        if i < self.num_rows() {
            let n = self.num_cols();
            Some(&self.data[i * n .. (i + 1) * n])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        let n = self.num_cols();
        (0 .. self.num_rows()).map(move |i| &self.data[i * n .. (i + 1) * n])
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<(usize, usize)> for Mat<T> {
    type Output = T;
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.data[self.shape.raw_index(i, j)]
    }
}

impl<T> IndexMut<(usize, usize)> for Mat<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        let k = self.shape.raw_index(i, j);
        &mut self.data[k]
    }
}

impl<'a, T> Mul<&'a Mat<T>> for &'a Mat<T>
    where T: Clone + Zero + Mul<Output = T> + Add<Output = T>
{
    type Output = Mat<T>;
    fn mul(self, other: &'a Mat<T>) -> Self::Output {
        assert_eq!(self.num_cols(), other.num_rows(),
                   "incompatible matrix dimensions");
        let mut r: Mat<T> = Mat::zeros(self.num_rows(), other.num_cols());
        for i in 0 .. self.num_rows() {
            for k in 0 .. self.num_cols() {
                let a = self[(i, k)].clone();
                if a.is_zero() {
                    continue;
                }
                for j in 0 .. other.num_cols() {
                    let x = r[(i, j)].clone() + a.clone() * other[(k, j)].clone();
                    r[(i, j)] = x;
                }
            }
        }
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul() {
        let mut a = Mat::zeros(2, 3);
        a[(0, 1)] = 1.0;
        a[(1, 2)] = 1.0;
        let mut b = Mat::zeros(3, 2);
        b[(0, 0)] = 5.0;
        b[(1, 0)] = 2.0;
        b[(1, 1)] = 3.0;
        b[(2, 1)] = 7.0;
        let c = &a * &b;
        assert_eq!(c.dims(), (2, 2));
        assert_eq!(c.as_slice(), &[2.0, 3.0, 0.0, 7.0]);
        let t = a.transpose();
        assert_eq!(t.dims(), (3, 2));
        assert_eq!(t[(2, 1)], 1.0);
        assert_eq!(a.get(2, 0), None);
        assert_eq!(a.row(1), Some(&[0.0, 0.0, 1.0][..]));
    }
}
