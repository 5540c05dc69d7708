//! Owning matrix with a compile-time shape

use crate::dtype::Element;
use crate::xpr::{Dim, Nest, Stored, Xpr, XprTraits};

/// Dense `R x C` matrix stored inline, row-major
///
/// Its shape is part of its type, so expressions over it carry fixed
/// dimensions in their descriptors. Small instances are copied into the
/// nodes that use them; large ones are borrowed (see
/// [`NestMode::choose`](crate::xpr::NestMode::choose)).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SMatrix<T, const R: usize, const C: usize> {
    data: [[T; C]; R],
}

impl<T: Element, const R: usize, const C: usize> SMatrix<T, R, C> {
    /// Create a matrix from its rows
    pub fn new(data: [[T; C]; R]) -> Self {
        Self { data }
    }

    /// A matrix of zeros
    pub fn zeros() -> Self {
        Self {
            data: [[T::zero(); C]; R],
        }
    }

    /// Create a matrix whose coefficient `(row, col)` is `f(row, col)`
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = [[T::zero(); C]; R];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = f(row, col);
            }
        }
        Self { data }
    }

    /// The rows of the matrix
    pub fn as_array(&self) -> &[[T; C]; R] {
        &self.data
    }

    /// Row-major coefficients
    pub fn as_slice(&self) -> &[T] {
        self.data.as_flattened()
    }

    /// Coefficient at `(row, col)`, or `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.data.get(row)?.get(col).copied()
    }
}

impl<T: Element, const R: usize, const C: usize> Xpr for SMatrix<T, R, C> {
    type Scalar = T;
    const TRAITS: XprTraits = XprTraits::plain(T::DTYPE, Dim::Fixed(R), Dim::Fixed(C));

    #[inline]
    fn rows(&self) -> usize {
        R
    }

    #[inline]
    fn cols(&self) -> usize {
        C
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> T {
        self.data[row][col]
    }

    #[inline]
    fn coeff_linear(&self, index: usize) -> T {
        self.data.as_flattened()[index]
    }
}

impl<T: Element, const R: usize, const C: usize> Nest for SMatrix<T, R, C> {
    type Nested<'a>
        = Stored<'a, Self>
    where
        Self: 'a;

    #[inline]
    fn nested(&self) -> Self::Nested<'_> {
        Stored::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xpr::{NestMode, XprBase};

    #[test]
    fn test_fixed_shape_descriptor() {
        let traits = <SMatrix<f32, 3, 2> as Xpr>::TRAITS;
        assert_eq!(traits.rows, Dim::Fixed(3));
        assert_eq!(traits.cols, Dim::Fixed(2));
        assert_eq!(traits.max_cols, Dim::Fixed(2));
        assert!(traits.flags.lvalue);
    }

    #[test]
    fn test_small_matrix_is_copied() {
        let m = SMatrix::new([[1.0f64, 2.0], [3.0, 4.0]]);
        assert_eq!(<SMatrix<f64, 2, 2> as Xpr>::NEST, NestMode::Owned);
        assert_eq!(m.nested().mode(), NestMode::Owned);
    }

    #[test]
    fn test_large_matrix_is_borrowed() {
        let m = SMatrix::<f64, 4, 4>::zeros();
        assert_eq!(<SMatrix<f64, 4, 4> as Xpr>::NEST, NestMode::Borrowed);
        assert_eq!(m.nested().mode(), NestMode::Borrowed);
    }

    #[test]
    fn test_coefficients() {
        let m = SMatrix::<u8, 2, 3>::from_fn(|r, c| (r * 3 + c) as u8);
        assert_eq!(m.coeff(1, 0), 3);
        assert_eq!(m.coeff_linear(5), 5);
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(m.eval().as_slice(), m.as_slice());
    }
}
