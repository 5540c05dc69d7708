//! Owning, dynamically sized matrix

use super::{Layout, MatrixView};
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::xpr::{Constant, Dim, Nest, Xpr, XprTraits};
use std::fmt;
use std::ops::Index;

/// Dense matrix with a runtime shape, stored row-major in a `Vec`
///
/// `Matrix` is the usual leaf of an expression tree and the usual target of
/// evaluation. As an operand it is always borrowed, never copied.
#[derive(Clone, PartialEq)]
pub struct Matrix<T: Element> {
    data: Vec<T>,
    layout: Layout,
}

impl<T: Element> Matrix<T> {
    /// A `rows x cols` matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_element(rows, cols, T::zero())
    }

    /// A `rows x cols` matrix with every coefficient set to `value`
    pub fn from_element(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: vec![value; rows * cols],
            layout: Layout::contiguous(rows, cols),
        }
    }

    /// Create a matrix from row-major data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal `rows * cols`.
    /// For a fallible alternative, use [`Self::try_from_vec`].
    pub fn from_slice(data: &[T], rows: usize, cols: usize) -> Self {
        Self::try_from_vec(data.to_vec(), rows, cols).expect("Matrix::from_slice failed")
    }

    /// Create a matrix from row-major data (fallible version)
    pub fn try_from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        let expected_len = rows.checked_mul(cols).ok_or_else(|| Error::InvalidArgument {
            arg: "shape",
            reason: format!("{rows}x{cols} overflows usize"),
        })?;
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: vec![rows, cols],
                got: vec![data.len()],
            });
        }
        Ok(Self {
            data,
            layout: Layout::contiguous(rows, cols),
        })
    }

    /// Create a matrix whose coefficient `(row, col)` is `f(row, col)`
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self {
            data,
            layout: Layout::contiguous(rows, cols),
        }
    }

    /// Constant expression of the given shape, the scalar-promotion factory
    pub fn constant(rows: usize, cols: usize, value: T) -> Constant<T> {
        Constant::new(rows, cols, value)
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.layout.rows()
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.layout.cols()
    }

    /// `[rows, cols]`
    #[inline]
    pub fn shape(&self) -> [usize; 2] {
        self.layout.shape()
    }

    /// Memory layout (always contiguous)
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Row-major coefficients
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Row-major coefficients, mutably
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix, returning its row-major coefficients
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Coefficient at `(row, col)`, or `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.layout.index(row, col).map(|i| self.data[i])
    }

    /// Overwrite the coefficient at `(row, col)`
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() {
            return Err(Error::IndexOutOfBounds {
                index: row,
                size: self.rows(),
            });
        }
        if col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                index: col,
                size: self.cols(),
            });
        }
        let i = self.layout.offset_of(row, col);
        self.data[i] = value;
        Ok(())
    }

    /// Borrow the whole matrix as a view
    pub fn view(&self) -> MatrixView<'_, T> {
        MatrixView::new(&self.data, self.layout)
    }

    /// Transposed view, without copying
    pub fn transpose(&self) -> MatrixView<'_, T> {
        self.view().transpose()
    }

    /// View of the `rows x cols` block starting at `(row, col)`
    pub fn block(
        &self,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixView<'_, T>> {
        self.view().block(row, col, rows, cols)
    }

    /// Evaluate `src` into this matrix
    ///
    /// Fails if `src` does not have the shape of `self`. `src` cannot borrow
    /// `self`, so the assignment never reads coefficients it has already
    /// overwritten.
    pub fn assign<X: Xpr<Scalar = T>>(&mut self, src: &X) -> Result<()> {
        crate::eval::assign(self, src)
    }
}

impl<T: Element> Xpr for Matrix<T> {
    type Scalar = T;
    const TRAITS: XprTraits = XprTraits::plain(T::DTYPE, Dim::Dynamic, Dim::Dynamic);

    #[inline]
    fn rows(&self) -> usize {
        self.layout.rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.layout.cols()
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.rows() && col < self.cols());
        self.data[self.layout.offset_of(row, col)]
    }

    #[inline]
    fn coeff_linear(&self, index: usize) -> T {
        self.data[index]
    }
}

impl<T: Element> Nest for Matrix<T> {
    type Nested<'a>
        = &'a Matrix<T>
    where
        Self: 'a;

    #[inline]
    fn nested(&self) -> Self::Nested<'_> {
        self
    }
}

impl<T: Element> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        let i = self
            .layout
            .index(row, col)
            .unwrap_or_else(|| panic!("index ({row}, {col}) out of bounds for {}", self.layout));
        &self.data[i]
    }
}

impl<T: Element> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("shape", &self.shape())
            .field("dtype", &T::DTYPE)
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xpr::NestMode;

    #[test]
    fn test_from_slice_row_major() {
        let m = Matrix::from_slice(&[1, 2, 3, 4, 5, 6], 2, 3);
        assert_eq!(m.shape(), [2, 3]);
        assert_eq!(m[(0, 2)], 3);
        assert_eq!(m[(1, 0)], 4);
        assert_eq!(m.coeff(1, 2), 6);
        assert_eq!(m.coeff_linear(4), 5);
    }

    #[test]
    fn test_try_from_vec_rejects_length() {
        let err = Matrix::try_from_vec(vec![1.0f32; 5], 2, 3).unwrap_err();
        assert_eq!(
            err,
            Error::ShapeMismatch {
                expected: vec![2, 3],
                got: vec![5],
            }
        );
    }

    #[test]
    fn test_get_and_set() {
        let mut m = Matrix::<i64>::zeros(2, 2);
        m.set(1, 0, 9).unwrap();
        assert_eq!(m.get(1, 0), Some(9));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(
            m.set(0, 2, 1),
            Err(Error::IndexOutOfBounds { index: 2, size: 2 })
        );
    }

    #[test]
    fn test_from_fn() {
        let m = Matrix::from_fn(2, 3, |r, c| (r * 10 + c) as u32);
        assert_eq!(m.as_slice(), &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_matrix_nests_by_reference() {
        assert_eq!(<Matrix<f64> as Xpr>::NEST, NestMode::Borrowed);
        assert_eq!(<&Matrix<f64> as Xpr>::NEST, NestMode::Owned);
        let m = Matrix::from_element(1, 1, 2.0f64);
        assert!(std::ptr::eq(m.nested(), &m));
    }

    #[test]
    fn test_constant_factory() {
        let c = Matrix::constant(2, 2, 4u8);
        assert_eq!(c.coeff(1, 1), 4);
    }
}
