//! Borrowed, possibly strided matrix view

use super::Layout;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::xpr::{Dim, Flags, Nest, Xpr, XprTraits};

/// Read-only view into a matrix buffer
///
/// A view is a handle (a slice plus a [`Layout`]) and is copied freely when
/// nested into an expression. Its layout may be strided (a transpose or a
/// block), so linear reads are not native.
#[derive(Copy, Clone, Debug)]
pub struct MatrixView<'a, T> {
    data: &'a [T],
    layout: Layout,
}

impl<'a, T: Element> MatrixView<'a, T> {
    pub(crate) fn new(data: &'a [T], layout: Layout) -> Self {
        Self { data, layout }
    }

    /// Memory layout of the view
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Whether the viewed coefficients are contiguous and row-major
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Coefficient at `(row, col)`, or `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.layout.index(row, col).map(|i| self.data[i])
    }

    /// Transposed view
    pub fn transpose(&self) -> Self {
        Self {
            data: self.data,
            layout: self.layout.transpose(),
        }
    }

    /// View of the `rows x cols` block starting at `(row, col)`
    pub fn block(&self, row: usize, col: usize, rows: usize, cols: usize) -> Result<Self> {
        let layout = self
            .layout
            .block(row, col, rows, cols)
            .ok_or_else(|| Error::InvalidArgument {
                arg: "block",
                reason: format!(
                    "{rows}x{cols} block at ({row}, {col}) does not fit in {}",
                    self.layout
                ),
            })?;
        Ok(Self {
            data: self.data,
            layout,
        })
    }
}

impl<T: Element> Xpr for MatrixView<'_, T> {
    type Scalar = T;
    const TRAITS: XprTraits = XprTraits {
        flags: Flags::NONE,
        ..XprTraits::plain(T::DTYPE, Dim::Dynamic, Dim::Dynamic)
    };

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
}

impl<'v, T: Element> Nest for MatrixView<'v, T> {
    type Nested<'a>
        = Self
    where
        Self: 'a;

    #[inline]
    fn nested(&self) -> Self::Nested<'_> {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;
    use crate::xpr::{NestMode, XprBase};

    #[test]
    fn test_transposed_view() {
        let m = Matrix::from_slice(&[1, 2, 3, 4, 5, 6], 2, 3);
        let t = m.transpose();
        assert_eq!(t.shape(), [3, 2]);
        assert!(!t.is_contiguous());
        assert_eq!(t.coeff(2, 1), 6);
        assert_eq!(t.coeff_linear(1), 4);
        assert_eq!(t.eval().as_slice(), &[1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_block_view() {
        let m = Matrix::from_fn(3, 4, |r, c| (r * 4 + c) as i32);
        let b = m.block(1, 1, 2, 2).unwrap();
        assert_eq!(b.eval().as_slice(), &[5, 6, 9, 10]);
        assert_eq!(b.get(1, 1), Some(10));
        assert!(m.block(2, 3, 2, 2).is_err());
    }

    #[test]
    fn test_view_descriptor() {
        let traits = <MatrixView<'_, f32> as Xpr>::TRAITS;
        assert!(!traits.flags.linear_access);
        assert!(!traits.flags.lvalue);
        assert_eq!(<MatrixView<'_, f32> as Xpr>::NEST, NestMode::Owned);
    }
}
