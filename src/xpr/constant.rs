//! Constant-valued expression

use super::traits::{Flags, XprTraits};
use super::{Nest, Xpr};
use crate::dtype::Element;

/// Expression whose every coefficient is the same value
///
/// This is what a scalar operand is promoted to when it takes part in a
/// coefficient-wise node, e.g. the `els` of
/// [`XprBase::select_else_scalar`](super::XprBase::select_else_scalar).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Constant<T> {
    rows: usize,
    cols: usize,
    value: T,
}

impl<T: Element> Constant<T> {
    /// A `rows x cols` expression filled with `value`
    pub fn new(rows: usize, cols: usize, value: T) -> Self {
        Self { rows, cols, value }
    }

    /// The repeated value
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Element> Xpr for Constant<T> {
    type Scalar = T;
    const TRAITS: XprTraits = XprTraits::dynamic(T::DTYPE, Flags::HEREDITARY, 1);

    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> T {
        debug_assert!(row < self.rows && col < self.cols);
        self.value
    }

    #[inline]
    fn coeff_linear(&self, index: usize) -> T {
        debug_assert!(index < self.rows * self.cols);
        self.value
    }
}

impl<T: Element> Nest for Constant<T> {
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
    use crate::dtype::DType;
    use crate::xpr::{NestMode, XprBase};

    #[test]
    fn test_constant_coefficients() {
        let c = Constant::new(2, 3, 7u16);
        assert_eq!(c.shape(), [2, 3]);
        assert_eq!(c.coeff(1, 2), 7);
        assert_eq!(c.coeff_linear(5), 7);
        assert_eq!(c.value(), 7);
    }

    #[test]
    fn test_constant_descriptor() {
        let traits = <Constant<f32> as Xpr>::TRAITS;
        assert_eq!(traits.dtype, DType::F32);
        assert_eq!(traits.coeff_read_cost, 1);
        assert!(traits.flags.linear_access);
        assert_eq!(<Constant<f32> as Xpr>::NEST, NestMode::Owned);
    }

    #[test]
    fn test_empty_constant() {
        let c = Constant::new(0, 4, 1.0f64);
        assert!(c.is_empty());
        assert_eq!(c.eval().shape(), [0, 4]);
    }
}
