//! Coefficient-wise element type conversion

use super::traits::XprTraits;
use super::{Nest, Xpr};
use crate::dtype::Element;
use std::marker::PhantomData;

/// Expression converting every coefficient of `X` to element type `U`
///
/// Conversion goes through [`Element::to_f64`] and [`Element::from_f64`], so
/// integers saturate and `bool` maps to and from 0 / 1. This is the explicit
/// way to combine operands of different element types, e.g. an `f32`
/// "then" with an `f64` "else" in a select.
#[derive(Clone, Debug)]
pub struct Cast<X, U> {
    inner: X,
    _marker: PhantomData<U>,
}

impl<X: Xpr, U: Element> Cast<X, U> {
    /// Wrap `inner`
    pub fn new(inner: X) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<X: Xpr, U: Element> Xpr for Cast<X, U> {
    type Scalar = U;
    const TRAITS: XprTraits = XprTraits::cast(&X::TRAITS, U::DTYPE);

    #[inline]
    fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.inner.cols()
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> U {
        U::from_f64(self.inner.coeff(row, col).to_f64())
    }

    #[inline]
    fn coeff_linear(&self, index: usize) -> U {
        U::from_f64(self.inner.coeff_linear(index).to_f64())
    }
}

impl<X: Xpr + Clone, U: Element> Nest for Cast<X, U> {
    type Nested<'a>
        = Self
    where
        Self: 'a;

    #[inline]
    fn nested(&self) -> Self::Nested<'_> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::matrix::Matrix;
    use crate::xpr::XprBase;

    #[test]
    fn test_cast_coefficients() {
        let m = Matrix::from_slice(&[0.0f64, 1.5, -2.7, 300.0], 2, 2);
        assert_eq!(m.cast::<i32>().eval().as_slice(), &[0, 1, -2, 300]);
        assert_eq!(m.cast::<u8>().eval().as_slice(), &[0, 1, 0, 255]);
        assert_eq!(m.cast::<bool>().eval().as_slice(), &[false, true, true, true]);
    }

    #[test]
    fn test_cast_descriptor() {
        let m = Matrix::from_element(2, 2, 1u8);
        let cast = m.cast::<f32>();
        let traits = cast.traits();
        assert_eq!(traits.dtype, DType::F32);
        assert_eq!(traits.coeff_read_cost, 2);
        assert!(traits.flags.linear_access);
        assert!(!traits.flags.lvalue);
    }
}
