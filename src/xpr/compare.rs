//! Coefficient-wise comparison, the usual source of a condition

use super::traits::XprTraits;
use super::{Nest, Xpr, check_same_shape};
use crate::error::Result;

/// Comparison operator applied coefficient by coefficient
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CmpOp {
    /// `a == b`
    Eq,
    /// `a != b`
    Ne,
    /// `a < b`
    Lt,
    /// `a <= b`
    Le,
    /// `a > b`
    Gt,
    /// `a >= b`
    Ge,
}

impl CmpOp {
    /// Apply the operator to a pair of values
    #[inline]
    pub fn apply<T: PartialOrd>(self, a: T, b: T) -> bool {
        match self {
            Self::Eq => a == b,
            Self::Ne => a != b,
            Self::Lt => a < b,
            Self::Le => a <= b,
            Self::Gt => a > b,
            Self::Ge => a >= b,
        }
    }
}

/// Boolean expression `lhs op rhs`, evaluated coefficient by coefficient
#[derive(Clone, Debug)]
pub struct Compare<L, R> {
    op: CmpOp,
    lhs: L,
    rhs: R,
}

impl<L, R> Compare<L, R>
where
    L: Xpr,
    R: Xpr<Scalar = L::Scalar>,
{
    /// Build the comparison
    ///
    /// # Panics
    ///
    /// Panics if the operands have different shapes.
    pub fn new(op: CmpOp, lhs: L, rhs: R) -> Self {
        match Self::try_new(op, lhs, rhs) {
            Ok(compare) => compare,
            Err(err) => panic!("Compare::new: {err}"),
        }
    }

    /// Build the comparison, reporting a shape mismatch as an error
    pub fn try_new(op: CmpOp, lhs: L, rhs: R) -> Result<Self> {
        const {
            assert!(
                L::TRAITS.shape_compatible(&R::TRAITS),
                "compare operands have incompatible fixed shapes"
            );
        }
        check_same_shape("compare", &lhs, &rhs)?;
        Ok(Self { op, lhs, rhs })
    }

    /// The comparison operator
    pub fn op(&self) -> CmpOp {
        self.op
    }
}

impl<L, R> Xpr for Compare<L, R>
where
    L: Xpr,
    R: Xpr<Scalar = L::Scalar>,
{
    type Scalar = bool;
    const TRAITS: XprTraits = XprTraits::compare(&L::TRAITS, &R::TRAITS);

    #[inline]
    fn rows(&self) -> usize {
        self.lhs.rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.lhs.cols()
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> bool {
        self.op.apply(self.lhs.coeff(row, col), self.rhs.coeff(row, col))
    }

    #[inline]
    fn coeff_linear(&self, index: usize) -> bool {
        self.op.apply(self.lhs.coeff_linear(index), self.rhs.coeff_linear(index))
    }
}

impl<L, R> Nest for Compare<L, R>
where
    L: Xpr + Clone,
    R: Xpr<Scalar = L::Scalar> + Clone,
{
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
    fn test_cmp_op_apply() {
        assert!(CmpOp::Lt.apply(1, 2));
        assert!(!CmpOp::Gt.apply(1.0, 2.0));
        assert!(CmpOp::Ge.apply(2u8, 2u8));
        assert!(CmpOp::Ne.apply(true, false));
        assert!(!CmpOp::Eq.apply(f64::NAN, f64::NAN));
    }

    #[test]
    fn test_compare_coefficients() {
        let a = Matrix::from_slice(&[1, 5, 3, 8], 2, 2);
        let b = Matrix::from_slice(&[2, 5, 1, 9], 2, 2);

        let gt = a.greater_than(&b);
        assert_eq!(gt.op(), CmpOp::Gt);
        assert_eq!(gt.eval().as_slice(), &[false, false, true, false]);
        assert_eq!(a.less_equal(&b).eval().as_slice(), &[true, true, false, true]);
        assert_eq!(
            a.compare_scalar(CmpOp::Ge, 3).eval().as_slice(),
            &[false, true, true, true]
        );
    }

    #[test]
    fn test_compare_descriptor() {
        let a = Matrix::from_element(1, 1, 0.5f32);
        let cmp = a.less_than(&a);
        assert_eq!(cmp.traits().dtype, DType::Bool);
        assert_eq!(cmp.traits().coeff_read_cost, 3);
    }

    #[test]
    fn test_try_new_reports_mismatch() {
        let a = Matrix::from_element(2, 2, 0i8);
        let b = Matrix::from_element(1, 2, 0i8);
        assert!(Compare::try_new(CmpOp::Eq, &a, &b).is_err());
    }
}
