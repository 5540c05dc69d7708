//! Lazy matrix expressions
//!
//! An expression is anything that can report a shape and answer "what is the
//! coefficient at `(row, col)`?" on demand. Nodes such as [`Select`] hold
//! their operands (chosen by [`Nest`]) and compute coefficients only when
//! asked; nothing is materialized until [`crate::eval`] walks the tree into
//! a [`Matrix`].
//!
//! ```
//! use densexpr::prelude::*;
//!
//! let m = Matrix::from_slice(&[1.0, -2.0, 3.0, -4.0], 2, 2);
//! let zeros = Matrix::from_element(2, 2, 0.0);
//!
//! // |m| without a temporary for the negation mask
//! let mask = m.greater_equal(&zeros);
//! let negated = Matrix::from_slice(&[-1.0, 2.0, -3.0, 4.0], 2, 2);
//! let abs = mask.select(&m, &negated).eval();
//! assert_eq!(abs.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
//! ```

mod cast;
mod compare;
mod constant;
mod nested;
mod select;
pub mod traits;

pub use cast::Cast;
pub use compare::{CmpOp, Compare};
pub use constant::Constant;
pub use nested::{NEST_BY_VALUE_MAX_BYTES, Nest, NestMode, Stored};
pub use select::Select;
pub use traits::{Dim, Flags, HUGE_COST, XprTraits};

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// A lazily evaluated, matrix-shaped expression
///
/// Implementors are read-only: coefficient access never mutates the
/// expression, so a shared expression may be read from several threads as
/// long as its operands are not mutated meanwhile.
pub trait Xpr {
    /// Element type of the coefficients
    type Scalar: Element;

    /// Static descriptor of this expression type
    const TRAITS: XprTraits;

    /// How this expression is held when it becomes an operand
    const NEST: NestMode =
        NestMode::choose(&Self::TRAITS, std::mem::size_of::<Self::Scalar>());

    /// Number of rows
    fn rows(&self) -> usize;

    /// Number of columns
    fn cols(&self) -> usize;

    /// Coefficient at `(row, col)`
    ///
    /// Callers guarantee `row < rows()` and `col < cols()`.
    fn coeff(&self, row: usize, col: usize) -> Self::Scalar;

    /// Coefficient at a row-major linear index
    ///
    /// Every expression answers this; types whose descriptor sets
    /// `linear_access` answer it without splitting the index.
    #[inline]
    fn coeff_linear(&self, index: usize) -> Self::Scalar {
        let cols = self.cols();
        self.coeff(index / cols, index % cols)
    }
}

impl<X: Xpr> Xpr for &X {
    type Scalar = X::Scalar;
    const TRAITS: XprTraits = X::TRAITS.borrowed();

    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        (**self).cols()
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> Self::Scalar {
        (**self).coeff(row, col)
    }

    #[inline]
    fn coeff_linear(&self, index: usize) -> Self::Scalar {
        (**self).coeff_linear(index)
    }
}

/// Check that two expressions have the same runtime shape
pub(crate) fn check_same_shape<A: Xpr, B: Xpr>(op: &'static str, a: &A, b: &B) -> Result<()> {
    if a.rows() == b.rows() && a.cols() == b.cols() {
        return Ok(());
    }
    tracing::debug!(
        op,
        expected_rows = a.rows(),
        expected_cols = a.cols(),
        got_rows = b.rows(),
        got_cols = b.cols(),
        "rejecting operands with mismatched shapes"
    );
    Err(Error::shape_mismatch(
        &[a.rows(), a.cols()],
        &[b.rows(), b.cols()],
    ))
}

/// Operations shared by every expression
///
/// Implemented for all [`Nest`] types. The factory methods build new nodes
/// over `self` without evaluating anything.
pub trait XprBase: Nest + Sized {
    /// `[rows, cols]`
    #[inline]
    fn shape(&self) -> [usize; 2] {
        [self.rows(), self.cols()]
    }

    /// Number of coefficients
    #[inline]
    fn size(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Whether the expression has no coefficients
    #[inline]
    fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    /// Static descriptor of this expression
    #[inline]
    fn traits(&self) -> XprTraits {
        Self::TRAITS
    }

    /// Materialize the expression into a new matrix
    fn eval(&self) -> Matrix<Self::Scalar> {
        crate::eval::evaluate(self)
    }

    /// Constant expression with the shape of `self`
    fn constant_like<T: Element>(&self, value: T) -> Constant<T> {
        Constant::new(self.rows(), self.cols(), value)
    }

    /// Coefficient-wise `self ? then : els`
    ///
    /// # Panics
    ///
    /// Panics if `then` or `els` does not have the shape of `self`.
    fn select<'s, 'a, T, E>(
        &'s self,
        then: &'a T,
        els: &'a E,
    ) -> Select<Self::Nested<'s>, T::Nested<'a>, E::Nested<'a>>
    where
        T: Nest,
        E: Nest<Scalar = T::Scalar>,
    {
        Select::new(self.nested(), then.nested(), els.nested())
    }

    /// Coefficient-wise `self ? then : els` with a scalar `els`
    ///
    /// # Panics
    ///
    /// Panics if `then` does not have the shape of `self`.
    fn select_else_scalar<'s, 'a, T>(
        &'s self,
        then: &'a T,
        els: T::Scalar,
    ) -> Select<Self::Nested<'s>, T::Nested<'a>, Constant<T::Scalar>>
    where
        T: Nest,
    {
        Select::new(self.nested(), then.nested(), self.constant_like(els))
    }

    /// Coefficient-wise `self ? then : els` with a scalar `then`
    ///
    /// # Panics
    ///
    /// Panics if `els` does not have the shape of `self`.
    fn select_then_scalar<'s, 'a, E>(
        &'s self,
        then: E::Scalar,
        els: &'a E,
    ) -> Select<Self::Nested<'s>, Constant<E::Scalar>, E::Nested<'a>>
    where
        E: Nest,
    {
        Select::new(self.nested(), self.constant_like(then), els.nested())
    }

    /// Coefficient-wise comparison `self op rhs`
    ///
    /// # Panics
    ///
    /// Panics if `rhs` does not have the shape of `self`.
    fn compare<'s, 'a, R>(
        &'s self,
        op: CmpOp,
        rhs: &'a R,
    ) -> Compare<Self::Nested<'s>, R::Nested<'a>>
    where
        R: Nest<Scalar = Self::Scalar>,
    {
        Compare::new(op, self.nested(), rhs.nested())
    }

    /// Coefficient-wise comparison of every coefficient against `value`
    fn compare_scalar(
        &self,
        op: CmpOp,
        value: Self::Scalar,
    ) -> Compare<Self::Nested<'_>, Constant<Self::Scalar>> {
        Compare::new(op, self.nested(), self.constant_like(value))
    }

    /// Coefficient-wise `self > rhs`
    fn greater_than<'s, 'a, R>(&'s self, rhs: &'a R) -> Compare<Self::Nested<'s>, R::Nested<'a>>
    where
        R: Nest<Scalar = Self::Scalar>,
    {
        self.compare(CmpOp::Gt, rhs)
    }

    /// Coefficient-wise `self >= rhs`
    fn greater_equal<'s, 'a, R>(&'s self, rhs: &'a R) -> Compare<Self::Nested<'s>, R::Nested<'a>>
    where
        R: Nest<Scalar = Self::Scalar>,
    {
        self.compare(CmpOp::Ge, rhs)
    }

    /// Coefficient-wise `self < rhs`
    fn less_than<'s, 'a, R>(&'s self, rhs: &'a R) -> Compare<Self::Nested<'s>, R::Nested<'a>>
    where
        R: Nest<Scalar = Self::Scalar>,
    {
        self.compare(CmpOp::Lt, rhs)
    }

    /// Coefficient-wise `self <= rhs`
    fn less_equal<'s, 'a, R>(&'s self, rhs: &'a R) -> Compare<Self::Nested<'s>, R::Nested<'a>>
    where
        R: Nest<Scalar = Self::Scalar>,
    {
        self.compare(CmpOp::Le, rhs)
    }

    /// Coefficient-wise conversion to element type `U`
    fn cast<U: Element>(&self) -> Cast<Self::Nested<'_>, U> {
        Cast::new(self.nested())
    }
}

impl<X: Nest> XprBase for X {}
