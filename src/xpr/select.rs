//! Coefficient-wise conditional expression

use super::traits::XprTraits;
use super::{Nest, Xpr, check_same_shape};
use crate::dtype::Element;
use crate::error::Result;

/// Expression of a coefficient-wise `condition ? then : els`
///
/// Coefficient `(i, j)` is `then(i, j)` when `condition(i, j)` is truthy
/// (not equal to zero / `false`) and `els(i, j)` otherwise. Only the
/// selected branch is read. Nothing is cached: every read re-evaluates the
/// condition and one branch.
///
/// `C`, `T` and `E` are operand storages as produced by [`Nest::nested`];
/// most code builds a `Select` through [`XprBase::select`](super::XprBase::select)
/// and its scalar variants rather than directly.
///
/// The condition may have any element type. `then` and `els` must share an
/// element type; use [`XprBase::cast`](super::XprBase::cast) to line them up.
#[derive(Clone, Debug)]
pub struct Select<C, T, E> {
    condition: C,
    then: T,
    els: E,
}

impl<C, T, E> Select<C, T, E>
where
    C: Xpr,
    T: Xpr,
    E: Xpr<Scalar = T::Scalar>,
{
    /// Build the node from its three operands
    ///
    /// # Panics
    ///
    /// Panics if `then` or `els` does not have the shape of `condition`. A
    /// mismatch is a bug in the caller; use [`Self::try_new`] to get an error
    /// instead.
    pub fn new(condition: C, then: T, els: E) -> Self {
        match Self::try_new(condition, then, els) {
            Ok(select) => select,
            Err(err) => panic!("Select::new: {err}"),
        }
    }

    /// Build the node, reporting a shape mismatch as an error
    ///
    /// Operands whose fixed dimensions disagree are rejected at compile time.
    pub fn try_new(condition: C, then: T, els: E) -> Result<Self> {
        const {
            assert!(
                C::TRAITS.shape_compatible(&T::TRAITS) && C::TRAITS.shape_compatible(&E::TRAITS),
                "select operands have incompatible fixed shapes"
            );
        }
        check_same_shape("select", &condition, &then)?;
        check_same_shape("select", &condition, &els)?;
        Ok(Self {
            condition,
            then,
            els,
        })
    }

    /// The condition operand
    pub fn condition(&self) -> &C {
        &self.condition
    }

    /// The operand read where the condition holds
    pub fn then(&self) -> &T {
        &self.then
    }

    /// The operand read where the condition does not hold
    pub fn els(&self) -> &E {
        &self.els
    }
}

impl<C, T, E> Xpr for Select<C, T, E>
where
    C: Xpr,
    T: Xpr,
    E: Xpr<Scalar = T::Scalar>,
{
    type Scalar = T::Scalar;
    const TRAITS: XprTraits = XprTraits::select(&C::TRAITS, &T::TRAITS, &E::TRAITS);

    #[inline]
    fn rows(&self) -> usize {
        self.condition.rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.condition.cols()
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> Self::Scalar {
        if self.condition.coeff(row, col).is_truthy() {
            self.then.coeff(row, col)
        } else {
            self.els.coeff(row, col)
        }
    }

    #[inline]
    fn coeff_linear(&self, index: usize) -> Self::Scalar {
        if self.condition.coeff_linear(index).is_truthy() {
            self.then.coeff_linear(index)
        } else {
            self.els.coeff_linear(index)
        }
    }
}

impl<C, T, E> Nest for Select<C, T, E>
where
    C: Xpr + Clone,
    T: Xpr + Clone,
    E: Xpr<Scalar = T::Scalar> + Clone,
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
