//! Ownership selection for expression operands
//!
//! When an expression node is built, each operand is stored either by value
//! or by reference. The decision is static: every expression type names the
//! type it nests as through [`Nest::Nested`], and publishes the mode it
//! follows in [`Xpr::NEST`]. The heuristic in [`NestMode::choose`] is the
//! default for `NEST`:
//!
//! - handles that do not own storage (expression nodes, constants, views,
//!   references) are cheap to copy and are stored by value
//! - owning storage of a small, fixed size is copied
//! - any other owning storage is borrowed
//!
//! A borrowed operand ties the node to the operand's lifetime, so a node can
//! never outlive the matrix it reads from.

use super::Xpr;
use super::traits::{Dim, XprTraits};

/// Largest fixed-size storage, in bytes, that is copied into a node instead
/// of being borrowed
pub const NEST_BY_VALUE_MAX_BYTES: usize = 64;

/// How an operand is held by the node that uses it
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NestMode {
    /// The node stores its own copy of the operand
    Owned,
    /// The node stores a shared reference to the operand
    Borrowed,
}

impl NestMode {
    /// Pick the nesting mode for an operand with descriptor `traits` and
    /// coefficients of `scalar_size` bytes
    pub const fn choose(traits: &XprTraits, scalar_size: usize) -> Self {
        if !traits.flags.lvalue {
            return Self::Owned;
        }
        match (traits.max_rows, traits.max_cols) {
            (Dim::Fixed(rows), Dim::Fixed(cols)) => match rows.checked_mul(cols) {
                Some(count) => match count.checked_mul(scalar_size) {
                    Some(bytes) if bytes <= NEST_BY_VALUE_MAX_BYTES => Self::Owned,
                    _ => Self::Borrowed,
                },
                None => Self::Borrowed,
            },
            _ => Self::Borrowed,
        }
    }
}

/// Expression types that can become an operand of another node
///
/// `Nested<'a>` is what a node stores when it is built from `&'a Self`.
/// Implementations must keep it consistent with `Self::NEST`: a borrowed
/// mode nests as something that holds `&'a Self`.
pub trait Nest: Xpr {
    /// Operand storage used when `Self` is nested into a node
    type Nested<'a>: Xpr<Scalar = Self::Scalar> + Clone + 'a
    where
        Self: 'a;

    /// Produce the operand storage for `self`
    fn nested(&self) -> Self::Nested<'_>;
}

impl<'r, X: Xpr> Nest for &'r X {
    type Nested<'a>
        = &'r X
    where
        Self: 'a;

    #[inline]
    fn nested(&self) -> Self::Nested<'_> {
        *self
    }
}

/// Operand storage whose variant follows the operand's [`NestMode`]
///
/// Used by storage types whose mode depends on their size, where the choice
/// between a copy and a reference cannot be made by the type alone.
#[derive(Clone, Debug)]
pub enum Stored<'a, X> {
    /// A private copy of the operand
    Owned(X),
    /// A reference to the caller's operand
    Borrowed(&'a X),
}

impl<'a, X: Xpr + Clone> Stored<'a, X> {
    /// Store `xpr` according to `X::NEST`
    pub fn new(xpr: &'a X) -> Self {
        match X::NEST {
            NestMode::Owned => Self::Owned(xpr.clone()),
            NestMode::Borrowed => Self::Borrowed(xpr),
        }
    }
}

impl<X> Stored<'_, X> {
    /// The mode this operand is held in
    pub fn mode(&self) -> NestMode {
        match self {
            Self::Owned(_) => NestMode::Owned,
            Self::Borrowed(_) => NestMode::Borrowed,
        }
    }

    #[inline]
    fn get(&self) -> &X {
        match self {
            Self::Owned(xpr) => xpr,
            Self::Borrowed(xpr) => xpr,
        }
    }
}

impl<X: Xpr> Xpr for Stored<'_, X> {
    type Scalar = X::Scalar;
    const TRAITS: XprTraits = X::TRAITS.borrowed();

    #[inline]
    fn rows(&self) -> usize {
        self.get().rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.get().cols()
    }

    #[inline]
    fn coeff(&self, row: usize, col: usize) -> Self::Scalar {
        self.get().coeff(row, col)
    }

    #[inline]
    fn coeff_linear(&self, index: usize) -> Self::Scalar {
        self.get().coeff_linear(index)
    }
}

impl<'s, X: Xpr + Clone> Nest for Stored<'s, X> {
    type Nested<'a>
        = Self
    where
        Self: 'a;

    #[inline]
    fn nested(&self) -> Self::Nested<'_> {
        self.clone()
    }
}
