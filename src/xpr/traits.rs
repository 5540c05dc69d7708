//! Trait descriptors: static metadata published by every expression type
//!
//! A descriptor is the compile-time summary of an expression node: its
//! element type, its shape (fixed or dynamic, with bounds), its structural
//! flags and an estimate of what reading one coefficient costs. Composite
//! nodes derive their descriptor from their operands' descriptors with the
//! `const fn` combinators below, so the whole tree's metadata is resolved
//! during monomorphization.

use crate::dtype::DType;

/// Saturation bound for coefficient read costs
///
/// Any cost at or above this value is treated as "too expensive to estimate".
pub const HUGE_COST: usize = 10_000;

/// Add two read costs, saturating at [`HUGE_COST`].
#[inline]
pub const fn cost_add(a: usize, b: usize) -> usize {
    let sum = a.saturating_add(b);
    if sum > HUGE_COST {
        HUGE_COST
    } else {
        sum
    }
}

#[inline]
const fn cost_max(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}

/// Extent of one dimension as known at compile time
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dim {
    /// Extent fixed by the type
    Fixed(usize),
    /// Extent only known at runtime
    Dynamic,
}

impl Dim {
    /// The fixed extent, if any
    #[inline]
    pub const fn value(self) -> Option<usize> {
        match self {
            Self::Fixed(n) => Some(n),
            Self::Dynamic => None,
        }
    }

    /// Whether a runtime extent `n` is admissible for this dimension
    #[inline]
    pub const fn admits(self, n: usize) -> bool {
        match self {
            Self::Fixed(m) => m == n,
            Self::Dynamic => true,
        }
    }

    /// Whether two dimensions can describe the same runtime extent
    ///
    /// Two fixed extents must be equal; a dynamic extent is compatible with
    /// anything and is left to the runtime check.
    #[inline]
    pub const fn compatible(self, other: Dim) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            _ => true,
        }
    }
}

/// Structural flags of an expression node
///
/// The set is closed and small; every field is a capability that a consumer
/// of the expression may rely on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    /// `coeff_linear` is answered natively, without splitting the index into
    /// a row and a column
    pub linear_access: bool,
    /// The node owns writable storage (a plain matrix, not a view or an
    /// expression)
    pub lvalue: bool,
}

impl Flags {
    /// No capabilities
    pub const NONE: Self = Self {
        linear_access: false,
        lvalue: false,
    };

    /// Flags of a contiguous, owning storage type
    pub const PLAIN: Self = Self {
        linear_access: true,
        lvalue: true,
    };

    /// Flags a coefficient-wise node may inherit from its operands
    pub const HEREDITARY: Self = Self {
        linear_access: true,
        lvalue: false,
    };

    /// Flags set in both `self` and `other`
    #[inline]
    pub const fn intersect(self, other: Self) -> Self {
        Self {
            linear_access: self.linear_access && other.linear_access,
            lvalue: self.lvalue && other.lvalue,
        }
    }
}

/// Static descriptor of an expression node
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct XprTraits {
    /// Element type of the coefficients
    pub dtype: DType,
    /// Number of rows
    pub rows: Dim,
    /// Number of columns
    pub cols: Dim,
    /// Upper bound on the number of rows
    pub max_rows: Dim,
    /// Upper bound on the number of columns
    pub max_cols: Dim,
    /// Structural flags
    pub flags: Flags,
    /// Estimated cost of reading one coefficient
    pub coeff_read_cost: usize,
}

impl XprTraits {
    /// Descriptor of a contiguous, owning storage type
    pub const fn plain(dtype: DType, rows: Dim, cols: Dim) -> Self {
        Self {
            dtype,
            rows,
            cols,
            max_rows: rows,
            max_cols: cols,
            flags: Flags::PLAIN,
            coeff_read_cost: 1,
        }
    }

    /// Descriptor of a dynamically sized node that is not backed by storage
    pub const fn dynamic(dtype: DType, flags: Flags, coeff_read_cost: usize) -> Self {
        Self {
            dtype,
            rows: Dim::Dynamic,
            cols: Dim::Dynamic,
            max_rows: Dim::Dynamic,
            max_cols: Dim::Dynamic,
            flags,
            coeff_read_cost,
        }
    }

    /// Same descriptor seen through a non-owning handle (a reference or view)
    pub const fn borrowed(self) -> Self {
        Self {
            flags: Flags {
                lvalue: false,
                ..self.flags
            },
            ..self
        }
    }

    /// Whether the static shapes of `self` and `other` can agree at runtime
    pub const fn shape_compatible(&self, other: &XprTraits) -> bool {
        self.rows.compatible(other.rows) && self.cols.compatible(other.cols)
    }

    /// Whether a runtime shape is admissible for this descriptor
    pub const fn admits(&self, rows: usize, cols: usize) -> bool {
        self.rows.admits(rows) && self.cols.admits(cols)
    }

    /// Descriptor of a coefficient-wise conditional node
    ///
    /// - element type: the "then" operand's
    /// - shape: the condition's
    /// - flags: `then ∧ else ∧ HEREDITARY`; the condition's flags are ignored
    /// - cost: `condition + max(then, else)`
    pub const fn select(condition: &XprTraits, then: &XprTraits, els: &XprTraits) -> Self {
        Self {
            dtype: then.dtype,
            rows: condition.rows,
            cols: condition.cols,
            max_rows: condition.max_rows,
            max_cols: condition.max_cols,
            flags: then.flags.intersect(els.flags).intersect(Flags::HEREDITARY),
            coeff_read_cost: cost_add(
                condition.coeff_read_cost,
                cost_max(then.coeff_read_cost, els.coeff_read_cost),
            ),
        }
    }

    /// Descriptor of a coefficient-wise comparison node
    pub const fn compare(lhs: &XprTraits, rhs: &XprTraits) -> Self {
        Self {
            dtype: DType::Bool,
            rows: lhs.rows,
            cols: lhs.cols,
            max_rows: lhs.max_rows,
            max_cols: lhs.max_cols,
            flags: lhs.flags.intersect(rhs.flags).intersect(Flags::HEREDITARY),
            coeff_read_cost: cost_add(cost_add(lhs.coeff_read_cost, rhs.coeff_read_cost), 1),
        }
    }

    /// Descriptor of a coefficient-wise conversion node
    pub const fn cast(inner: &XprTraits, dtype: DType) -> Self {
        Self {
            dtype,
            flags: inner.flags.intersect(Flags::HEREDITARY),
            coeff_read_cost: cost_add(inner.coeff_read_cost, 1),
            ..*inner
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DYN_F64: XprTraits = XprTraits::plain(DType::F64, Dim::Dynamic, Dim::Dynamic);

    #[test]
    fn test_dim_compatibility() {
        assert!(Dim::Fixed(3).compatible(Dim::Fixed(3)));
        assert!(!Dim::Fixed(3).compatible(Dim::Fixed(2)));
        assert!(Dim::Fixed(3).compatible(Dim::Dynamic));
        assert!(Dim::Dynamic.admits(17));
        assert!(!Dim::Fixed(2).admits(3));
        assert_eq!(Dim::Fixed(4).value(), Some(4));
        assert_eq!(Dim::Dynamic.value(), None);
    }

    #[test]
    fn test_cost_saturates() {
        assert_eq!(cost_add(2, 3), 5);
        assert_eq!(cost_add(HUGE_COST, 1), HUGE_COST);
        assert_eq!(cost_add(usize::MAX, usize::MAX), HUGE_COST);
    }

    #[test]
    fn test_select_descriptor() {
        let condition = XprTraits::plain(DType::Bool, Dim::Fixed(2), Dim::Fixed(3));
        let then = XprTraits {
            coeff_read_cost: 4,
            ..DYN_F64
        };
        let els = XprTraits::dynamic(DType::F64, Flags::NONE, 7);

        let traits = XprTraits::select(&condition, &then, &els);
        assert_eq!(traits.dtype, DType::F64);
        assert_eq!(traits.rows, Dim::Fixed(2));
        assert_eq!(traits.cols, Dim::Fixed(3));
        assert_eq!(traits.max_rows, Dim::Fixed(2));
        assert_eq!(traits.coeff_read_cost, 1 + 7);
        assert_eq!(traits.flags, Flags::NONE);
    }

    #[test]
    fn test_select_flags_ignore_condition() {
        let condition = XprTraits::dynamic(DType::Bool, Flags::NONE, 1);
        let traits = XprTraits::select(&condition, &DYN_F64, &DYN_F64);
        assert!(traits.flags.linear_access);
        assert!(!traits.flags.lvalue);
    }

    #[test]
    fn test_borrowed_drops_lvalue() {
        let traits = DYN_F64.borrowed();
        assert!(!traits.flags.lvalue);
        assert!(traits.flags.linear_access);
        assert_eq!(traits.coeff_read_cost, 1);
    }

    #[test]
    fn test_compare_descriptor() {
        let traits = XprTraits::compare(&DYN_F64, &DYN_F64);
        assert_eq!(traits.dtype, DType::Bool);
        assert_eq!(traits.coeff_read_cost, 3);
        assert!(traits.flags.linear_access);
    }
}
