//! # densexpr
//!
//! **Lazily evaluated dense matrix expressions.**
//!
//! densexpr builds matrix computations as expression trees whose
//! coefficients are computed on demand. Nothing is materialized until an
//! expression is evaluated into a [`Matrix`](matrix::Matrix) or its
//! coefficients are read directly.
//!
//! ## Features
//!
//! - **Coefficient-wise select**: `cond ? then : else` over whole matrices,
//!   with scalar branches promoted to constant expressions
//! - **Static descriptors**: element type, fixed or dynamic shape, flags and
//!   read cost of every node, composed at compile time
//! - **Ownership selection**: operands are copied or borrowed per type, and
//!   the borrow checker keeps nodes from outliving what they borrow
//! - **Storage**: owning dynamic and fixed-size matrices, strided views
//!
//! ## Quick Start
//!
//! ```rust
//! use densexpr::prelude::*;
//!
//! let cond = Matrix::from_slice(&[true, false, false, true], 2, 2);
//! let then = Matrix::from_slice(&[1, 2, 3, 4], 2, 2);
//! let els = Matrix::from_slice(&[10, 20, 30, 40], 2, 2);
//!
//! let result = cond.select(&then, &els).eval();
//! assert_eq!(result.as_slice(), &[1, 20, 30, 4]);
//!
//! let clipped = cond.select_else_scalar(&then, 0).eval();
//! assert_eq!(clipped.as_slice(), &[1, 0, 0, 4]);
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): row-parallel evaluation with [`eval::evaluate_par`]
//! - `f16`: half-precision element types (F16, BF16)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod eval;
pub mod matrix;
pub mod xpr;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::matrix::{Matrix, MatrixView, SMatrix};
    pub use crate::xpr::{CmpOp, Constant, Nest, Select, Xpr, XprBase};
}
