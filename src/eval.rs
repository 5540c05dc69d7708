//! Materialization of expressions into matrices
//!
//! Evaluation is the only place coefficients are computed in bulk. The
//! traversal is chosen from the source's descriptor: a single linear pass
//! when `linear_access` is set, a row-by-row pass otherwise. Empty sources
//! produce empty matrices without reading a single coefficient.

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::xpr::Xpr;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Minimum number of coefficients before [`evaluate_par`] splits the work
/// across threads
pub const PARALLEL_MIN_COEFFS: usize = 1 << 14;

/// Evaluate `src` into a new matrix
pub fn evaluate<X: Xpr>(src: &X) -> Matrix<X::Scalar> {
    let mut dst = Matrix::zeros(src.rows(), src.cols());
    fill(dst.as_mut_slice(), src);
    dst
}

/// Evaluate `src` into the existing matrix `dst`
///
/// Fails with [`Error::ShapeMismatch`] if the shapes differ; `dst` is left
/// untouched in that case.
pub fn assign<X: Xpr>(dst: &mut Matrix<X::Scalar>, src: &X) -> Result<()> {
    let got = [src.rows(), src.cols()];
    if dst.shape() != got {
        return Err(Error::shape_mismatch(&dst.shape(), &got));
    }
    fill(dst.as_mut_slice(), src);
    Ok(())
}

/// Evaluate `src` into a new matrix, row-parallel for large sources
///
/// Expressions are read-only, so any number of threads may read coefficients
/// of the same expression at once.
#[cfg(feature = "rayon")]
pub fn evaluate_par<X: Xpr + Sync>(src: &X) -> Matrix<X::Scalar> {
    let (rows, cols) = (src.rows(), src.cols());
    let mut dst = Matrix::zeros(rows, cols);
    if rows * cols < PARALLEL_MIN_COEFFS {
        fill(dst.as_mut_slice(), src);
        return dst;
    }

    tracing::trace!(
        rows,
        cols,
        cost = X::TRAITS.coeff_read_cost,
        "materializing expression in parallel"
    );
    dst.as_mut_slice()
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, out)| {
            for (col, slot) in out.iter_mut().enumerate() {
                *slot = src.coeff(row, col);
            }
        });
    dst
}

/// Write every coefficient of `src`, in row-major order, into `out`
fn fill<X: Xpr>(out: &mut [X::Scalar], src: &X) {
    let (rows, cols) = (src.rows(), src.cols());
    debug_assert_eq!(out.len(), rows * cols);
    debug_assert!(X::TRAITS.admits(rows, cols));

    let linear = X::TRAITS.flags.linear_access;
    tracing::trace!(
        rows,
        cols,
        cost = X::TRAITS.coeff_read_cost,
        linear,
        "materializing expression"
    );
    if out.is_empty() {
        return;
    }

    if linear {
        for (index, slot) in out.iter_mut().enumerate() {
            *slot = src.coeff_linear(index);
        }
    } else {
        for (row, values) in out.chunks_exact_mut(cols).enumerate() {
            for (col, slot) in values.iter_mut().enumerate() {
                *slot = src.coeff(row, col);
            }
        }
    }
}
