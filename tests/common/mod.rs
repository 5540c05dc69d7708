//! Common test utilities
#![allow(dead_code)]

use densexpr::dtype::Element;
use densexpr::matrix::Matrix;
use densexpr::xpr::{Nest, Xpr, XprTraits};
use std::cell::Cell;

/// Expression wrapper that counts coefficient reads
#[derive(Debug)]
pub struct Probe<T: Element> {
    inner: Matrix<T>,
    reads: Cell<usize>,
}

impl<T: Element> Probe<T> {
    pub fn new(inner: Matrix<T>) -> Self {
        Self {
            inner,
            reads: Cell::new(0),
        }
    }

    /// Number of coefficients read so far
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl<T: Element> Xpr for Probe<T> {
    type Scalar = T;
    const TRAITS: XprTraits = <Matrix<T> as Xpr>::TRAITS;

    fn rows(&self) -> usize {
        self.inner.rows()
    }

    fn cols(&self) -> usize {
        self.inner.cols()
    }

    fn coeff(&self, row: usize, col: usize) -> T {
        self.reads.set(self.reads.get() + 1);
        self.inner.coeff(row, col)
    }

    fn coeff_linear(&self, index: usize) -> T {
        self.reads.set(self.reads.get() + 1);
        self.inner.coeff_linear(index)
    }
}

impl<T: Element> Nest for Probe<T> {
    type Nested<'a>
        = &'a Probe<T>
    where
        Self: 'a;

    fn nested(&self) -> Self::Nested<'_> {
        self
    }
}

/// Reference implementation of a coefficient-wise select over row-major data
pub fn reference_select<C: Element, T: Element>(cond: &[C], then: &[T], els: &[T]) -> Vec<T> {
    cond.iter()
        .zip(then.iter().zip(els.iter()))
        .map(|(c, (t, e))| if c.is_truthy() { *t } else { *e })
        .collect()
}

/// Assert two f64 slices are close within tolerance
pub fn assert_allclose_f64(a: &[f64], b: &[f64], epsilon: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (x, y) in a.iter().zip(b.iter()) {
        approx::assert_abs_diff_eq!(*x, *y, epsilon = epsilon);
    }
}
