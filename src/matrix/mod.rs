//! Matrix storage types
//!
//! This module provides the concrete leaves of expression trees: the owning
//! [`Matrix`] (runtime shape) and [`SMatrix`] (compile-time shape), and the
//! borrowed, possibly strided [`MatrixView`].

mod dense;
mod fixed;
mod layout;
mod view;

pub use dense::Matrix;
pub use fixed::SMatrix;
pub use layout::Layout;
pub use view::MatrixView;
