//! Layout: shape, strides, and offset for matrix memory layout

use std::fmt;

/// Layout describes where the coefficients of a matrix live in a buffer
///
/// Coefficients are stored in a flat buffer, but not necessarily in
/// row-major order. The layout maps a coordinate to a buffer index:
///
/// `offset + row * row_stride + col * col_stride`
///
/// Strides are in ELEMENTS, not bytes.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: usize,
    cols: usize,
    row_stride: isize,
    col_stride: isize,
    offset: usize,
}

impl Layout {
    /// Create a contiguous row-major layout
    ///
    /// # Example
    /// ```
    /// use densexpr::matrix::Layout;
    /// let layout = Layout::contiguous(2, 3);
    /// assert_eq!(layout.shape(), [2, 3]);
    /// assert_eq!(layout.strides(), [3, 1]);
    /// ```
    pub fn contiguous(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_stride: cols as isize,
            col_stride: 1,
            offset: 0,
        }
    }

    /// Create a layout with explicit shape, strides, and offset
    pub fn new(shape: [usize; 2], strides: [isize; 2], offset: usize) -> Self {
        Self {
            rows: shape[0],
            cols: shape[1],
            row_stride: strides[0],
            col_stride: strides[1],
            offset,
        }
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `[rows, cols]`
    #[inline]
    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    /// `[row_stride, col_stride]`
    #[inline]
    pub fn strides(&self) -> [isize; 2] {
        [self.row_stride, self.col_stride]
    }

    /// Starting element index in the underlying buffer
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total number of coefficients
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if memory is contiguous (row-major order)
    pub fn is_contiguous(&self) -> bool {
        if self.elem_count() == 0 {
            return true;
        }
        let row_ok = self.rows == 1 || self.row_stride == self.cols as isize;
        let col_ok = self.cols == 1 || self.col_stride == 1;
        row_ok && col_ok && self.offset == 0
    }

    /// Buffer index of `(row, col)`, or `None` if out of bounds
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.offset_of(row, col))
    }

    /// Buffer index of `(row, col)` without a bounds check
    #[inline]
    pub(crate) fn offset_of(&self, row: usize, col: usize) -> usize {
        let linear =
            self.offset as isize + row as isize * self.row_stride + col as isize * self.col_stride;
        linear as usize
    }

    /// Swap rows and columns
    pub fn transpose(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
            row_stride: self.col_stride,
            col_stride: self.row_stride,
            offset: self.offset,
        }
    }

    /// Layout of the `rows x cols` block starting at `(row, col)`
    ///
    /// Returns None if the block does not fit inside this layout.
    pub fn block(&self, row: usize, col: usize, rows: usize, cols: usize) -> Option<Self> {
        let row_end = row.checked_add(rows)?;
        let col_end = col.checked_add(cols)?;
        if row_end > self.rows || col_end > self.cols {
            return None;
        }
        let offset = if rows == 0 || cols == 0 {
            self.offset
        } else {
            self.offset_of(row, col)
        };
        Some(Self {
            rows,
            cols,
            row_stride: self.row_stride,
            col_stride: self.col_stride,
            offset,
        })
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout {{ shape: {:?}, strides: {:?}, offset: {} }}",
            self.shape(),
            self.strides(),
            self.offset
        )
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
