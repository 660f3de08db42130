//! Dense row-major matrix.

use std::ops::{Index, IndexMut};

/// Dense row-major `f64` matrix.
///
/// Used for one simulated trial (rows = fixing times, columns = factors) and
/// for statistics read-outs. `resize` reuses the allocation so a path buffer
/// can be overwritten trial after trial without reallocating.
///
/// # Example
///
/// ```
/// use pricer_core::math::Matrix;
///
/// let mut m = Matrix::new(2, 3);
/// m[(1, 2)] = 4.0;
/// assert_eq!(m.row(1), &[0.0, 0.0, 4.0]);
///
/// m.scale(-1.0);
/// assert_eq!(m[(1, 2)], -4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f64>,
}

/// One simulated trial: rows are fixing times, columns are factors.
pub type PathMatrix = Matrix;

impl Matrix {
    /// Zero-filled matrix of the given shape.
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            data: vec![0.0; n_rows * n_cols],
        }
    }

    /// Matrix filled with `value`.
    pub fn filled(n_rows: usize, n_cols: usize, value: f64) -> Self {
        Self {
            n_rows,
            n_cols,
            data: vec![value; n_rows * n_cols],
        }
    }

    /// Build from equally sized rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let n_cols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == n_cols),
            "all rows must have the same length"
        );
        Self {
            n_rows: rows.len(),
            n_cols,
            data: rows.concat(),
        }
    }

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Change the shape. Contents are zeroed if the shape changes and left
    /// untouched otherwise.
    pub fn resize(&mut self, n_rows: usize, n_cols: usize) {
        if n_rows == self.n_rows && n_cols == self.n_cols {
            return;
        }
        self.n_rows = n_rows;
        self.n_cols = n_cols;
        self.data.clear();
        self.data.resize(n_rows * n_cols, 0.0);
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.n_cols;
        &self.data[start..start + self.n_cols]
    }

    /// Row `i` as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        let start = i * self.n_cols;
        &mut self.data[start..start + self.n_cols]
    }

    /// Column `j` copied into a vector.
    pub fn col(&self, j: usize) -> Vec<f64> {
        (0..self.n_rows).map(|i| self[(i, j)]).collect()
    }

    /// All entries in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// All entries in row-major order, mutable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Set every entry to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Multiply every entry by `factor` in place.
    pub fn scale(&mut self, factor: f64) {
        for x in &mut self.data {
            *x *= factor;
        }
    }

    /// Copy shape and contents from `other`, reusing the allocation.
    pub fn copy_from(&mut self, other: &Matrix) {
        self.n_rows = other.n_rows;
        self.n_cols = other.n_cols;
        self.data.clear();
        self.data.extend_from_slice(&other.data);
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        debug_assert!(i < self.n_rows && j < self.n_cols);
        &self.data[i * self.n_cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        debug_assert!(i < self.n_rows && j < self.n_cols);
        &mut self.data[i * self.n_cols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_index() {
        let mut m = Matrix::new(2, 2);
        assert_eq!(m.as_slice(), &[0.0; 4]);
        m[(0, 1)] = 3.0;
        assert_eq!(m.as_slice(), &[0.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_from_rows_and_col() {
        let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        assert_eq!(m.n_rows(), 3);
        assert_eq!(m.n_cols(), 2);
        assert_eq!(m.col(1), vec![2.0, 4.0, 6.0]);
        assert_eq!(m.row(2), &[5.0, 6.0]);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_from_rows_ragged_panics() {
        let _ = Matrix::from_rows(&[vec![1.0], vec![1.0, 2.0]]);
    }

    #[test]
    fn test_resize_same_shape_keeps_contents() {
        let mut m = Matrix::filled(2, 3, 1.5);
        m.resize(2, 3);
        assert_eq!(m.as_slice(), &[1.5; 6]);
        m.resize(3, 1);
        assert_eq!(m.as_slice(), &[0.0; 3]);
    }

    #[test]
    fn test_scale_and_copy_from() {
        let mut a = Matrix::filled(1, 2, 2.0);
        a.scale(-1.0);
        let mut b = Matrix::new(5, 5);
        b.copy_from(&a);
        assert_eq!(b, a);
        assert_eq!(b.row(0), &[-2.0, -2.0]);
    }
}
