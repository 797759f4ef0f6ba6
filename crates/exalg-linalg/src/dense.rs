//! Dense matrix storage.
//!
//! Matrices are stored row-major with fixed dimensions; arithmetic lives
//! in `MatrixDomain` so the storage stays a plain container.

use std::ops::{Index, IndexMut};

use exalg_rings::Domain;

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<D: Domain> {
    /// Matrix entries in row-major order.
    data: Vec<D::Element>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl<D: Domain> DenseMatrix<D> {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(domain: &D, num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![domain.zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(domain: &D, n: usize) -> Self {
        let mut m = Self::zeros(domain, n, n);
        for i in 0..n {
            m[(i, i)] = domain.one();
        }
        m
    }

    /// Creates a matrix from a 2D vector of entries.
    ///
    /// # Panics
    ///
    /// Panics if the rows have inconsistent lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<D::Element>>) -> Self {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        let data: Vec<D::Element> = rows.into_iter().flatten().collect();
        assert_eq!(data.len(), num_rows * num_cols, "ragged rows");
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a row-major entry vector.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != num_rows * num_cols`.
    #[must_use]
    pub fn from_vec(data: Vec<D::Element>, num_rows: usize, num_cols: usize) -> Self {
        assert_eq!(data.len(), num_rows * num_cols);
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns a reference to the entry at (row, col).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&D::Element> {
        if row < self.num_rows && col < self.num_cols {
            Some(&self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[D::Element] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns a mutable slice of the specified row.
    pub fn row_mut(&mut self, row: usize) -> &mut [D::Element] {
        let start = row * self.num_cols;
        &mut self.data[start..start + self.num_cols]
    }

    /// Returns the entries in row-major order.
    #[must_use]
    pub fn data(&self) -> &[D::Element] {
        &self.data
    }

    /// Returns the entries in row-major order, mutably.
    pub fn data_mut(&mut self) -> &mut [D::Element] {
        &mut self.data
    }
}

impl<D: Domain> Index<(usize, usize)> for DenseMatrix<D> {
    type Output = D::Element;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl<D: Domain> IndexMut<(usize, usize)> for DenseMatrix<D> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}
