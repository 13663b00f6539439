//! Dense row-major `f64` matrices.
//!
//! `Matrix` is a value type: every operation returns a new matrix. The only
//! in-place operation is [`Matrix::push_row`], used while a dataset is being
//! assembled.
//!
//! Storage is one contiguous buffer with `data.len() == rows * cols`. A matrix
//! may have zero rows while still remembering its column count, which is how an
//! empty dataset keeps its fixed width.

use std::ops::Index;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::matmul::gemm_f64;
use crate::{Error, Result, ValueRange};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// A `(rows, cols)` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self {
            data: vec![0.0; element_count(rows, cols)?],
            rows,
            cols,
        })
    }

    /// A matrix with no rows and a fixed column count.
    pub fn empty(cols: usize) -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            cols,
        }
    }

    /// Build from a flat row-major buffer with shape `(rows, cols)`.
    pub fn from_flat(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != element_count(rows, cols)? {
            return Err(Error::ShapeMismatch(format!(
                "buffer length {} does not match rows * cols ({rows} * {cols})",
                data.len()
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Build from per-row vectors. Every row must have the same length.
    ///
    /// An empty slice yields a `(0, 0)` matrix.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::ShapeMismatch(format!(
                    "row {i} has len {}, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    /// A single-row matrix holding `values`.
    pub fn row_vector(values: &[f64]) -> Self {
        Self {
            data: values.to_vec(),
            rows: 1,
            cols: values.len(),
        }
    }

    /// Every element drawn independently from the uniform distribution over `[min, max]`.
    pub fn random_uniform<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        min: f64,
        max: f64,
        rng: &mut R,
    ) -> Result<Self> {
        ValueRange::new(min, max)?;
        let dist = Uniform::new_inclusive(min, max);
        let data = (0..element_count(rows, cols)?)
            .map(|_| dist.sample(rng))
            .collect();
        Ok(Self { data, rows, cols })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True if the matrix has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Returns the `idx`-th row.
    ///
    /// Panics if `idx >= rows`.
    #[inline]
    pub fn row(&self, idx: usize) -> &[f64] {
        assert!(
            idx < self.rows,
            "row {idx} out of bounds for {} rows",
            self.rows
        );
        let start = idx * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterate rows in order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// The flat row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Appends a row in place.
    ///
    /// This mutates `self`. A `(0, 0)` matrix adopts the width of its first row.
    pub fn push_row(&mut self, row: &[f64]) -> Result<()> {
        if self.rows == 0 && self.cols == 0 {
            self.cols = row.len();
        }
        if row.len() != self.cols {
            return Err(Error::ShapeMismatch(format!(
                "row has len {}, matrix has {} cols",
                row.len(),
                self.cols
            )));
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    /// Standard matrix product. Requires `self.cols == other.rows`.
    pub fn dot(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(Error::ShapeMismatch(format!(
                "dot: ({}, {}) x ({}, {})",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        let mut out = Matrix::zeros(self.rows, other.cols)?;
        if self.rows > 0 && other.cols > 0 && self.cols > 0 {
            gemm_f64(
                self.rows,
                other.cols,
                self.cols,
                &self.data,
                &other.data,
                &mut out.data,
            );
        }
        Ok(out)
    }

    /// Returns the `(cols, rows)` transpose.
    #[must_use]
    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[r * self.cols + c]);
            }
        }
        Matrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Element-wise `self + other`.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Element-wise `self - other`.
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    /// Element-wise (Hadamard) product.
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "hadamard", |a, b| a * b)
    }

    /// Multiplies every element by `k`.
    #[must_use]
    pub fn scale(&self, k: f64) -> Matrix {
        self.map(|x| x * k)
    }

    /// Applies `f` to every element.
    #[must_use]
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Matrix {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Maps every element from `[min, max]` to `[0, 1]`: `(x - min) / (max - min)`.
    ///
    /// `min >= max` is a configuration error.
    pub fn normalize(&self, min: f64, max: f64) -> Result<Matrix> {
        let range = ValueRange::new(min, max)?;
        Ok(self.normalize_in(&range))
    }

    /// Exact inverse of [`Matrix::normalize`].
    pub fn denormalize(&self, min: f64, max: f64) -> Result<Matrix> {
        let range = ValueRange::new(min, max)?;
        Ok(self.denormalize_in(&range))
    }

    /// [`Matrix::normalize`] with an already validated range.
    #[must_use]
    pub fn normalize_in(&self, range: &ValueRange) -> Matrix {
        self.map(|x| range.normalize(x))
    }

    /// [`Matrix::denormalize`] with an already validated range.
    #[must_use]
    pub fn denormalize_in(&self, range: &ValueRange) -> Matrix {
        self.map(|x| range.denormalize(x))
    }

    /// Mean of the squared elements (0 for an empty matrix).
    pub fn mean_square(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.data.iter().map(|x| x * x).sum();
        sum / self.data.len() as f64
    }

    fn zip_with<F: Fn(f64, f64) -> f64>(&self, other: &Matrix, op: &str, f: F) -> Result<Matrix> {
        if self.shape() != other.shape() {
            return Err(Error::ShapeMismatch(format!(
                "{op}: ({}, {}) vs ({}, {})",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        Ok(Matrix {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
            rows: self.rows,
            cols: self.cols,
        })
    }
}

/// `rows * cols`, or `ShapeMismatch` if the product does not fit in `usize`.
pub(crate) fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or_else(|| {
        Error::ShapeMismatch(format!("shape ({rows}, {cols}) has too many elements"))
    })
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        assert!(
            r < self.rows && c < self.cols,
            "index ({r}, {c}) out of bounds for ({}, {})",
            self.rows,
            self.cols
        );
        &self.data[r * self.cols + c]
    }
}
