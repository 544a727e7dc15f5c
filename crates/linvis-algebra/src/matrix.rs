use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AlgebraError;

/// Largest supported number of rows, columns or vector components.
pub const MAX_DIM: usize = 3;

/// Smallest supported number of rows, columns or vector components.
pub const MIN_DIM: usize = 2;

/// Check that a row, column or component count is within 2..=3.
#[inline]
pub fn check_dim(n: usize) -> Result<usize, AlgebraError> {
    if !(MIN_DIM..=MAX_DIM).contains(&n) {
        return Err(AlgebraError::UnsupportedDimension(n));
    }
    Ok(n)
}

/// The shape of a matrix, displayed as a tag like `3x3` or `2x3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dimension {
    rows: usize,
    cols: usize,
}

impl Dimension {
    /// Square 2x2 shape.
    pub const D2X2: Self = Self { rows: 2, cols: 2 };

    /// Square 3x3 shape.
    pub const D3X3: Self = Self { rows: 3, cols: 3 };

    /// Create a new shape, rejecting row or column counts outside 2..=3.
    pub fn new(rows: usize, cols: usize) -> Result<Self, AlgebraError> {
        Ok(Self {
            rows: check_dim(rows)?,
            cols: check_dim(cols)?,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether rows and columns agree.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The shape with rows and columns swapped.
    #[inline]
    pub fn transposed(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::D3X3
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl FromStr for Dimension {
    type Err = AlgebraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AlgebraError::ParseDimension(s.to_string());
        let (rows, cols) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let rows = rows.trim().parse::<usize>().map_err(|_| invalid())?;
        let cols = cols.trim().parse::<usize>().map_err(|_| invalid())?;
        Dimension::new(rows, cols).map_err(|_| invalid())
    }
}

impl TryFrom<String> for Dimension {
    type Error = AlgebraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dimension> for String {
    fn from(dim: Dimension) -> Self {
        dim.to_string()
    }
}

/// A dense real matrix with 2 or 3 rows and 2 or 3 columns.
///
/// The matrix is an immutable value: every algebraic operation returns a new
/// matrix. Entries outside of the active `rows x cols` block are kept at zero
/// so that the derived equality compares only meaningful data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRows", into = "MatrixRows")]
pub struct Matrix {
    data: [[f64; MAX_DIM]; MAX_DIM],
    dim: Dimension,
}

impl Matrix {
    /// Create a new matrix from row-major data.
    ///
    /// # Arguments
    ///
    /// * `rows` - Number of rows, 2 or 3.
    /// * `cols` - Number of columns, 2 or 3.
    /// * `data` - Row-major entries, `rows * cols` long.
    ///
    /// Example:
    ///
    /// ```
    /// use linvis_algebra::Matrix;
    ///
    /// let m = Matrix::new(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(m.get(1, 2), 6.0);
    /// assert_eq!(m.dimension().to_string(), "2x3");
    /// ```
    pub fn new(rows: usize, cols: usize, data: &[f64]) -> Result<Self, AlgebraError> {
        let dim = Dimension::new(rows, cols)?;
        if data.len() != rows * cols {
            return Err(AlgebraError::InvalidData {
                expected: rows * cols,
                actual: data.len(),
            });
        }

        let mut out = Self::zeros(dim);
        for (i, row) in data.chunks_exact(cols).enumerate() {
            out.data[i][..cols].copy_from_slice(row);
        }
        Ok(out)
    }

    /// Create a new matrix from a list of rows, each with the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, AlgebraError> {
        let nrows = check_dim(rows.len())?;
        let ncols = check_dim(rows[0].as_ref().len())?;
        let mut out = Self::zeros(Dimension::new(nrows, ncols)?);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(AlgebraError::InvalidData {
                    expected: ncols,
                    actual: row.len(),
                });
            }
            out.data[i][..ncols].copy_from_slice(row);
        }
        Ok(out)
    }

    /// Create a zero matrix of the given shape.
    pub fn zeros(dim: Dimension) -> Self {
        Self {
            data: [[0.0; MAX_DIM]; MAX_DIM],
            dim,
        }
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Result<Self, AlgebraError> {
        Ok(Self::eye(Dimension::new(n, n)?))
    }

    /// Create a matrix of the given shape with ones on the main diagonal.
    pub fn eye(dim: Dimension) -> Self {
        Self::from_fn(dim, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// The shape of the matrix.
    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.dim.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.dim.cols
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.dim.is_square()
    }

    /// Get the entry at `(row, col)`.
    ///
    /// PRECONDITION: `row < self.rows()` and `col < self.cols()`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.rows() && col < self.cols());
        self.data[row][col]
    }

    /// Get the entry at `(row, col)`, or `None` when out of bounds.
    pub fn try_get(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.rows() && col < self.cols()).then(|| self.data[row][col])
    }

    /// Get a row as a slice of `cols()` entries, or `None` when out of bounds.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        (row < self.rows()).then(|| &self.data[row][..self.cols()])
    }

    /// Get a column as a vector of `rows()` entries, or `None` when out of bounds.
    pub fn column(&self, col: usize) -> Option<Vec<f64>> {
        (col < self.cols()).then(|| (0..self.rows()).map(|i| self.data[i][col]).collect())
    }

    /// Iterate over the rows of the matrix.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        let cols = self.cols();
        self.data[..self.rows()].iter().map(move |r| &r[..cols])
    }

    /// The entries as nested row vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }

    /// Return a copy with the entry at `(row, col)` replaced.
    pub fn with_value(&self, row: usize, col: usize, value: f64) -> Option<Self> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        let mut out = *self;
        out.data[row][col] = value;
        Some(out)
    }

    /// Return a copy reshaped to `dim`.
    ///
    /// Entries inside both the old and the new shape are kept, new entries are
    /// taken from the identity matrix.
    pub fn resized(&self, dim: Dimension) -> Self {
        let mut out = Self::zeros(dim);
        for i in 0..dim.rows {
            for j in 0..dim.cols {
                out.data[i][j] = if i < self.rows() && j < self.cols() {
                    self.data[i][j]
                } else if i == j {
                    1.0
                } else {
                    0.0
                };
            }
        }
        out
    }

    /// Build a matrix of the given shape from a closure over `(row, col)`.
    pub(crate) fn from_fn(dim: Dimension, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut out = Self::zeros(dim);
        for i in 0..dim.rows {
            for j in 0..dim.cols {
                out.data[i][j] = f(i, j);
            }
        }
        out
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Serialized form of a [`Matrix`], validated on the way back in.
#[derive(Serialize, Deserialize)]
struct MatrixRows {
    rows: Vec<Vec<f64>>,
}

impl TryFrom<MatrixRows> for Matrix {
    type Error = AlgebraError;

    fn try_from(value: MatrixRows) -> Result<Self, Self::Error> {
        if value.rows.is_empty() {
            return Err(AlgebraError::UnsupportedDimension(0));
        }
        Matrix::from_rows(&value.rows)
    }
}

impl From<Matrix> for MatrixRows {
    fn from(m: Matrix) -> Self {
        Self { rows: m.to_rows() }
    }
}

impl From<glam::DMat2> for Matrix {
    fn from(m: glam::DMat2) -> Self {
        // glam stores columns, rows come out of the transpose
        let rows = m.transpose().to_cols_array_2d();
        Matrix::from_fn(Dimension::D2X2, |i, j| rows[i][j])
    }
}

impl From<glam::DMat3> for Matrix {
    fn from(m: glam::DMat3) -> Self {
        let rows = m.transpose().to_cols_array_2d();
        Matrix::from_fn(Dimension::D3X3, |i, j| rows[i][j])
    }
}

impl TryFrom<&Matrix> for glam::DMat2 {
    type Error = AlgebraError;

    fn try_from(m: &Matrix) -> Result<Self, Self::Error> {
        if m.dimension() != Dimension::D2X2 {
            return Err(AlgebraError::InvalidData {
                expected: 4,
                actual: m.rows() * m.cols(),
            });
        }
        let rows = [[m.get(0, 0), m.get(0, 1)], [m.get(1, 0), m.get(1, 1)]];
        Ok(glam::DMat2::from_cols_array_2d(&rows).transpose())
    }
}

impl TryFrom<&Matrix> for glam::DMat3 {
    type Error = AlgebraError;

    fn try_from(m: &Matrix) -> Result<Self, Self::Error> {
        if m.dimension() != Dimension::D3X3 {
            return Err(AlgebraError::InvalidData {
                expected: 9,
                actual: m.rows() * m.cols(),
            });
        }
        let rows = [
            [m.get(0, 0), m.get(0, 1), m.get(0, 2)],
            [m.get(1, 0), m.get(1, 1), m.get(1, 2)],
            [m.get(2, 0), m.get(2, 1), m.get(2, 2)],
        ];
        Ok(glam::DMat3::from_cols_array_2d(&rows).transpose())
    }
}
