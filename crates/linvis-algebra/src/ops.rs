use crate::{AlgebraError, Dimension, Matrix};

/// Absolute tolerance used by the invertibility check and the structural predicates.
pub const EPSILON: f64 = 1e-10;

fn require_square(m: &Matrix) -> Result<usize, AlgebraError> {
    if !m.is_square() {
        return Err(AlgebraError::NotSquare {
            rows: m.rows(),
            cols: m.cols(),
        });
    }
    Ok(m.rows())
}

/// Compute the determinant of a square matrix.
///
/// Uses the closed form for 2x2 and the six-term cofactor expansion for 3x3.
///
/// Example:
///
/// ```
/// use linvis_algebra::{ops, Matrix};
///
/// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// assert_eq!(ops::determinant(&m).unwrap(), -2.0);
/// ```
pub fn determinant(m: &Matrix) -> Result<f64, AlgebraError> {
    let n = require_square(m)?;
    let a = |i, j| m.get(i, j);
    let det = match n {
        2 => a(0, 0) * a(1, 1) - a(0, 1) * a(1, 0),
        _ => {
            a(0, 0) * a(1, 1) * a(2, 2) + a(0, 1) * a(1, 2) * a(2, 0) + a(0, 2) * a(1, 0) * a(2, 1)
                - a(0, 2) * a(1, 1) * a(2, 0)
                - a(0, 0) * a(1, 2) * a(2, 1)
                - a(0, 1) * a(1, 0) * a(2, 2)
        }
    };
    Ok(det)
}

/// Compute the sum of the diagonal entries of a square matrix.
pub fn trace(m: &Matrix) -> Result<f64, AlgebraError> {
    let n = require_square(m)?;
    Ok((0..n).map(|i| m.get(i, i)).sum())
}

/// Check whether `|det(m)| > EPSILON`.
pub fn is_invertible(m: &Matrix) -> Result<bool, AlgebraError> {
    Ok(determinant(m)?.abs() > EPSILON)
}

/// Swap rows and columns.
pub fn transpose(m: &Matrix) -> Matrix {
    Matrix::from_fn(m.dimension().transposed(), |i, j| m.get(j, i))
}

/// Multiply two matrices, `a * b`.
///
/// The result must itself have between 2 and 3 rows and columns, which holds
/// for any pair of supported matrices with matching inner dimension.
pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix, AlgebraError> {
    if a.cols() != b.rows() {
        return Err(AlgebraError::IncompatibleShapes {
            lhs: a.dimension(),
            rhs: b.dimension(),
        });
    }
    let dim = Dimension::new(a.rows(), b.cols())?;
    Ok(Matrix::from_fn(dim, |i, j| {
        (0..a.cols()).map(|k| a.get(i, k) * b.get(k, j)).sum()
    }))
}

/// Multiply a matrix by a column vector, `m * v`.
///
/// The result has `m.rows()` components.
pub fn mul_vector(m: &Matrix, v: &[f64]) -> Result<Vec<f64>, AlgebraError> {
    if m.cols() != v.len() {
        return Err(AlgebraError::LengthMismatch {
            left: m.cols(),
            right: v.len(),
        });
    }
    Ok(m
        .iter_rows()
        .map(|row| row.iter().zip(v).map(|(a, b)| a * b).sum())
        .collect())
}

/// Compute the inverse of a square matrix through its adjugate.
///
/// Fails with [`AlgebraError::Singular`] when the matrix is not invertible.
pub fn inverse(m: &Matrix) -> Result<Matrix, AlgebraError> {
    let n = require_square(m)?;
    let det = determinant(m)?;
    if det.abs() <= EPSILON {
        return Err(AlgebraError::Singular);
    }

    let a = |i: usize, j: usize| m.get(i, j);
    let inv = match n {
        2 => Matrix::from_fn(m.dimension(), |i, j| match (i, j) {
            (0, 0) => a(1, 1) / det,
            (0, 1) => -a(0, 1) / det,
            (1, 0) => -a(1, 0) / det,
            _ => a(0, 0) / det,
        }),
        _ => Matrix::from_fn(m.dimension(), |i, j| {
            // adjugate entry (i, j) is the cofactor of (j, i)
            let (r0, r1) = other_two(j);
            let (c0, c1) = other_two(i);
            let minor = a(r0, c0) * a(r1, c1) - a(r0, c1) * a(r1, c0);
            let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
            sign * minor / det
        }),
    };
    Ok(inv)
}

/// Compute a basis of the null space of `m` by reduced row echelon form.
///
/// Row reduction uses partial pivoting; a column whose best remaining pivot
/// is at most `tol` in magnitude is free and contributes one basis vector.
/// The basis vectors are not normalized.
pub fn null_space(m: &Matrix, tol: f64) -> Vec<Vec<f64>> {
    let (nrows, ncols) = (m.rows(), m.cols());
    let mut r = m.to_rows();
    let mut pivots = Vec::with_capacity(ncols);
    let mut row = 0;

    for col in 0..ncols {
        if row == nrows {
            break;
        }

        // partial pivoting: largest entry in this column at or below `row`
        let (best, best_abs) = (row..nrows)
            .map(|i| (i, r[i][col].abs()))
            .fold((row, -1.0), |acc, x| if x.1 > acc.1 { x } else { acc });
        if best_abs <= tol {
            continue;
        }
        r.swap(row, best);

        let pivot = r[row][col];
        r[row][col..].iter_mut().for_each(|x| *x /= pivot);
        let pivot_row = r[row].clone();
        for (i, other) in r.iter_mut().enumerate() {
            let f = other[col];
            if i != row && f != 0.0 {
                for (x, p) in other[col..].iter_mut().zip(&pivot_row[col..]) {
                    *x -= f * p;
                }
            }
        }

        pivots.push(col);
        row += 1;
    }

    (0..ncols)
        .filter(|c| !pivots.contains(c))
        .map(|free| {
            let mut v = vec![0.0; ncols];
            v[free] = 1.0;
            for (k, &pc) in pivots.iter().enumerate() {
                v[pc] = -r[k][free];
            }
            v
        })
        .collect()
}

/// Compute the rank of `m` by row reduction.
///
/// Pivots at most `EPSILON * max(1, max |m_ij|)` count as zero.
pub fn rank(m: &Matrix) -> usize {
    let scale = m
        .iter_rows()
        .flat_map(|row| row.iter())
        .fold(1.0_f64, |acc, x| acc.max(x.abs()));
    m.cols() - null_space(m, EPSILON * scale).len()
}

/// The two indices of 0..3 other than `k`, in ascending order.
fn other_two(k: usize) -> (usize, usize) {
    match k {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;

    fn random_matrix(rng: &mut impl Rng, n: usize) -> Result<Matrix, AlgebraError> {
        let data = (0..n * n)
            .map(|_| rng.random_range(-10.0..10.0))
            .collect::<Vec<f64>>();
        Matrix::new(n, n, &data)
    }

    #[test]
    fn test_determinant_2x2() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::from_rows(&[[3.0, 8.0], [4.0, 6.0]])?;
        assert_eq!(determinant(&m)?, -14.0);
        Ok(())
    }

    #[test]
    fn test_determinant_3x3() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::from_rows(&[[6.0, 1.0, 1.0], [4.0, -2.0, 5.0], [2.0, 8.0, 7.0]])?;
        assert_relative_eq!(determinant(&m)?, -306.0);

        let g = glam::DMat3::try_from(&m)?;
        assert_relative_eq!(determinant(&m)?, g.determinant(), epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_square_only_operations() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::new(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        let err = AlgebraError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(determinant(&m), Err(err.clone()));
        assert_eq!(trace(&m), Err(err.clone()));
        assert_eq!(is_invertible(&m), Err(err.clone()));
        assert_eq!(inverse(&m), Err(err));
        Ok(())
    }

    #[test]
    fn test_identity_3x3() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::identity(3)?;
        assert_eq!(determinant(&m)?, 1.0);
        assert_eq!(trace(&m)?, 3.0);
        assert!(is_invertible(&m)?);
        Ok(())
    }

    #[test]
    fn test_determinant_of_transpose() -> Result<(), Box<dyn std::error::Error>> {
        let mut rng = rand::rng();
        for n in [2, 3] {
            for _ in 0..50 {
                let m = random_matrix(&mut rng, n)?;
                assert_relative_eq!(
                    determinant(&transpose(&m))?,
                    determinant(&m)?,
                    epsilon = 1e-9
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_transpose_rectangular() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::new(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        let t = transpose(&m);
        assert_eq!(t.dimension().to_string(), "3x2");
        assert_eq!(t, Matrix::from_rows(&[[1.0, 4.0], [2.0, 5.0], [3.0, 6.0]])?);
        assert_eq!(transpose(&t), m);
        Ok(())
    }

    #[test]
    fn test_singular_is_not_invertible() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]])?;
        assert!(!is_invertible(&m)?);
        assert_eq!(inverse(&m), Err(AlgebraError::Singular));
        Ok(())
    }

    #[test]
    fn test_inverse() -> Result<(), Box<dyn std::error::Error>> {
        let mut rng = rand::rng();
        for n in [2, 3] {
            let m = random_matrix(&mut rng, n)?;
            if !is_invertible(&m)? {
                continue;
            }
            let prod = matmul(&m, &inverse(&m)?)?;
            let eye = Matrix::identity(n)?;
            for i in 0..n {
                for j in 0..n {
                    assert_relative_eq!(prod.get(i, j), eye.get(i, j), epsilon = 1e-8);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_matmul_shapes() -> Result<(), Box<dyn std::error::Error>> {
        let a = Matrix::new(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;
        let gram = matmul(&transpose(&a), &a)?;
        assert_eq!(gram.dimension(), Dimension::D3X3);
        assert_eq!(gram.row(0), Some(&[17.0, 22.0, 27.0][..]));

        let err = matmul(&a, &a);
        assert!(matches!(err, Err(AlgebraError::IncompatibleShapes { .. })));
        Ok(())
    }

    #[test]
    fn test_mul_vector() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::new(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0])?;
        assert_eq!(mul_vector(&m, &[2.0, 3.0])?, vec![2.0, 3.0, 5.0]);
        assert_eq!(
            mul_vector(&m, &[1.0, 2.0, 3.0]),
            Err(AlgebraError::LengthMismatch { left: 2, right: 3 })
        );
        Ok(())
    }

    #[test]
    fn test_null_space_and_rank() -> Result<(), Box<dyn std::error::Error>> {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [3.0, 6.0, 9.0]])?;
        assert_eq!(rank(&m), 1);
        let basis = null_space(&m, 1e-10);
        assert_eq!(basis.len(), 2);
        for v in &basis {
            for r in mul_vector(&m, v)? {
                assert_relative_eq!(r, 0.0, epsilon = 1e-12);
            }
        }

        let wide = Matrix::new(2, 3, &[1.0, 0.0, 2.0, 0.0, 1.0, 3.0])?;
        assert_eq!(rank(&wide), 2);
        assert_eq!(null_space(&wide, 1e-10), vec![vec![-2.0, -3.0, 1.0]]);

        assert_eq!(rank(&Matrix::identity(3)?), 3);
        assert_eq!(rank(&Matrix::zeros(Dimension::D2X2)), 0);
        Ok(())
    }
}
