//! Real eigenvalues and eigenvectors of 2x2 and 3x3 matrices.
//!
//! Eigenvalues are the real roots of the characteristic polynomial, solved in
//! closed form: the quadratic formula for 2x2 and the trigonometric (or, with a
//! single real root, Cardano) solution of the depressed cubic for 3x3.
//! Eigenvectors span the null space of `M - λI`, found by row reduction with
//! partial pivoting ([`ops::null_space`]).
//!
//! Complex eigenvalues are never approximated. A 2x2 matrix with complex roots
//! yields an empty decomposition and a 3x3 matrix with a complex pair yields
//! only its real root, see [`DecompositionKind`].
//!
//! # Example
//!
//! ```
//! use linvis_algebra::{eigen, Matrix};
//!
//! let m = Matrix::from_rows(&[[2.0, 0.0], [0.0, 3.0]]).unwrap();
//! let eig = eigen::eigen_decomposition(&m).unwrap();
//! assert_eq!(eig.eigenvalues(), vec![3.0, 2.0]);
//! assert_eq!(eig.pairs()[0].eigenvector, vec![0.0, 1.0]);
//! ```

use std::f64::consts::PI;

use serde::Serialize;

use crate::classify::is_symmetric;
use crate::{ops, AlgebraError, Matrix};

/// Eigenvalues of a 2x2 matrix closer than this are reported as one.
pub const REPEATED_EIGENVALUE_EPS: f64 = 1e-9;

/// Relative distance under which two roots of the cubic may be one repeated root.
///
/// The trigonometric solution loses about half the significant digits next to
/// a double root, so candidates are gathered loosely and then kept together
/// only if `M - λI` is rank deficient at their mean.
const CUBIC_REPEATED_EPS: f64 = 1e-6;

/// Relative tolerance for a pivot to count as non-zero in the null-space search.
const NULL_SPACE_EPS: f64 = 1e-7;

/// Relative slack for a slightly negative discriminant to count as zero.
const DISCRIMINANT_EPS: f64 = 1e-10;

/// Components below this magnitude are skipped by the sign convention.
const SIGN_EPS: f64 = 1e-10;

/// An eigenvalue together with a unit eigenvector.
///
/// The first non-negligible component of the eigenvector is positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EigenPair {
    /// The eigenvalue.
    pub eigenvalue: f64,
    /// The normalized eigenvector.
    pub eigenvector: Vec<f64>,
}

/// How complete an eigen decomposition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecompositionKind {
    /// One independent eigenvector per eigenvalue.
    Diagonalizable,
    /// A repeated eigenvalue has fewer independent eigenvectors than its
    /// multiplicity; the last eigenvector of that eigenvalue is repeated.
    Defective,
    /// The characteristic cubic has a complex pair, only the real root is returned.
    Reduced,
    /// Both roots of the characteristic quadratic are complex.
    NoRealEigenvalues,
}

/// Result of [`eigen_decomposition`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EigenDecomposition {
    pairs: Vec<EigenPair>,
    kind: DecompositionKind,
}

impl EigenDecomposition {
    /// The eigen pairs sorted by descending eigenvalue.
    #[inline]
    pub fn pairs(&self) -> &[EigenPair] {
        &self.pairs
    }

    /// Consume the decomposition and return the pairs.
    pub fn into_pairs(self) -> Vec<EigenPair> {
        self.pairs
    }

    /// How complete the decomposition is.
    #[inline]
    pub fn kind(&self) -> DecompositionKind {
        self.kind
    }

    /// Number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when no real eigenvalue exists.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The eigenvalues in descending order, repeated by multiplicity.
    pub fn eigenvalues(&self) -> Vec<f64> {
        self.pairs.iter().map(|p| p.eigenvalue).collect()
    }

    /// The eigenvalues in descending order with repeats collapsed.
    pub fn distinct_eigenvalues(&self) -> Vec<f64> {
        let mut out = self.eigenvalues();
        out.dedup();
        out
    }
}

/// Coefficients of the monic characteristic polynomial `det(λI - M)`, highest degree first.
///
/// For 2x2 this is `[1, -tr, det]`, for 3x3 `[1, -tr, c, -det]` where `c` is
/// the sum of the principal 2x2 minors.
pub fn characteristic_polynomial(m: &Matrix) -> Result<Vec<f64>, AlgebraError> {
    let tr = ops::trace(m)?;
    let det = ops::determinant(m)?;
    match m.rows() {
        2 => Ok(vec![1.0, -tr, det]),
        _ => Ok(vec![1.0, -tr, principal_minor_sum(m), -det]),
    }
}

fn principal_minor_sum(m: &Matrix) -> f64 {
    let a = |i, j| m.get(i, j);
    a(0, 0) * a(1, 1) - a(0, 1) * a(1, 0) + a(0, 0) * a(2, 2) - a(0, 2) * a(2, 0) + a(1, 1) * a(2, 2)
        - a(1, 2) * a(2, 1)
}

/// Largest absolute entry, used to scale tolerances.
fn magnitude_scale(m: &Matrix) -> f64 {
    m.iter_rows()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |acc, x| acc.max(x.abs()))
}

/// A root of the characteristic polynomial and how often it repeats.
#[derive(Debug, Clone, Copy)]
struct RootGroup {
    value: f64,
    multiplicity: usize,
}

/// Real roots of the characteristic polynomial, descending, plus whether some
/// roots were complex.
fn real_roots(m: &Matrix) -> Result<(Vec<f64>, bool), AlgebraError> {
    let coeffs = characteristic_polynomial(m)?;
    let symmetric = is_symmetric(m);
    let mut roots = match m.rows() {
        2 => quadratic_roots(coeffs[1], coeffs[2], symmetric),
        _ => cubic_roots(coeffs[1], coeffs[2], coeffs[3], symmetric),
    };
    let complex = roots.len() < m.rows();
    roots.sort_by(|a, b| b.total_cmp(a));
    Ok((roots, complex))
}

/// Real roots of `λ² + bλ + c`.
fn quadratic_roots(b: f64, c: f64, symmetric: bool) -> Vec<f64> {
    let mut disc = b * b - 4.0 * c;
    if disc < 0.0 {
        let slack = DISCRIMINANT_EPS * (b * b + 4.0 * c.abs());
        if !(symmetric || disc >= -slack) {
            return Vec::new();
        }
        disc = 0.0;
    }
    let s = disc.sqrt();
    vec![(-b + s) / 2.0, (-b - s) / 2.0]
}

/// Real roots of `λ³ + aλ² + bλ + c`.
///
/// Symmetric matrices always have three real roots, so for them a positive
/// discriminant is treated as rounding noise.
fn cubic_roots(a: f64, b: f64, c: f64, symmetric: bool) -> Vec<f64> {
    // substitute λ = t - a/3 to get t³ + pt + q = 0
    let shift = -a / 3.0;
    let p = b - a * a / 3.0;
    let q = 2.0 * a * a * a / 27.0 - a * b / 3.0 + c;

    let p3 = p * p * p / 27.0;
    let q2 = q * q / 4.0;
    let disc = q2 + p3;

    if p >= 0.0 && (symmetric || disc <= DISCRIMINANT_EPS * (p3.abs() + q2)) {
        // p and q vanish together: triple root
        return vec![shift; 3];
    }

    if symmetric || disc <= DISCRIMINANT_EPS * (p3.abs() + q2) {
        let r = 2.0 * (-p / 3.0).sqrt();
        let arg = 3.0 * q / (2.0 * p) * (-3.0 / p).sqrt();
        let arg = if arg.is_nan() { 1.0 } else { arg.clamp(-1.0, 1.0) };
        let theta = arg.acos() / 3.0;
        return (0..3)
            .map(|k| r * (theta - 2.0 * PI * k as f64 / 3.0).cos() + shift)
            .collect();
    }

    log::debug!("characteristic cubic has a complex pair, keeping the real root only");
    let s = disc.sqrt();
    vec![(-q / 2.0 + s).cbrt() + (-q / 2.0 - s).cbrt() + shift]
}

/// Split sorted roots into runs whose neighbours lie within `tol`.
fn cluster_roots(roots: &[f64], tol: f64) -> Vec<Vec<f64>> {
    let mut clusters: Vec<Vec<f64>> = Vec::new();
    for &root in roots {
        if let Some(last) = clusters.last_mut() {
            if last.last().is_some_and(|prev| (prev - root).abs() <= tol) {
                last.push(root);
                continue;
            }
        }
        clusters.push(vec![root]);
    }
    clusters
}

/// Turn a cluster of close roots into root groups.
///
/// The cluster is one repeated root, reported at its mean, only when
/// `M - λI` is rank deficient at that mean. Otherwise every root stands
/// on its own with its computed value.
fn resolve_cluster(m: &Matrix, cluster: Vec<f64>, scale: f64) -> Vec<RootGroup> {
    let mean = cluster.iter().sum::<f64>() / cluster.len() as f64;
    let rank_deficient = || !ops::null_space(&shifted(m, mean), NULL_SPACE_EPS * scale).is_empty();
    if cluster.len() == 1 || rank_deficient() {
        return vec![RootGroup {
            value: mean,
            multiplicity: cluster.len(),
        }];
    }

    log::debug!("roots {cluster:?} are close but distinct");
    cluster
        .into_iter()
        .map(|value| RootGroup {
            value,
            multiplicity: 1,
        })
        .collect()
}

/// Orthonormalize with modified Gram-Schmidt, dropping dependent vectors.
fn orthonormalize(vectors: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    let mut basis: Vec<Vec<f64>> = Vec::with_capacity(vectors.len());
    for mut v in vectors {
        for u in &basis {
            let d: f64 = v.iter().zip(u).map(|(a, b)| a * b).sum();
            v.iter_mut().zip(u).for_each(|(a, b)| *a -= d * b);
        }
        let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > SIGN_EPS {
            v.iter_mut().for_each(|x| *x /= norm);
            basis.push(v);
        }
    }
    basis
}

/// Flip the vector so its first non-negligible component is positive, and clear negative zeros.
fn apply_sign_convention(v: &mut [f64]) {
    if let Some(first) = v.iter().find(|x| x.abs() > SIGN_EPS) {
        if *first < 0.0 {
            v.iter_mut().for_each(|x| *x = -*x);
        }
    }
    v.iter_mut().filter(|x| **x == 0.0).for_each(|x| *x = 0.0);
}

/// `m - lambda * I`.
fn shifted(m: &Matrix, lambda: f64) -> Matrix {
    Matrix::from_fn(m.dimension(), |i, j| {
        if i == j {
            m.get(i, j) - lambda
        } else {
            m.get(i, j)
        }
    })
}

/// Unit eigenvectors of `m` for the eigenvalue `lambda`.
fn eigenspace(m: &Matrix, lambda: f64, scale: f64) -> Vec<Vec<f64>> {
    let shifted = shifted(m, lambda);

    // widen the tolerance when the root is too inaccurate to expose a null space
    for widen in [1.0, 1e2, 1e4] {
        let basis = ops::null_space(&shifted, NULL_SPACE_EPS * scale * widen);
        if !basis.is_empty() {
            let mut basis = orthonormalize(basis);
            basis.iter_mut().for_each(|v| apply_sign_convention(v));
            return basis;
        }
    }
    Vec::new()
}

/// Compute the real eigenvalues of a square matrix in descending order.
///
/// Repeated roots appear once per multiplicity. The list is shorter than the
/// matrix size when some roots are complex.
pub fn eigenvalues(m: &Matrix) -> Result<Vec<f64>, AlgebraError> {
    Ok(real_roots(m)?.0)
}

/// Compute the real eigen decomposition of a square matrix.
///
/// # Arguments
///
/// * `m` - A 2x2 or 3x3 matrix.
///
/// # Returns
///
/// The eigen pairs sorted by descending eigenvalue together with a
/// [`DecompositionKind`]. A short or empty list is a normal outcome.
pub fn eigen_decomposition(m: &Matrix) -> Result<EigenDecomposition, AlgebraError> {
    let (roots, complex) = real_roots(m)?;
    let n = m.rows();

    if roots.is_empty() {
        return Ok(EigenDecomposition {
            pairs: Vec::new(),
            kind: DecompositionKind::NoRealEigenvalues,
        });
    }

    let scale = magnitude_scale(m);
    let group_tol = match n {
        2 => REPEATED_EIGENVALUE_EPS,
        _ => CUBIC_REPEATED_EPS * scale.max(1.0),
    };

    let mut kind = if complex {
        DecompositionKind::Reduced
    } else {
        DecompositionKind::Diagonalizable
    };
    let mut pairs = Vec::with_capacity(n);

    let groups = cluster_roots(&roots, group_tol)
        .into_iter()
        .flat_map(|cluster| resolve_cluster(m, cluster, scale));

    for group in groups {
        let basis = eigenspace(m, group.value, scale);
        if basis.is_empty() {
            log::debug!("no eigenvector found for eigenvalue {}", group.value);
            kind = DecompositionKind::Reduced;
            continue;
        }

        if basis.len() < group.multiplicity && kind == DecompositionKind::Diagonalizable {
            log::warn!(
                "eigenvalue {} has multiplicity {} but only {} independent eigenvectors",
                group.value,
                group.multiplicity,
                basis.len()
            );
            kind = DecompositionKind::Defective;
        }

        for k in 0..group.multiplicity {
            let v = &basis[k.min(basis.len() - 1)];
            pairs.push(EigenPair {
                eigenvalue: group.value,
                eigenvector: v.clone(),
            });
        }
    }

    Ok(EigenDecomposition { pairs, kind })
}

/// Compute the real eigen pairs of a square matrix, see [`eigen_decomposition`].
pub fn eigen_pairs(m: &Matrix) -> Result<Vec<EigenPair>, AlgebraError> {
    Ok(eigen_decomposition(m)?.into_pairs())
}
