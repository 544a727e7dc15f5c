use crate::AlgebraError;

fn require_same_len(v1: &[f64], v2: &[f64]) -> Result<(), AlgebraError> {
    if v1.len() != v2.len() {
        return Err(AlgebraError::LengthMismatch {
            left: v1.len(),
            right: v2.len(),
        });
    }
    Ok(())
}

/// Compute the Euclidean length of a vector.
pub fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Compute the dot product of two vectors of equal length.
pub fn dot_product(v1: &[f64], v2: &[f64]) -> Result<f64, AlgebraError> {
    require_same_len(v1, v2)?;
    Ok(v1.iter().zip(v2).map(|(a, b)| a * b).sum())
}

/// Compute the cross product of two 3-dimensional vectors.
///
/// Example:
///
/// ```
/// use linvis_algebra::vector::cross_product;
///
/// let z = cross_product(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).unwrap();
/// assert_eq!(z, [0.0, 0.0, 1.0]);
/// ```
pub fn cross_product(v1: &[f64], v2: &[f64]) -> Result<[f64; 3], AlgebraError> {
    let (a, b) = match (v1, v2) {
        ([a0, a1, a2], [b0, b1, b2]) => ([*a0, *a1, *a2], [*b0, *b1, *b2]),
        ([_, _, _], _) => return Err(AlgebraError::NotThreeDimensional(v2.len())),
        _ => return Err(AlgebraError::NotThreeDimensional(v1.len())),
    };
    Ok([
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ])
}

/// Compute the Euclidean distance between two points of equal dimension.
pub fn distance(v1: &[f64], v2: &[f64]) -> Result<f64, AlgebraError> {
    require_same_len(v1, v2)?;
    Ok(v1
        .iter()
        .zip(v2)
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt())
}

/// Compute the angle in radians between two vectors of equal length.
///
/// The cosine is clamped to `[-1, 1]` before `acos` so rounding can never
/// push it out of the domain. Returns `Ok(None)` when either vector has zero
/// length.
pub fn angle_between(v1: &[f64], v2: &[f64]) -> Result<Option<f64>, AlgebraError> {
    let dot = dot_product(v1, v2)?;
    let (n1, n2) = (magnitude(v1), magnitude(v2));
    if n1 == 0.0 || n2 == 0.0 {
        return Ok(None);
    }
    Ok(Some((dot / (n1 * n2)).clamp(-1.0, 1.0).acos()))
}

/// Scale a vector to unit length, or `None` for the zero vector.
pub fn normalize(v: &[f64]) -> Option<Vec<f64>> {
    let n = magnitude(v);
    (n > 0.0).then(|| v.iter().map(|x| x / n).collect())
}

/// Project `v` onto the line spanned by `onto`.
///
/// Returns `Ok(None)` when `onto` is the zero vector.
pub fn projection(v: &[f64], onto: &[f64]) -> Result<Option<Vec<f64>>, AlgebraError> {
    let num = dot_product(v, onto)?;
    let den = dot_product(onto, onto)?;
    if den == 0.0 {
        return Ok(None);
    }
    let s = num / den;
    Ok(Some(onto.iter().map(|x| x * s).collect()))
}
