use crate::{AlgebraError, Matrix};

/// Rotation of the plane by `angle` radians, counter-clockwise.
pub fn rotation_2d(angle: f64) -> Matrix {
    let (s, c) = angle.sin_cos();
    Matrix::from_fn(crate::Dimension::D2X2, |i, j| match (i, j) {
        (0, 0) | (1, 1) => c,
        (0, 1) => -s,
        _ => s,
    })
}

/// Compute the rotation matrix from an axis and angle.
///
/// # Arguments
///
/// * `axis` - The axis of rotation, normalized internally.
/// * `angle` - The angle of rotation in radians.
///
/// Example:
///
/// ```
/// use linvis_algebra::presets::rotation_3d;
///
/// let rotation = rotation_3d(&[1.0, 0.0, 0.0], std::f64::consts::PI / 2.0).unwrap();
/// assert!((rotation.get(2, 1) - 1.0).abs() < 1e-12);
/// ```
pub fn rotation_3d(axis: &[f64; 3], angle: f64) -> Result<Matrix, AlgebraError> {
    let magnitude = crate::vector::magnitude(axis);
    if magnitude < 1e-10 {
        return Err(AlgebraError::ZeroVector);
    }
    let [x, y, z] = axis.map(|v| v / magnitude);

    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;

    Matrix::from_rows(&[
        [c + x * x * t, x * y * t - z * s, x * z * t + y * s],
        [x * y * t + z * s, c + y * y * t, y * z * t - x * s],
        [x * z * t - y * s, y * z * t + x * s, c + z * z * t],
    ])
}

/// Axis-aligned scaling with one factor per axis (2 or 3 factors).
pub fn scale(factors: &[f64]) -> Result<Matrix, AlgebraError> {
    let n = factors.len();
    let mut m = Matrix::identity(n)?;
    for (i, f) in factors.iter().enumerate() {
        m = m.with_value(i, i, *f).unwrap_or(m);
    }
    Ok(m)
}

/// Horizontal shear of the plane, `x' = x + k y`.
pub fn shear_2d(k: f64) -> Matrix {
    Matrix::from_fn(crate::Dimension::D2X2, |i, j| match (i, j) {
        (0, 1) => k,
        (0, 0) | (1, 1) => 1.0,
        _ => 0.0,
    })
}

/// Reflection across the line through the origin at `angle` radians from the x axis.
pub fn reflection_2d(angle: f64) -> Matrix {
    let (s, c) = (2.0 * angle).sin_cos();
    Matrix::from_fn(crate::Dimension::D2X2, |i, j| match (i, j) {
        (0, 0) => c,
        (1, 1) => -c,
        _ => s,
    })
}
