use nalgebra::{Matrix3, Rotation3, Vector3};

/// Coordinate axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Build the matrix of a frame rotation of angle `alpha` about the coordinate axis `k`.
///
/// The returned matrix expresses, in the rotated frame, a vector given in the original frame:
/// rotating the frame by `+alpha` turns vectors by `-alpha`.
///
/// Arguments
/// ---------
/// * `alpha`: rotation angle in radians
/// * `k`: rotation axis
///
/// Return
/// ------
/// * the 3×3 frame rotation matrix
pub fn rotmt(alpha: f64, k: Axis) -> Matrix3<f64> {
    let axis = match k {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, -alpha).into()
}
