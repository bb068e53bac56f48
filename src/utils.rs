//! Helper functions

use crate::kinematic_traits::Joints;
use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Translation3, UnitQuaternion};

/// Checks if all elements in the array are finite
pub fn is_valid(qs: &Joints) -> bool {
    qs.iter().all(|&q| q.is_finite())
}

/// Joint values in degrees, as used in log messages.
pub fn format_joints(joints: &Joints) -> String {
    joints
        .iter()
        .map(|q| format!("{:5.2}", q.to_degrees()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Allows to specify joint values in degrees (converts to radians)
pub fn as_radians(degrees: [i32; 5]) -> Joints {
    std::array::from_fn(|i| (degrees[i] as f64).to_radians())
}

/// Joint values in whole degrees, rounded to nearest.
pub fn as_degrees(joints: &Joints) -> [i32; 5] {
    std::array::from_fn(|i| joints[i].to_degrees().round() as i32)
}

/// Rigid transform of a homogeneous matrix. The rotation block is assumed to be orthonormal.
pub fn to_isometry(m: &Matrix4<f64>) -> Isometry3<f64> {
    let rotation: Matrix3<f64> = m.fixed_view::<3, 3>(0, 0).into_owned();
    Isometry3::from_parts(
        Translation3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]),
        UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation)),
    )
}

/// formatting for YAML output
pub(crate) fn deg(x: &f64) -> String {
    if *x == 0.0 {
        return "0.0".to_string();
    }
    format!("deg({:.6})", x.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_is_valid_with_all_finite() {
        let qs = [0.0, 1.0, -1.0, 0.5, PI];
        assert!(is_valid(&qs));
    }

    #[test]
    fn test_is_valid_with_nan() {
        let qs = [0.0, f64::NAN, 1.0, -1.0, 0.5];
        assert!(!is_valid(&qs));
    }

    #[test]
    fn test_is_valid_with_infinity() {
        let qs = [0.0, f64::INFINITY, 1.0, -1.0, 0.5];
        assert!(!is_valid(&qs));
    }

    #[test]
    fn test_degrees_radians() {
        let joints = as_radians([-168, -64, 145, -101, 0]);
        assert!((joints[2] - 145.0_f64.to_radians()).abs() < 1E-12);
        assert_eq!(as_degrees(&joints), [-168, -64, 145, -101, 0]);
    }

    #[test]
    fn test_deg_format() {
        assert_eq!(deg(&0.0), "0.0");
        assert_eq!(deg(&(-PI / 2.0)), "deg(-90.000000)");
    }
}
