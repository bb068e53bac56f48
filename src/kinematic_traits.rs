extern crate nalgebra as na;

use na::{Isometry3, Matrix4, Rotation3, Translation3, UnitQuaternion, Vector3, Vector6};
use std::f64::consts::FRAC_PI_2;

/// Joint angles of the 5 axis arm, base to wrist, in radians. Depending on the context
/// these are either standard (centered) or device (motor controller native) angles.
pub type Joints = [f64; 5];

/// The candle position, all joints at standard zero: the arm sticks straight up.
pub const JOINTS_AT_ZERO: Joints = [0.0; 5];

/// Pitch band around ±90 degrees where the roll / yaw decomposition degenerates.
pub const GIMBAL_LOCK_EPSILON: f64 = 0.001;

/// Pose of the tool center point in the base frame of the arm: position in meters
/// and roll, pitch, yaw in radians.
///
/// The rotation is composed as `Rz(yaw) * Ry(pitch) * Rx(roll)`.
/// ```
/// use youbot_kinematics::kinematic_traits::Pose;
///
/// let pose = Pose::new(0.2, 0.0, 0.3, 0.0, 0.5, 0.0);
/// let matrix = pose.to_matrix();
/// let back = Pose::from_matrix(&matrix);
/// assert!((back.pitch - 0.5).abs() < 1E-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Pose { x, y, z, roll, pitch, yaw }
    }

    /// Position only, orientation left at zero.
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Pose { x, y, z, ..Default::default() }
    }

    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Decomposes a homogeneous transform into position and roll, pitch, yaw.
    ///
    /// When the pitch is within [GIMBAL_LOCK_EPSILON] of ±90 degrees, yaw and roll cannot be
    /// separated. Yaw is then reported as 0 and the whole rotation around the vertical
    /// is attributed to roll.
    pub fn from_matrix(m: &Matrix4<f64>) -> Self {
        let pitch = f64::atan2(-m[(2, 0)], (m[(0, 0)].powi(2) + m[(1, 0)].powi(2)).sqrt());
        let (roll, yaw);

        if (pitch - FRAC_PI_2).abs() < GIMBAL_LOCK_EPSILON {
            yaw = 0.0;
            roll = f64::atan2(m[(0, 1)], m[(1, 1)]);
        } else if (pitch + FRAC_PI_2).abs() < GIMBAL_LOCK_EPSILON {
            yaw = 0.0;
            roll = -f64::atan2(m[(0, 1)], m[(1, 1)]);
        } else {
            let cp = pitch.cos();
            yaw = f64::atan2(m[(1, 0)] / cp, m[(0, 0)] / cp);
            roll = f64::atan2(m[(2, 1)] / cp, m[(2, 2)] / cp);
        }

        Pose {
            x: m[(0, 3)],
            y: m[(1, 3)],
            z: m[(2, 3)],
            roll,
            pitch,
            yaw,
        }
    }

    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::new(self.x, self.y, self.z),
            UnitQuaternion::from_euler_angles(self.roll, self.pitch, self.yaw),
        )
    }

    pub fn from_isometry(isometry: &Isometry3<f64>) -> Self {
        Self::from_matrix(&isometry.to_homogeneous())
    }

    /// Homogeneous 4x4 transform of this pose.
    pub fn to_matrix(&self) -> Matrix4<f64> {
        let rotation = Rotation3::from_euler_angles(self.roll, self.pitch, self.yaw);
        let mut m = rotation.to_homogeneous();
        m[(0, 3)] = self.x;
        m[(1, 3)] = self.y;
        m[(2, 3)] = self.z;
        m
    }

    /// [x, y, z, roll, pitch, yaw]
    pub fn to_vector(&self) -> Vector6<f64> {
        Vector6::new(self.x, self.y, self.z, self.roll, self.pitch, self.yaw)
    }

    pub fn from_vector(v: &Vector6<f64>) -> Self {
        Pose::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

pub trait Kinematics {
    /// Tool center point pose for the given standard joint angles. Always succeeds.
    fn forward(&self, qs: &Joints) -> Pose;

    /// Standard joint angles that bring the tool center point as close as possible
    /// to the position of the given pose. This is a best effort approximation: it is
    /// returned even if the pose is out of reach.
    fn inverse(&self, pose: &Pose) -> Joints;

    /// The end effector transform before decomposition into a [Pose].
    fn forward_matrix(&self, qs: &Joints) -> Matrix4<f64>;

    /// Frames of all 5 links, each expressed in the base frame. The last one
    /// is the end effector.
    fn forward_with_joint_poses(&self, qs: &Joints) -> [Isometry3<f64>; 5];
}
