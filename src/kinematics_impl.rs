use crate::kinematic_traits::{Joints, Kinematics, Pose, JOINTS_AT_ZERO};
use crate::parameters::dh_kinematics::Parameters;
use crate::utils::{format_joints, to_isometry};
use nalgebra::{Isometry3, Matrix4};
use tracing::debug;

/// Initial step of the inverse search, about one degree.
pub const INITIAL_STEP: f64 = 0.0174;

/// The inverse search stops once the step drops to this, about 0.1 degree.
pub const STEP_FLOOR: f64 = 0.0017;

#[derive(Debug, Clone, Copy)]
pub struct DHKinematics {
    parameters: Parameters,
}

/// Outcome of the inverse search. The search never fails, so this is what tells
/// a caller whether the target was actually reached.
#[derive(Debug, Clone)]
pub struct InverseReport {
    /// Best standard joint angles found.
    pub joints: Joints,

    /// Position distance (meters) between the target and the pose at `joints`.
    pub distance: f64,

    /// Best distance after each step size, in the order of decreasing step.
    pub step_history: Vec<f64>,
}

impl InverseReport {
    pub fn reached(&self, tolerance: f64) -> bool {
        self.distance <= tolerance
    }
}

impl DHKinematics {
    /// Creates a new `DHKinematics` instance with the given parameters.
    pub fn new(parameters: Parameters) -> Self {
        DHKinematics { parameters }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn link_transforms(&self, qs: &Joints) -> [Matrix4<f64>; 5] {
        let p = &self.parameters;
        std::array::from_fn(|i| dh_transformation(qs[i] + p.theta[i], p.d[i], p.alpha[i], p.r[i]))
    }

    /// Coordinate descent with decreasing step. Each joint in turn is moved one step down,
    /// or failing that one step up; the move is kept if it brings the TCP closer to
    /// the target and stays inside the standard limits. Passes repeat until no joint
    /// improves, then the step is halved.
    ///
    /// Only the position of the target is used, orientation is ignored.
    pub fn inverse_with_report(&self, target: &Pose) -> InverseReport {
        let limits = &self.parameters.standard_limits;
        let mut angles = JOINTS_AT_ZERO;
        let mut min_distance = distance(&self.forward(&angles), target);
        let mut step_history = Vec::new();

        let mut step = INITIAL_STEP;
        while step > STEP_FLOOR {
            let mut passes = 0;
            loop {
                let mut improved = false;
                for a in 0..5 {
                    let original = angles[a];

                    angles[a] = original - step;
                    let d = distance(&self.forward(&angles), target);
                    if d < min_distance && angles[a] > limits.from[a] {
                        min_distance = d;
                        improved = true;
                        continue;
                    }

                    angles[a] = original + step;
                    let d = distance(&self.forward(&angles), target);
                    if d < min_distance && angles[a] < limits.to[a] {
                        min_distance = d;
                        improved = true;
                        continue;
                    }

                    angles[a] = original;
                }
                passes += 1;
                if !improved {
                    break;
                }
            }
            debug!(step, passes, distance = min_distance, "inverse search step done");
            step_history.push(min_distance);
            step /= 2.0;
        }

        debug!(
            "inverse search finished at [{}], distance {:.6} m",
            format_joints(&angles),
            min_distance
        );
        InverseReport {
            joints: angles,
            distance: min_distance,
            step_history,
        }
    }
}

impl Kinematics for DHKinematics {
    fn forward(&self, qs: &Joints) -> Pose {
        Pose::from_matrix(&self.forward_matrix(qs))
    }

    fn inverse(&self, pose: &Pose) -> Joints {
        self.inverse_with_report(pose).joints
    }

    fn forward_matrix(&self, qs: &Joints) -> Matrix4<f64> {
        self.link_transforms(qs)
            .iter()
            .fold(Matrix4::identity(), |acc, k| acc * k)
    }

    fn forward_with_joint_poses(&self, qs: &Joints) -> [Isometry3<f64>; 5] {
        let links = self.link_transforms(qs);
        let mut accumulated = Matrix4::identity();
        std::array::from_fn(|i| {
            accumulated *= links[i];
            to_isometry(&accumulated)
        })
    }
}

/// Denavit-Hartenberg transform to the next frame:
/// `Rot_Z(theta) * Trans_Z(d) * Trans_X(r) * Rot_X(alpha)`.
pub fn dh_transformation(theta: f64, d: f64, alpha: f64, r: f64) -> Matrix4<f64> {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_alpha, cos_alpha) = alpha.sin_cos();

    let rot_z = Matrix4::new(
        cos_theta, -sin_theta, 0.0, 0.0,
        sin_theta, cos_theta, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );

    let trans_z = Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, d,
        0.0, 0.0, 0.0, 1.0,
    );

    let trans_x = Matrix4::new(
        1.0, 0.0, 0.0, r,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );

    let rot_x = Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, cos_alpha, -sin_alpha, 0.0,
        0.0, sin_alpha, cos_alpha, 0.0,
        0.0, 0.0, 0.0, 1.0,
    );

    rot_z * trans_z * trans_x * rot_x
}

/// Euclidean distance between the positions of two poses. Orientation is not compared.
pub fn distance(a: &Pose, b: &Pose) -> f64 {
    (a.position() - b.position()).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::as_radians;

    fn youbot() -> DHKinematics {
        DHKinematics::new(Parameters::youbot())
    }

    #[test]
    fn test_candle_pose() {
        let pose = youbot().forward(&JOINTS_AT_ZERO);
        assert!((pose.x - 0.033).abs() < 1E-9);
        assert!(pose.y.abs() < 1E-9);
        // 0.147 + 0.155 + 0.135 + 0.171
        assert!((pose.z - 0.608).abs() < 1E-9);
        assert!(pose.roll.abs() < 1E-9 && pose.pitch.abs() < 1E-9 && pose.yaw.abs() < 1E-9);
    }

    #[test]
    fn test_zero_angles_compose_dh_table() {
        let p = Parameters::youbot();
        let mut expected = Matrix4::identity();
        for i in 0..5 {
            expected *= dh_transformation(p.theta[i], p.d[i], p.alpha[i], p.r[i]);
        }
        let actual = youbot().forward_matrix(&JOINTS_AT_ZERO);
        assert!((actual - expected).norm() < 1E-12);
    }

    #[test]
    fn test_composition_order_matters() {
        // Same factors, reversed order: Rot_X * Trans_X * Trans_Z * Rot_Z
        fn reversed(theta: f64, d: f64, alpha: f64, r: f64) -> Matrix4<f64> {
            let rot_z = dh_transformation(theta, 0.0, 0.0, 0.0);
            let trans_z = dh_transformation(0.0, d, 0.0, 0.0);
            let trans_x = dh_transformation(0.0, 0.0, 0.0, r);
            let rot_x = dh_transformation(0.0, 0.0, alpha, 0.0);
            rot_x * trans_x * trans_z * rot_z
        }
        let p = Parameters::youbot();
        let mut chained = Matrix4::identity();
        for i in 0..5 {
            chained *= reversed(p.theta[i], p.d[i], p.alpha[i], p.r[i]);
        }
        let actual = youbot().forward_matrix(&JOINTS_AT_ZERO);
        assert!((actual - chained).norm() > 1E-3);
    }

    #[test]
    fn test_single_dh_transform() {
        let m = dh_transformation(std::f64::consts::FRAC_PI_2, 0.5, 0.0, 2.0);
        // Rotated 90 deg around Z, then 2 along the new X (world Y), 0.5 up
        assert!(m[(0, 3)].abs() < 1E-12);
        assert!((m[(1, 3)] - 2.0).abs() < 1E-12);
        assert!((m[(2, 3)] - 0.5).abs() < 1E-12);
    }

    #[test]
    fn test_planar_two_link_chain() {
        let mut parameters = Parameters::new();
        parameters.r = [1.0, 1.0, 0.0, 0.0, 0.0];
        let robot = DHKinematics::new(parameters);
        let straight = robot.forward(&JOINTS_AT_ZERO);
        assert!((straight.x - 2.0).abs() < 1E-12);

        let bent = robot.forward(&[0.0, std::f64::consts::FRAC_PI_2, 0.0, 0.0, 0.0]);
        assert!((bent.x - 1.0).abs() < 1E-12);
        assert!((bent.y - 1.0).abs() < 1E-12);
        assert!((bent.yaw - std::f64::consts::FRAC_PI_2).abs() < 1E-12);
    }

    #[test]
    fn test_joint_poses_end_with_tcp() {
        let robot = youbot();
        let joints = [0.3, -0.2, 0.5, 0.1, 0.7];
        let frames = robot.forward_with_joint_poses(&joints);
        let tcp = robot.forward(&joints);
        let last = frames[4].translation.vector;
        assert!((last - tcp.position()).norm() < 1E-9);
        // The first frame only depends on the base joint
        assert!((frames[0].translation.vector.z - 0.147).abs() < 1E-9);
    }

    #[test]
    fn test_wrist_rotation_does_not_move_tcp() {
        let robot = youbot();
        let a = robot.forward(&[0.2, 0.3, 0.4, 0.5, 0.0]);
        let b = robot.forward(&[0.2, 0.3, 0.4, 0.5, 1.0]);
        assert!(distance(&a, &b) < 1E-9);
    }

    #[test]
    fn test_inverse_of_candle_is_zero() {
        let robot = youbot();
        let target = robot.forward(&JOINTS_AT_ZERO);
        let report = robot.inverse_with_report(&target);
        for q in report.joints {
            assert!(q.abs() < STEP_FLOOR, "{:?}", report.joints);
        }
        assert!(report.distance < 1E-9);
    }

    #[test]
    fn test_inverse_reaches_reachable_targets() {
        let robot = youbot();
        for joints in [
            [-0.5, -0.5, -0.5, 0.6, 0.0],
            [0.8, -0.2, -0.5, 0.4, -0.5],
            [-0.1, 0.7, 0.8, 0.7, -0.2],
            [0.7, 0.0, -0.5, -0.4, -0.1],
        ] {
            let target = robot.forward(&joints);
            let solution = robot.inverse(&target);
            let error = distance(&robot.forward(&solution), &target);
            assert!(error < 0.001, "{:?} ended {} m away", joints, error);
        }
    }

    #[test]
    fn test_inverse_history_never_regresses() {
        let robot = youbot();
        let target = robot.forward(&as_radians([30, 20, 40, 10, 0]));
        let report = robot.inverse_with_report(&target);
        // 0.0174, 0.0087, 0.00435, 0.002175
        assert_eq!(report.step_history.len(), 4);
        for pair in report.step_history.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        assert_eq!(report.step_history.last(), Some(&report.distance));
    }

    #[test]
    fn test_unreachable_target_still_answers() {
        let robot = youbot();
        let far_away = Pose::at(5.0, 5.0, 5.0);
        let report = robot.inverse_with_report(&far_away);
        assert!(!report.reached(0.01));
        assert!(robot.parameters().standard_limits.compliant(&report.joints));
        let start = distance(&robot.forward(&JOINTS_AT_ZERO), &far_away);
        assert!(report.distance < start);
    }
}
