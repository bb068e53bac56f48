//! Defines the DH parameter data structure

pub mod dh_kinematics {
    use crate::constraints::Constraints;
    use crate::kinematic_traits::Joints;
    use crate::utils::deg;

    /// Array index of the elbow (joint 3). Its device zero is at the mechanical maximum,
    /// not at the minimum as for all other joints.
    pub const ELBOW: usize = 2;

    /// Parameters for the kinematic model of the robot. See
    /// [parameters_robots.rs](parameters_robots.rs) for the youBot arm values.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Parameters {
        /// DH theta: fixed angle offset added to each joint angle (rotation around Z).
        pub theta: [f64; 5],

        /// DH d: translation along Z.
        pub d: [f64; 5],

        /// DH alpha: rotation around X.
        pub alpha: [f64; 5],

        /// DH r: translation along X (link length).
        pub r: [f64; 5],

        /// Joint limits in standard (centered) angles. Also bound the inverse search.
        pub standard_limits: Constraints,

        /// Joint limits in device angles, as accepted by the motor controllers.
        pub device_limits: Constraints,

        /// Spacing limits of the gripper bars, meters.
        pub gripper_limits: [f64; 2],
    }

    impl Parameters {
        /// The standard angle that corresponds to device zero for the given joint
        /// (array index 0..5).
        pub fn device_offset(&self, joint: usize) -> f64 {
            if joint == ELBOW {
                self.standard_limits.to[joint]
            } else {
                self.standard_limits.from[joint]
            }
        }

        /// Converts standard angle to device angle for the given joint (array index).
        pub fn to_device(&self, joint: usize, standard: f64) -> f64 {
            standard - self.device_offset(joint)
        }

        /// Converts device angle to standard angle for the given joint (array index).
        pub fn to_standard(&self, joint: usize, device: f64) -> f64 {
            device + self.device_offset(joint)
        }

        pub fn joints_to_device(&self, standard: &Joints) -> Joints {
            std::array::from_fn(|i| self.to_device(i, standard[i]))
        }

        pub fn joints_from_device(&self, device: &Joints) -> Joints {
            std::array::from_fn(|i| self.to_standard(i, device[i]))
        }

        /// Convert to string yaml representation (quick viewing, saving, etc).
        pub fn to_yaml(&self) -> String {
            fn plain(values: &[f64]) -> String {
                values.iter().map(|x| format!("{:?}", x)).collect::<Vec<_>>().join(", ")
            }
            fn angles(values: &[f64]) -> String {
                values.iter().map(deg).collect::<Vec<_>>().join(", ")
            }
            format!(
                "dh_parameters:\n  \
              theta: [{}]\n  \
              d: [{}]\n  \
              alpha: [{}]\n  \
              r: [{}]\n\
            standard_limits:\n  \
              from: [{}]\n  \
              to: [{}]\n\
            device_limits:\n  \
              from: [{}]\n  \
              to: [{}]\n\
            gripper_limits: [{}]\n",
                angles(&self.theta),
                plain(&self.d),
                angles(&self.alpha),
                plain(&self.r),
                plain(&self.standard_limits.from),
                plain(&self.standard_limits.to),
                plain(&self.device_limits.from),
                plain(&self.device_limits.to),
                plain(&self.gripper_limits),
            )
        }
    }
}
