//! Hardcoded DH parameters and joint limits of the KUKA youBot arm

pub mod dh_kinematics {
    use crate::constraints::Constraints;
    use crate::parameters::dh_kinematics::Parameters;
    use std::f64::consts::FRAC_PI_2;

    impl Parameters {
        // Provides default values: a chain of zero length links without limits
        pub fn new() -> Self {
            Parameters {
                theta: [0.0; 5],
                d: [0.0; 5],
                alpha: [0.0; 5],
                r: [0.0; 5],
                standard_limits: Constraints::new([f64::NEG_INFINITY; 5], [f64::INFINITY; 5]),
                device_limits: Constraints::new([f64::NEG_INFINITY; 5], [f64::INFINITY; 5]),
                gripper_limits: [0.0, f64::INFINITY],
            }
        }

        /// The 5 axis youBot manipulator. Standard limits are from the datasheet,
        /// device limits are what the motor controllers accept.
        pub fn youbot() -> Self {
            Parameters {
                theta: [0.0, -FRAC_PI_2, 0.0, FRAC_PI_2, 0.0],
                d: [0.147, 0.0, 0.0, 0.0, 0.171],
                alpha: [-FRAC_PI_2, 0.0, 0.0, FRAC_PI_2, 0.0],
                r: [0.033, 0.155, 0.135, 0.0, 0.0],
                standard_limits: Constraints::new(
                    [
                        -2.949606, // -169 deg
                        -1.134464, // -65 deg
                        -2.635447, // -151 deg
                        -1.788962, // -102.5 deg
                        -2.923426, // -167.5 deg
                    ],
                    [
                        2.949606, // 169 deg
                        1.570796, // 90 deg
                        2.548181, // 146 deg
                        1.788962, // 102.5 deg
                        2.923426, // 167.5 deg
                    ],
                ),
                device_limits: Constraints::new(
                    [0.0100692, 0.0100692, -5.02655, 0.0221239, 0.110619],
                    [5.84014, 2.61799, -0.015708, 3.4292, 5.64159],
                ),
                gripper_limits: [0.0, 0.023],
            }
        }
    }

    impl Default for Parameters {
        fn default() -> Self {
            Self::youbot()
        }
    }
}
