//! Forward and inverse kinematics for the 5 axis KUKA youBot arm, and the glue to command it.
//!
//! The arm is described by Denavit-Hartenberg parameters. The forward kinematics chains the
//! five link transforms and decomposes the result into the tool center point position and
//! roll, pitch, yaw. The inverse kinematics is a numeric search in joint space: starting from
//! the candle position, each joint is nudged in turn by a decreasing step for as long as this
//! brings the TCP closer to the target position, without leaving the joint limits.
//!
//! # Features
//!
//! - Forward kinematics with explicit handling of the gimbal lock at pitch ±90 degrees.
//! - Inverse kinematics that always answers; the remaining distance to the target is reported.
//! - Conversion between standard (centered) joint angles and the device angles of the
//!   motor controllers, whose zero is at a joint limit.
//! - A [manipulator::Manipulator] that validates every command against the device limits
//!   before passing it to an [manipulator::ArmDriver], and an offline driver to run
//!   without hardware.
//! - Reading the parameters from YAML (feature `allow_filesystem`).
//!
//! # Angles
//!
//! Standard angles are zero when the arm sticks straight up ("candle"), with the limits
//! roughly symmetric around it. Device angles are what the motor controllers count from
//! their own reference; for the elbow (joint 3) that reference is the upper limit, for
//! all other joints the lower limit.
//!
//! ```
//! use youbot_kinematics::kinematic_traits::{Kinematics, JOINTS_AT_ZERO};
//! use youbot_kinematics::kinematics_impl::DHKinematics;
//! use youbot_kinematics::parameters::dh_kinematics::Parameters;
//!
//! let robot = DHKinematics::new(Parameters::youbot());
//! let pose = robot.forward(&JOINTS_AT_ZERO);
//! assert!((pose.z - 0.608).abs() < 1E-9);
//! ```

pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;

#[cfg(feature = "allow_filesystem")]
pub mod parameter_error;

pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod constraints;

pub mod manipulator;

pub mod offline;

pub mod sequence;

#[cfg(test)]
#[cfg(feature = "allow_filesystem")]
mod tests;
