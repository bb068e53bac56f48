//! Commanding the arm through a hardware (or simulated) driver.
//!
//! The [Manipulator] owns the kinematics and speaks standard angles and TCP poses to its
//! callers. Towards the [ArmDriver] it only uses device angles, after checking them against
//! the device limits. The driver never sees a command the motor controllers would refuse.

use crate::kinematic_traits::{Joints, Kinematics, Pose, JOINTS_AT_ZERO};
use crate::kinematics_impl::{DHKinematics, InverseReport};
use crate::parameters::dh_kinematics::Parameters;
use crate::utils::{as_degrees, as_radians, format_joints};
use tracing::{debug, info, warn};

/// A joint counts as arrived when its sensed angle is this close (radians) to the commanded one.
pub const SETTLE_TOLERANCE: f64 = 0.01745;

/// Failure reported by the driver layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverError(pub String);

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Driver Error: {}", self.0)
    }
}

impl std::error::Error for DriverError {}

/// Why a command was not sent to the arm.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Joint numbers are 1 to 5.
    InvalidJoint(usize),
    OutOfRange { joint: usize, device_angle: f64, from: f64, to: f64 },
    GripperOutOfRange { spacing: f64, from: f64, to: f64 },
    Driver(DriverError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            CommandError::InvalidJoint(joint) =>
                write!(f, "Invalid joint {}, must be 1 to 5", joint),
            CommandError::OutOfRange { joint, device_angle, from, to } =>
                write!(f, "Joint {} device angle {:.5} outside ({:.5}, {:.5})",
                       joint, device_angle, from, to),
            CommandError::GripperOutOfRange { spacing, from, to } =>
                write!(f, "Gripper spacing {:.4} m outside [{:.4}, {:.4}]", spacing, from, to),
            CommandError::Driver(ref err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<DriverError> for CommandError {
    fn from(err: DriverError) -> Self {
        CommandError::Driver(err)
    }
}

/// What the manipulator needs from the hardware layer. All angles are device angles.
pub trait ArmDriver {
    /// Send the target angle for one joint (1 to 5). The angle is already validated.
    fn send_joint_command(&mut self, joint: usize, device_angle: f64) -> Result<(), DriverError>;

    /// Current device angles of all joints.
    fn read_sensed_angles(&mut self) -> Result<Joints, DriverError>;

    /// True when every joint is within [SETTLE_TOLERANCE] of the desired device angle.
    fn is_settled(&mut self, desired: &Joints) -> bool {
        match self.read_sensed_angles() {
            Ok(sensed) => (0..5).all(|i| (sensed[i] - desired[i]).abs() < SETTLE_TOLERANCE),
            Err(err) => {
                warn!("Cannot read sensed angles: {}", err);
                false
            }
        }
    }

    fn open_gripper(&mut self) -> Result<(), DriverError>;

    fn close_gripper(&mut self) -> Result<(), DriverError>;

    /// Gripper bar spacing in meters, already validated.
    fn set_gripper_spacing(&mut self, spacing: f64) -> Result<(), DriverError>;
}

/// Joint vectors the arm knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredPose {
    /// Folded down, the parking position. Every joint just inside its device limit.
    Home,
    /// All joints at standard zero, the arm points straight up.
    Candle,
}

impl StoredPose {
    /// Standard joint angles of this pose.
    pub fn joints(&self) -> Joints {
        match self {
            StoredPose::Home => as_radians([-168, -64, 145, -101, -161]),
            StoredPose::Candle => JOINTS_AT_ZERO,
        }
    }
}

pub struct Manipulator<D: ArmDriver> {
    kinematics: DHKinematics,
    driver: D,
    /// Device angles of the latest accepted command per joint.
    latest_desired: Joints,
}

impl<D: ArmDriver> Manipulator<D> {
    pub fn new(kinematics: DHKinematics, driver: D) -> Self {
        Manipulator {
            kinematics,
            driver,
            latest_desired: [0.0; 5],
        }
    }

    /// Creates the manipulator and drives the arm to [StoredPose::Home], so that
    /// the desired position is defined from the start.
    pub fn initialize(kinematics: DHKinematics, driver: D) -> Result<Self, CommandError> {
        let mut manipulator = Self::new(kinematics, driver);
        manipulator.set_stored_pose(StoredPose::Home)?;
        Ok(manipulator)
    }

    pub fn kinematics(&self) -> &DHKinematics {
        &self.kinematics
    }

    fn parameters(&self) -> &Parameters {
        self.kinematics.parameters()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Device angles of the latest accepted commands.
    pub fn latest_desired(&self) -> &Joints {
        &self.latest_desired
    }

    pub fn set_stored_pose(&mut self, pose: StoredPose) -> Result<(), CommandError> {
        info!("Moving to stored pose {:?}", pose);
        self.set_axes(&pose.joints())
    }

    /// Solves the inverse kinematics for the given TCP pose and commands the result.
    /// Returns the search report; the arm is moved even if the target was not reached.
    pub fn set_pose(&mut self, tcp: &Pose) -> Result<InverseReport, CommandError> {
        let report = self.kinematics.inverse_with_report(tcp);
        self.set_axes(&report.joints)?;
        Ok(report)
    }

    /// Standard joint angles the arm would be commanded for this TCP pose.
    /// Nothing is sent.
    pub fn pre_plan_motion(&self, tcp: &Pose) -> Joints {
        self.kinematics.inverse(tcp)
    }

    /// Commands all joints, in order. Stops at the first joint that fails; joints
    /// before it have already been commanded.
    pub fn set_axes(&mut self, standard: &Joints) -> Result<(), CommandError> {
        for (i, angle) in standard.iter().enumerate() {
            self.set_axis(i + 1, *angle)?;
        }
        Ok(())
    }

    pub fn set_axes_degrees(&mut self, degrees: [i32; 5]) -> Result<(), CommandError> {
        self.set_axes(&as_radians(degrees))
    }

    /// Commands a single joint (1 to 5) to a standard angle in radians.
    pub fn set_axis(&mut self, joint: usize, standard: f64) -> Result<(), CommandError> {
        if !(1..=5).contains(&joint) {
            warn!("Rejected command for joint {}", joint);
            return Err(CommandError::InvalidJoint(joint));
        }
        let device_angle = self.parameters().to_device(joint - 1, standard);
        self.command_device_axis(joint, device_angle)
    }

    pub fn set_axis_degrees(&mut self, joint: usize, degrees: i32) -> Result<(), CommandError> {
        self.set_axis(joint, (degrees as f64).to_radians())
    }

    /// Sends a device angle to one joint (1 to 5) after checking it against the
    /// device limits. Angles at or beyond a limit are rejected and not sent.
    pub fn command_device_axis(&mut self, joint: usize, device_angle: f64) -> Result<(), CommandError> {
        if !(1..=5).contains(&joint) {
            warn!("Rejected command for joint {}", joint);
            return Err(CommandError::InvalidJoint(joint));
        }
        let limits = &self.parameters().device_limits;
        if !limits.within(joint - 1, device_angle) {
            let err = CommandError::OutOfRange {
                joint,
                device_angle,
                from: limits.from[joint - 1],
                to: limits.to[joint - 1],
            };
            warn!("Rejected command: {}", err);
            return Err(err);
        }
        self.driver.send_joint_command(joint, device_angle)?;
        self.latest_desired[joint - 1] = device_angle;
        Ok(())
    }

    /// Current standard joint angles, radians.
    pub fn sensed_axes(&mut self) -> Result<Joints, CommandError> {
        let device = self.driver.read_sensed_angles()?;
        Ok(self.parameters().joints_from_device(&device))
    }

    /// Current standard joint angles, whole degrees.
    pub fn sensed_axes_degrees(&mut self) -> Result<[i32; 5], CommandError> {
        Ok(as_degrees(&self.sensed_axes()?))
    }

    /// Current TCP pose, from the sensed joint angles.
    pub fn sensed_position(&mut self) -> Result<Pose, CommandError> {
        let joints = self.sensed_axes()?;
        Ok(self.kinematics.forward(&joints))
    }

    /// True once the arm has arrived at the latest commanded angles.
    pub fn position_reached(&mut self) -> bool {
        let desired = self.latest_desired;
        let reached = self.driver.is_settled(&desired);
        if reached {
            debug!("Position reached: [{}]", format_joints(&self.parameters().joints_from_device(&desired)));
        }
        reached
    }

    pub fn open_gripper(&mut self) -> Result<(), CommandError> {
        Ok(self.driver.open_gripper()?)
    }

    pub fn close_gripper(&mut self) -> Result<(), CommandError> {
        Ok(self.driver.close_gripper()?)
    }

    /// Sets the open space between the gripper bars, millimeters.
    pub fn set_gripper(&mut self, millimeters: i32) -> Result<(), CommandError> {
        let spacing = millimeters as f64 / 1000.0;
        let [from, to] = self.parameters().gripper_limits;
        if !(from..=to).contains(&spacing) {
            let err = CommandError::GripperOutOfRange { spacing, from, to };
            warn!("Rejected command: {}", err);
            return Err(err);
        }
        Ok(self.driver.set_gripper_spacing(spacing)?)
    }
}
