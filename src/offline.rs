//! Simulated arm, used when no hardware is connected.

use crate::kinematic_traits::Joints;
use crate::manipulator::{ArmDriver, DriverError};

/// Driver without hardware. Every command is taken as executed at once: the sensed
/// angles are simply the latest commanded device angles, and the arm is always settled.
#[derive(Debug, Clone, Default)]
pub struct OfflineDriver {
    commanded: Joints,
    gripper_spacing: f64,
}

impl OfflineDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given device angles as the current position.
    pub fn with_angles(device: Joints) -> Self {
        OfflineDriver { commanded: device, ..Default::default() }
    }

    pub fn gripper_spacing(&self) -> f64 {
        self.gripper_spacing
    }
}

impl ArmDriver for OfflineDriver {
    fn send_joint_command(&mut self, joint: usize, device_angle: f64) -> Result<(), DriverError> {
        let slot = joint
            .checked_sub(1)
            .and_then(|i| self.commanded.get_mut(i))
            .ok_or_else(|| DriverError(format!("no joint {}", joint)))?;
        *slot = device_angle;
        Ok(())
    }

    fn read_sensed_angles(&mut self) -> Result<Joints, DriverError> {
        Ok(self.commanded)
    }

    fn is_settled(&mut self, _desired: &Joints) -> bool {
        true
    }

    fn open_gripper(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    fn close_gripper(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    fn set_gripper_spacing(&mut self, spacing: f64) -> Result<(), DriverError> {
        self.gripper_spacing = spacing;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echoes_commands() {
        let mut driver = OfflineDriver::with_angles([1.0, 1.0, -1.0, 1.0, 1.0]);
        driver.send_joint_command(3, -2.5).unwrap();
        assert_eq!(driver.read_sensed_angles().unwrap(), [1.0, 1.0, -2.5, 1.0, 1.0]);
        assert!(driver.is_settled(&[9.0; 5]));
    }

    #[test]
    fn test_unknown_joint() {
        let mut driver = OfflineDriver::new();
        assert!(driver.send_joint_command(0, 1.0).is_err());
        assert!(driver.send_joint_command(6, 1.0).is_err());
        assert_eq!(driver.read_sensed_angles().unwrap(), [0.0; 5]);
    }
}
