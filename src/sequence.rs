//! Automatic mode: cycling the arm through a list of stored joint vectors.

use crate::kinematic_traits::Joints;
use crate::manipulator::{ArmDriver, CommandError, Manipulator};
use tracing::info;

/// Ordered standard joint vectors. When running, each [PoseSequence::tick] commands
/// the next entry as soon as the arm has reached the previous one, wrapping around
/// at the end of the list.
#[derive(Debug, Clone, Default)]
pub struct PoseSequence {
    poses: Vec<Joints>,
    next: usize,
    running: bool,
}

impl PoseSequence {
    pub fn new(poses: Vec<Joints>) -> Self {
        PoseSequence { poses, next: 0, running: false }
    }

    pub fn push(&mut self, joints: Joints) {
        self.poses.push(joints);
    }

    /// Appends the current sensed position of the arm.
    pub fn record<D: ArmDriver>(&mut self, manipulator: &mut Manipulator<D>) -> Result<(), CommandError> {
        let joints = manipulator.sensed_axes()?;
        self.poses.push(joints);
        Ok(())
    }

    pub fn poses(&self) -> &[Joints] {
        &self.poses
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Starts from the first pose. Has no effect on an empty sequence.
    pub fn start(&mut self) {
        self.next = 0;
        self.running = !self.poses.is_empty();
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Commands the next pose if the sequence runs and the arm has settled.
    /// Returns the index of the pose sent, or `None` if nothing was sent.
    /// A rejected command stops the sequence.
    pub fn tick<D: ArmDriver>(&mut self, manipulator: &mut Manipulator<D>) -> Result<Option<usize>, CommandError> {
        if !self.running || self.poses.is_empty() || !manipulator.position_reached() {
            return Ok(None);
        }
        let index = self.next;
        if let Err(err) = manipulator.set_axes(&self.poses[index]) {
            self.running = false;
            return Err(err);
        }
        info!("Sequence pose {} of {} commanded", index + 1, self.poses.len());
        self.next = (index + 1) % self.poses.len();
        Ok(Some(index))
    }
}
