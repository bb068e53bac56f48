use crate::kinematic_traits::Joints;

/// Lower and upper limit per joint. Limits are exclusive: an angle exactly at the limit
/// is not accepted, as the motor controllers refuse to go there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    /// Lower limits
    pub from: [f64; 5],

    /// Upper limits
    pub to: [f64; 5],
}

impl Constraints {
    pub fn new(from: [f64; 5], to: [f64; 5]) -> Self {
        Constraints { from, to }
    }

    /// Checks a single joint (array index 0..5). Out of range index is never within.
    pub fn within(&self, joint: usize, angle: f64) -> bool {
        joint < 5 && angle > self.from[joint] && angle < self.to[joint]
    }

    pub fn compliant(&self, angles: &Joints) -> bool {
        (0..5).all(|i| self.within(i, angles[i]))
    }

    /// True if every lower limit is below its upper limit and all values are finite.
    pub fn is_consistent(&self) -> bool {
        (0..5).all(|i| {
            self.from[i].is_finite() && self.to[i].is_finite() && self.from[i] < self.to[i]
        })
    }
}
