use serde::{Deserialize, Serialize};

use crate::error::{BoidsError, BoidsResult};
use crate::vector::Vector3;

const AXIS_NAMES: [char; 3] = ['x', 'y', 'z'];

/// Axis-aligned box that pushes agents back in with a fixed strength.
///
/// The push is bang-bang: an agent outside the box on some axis receives
/// exactly `strength` on that axis no matter how far out it is, so it may
/// oscillate around the wall instead of settling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    min: Vector3,
    max: Vector3,
    strength: f64,
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            min: Vector3::ZERO,
            max: Vector3::new(100.0, 100.0, 100.0),
            strength: 10.0,
        }
    }
}

impl Boundary {
    pub fn new(min: Vector3, max: Vector3, strength: f64) -> BoidsResult<Self> {
        let boundary = Self { min, max, strength };
        boundary.validate()?;
        Ok(boundary)
    }

    pub fn validate(&self) -> BoidsResult<()> {
        let (min, max) = (self.min.to_array(), self.max.to_array());
        for axis in 0..3 {
            if !(min[axis].is_finite() && max[axis].is_finite()) || min[axis] > max[axis] {
                return Err(BoidsError::InvalidBoundary {
                    axis: AXIS_NAMES[axis],
                    min: min[axis],
                    max: max[axis],
                });
            }
        }
        if !self.strength.is_finite() {
            return Err(BoidsError::InvalidConfig(format!(
                "boundary strength must be finite, got {}",
                self.strength
            )));
        }
        Ok(())
    }

    pub fn min(&self) -> Vector3 {
        self.min
    }

    pub fn max(&self) -> Vector3 {
        self.max
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn contains(&self, position: Vector3) -> bool {
        self.correction(position) == Vector3::ZERO
    }

    pub fn correction(&self, position: Vector3) -> Vector3 {
        let (min, max) = (self.min.to_array(), self.max.to_array());
        let mut push = [0.0; 3];
        for (axis, value) in position.to_array().into_iter().enumerate() {
            push[axis] = if value < min[axis] {
                self.strength
            } else if value > max[axis] {
                -self.strength
            } else {
                0.0
            };
        }
        Vector3::from_array(push)
    }
}
