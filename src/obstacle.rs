use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::boid::AgentState;
use crate::error::{BoidsError, BoidsResult};
use crate::vector::Vector3;

// Push direction for an agent sitting exactly on an obstacle center.
const CONTACT_FALLBACK_DIRECTION: Vector3 = Vector3::new(1.0, 0.0, 0.0);

/// Anything that repels agents. New shapes implement this trait.
pub trait Obstacle: fmt::Debug + Send + Sync {
    fn correction(&self, agent: &AgentState) -> Vector3;
}

/// Point obstacle with a radial falloff.
///
/// Inside `full_strength_radius` the push is saturated at `strength`. It
/// falls off linearly to zero at `zero_effect_radius` and is absent beyond
/// it, so `full_strength_radius <= zero_effect_radius`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereObstacle {
    center: Vector3,
    strength: f64,
    full_strength_radius: f64,
    zero_effect_radius: f64,
}

impl SphereObstacle {
    pub fn new(
        center: Vector3,
        strength: f64,
        full_strength_radius: f64,
        zero_effect_radius: f64,
    ) -> BoidsResult<Self> {
        let obstacle = Self {
            center,
            strength,
            full_strength_radius,
            zero_effect_radius,
        };
        obstacle.validate()?;
        Ok(obstacle)
    }

    pub fn validate(&self) -> BoidsResult<()> {
        if !self.center.is_finite() || !self.strength.is_finite() {
            return Err(BoidsError::InvalidObstacle(format!(
                "center {} and strength {} must be finite",
                self.center, self.strength
            )));
        }
        if !self.full_strength_radius.is_finite() || !self.zero_effect_radius.is_finite() {
            return Err(BoidsError::InvalidObstacle("radii must be finite".to_string()));
        }
        if self.full_strength_radius < 0.0 {
            return Err(BoidsError::InvalidObstacle(format!(
                "full-strength radius {} is negative",
                self.full_strength_radius
            )));
        }
        if self.full_strength_radius > self.zero_effect_radius {
            return Err(BoidsError::InvalidObstacle(format!(
                "full-strength radius {} exceeds zero-effect radius {}",
                self.full_strength_radius, self.zero_effect_radius
            )));
        }
        Ok(())
    }

    pub fn center(&self) -> Vector3 {
        self.center
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn full_strength_radius(&self) -> f64 {
        self.full_strength_radius
    }

    pub fn zero_effect_radius(&self) -> f64 {
        self.zero_effect_radius
    }

    fn push_direction(&self, offset: Vector3) -> Vector3 {
        match offset.unit() {
            Ok(direction) => direction,
            Err(_) => {
                trace!(center = %self.center, "agent on obstacle center, using fallback direction");
                CONTACT_FALLBACK_DIRECTION
            }
        }
    }
}

impl Obstacle for SphereObstacle {
    fn correction(&self, agent: &AgentState) -> Vector3 {
        let offset = agent.position.sub(self.center);
        let distance = offset.magnitude();

        if distance >= self.zero_effect_radius {
            return Vector3::ZERO;
        }

        let direction = self.push_direction(offset);
        if distance <= self.full_strength_radius {
            return direction.scale(self.strength);
        }

        let falloff = (self.zero_effect_radius - distance)
            / (self.zero_effect_radius - self.full_strength_radius);
        direction.scale(falloff * self.strength)
    }
}
