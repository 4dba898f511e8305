use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::boid::{Boid, Goal};
use crate::boundary::Boundary;
use crate::error::{BoidsError, BoidsResult};
use crate::flock::Flock;
use crate::obstacle::SphereObstacle;
use crate::vector::Vector3;

pub const DEFAULT_CLUMPING_WEIGHT: f64 = 0.01;
pub const DEFAULT_MIN_DISTANCE: f64 = 100.0;
pub const DEFAULT_SCHOOLING_WEIGHT: f64 = 0.125;
pub const DEFAULT_MAX_SPEED: f64 = 100.0;

const MAX_WEIGHT: f64 = 10.0;
const MAX_DISTANCE: f64 = 1.0e6;
const MAX_SPEED_LIMIT: f64 = 1.0e6;

/// Per-agent tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoidConfig {
    /// Cohesion strength.
    pub clumping_weight: f64,
    /// Separation radius.
    pub min_distance: f64,
    /// Alignment strength.
    pub schooling_weight: f64,
    /// Zero freezes the agent.
    pub max_speed: f64,
}

impl Default for BoidConfig {
    fn default() -> Self {
        Self {
            clumping_weight: DEFAULT_CLUMPING_WEIGHT,
            min_distance: DEFAULT_MIN_DISTANCE,
            schooling_weight: DEFAULT_SCHOOLING_WEIGHT,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

impl BoidConfig {
    pub fn validate(&self) -> BoidsResult<()> {
        let fields = [
            ("clumping_weight", self.clumping_weight),
            ("min_distance", self.min_distance),
            ("schooling_weight", self.schooling_weight),
            ("max_speed", self.max_speed),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(BoidsError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Forces host-supplied values into range instead of rejecting them.
    pub fn sanitize(&mut self) {
        self.clumping_weight = clamp_finite(
            self.clumping_weight,
            0.0,
            MAX_WEIGHT,
            DEFAULT_CLUMPING_WEIGHT,
        );
        self.min_distance = clamp_finite(self.min_distance, 0.0, MAX_DISTANCE, DEFAULT_MIN_DISTANCE);
        self.schooling_weight = clamp_finite(
            self.schooling_weight,
            0.0,
            MAX_WEIGHT,
            DEFAULT_SCHOOLING_WEIGHT,
        );
        self.max_speed = clamp_finite(self.max_speed, 0.0, MAX_SPEED_LIMIT, DEFAULT_MAX_SPEED);
    }
}

/// Everything needed to build a ready-to-run [`Flock`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    pub boid: BoidConfig,
    pub boundary: Option<Boundary>,
    pub obstacles: Vec<SphereObstacle>,
    pub goal: Option<Goal>,
    pub scatter: ScatterConfig,
}

/// Initial placement: positions uniform in `[min, max]`, each velocity
/// component uniform in `[-speed, speed]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub min: Vector3,
    pub max: Vector3,
    pub speed: f64,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            min: Vector3::ZERO,
            max: Vector3::new(100.0, 100.0, 100.0),
            speed: 1.0,
        }
    }
}

impl FlockConfig {
    pub fn from_json(json: &str) -> BoidsResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> BoidsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> BoidsResult<()> {
        self.boid.validate()?;
        if let Some(boundary) = &self.boundary {
            boundary.validate()?;
        }
        for obstacle in &self.obstacles {
            obstacle.validate()?;
        }
        Boundary::new(self.scatter.min, self.scatter.max, 0.0)?;
        if !self.scatter.speed.is_finite() || self.scatter.speed < 0.0 {
            return Err(BoidsError::InvalidConfig(format!(
                "scatter speed must be finite and non-negative, got {}",
                self.scatter.speed
            )));
        }
        Ok(())
    }

    /// Builds `count` agents scattered by `seed`, with the boundary,
    /// obstacles and goal attached to each.
    pub fn build(&self, count: usize, seed: u64) -> BoidsResult<Flock> {
        self.validate()?;

        let mut flock = Flock::with_boids((0..count).map(|_| Boid::with_config(self.boid)).collect());
        flock.scatter(seed, self.scatter.min, self.scatter.max, self.scatter.speed);

        if let Some(boundary) = self.boundary {
            flock.attach_boundary(Arc::new(boundary));
        }
        for obstacle in &self.obstacles {
            flock.attach_obstacle(Arc::new(*obstacle));
        }
        if let Some(goal) = self.goal {
            for boid in flock.boids_mut() {
                boid.set_goal(goal);
            }
        }
        Ok(flock)
    }
}

fn clamp_finite(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(min, max)
}
