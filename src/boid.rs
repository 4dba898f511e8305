use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::boundary::Boundary;
use crate::config::BoidConfig;
use crate::error::BoidsResult;
use crate::limiter::limit_speed;
use crate::obstacle::Obstacle;
use crate::rules;
use crate::vector::Vector3;

pub const DEFAULT_GOAL_WEIGHT: f64 = 0.01;

/// Kinematic state of one agent as seen by the rest of the flock during a
/// tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub position: Vector3,
    pub velocity: Vector3,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub position: Vector3,
    #[serde(default = "default_goal_weight")]
    pub weight: f64,
}

fn default_goal_weight() -> f64 {
    DEFAULT_GOAL_WEIGHT
}

impl Goal {
    pub fn new(position: Vector3) -> Self {
        Self {
            position,
            weight: DEFAULT_GOAL_WEIGHT,
        }
    }

    pub fn with_weight(position: Vector3, weight: f64) -> Self {
        Self { position, weight }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Boid {
    position: Vector3,
    velocity: Vector3,
    config: BoidConfig,
    boundary: Option<Arc<Boundary>>,
    obstacles: Vec<Arc<dyn Obstacle>>,
    goal: Option<Goal>,
}

impl Boid {
    pub fn new() -> Self {
        Self::with_config(BoidConfig::default())
    }

    pub fn with_config(config: BoidConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn velocity(&self) -> Vector3 {
        self.velocity
    }

    pub fn config(&self) -> &BoidConfig {
        &self.config
    }

    pub fn state(&self) -> AgentState {
        AgentState {
            position: self.position,
            velocity: self.velocity,
        }
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vector3) {
        self.velocity = velocity;
    }

    pub fn set_config(&mut self, config: BoidConfig) {
        self.config = config;
    }

    pub fn boundary(&self) -> Option<&Boundary> {
        self.boundary.as_deref()
    }

    pub fn set_boundary(&mut self, boundary: Arc<Boundary>) {
        self.boundary = Some(boundary);
    }

    pub fn unset_boundary(&mut self) {
        self.boundary = None;
    }

    pub fn obstacles(&self) -> &[Arc<dyn Obstacle>] {
        &self.obstacles
    }

    pub fn add_obstacle(&mut self, obstacle: Arc<dyn Obstacle>) {
        self.obstacles.push(obstacle);
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }

    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    pub fn set_goal(&mut self, goal: Goal) {
        self.goal = Some(goal);
    }

    pub fn unset_goal(&mut self) {
        self.goal = None;
    }

    /// Velocity this agent will have after the velocity phase, computed
    /// against `snapshot` without touching `self`. `me` is this agent's index
    /// in the snapshot.
    pub fn next_velocity(&self, me: usize, snapshot: &[AgentState]) -> BoidsResult<Vector3> {
        let mut velocity = self.velocity;
        velocity.add_in_place(rules::cohesion(me, snapshot, self.config.clumping_weight)?);
        velocity.add_in_place(rules::separation(me, snapshot, self.config.min_distance)?);
        velocity.add_in_place(rules::alignment(me, snapshot, self.config.schooling_weight)?);

        let state = self.state();
        if let Some(boundary) = &self.boundary {
            velocity.add_in_place(boundary.correction(state.position));
        }
        for obstacle in &self.obstacles {
            velocity.add_in_place(obstacle.correction(&state));
        }
        if let Some(goal) = &self.goal {
            velocity.add_in_place(rules::tend_to_place(&state, goal));
        }

        Ok(limit_speed(velocity, self.config.max_speed))
    }

    /// Velocity phase for this agent. On error the velocity is left as it was.
    pub fn compute_velocity(&mut self, me: usize, snapshot: &[AgentState]) -> BoidsResult<()> {
        self.velocity = self.next_velocity(me, snapshot)?;
        Ok(())
    }

    /// Position phase: integrates the velocity produced by the velocity phase.
    pub fn advance(&mut self) {
        self.position.add_in_place(self.velocity);
    }
}
