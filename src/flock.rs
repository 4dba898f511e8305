use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::boid::{AgentState, Boid};
use crate::boundary::Boundary;
use crate::error::{BoidsError, BoidsResult};
use crate::obstacle::Obstacle;
use crate::vector::Vector3;

#[derive(Clone, Debug, PartialEq)]
pub struct AgentFailure {
    pub index: usize,
    pub error: BoidsError,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub failures: Vec<AgentFailure>,
}

impl TickReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Owns the agent set and drives ticks.
///
/// A tick is two phases over the whole flock. The velocity phase evaluates
/// every agent against one snapshot taken before the tick and only writes the
/// results back once all agents are done. The position phase then integrates
/// each agent with its new velocity.
#[derive(Clone, Debug, Default)]
pub struct Flock {
    boids: Vec<Boid>,
    tick_index: u64,
}

impl Flock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boids(boids: Vec<Boid>) -> Self {
        debug!(count = boids.len(), "flock created");
        Self {
            boids,
            tick_index: 0,
        }
    }

    pub fn add_boid(&mut self, boid: Boid) {
        self.boids.push(boid);
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn boids_mut(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    pub fn tick_index(&self) -> u64 {
        self.tick_index
    }

    pub fn snapshot(&self) -> Vec<AgentState> {
        self.boids.iter().map(Boid::state).collect()
    }

    pub fn attach_boundary(&mut self, boundary: Arc<Boundary>) {
        for boid in &mut self.boids {
            boid.set_boundary(Arc::clone(&boundary));
        }
    }

    pub fn attach_obstacle(&mut self, obstacle: Arc<dyn Obstacle>) {
        for boid in &mut self.boids {
            boid.add_obstacle(Arc::clone(&obstacle));
        }
    }

    /// Deterministically places every agent inside `[min, max]` and gives it
    /// a velocity with components in `[-speed, speed]`.
    pub fn scatter(&mut self, seed: u64, min: Vector3, max: Vector3, speed: f64) {
        let (min, extent) = (min.to_array(), max.sub(min).to_array());
        for (i, boid) in self.boids.iter_mut().enumerate() {
            let mut position = [0.0; 3];
            let mut velocity = [0.0; 3];
            for axis in 0..3 {
                position[axis] = min[axis] + extent[axis] * hash_unit(seed, i as u64, axis as u64);
                velocity[axis] = (hash_unit(seed, i as u64, 3 + axis as u64) * 2.0 - 1.0) * speed;
            }
            boid.set_position(Vector3::from_array(position));
            boid.set_velocity(Vector3::from_array(velocity));
        }
        debug!(seed, count = self.boids.len(), "flock scattered");
    }

    pub fn tick(&mut self) -> TickReport {
        self.tick_index = self.tick_index.wrapping_add(1);
        let failures = self.velocity_phase();
        self.position_phase();

        trace!(
            tick = self.tick_index,
            failed = failures.len(),
            "tick complete"
        );
        TickReport {
            tick: self.tick_index,
            failures,
        }
    }

    /// Updates every velocity from one pre-phase snapshot. Agents whose
    /// update fails keep their previous velocity and are reported.
    pub fn velocity_phase(&mut self) -> Vec<AgentFailure> {
        let snapshot = self.snapshot();
        let next = self.next_velocities(&snapshot);

        let mut failures = Vec::new();
        for (index, (boid, result)) in self.boids.iter_mut().zip(next).enumerate() {
            match result {
                Ok(velocity) => boid.set_velocity(velocity),
                Err(error) => {
                    warn!(index, %error, "velocity update failed, keeping previous velocity");
                    failures.push(AgentFailure { index, error });
                }
            }
        }
        failures
    }

    pub fn position_phase(&mut self) {
        for boid in &mut self.boids {
            boid.advance();
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn next_velocities(&self, snapshot: &[AgentState]) -> Vec<BoidsResult<Vector3>> {
        self.boids
            .iter()
            .enumerate()
            .map(|(i, boid)| boid.next_velocity(i, snapshot))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn next_velocities(&self, snapshot: &[AgentState]) -> Vec<BoidsResult<Vector3>> {
        use rayon::prelude::*;

        self.boids
            .par_iter()
            .enumerate()
            .map(|(i, boid)| boid.next_velocity(i, snapshot))
            .collect()
    }
}

// splitmix64 finalizer over (seed, index, salt), mapped to [0, 1).
fn hash_unit(seed: u64, index: u64, salt: u64) -> f64 {
    let mut z = seed
        .wrapping_add(index.wrapping_mul(0x9e37_79b9_7f4a_7c15))
        .wrapping_add(salt.wrapping_mul(0xbf58_476d_1ce4_e5b9));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> 11) as f64 / (1u64 << 53) as f64
}
