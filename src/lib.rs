//! Three-dimensional boids: cohesion, separation and alignment steering with
//! speed limiting, box containment and spherical obstacle avoidance.
//!
//! [`Flock::tick`] runs the velocity phase for every agent against one
//! snapshot, then the position phase. [`Sim`] wraps a flock for WebAssembly
//! hosts.

pub mod boid;
pub mod boundary;
pub mod config;
pub mod error;
pub mod flock;
pub mod limiter;
pub mod obstacle;
pub mod rules;
pub mod vector;

use std::sync::Arc;

use tracing::warn;
use wasm_bindgen::prelude::*;

pub use boid::{AgentState, Boid, Goal};
pub use boundary::Boundary;
pub use config::{BoidConfig, FlockConfig, ScatterConfig};
pub use error::{BoidsError, BoidsResult};
pub use flock::{AgentFailure, Flock, TickReport};
pub use limiter::limit_speed;
pub use obstacle::{Obstacle, SphereObstacle};
pub use vector::Vector3;

const DEFAULT_BOUNDARY_STRENGTH: f64 = 10.0;
const MIN_EXTENT: f64 = 1.0e-6;

#[wasm_bindgen]
pub struct Sim {
    flock: Flock,
    bounds: Vector3,
}

#[wasm_bindgen]
impl Sim {
    /// `seed == 0` draws a seed from the platform entropy source.
    #[wasm_bindgen(constructor)]
    pub fn new(count: usize, seed: u32, width: f64, height: f64, depth: f64) -> Sim {
        let bounds = sanitize_bounds(width, height, depth);
        let mut flock = Flock::with_boids(vec![Boid::new(); count]);
        flock.scatter(resolve_seed(seed), Vector3::ZERO, bounds, 1.0);

        let mut sim = Sim { flock, bounds };
        sim.attach_bounds();
        sim
    }

    /// Runs one tick and returns how many agents failed their velocity update.
    pub fn step(&mut self) -> usize {
        self.flock.tick().failures.len()
    }

    pub fn set_bounds(&mut self, width: f64, height: f64, depth: f64) {
        self.bounds = sanitize_bounds(width, height, depth);
        self.attach_bounds();
    }

    pub fn set_tuning(
        &mut self,
        clumping_weight: f64,
        min_distance: f64,
        schooling_weight: f64,
        max_speed: f64,
    ) {
        let mut config = BoidConfig {
            clumping_weight,
            min_distance,
            schooling_weight,
            max_speed,
        };
        config.sanitize();
        for boid in self.flock.boids_mut() {
            boid.set_config(config);
        }
    }

    pub fn add_sphere_obstacle(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        strength: f64,
        full_strength_radius: f64,
        zero_effect_radius: f64,
    ) -> Result<(), String> {
        let obstacle = SphereObstacle::new(
            Vector3::new(x, y, z),
            strength,
            full_strength_radius,
            zero_effect_radius,
        )
        .map_err(|err| err.to_string())?;
        self.flock.attach_obstacle(Arc::new(obstacle));
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.flock.len()
    }

    /// Flat `[x0, y0, z0, x1, ...]` buffer for rendering.
    pub fn positions(&self) -> Vec<f32> {
        flatten(self.flock.boids().iter().map(Boid::position))
    }

    pub fn velocities(&self) -> Vec<f32> {
        flatten(self.flock.boids().iter().map(Boid::velocity))
    }
}

impl Sim {
    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    fn attach_bounds(&mut self) {
        let boundary = Boundary::new(Vector3::ZERO, self.bounds, DEFAULT_BOUNDARY_STRENGTH)
            .unwrap_or_default();
        self.flock.attach_boundary(Arc::new(boundary));
    }
}

#[wasm_bindgen]
pub fn wasm_loaded_message() -> String {
    "WASM loaded".to_string()
}

fn sanitize_bounds(width: f64, height: f64, depth: f64) -> Vector3 {
    let extent = |value: f64| {
        if value.is_finite() {
            value.max(MIN_EXTENT)
        } else {
            MIN_EXTENT
        }
    };
    Vector3::new(extent(width), extent(height), extent(depth))
}

fn resolve_seed(seed: u32) -> u64 {
    if seed != 0 {
        return u64::from(seed);
    }
    match getrandom::u64() {
        Ok(seed) => seed,
        Err(err) => {
            warn!(%err, "entropy source unavailable, using fixed seed");
            1
        }
    }
}

fn flatten(vectors: impl Iterator<Item = Vector3>) -> Vec<f32> {
    vectors
        .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
        .collect()
}
