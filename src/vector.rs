use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BoidsError, BoidsResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    pub fn divide(self, k: f64) -> BoidsResult<Self> {
        if k == 0.0 {
            return Err(BoidsError::DivideByZero);
        }
        Ok(Self::new(self.x / k, self.y / k, self.z / k))
    }

    // In-place forms for summation loops over the whole flock.

    pub fn add_in_place(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }

    pub fn sub_in_place(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }

    pub fn scale_in_place(&mut self, k: f64) {
        self.x *= k;
        self.y *= k;
        self.z *= k;
    }

    pub fn divide_in_place(&mut self, k: f64) -> BoidsResult<()> {
        if k == 0.0 {
            return Err(BoidsError::DivideByZero);
        }
        self.x /= k;
        self.y /= k;
        self.z /= k;
        Ok(())
    }

    pub fn magnitude_sq(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn magnitude(self) -> f64 {
        self.magnitude_sq().sqrt()
    }

    /// Direction of `self` with magnitude 1. A zero vector has no direction
    /// and yields [`BoidsError::UndefinedDirection`].
    pub fn unit(self) -> BoidsResult<Self> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(BoidsError::UndefinedDirection);
        }
        Ok(Self::new(
            self.x / magnitude,
            self.y / magnitude,
            self.z / magnitude,
        ))
    }

    pub fn distance_to(self, other: Self) -> f64 {
        other.sub(self).magnitude()
    }

    /// Component-wise comparison under a relative tolerance: each pair must
    /// satisfy `|a - b| <= relative_tolerance * max(|a|, |b|)`.
    pub fn approx_eq(self, other: Self, relative_tolerance: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (a - b).abs() <= relative_tolerance * a.abs().max(b.abs()))
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
