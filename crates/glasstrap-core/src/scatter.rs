#![forbid(unsafe_code)]

//! Scatter generator: random shatter targets.
//!
//! Each call to [`ScatterGenerator::sample`] is an independent draw:
//! - distance uniform in `[min_distance, max_distance)`,
//! - direction uniform over the full circle,
//! - rotation uniform in `[-max_rotation_deg, max_rotation_deg)`.
//!
//! Fragments are not kept apart; overlap is allowed.

use std::f32::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::geometry::Transform;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance and rotation bands for scatter targets.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScatterConfig {
    /// Closest a scattered fragment lands to home (default: 90).
    pub min_distance: f32,
    /// Farthest a scattered fragment lands from home (default: 200).
    pub max_distance: f32,
    /// Rotation band half-width in degrees (default: 55).
    pub max_rotation_deg: f32,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            min_distance: 90.0,
            max_distance: 200.0,
            max_rotation_deg: 55.0,
        }
    }
}

/// Pseudo-random source of scatter transforms.
#[derive(Debug, Clone)]
pub struct ScatterGenerator {
    config: ScatterConfig,
    rng: SmallRng,
}

impl ScatterGenerator {
    /// Generator seeded from the operating system.
    #[must_use]
    pub fn from_os_rng(config: ScatterConfig) -> Self {
        Self {
            config,
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Deterministic generator for tests and replays.
    #[must_use]
    pub fn seeded(config: ScatterConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub const fn config(&self) -> ScatterConfig {
        self.config
    }

    /// Draw one scatter target.
    pub fn sample(&mut self) -> Transform {
        let ScatterConfig {
            min_distance,
            max_distance,
            max_rotation_deg,
        } = self.config;

        let angle = self.rng.random_range(0.0..TAU);
        let distance = if max_distance > min_distance {
            self.rng.random_range(min_distance..max_distance)
        } else {
            min_distance
        };
        let rotation_deg = if max_rotation_deg > 0.0 {
            self.rng.random_range(-max_rotation_deg..max_rotation_deg)
        } else {
            0.0
        };

        Transform::new(
            angle.cos() * distance,
            angle.sin() * distance,
            rotation_deg,
        )
    }
}
