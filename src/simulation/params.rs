//! Numerical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - tick rate of the frame driver,
//! - interaction cutoff as a fraction of the surface diagonal,
//! - velocity blend factor shared by both integration modes,
//! - drawn disc size and the optional random seed

pub const DEFAULT_FRAME_RATE: f64 = 60.0;
pub const DEFAULT_INTERACTION_FRACTION: f64 = 80.0 / 500.0;
pub const DEFAULT_PARTICLE_SIZE: f64 = 5.0;
pub const VELOCITY_FACTOR: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub frame_rate: f64, // ticks per second
    pub interaction_fraction: f64, // cutoff radius / surface diagonal
    pub velocity_factor: f64, // 0.5 in both damped and additive updates
    pub particle_size: f64, // disc diameter in pixels
    pub seed: Option<u64>, // deterministic seed
}

impl Parameters {
    /// Minimum time between two ticks, in milliseconds
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.frame_rate
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            frame_rate: DEFAULT_FRAME_RATE,
            interaction_fraction: DEFAULT_INTERACTION_FRACTION,
            velocity_factor: VELOCITY_FACTOR,
            particle_size: DEFAULT_PARTICLE_SIZE,
            seed: None,
        }
    }
}
