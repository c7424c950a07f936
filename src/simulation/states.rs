//! Core state types for the particle life simulation.
//!
//! - `Particle`        a single colored point mass
//! - `ParticleSystem`  the flat collection of all particles plus the group registry
//! - `Bounds`          the drawable surface the particles live on
//!
//! Groups are contiguous index ranges into the flat collection, so every
//! particle belongs to exactly one group and is stored exactly once.

use std::ops::Range;

use nalgebra::Vector2;
use rand::Rng;
use serde::Deserialize;

pub type NVec2 = Vector2<f64>;

/// Color tag shared by every particle of a group
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ParticleColor {
    Red,
    Blue,
    Green,
    White,
    Yellow,
    Purple,
}

impl ParticleColor {
    pub fn name(self) -> &'static str {
        match self {
            ParticleColor::Red => "red",
            ParticleColor::Blue => "blue",
            ParticleColor::Green => "green",
            ParticleColor::White => "white",
            ParticleColor::Yellow => "yellow",
            ParticleColor::Purple => "purple",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: NVec2, // position, surface pixels (origin top-left, y down)
    pub v: NVec2, // velocity, pixels per tick
    pub color: ParticleColor,
    pub m: f64, // mass
}

impl Particle {
    /// Particle at rest with unit mass
    pub fn at(x: f64, y: f64, color: ParticleColor) -> Self {
        Self {
            x: NVec2::new(x, y),
            v: NVec2::zeros(),
            color,
            m: 1.0,
        }
    }
}

/// Width/height of the drawable surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Length of the surface diagonal
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }
}

/// Handle to a group inside a [`ParticleSystem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub usize);

#[derive(Debug, Clone)]
pub struct Group {
    pub color: ParticleColor,
    pub range: Range<usize>, // indices into `ParticleSystem::particles`
}

impl Group {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>, // every particle of every group
    groups: Vec<Group>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `count` particles of `color` uniformly over `[0, width) x [0, height)`
    /// at rest with unit mass, and register them as a new group
    pub fn create_group<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        color: ParticleColor,
        bounds: Bounds,
        rng: &mut R,
    ) -> GroupId {
        let start = self.particles.len();
        self.particles.reserve(count);
        for _ in 0..count {
            let x = sample_axis(rng, bounds.width);
            let y = sample_axis(rng, bounds.height);
            self.particles.push(Particle::at(x, y, color));
        }
        self.push_group(color, start)
    }

    /// Register already-placed particles as a new group
    pub fn add_group(&mut self, color: ParticleColor, particles: Vec<Particle>) -> GroupId {
        let start = self.particles.len();
        self.particles.extend(particles);
        self.push_group(color, start)
    }

    fn push_group(&mut self, color: ParticleColor, start: usize) -> GroupId {
        let id = GroupId(self.groups.len());
        self.groups.push(Group {
            color,
            range: start..self.particles.len(),
        });
        id
    }

    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Particles of a single group
    pub fn members(&self, id: GroupId) -> &[Particle] {
        &self.particles[self.groups[id.0].range.clone()]
    }

    /// First group carrying `color`, if any
    pub fn find_group(&self, color: ParticleColor) -> Option<GroupId> {
        self.groups.iter().position(|g| g.color == color).map(GroupId)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

// random_range panics on an empty range; a zero-sized axis pins everything to 0
fn sample_axis<R: Rng + ?Sized>(rng: &mut R, extent: f64) -> f64 {
    if extent > 0.0 {
        rng.random_range(0.0..extent)
    } else {
        0.0
    }
}
