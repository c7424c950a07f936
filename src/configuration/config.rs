//! Configuration types for loading particle life scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. Every section is optional; an empty file gives the default
//! scenario (four groups of 200 on a 1280x720 surface running `alive`).
//!
//! - [`SurfaceConfig`]    – initial surface size, before the window reports its own
//! - [`ParametersConfig`] – tick rate, cutoff fraction, disc size, seed
//! - [`GroupConfig`]      – one colored group and its particle count
//! - [`RulesConfig`]      – a custom rule table, used instead of a named preset
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! surface:
//!   width: 1280.0
//!   height: 720.0
//!
//! parameters:
//!   frame_rate: 60.0            # ticks per second
//!   interaction_fraction: 0.16  # cutoff radius / surface diagonal
//!   particle_size: 5.0          # disc diameter in pixels
//!   seed: 42                    # omit for a random start
//!
//! groups:
//!   - { color: red, count: 200 }
//!   - { color: blue, count: 200 }
//!
//! preset: nuclei                # or a custom table:
//! # rules:
//! #   mode: "additive"
//! #   list:
//! #     - { source: red, target: blue, g: -0.5 }
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::integrator::IntegrationMode;
use crate::simulation::params::{Parameters, DEFAULT_FRAME_RATE, DEFAULT_INTERACTION_FRACTION, DEFAULT_PARTICLE_SIZE, VELOCITY_FACTOR};
use crate::simulation::presets::Preset;
use crate::simulation::states::{Bounds, ParticleColor};

pub const DEFAULT_PRESET: &str = "alive";
pub const DEFAULT_GROUP_SIZE: usize = 200;

/// Rejected configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    #[error("no group with color `{0}` for the active rules")]
    MissingGroup(&'static str),

    #[error("color `{0}` is used by more than one group")]
    DuplicateGroup(&'static str),

    #[error("coefficient for {from} -> {to} is not finite")]
    NonFiniteCoefficient { from: &'static str, to: &'static str },

    #[error("surface size must be positive, got {width}x{height}")]
    InvalidSurface { width: f64, height: f64 },

    #[error("parameter `{name}` must be finite and positive, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

#[derive(Deserialize, Debug, Clone)]
pub struct SurfaceConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ParametersConfig {
    pub frame_rate: Option<f64>,
    pub interaction_fraction: Option<f64>,
    pub particle_size: Option<f64>,
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GroupConfig {
    pub color: ParticleColor,
    pub count: usize,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RuleConfig {
    pub source: ParticleColor,
    pub target: ParticleColor,
    pub g: f64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RulesConfig {
    #[serde(default = "default_custom_name")]
    pub name: String,
    pub mode: IntegrationMode,
    pub list: Vec<RuleConfig>,
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default = "default_groups")]
    pub groups: Vec<GroupConfig>,
    pub preset: Option<String>, // built-in preset name, ignored when `rules` is set
    pub rules: Option<RulesConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            parameters: ParametersConfig::default(),
            groups: default_groups(),
            preset: None,
            rules: None,
        }
    }
}

fn default_custom_name() -> String {
    "custom".to_string()
}

fn default_groups() -> Vec<GroupConfig> {
    [ParticleColor::Red, ParticleColor::Blue, ParticleColor::Green, ParticleColor::White]
        .into_iter()
        .map(|color| GroupConfig {
            color,
            count: DEFAULT_GROUP_SIZE,
        })
        .collect()
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

impl ScenarioConfig {
    pub fn bounds(&self) -> Result<Bounds, ConfigError> {
        let SurfaceConfig { width, height } = self.surface;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidSurface { width, height });
        }
        Ok(Bounds::new(width, height))
    }

    /// Runtime parameters, defaults filled in
    pub fn parameters(&self) -> Result<Parameters, ConfigError> {
        let p = &self.parameters;
        Ok(Parameters {
            frame_rate: positive("frame_rate", p.frame_rate.unwrap_or(DEFAULT_FRAME_RATE))?,
            interaction_fraction: positive("interaction_fraction", p.interaction_fraction.unwrap_or(DEFAULT_INTERACTION_FRACTION))?,
            velocity_factor: VELOCITY_FACTOR,
            particle_size: positive("particle_size", p.particle_size.unwrap_or(DEFAULT_PARTICLE_SIZE))?,
            seed: p.seed,
        })
    }

    /// Active preset: the custom table if present, else the named built-in
    pub fn preset(&self) -> Result<Preset, ConfigError> {
        if let Some(rules) = &self.rules {
            let table: Vec<_> = rules.list.iter().map(|r| (r.source, r.target, r.g)).collect();
            return Ok(Preset::new(rules.name.clone(), rules.mode, &table));
        }
        Preset::builtin(self.preset.as_deref().unwrap_or(DEFAULT_PRESET))
    }

    /// Groups must have distinct colors, since rules address them by color
    pub fn check_groups(&self) -> Result<(), ConfigError> {
        for (i, g) in self.groups.iter().enumerate() {
            if self.groups[..i].iter().any(|other| other.color == g.color) {
                return Err(ConfigError::DuplicateGroup(g.color.name()));
            }
        }
        Ok(())
    }
}
