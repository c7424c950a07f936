//! Built-in behavior presets ("models")
//!
//! A preset is a fixed table of (source color, target color, g) entries
//! plus the integration mode. It is written against colors so it can be
//! declared before any particle exists, and resolved into a [`RuleSet`]
//! once the groups have been created.

use crate::configuration::config::ConfigError;
use super::forces::RuleSet;
use super::integrator::IntegrationMode;
use super::states::{ParticleColor, ParticleSystem};

use ParticleColor::{Blue, Green, Red, White};

/// One rule, addressed by group color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRule {
    pub source: ParticleColor,
    pub target: ParticleColor,
    pub g: f64,
}

#[derive(Debug, Clone)]
pub struct Preset {
    pub name: String,
    pub mode: IntegrationMode,
    pub rules: Vec<ColorRule>,
}

pub const PRESET_NAMES: [&str; 4] = ["nuclei", "nuclei2", "alive", "fireflies"];

impl Preset {
    pub fn new(name: impl Into<String>, mode: IntegrationMode, table: &[(ParticleColor, ParticleColor, f64)]) -> Self {
        Self {
            name: name.into(),
            mode,
            rules: table
                .iter()
                .map(|&(source, target, g)| ColorRule { source, target, g })
                .collect(),
        }
    }

    /// Look up a built-in preset by name
    pub fn builtin(name: &str) -> Result<Self, ConfigError> {
        match name {
            "nuclei" => Ok(Self::nuclei()),
            "nuclei2" => Ok(Self::nuclei2()),
            "alive" => Ok(Self::alive()),
            "fireflies" => Ok(Self::fireflies()),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }

    /// Basic nuclei: red clumps, white and blue orbit around it
    pub fn nuclei() -> Self {
        Self::new("nuclei", IntegrationMode::Damped, &[
            (White, Red, -0.1),
            (Red, Red, -0.1),
            (Red, Blue, -0.01),
            (Blue, Red, 0.01),
        ])
    }

    pub fn nuclei2() -> Self {
        Self::new("nuclei2", IntegrationMode::Damped, &[
            (White, White, 4.0),
            (Blue, Blue, 4.0),
            (White, Blue, -2.0),
            (Blue, White, -2.0),
            (White, Green, -3.0),
            (Green, Green, -1.0),
            (White, Red, -1.0),
            (Red, Red, -0.01),
            (Red, Blue, 0.1),
        ])
    }

    /// Default model
    pub fn alive() -> Self {
        Self::new("alive", IntegrationMode::Damped, &[
            (White, White, 2.0),
            (Blue, Blue, 4.0),
            (White, Blue, -2.0),
            (Blue, White, -5.0),
            (Blue, Red, -1.0),
        ])
    }

    /// Dense table, velocity accumulates over the whole tick
    pub fn fireflies() -> Self {
        Self::new("fireflies", IntegrationMode::Additive, &[
            (White, White, 0.6),
            (White, Red, 0.965),
            (White, Green, -0.565),
            (White, Blue, 0.375),

            (Red, Red, -0.635),
            (Red, White, -0.31),
            (Red, Green, 0.65),
            (Red, Blue, -0.315),

            (Green, Green, -0.205),
            (Green, Red, 0.0),
            (Green, White, -0.445),
            (Green, White, 0.68),

            (Blue, Blue, 1.0),
            (Blue, Green, -0.495),
            (Blue, Red, 0.0),
            (Blue, White, 1.0),
        ])
    }

    /// Bind every color to its group in `sys`
    pub fn resolve(&self, sys: &ParticleSystem) -> Result<RuleSet, ConfigError> {
        let mut set = RuleSet::new(self.mode);
        for rule in &self.rules {
            if !rule.g.is_finite() {
                return Err(ConfigError::NonFiniteCoefficient {
                    from: rule.source.name(),
                    to: rule.target.name(),
                });
            }
            let source = sys.find_group(rule.source).ok_or(ConfigError::MissingGroup(rule.source.name()))?;
            let target = sys.find_group(rule.target).ok_or(ConfigError::MissingGroup(rule.target.name()))?;
            set = set.with(source, target, rule.g);
        }
        Ok(set)
    }
}
