//! Build fully-initialized particle life scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - numerical parameters (`Parameters`)
//! - surface bounds (`Bounds`)
//! - particle state (`ParticleSystem` with every group spawned)
//! - the active preset, resolved to a `RuleSet`
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! frame driver and the renderer.

use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::{ConfigError, ScenarioConfig};
use crate::simulation::forces::RuleSet;
use crate::simulation::params::Parameters;
use crate::simulation::presets::Preset;
use crate::simulation::states::{Bounds, ParticleSystem};

/// Bevy resource holding the whole simulation state
#[derive(Resource, Debug)]
pub struct Scenario {
    pub parameters: Parameters,
    pub bounds: Bounds,
    pub system: ParticleSystem,
    pub preset_name: String,
    pub rules: RuleSet,
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self, ConfigError> {
        let bounds = cfg.bounds()?;
        let parameters = cfg.parameters()?;
        let preset = cfg.preset()?;
        cfg.check_groups()?;

        let mut rng = match parameters.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        // Groups in config order; their order is also the draw order
        let mut system = ParticleSystem::new();
        for g in &cfg.groups {
            system.create_group(g.count, g.color, bounds, &mut rng);
        }

        Self::assemble(parameters, bounds, system, &preset)
    }

    /// Scenario over an already-populated particle system
    pub fn assemble(
        parameters: Parameters,
        bounds: Bounds,
        system: ParticleSystem,
        preset: &Preset,
    ) -> Result<Self, ConfigError> {
        let rules = preset.resolve(&system)?;
        Ok(Self {
            parameters,
            bounds,
            system,
            preset_name: preset.name.clone(),
            rules,
        })
    }

    /// One-line description for the log
    pub fn summary(&self) -> String {
        let groups: Vec<String> = self
            .system
            .groups()
            .iter()
            .map(|g| format!("{} {}", g.len(), g.color.name()))
            .collect();
        format!(
            "preset `{}` ({} rules, {} mode), groups [{}] on {}x{}",
            self.preset_name,
            self.rules.rules().len(),
            self.rules.mode.name(),
            groups.join(", "),
            self.bounds.width,
            self.bounds.height,
        )
    }

    /// One simulation tick: run every rule of the active preset once
    pub fn tick(&mut self) {
        let Scenario {
            parameters,
            bounds,
            system,
            rules,
            ..
        } = self;
        rules.apply(system, *bounds, parameters);
    }

    /// Host surface changed size; the cutoff and the bounce walls follow
    pub fn resize(&mut self, width: f64, height: f64) {
        self.bounds = Bounds::new(width, height);
    }
}
